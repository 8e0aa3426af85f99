// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Board basics.
//!
//! Drop a few shapes on a board, split the composite by grabbing a piece, and watch the
//! orphan go home.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p area_builder_demos --example board_basics`

use area_builder_board::{Board, BoardConfig, BoardId, Color, MovableShape, Scene, ShapeId};
use kurbo::{Point, Size};
use log::info;

const UNIT: f64 = 32.0;

fn settle(scene: &mut Scene) {
    for _ in 0..60 {
        scene.step(1.0 / 30.0);
    }
}

fn drop_at(scene: &mut Scene, id: ShapeId, at: Point) -> Option<BoardId> {
    scene.grab(id);
    scene.drag(id, at);
    let board = scene.release(id);
    settle(scene);
    board
}

fn report(scene: &mut Scene, board: BoardId, what: &str) {
    let Some(b) = scene.board_mut(board) else {
        return;
    };
    println!("{what}: {:?}", b.measurement());
    for event in b.take_events() {
        info!("  {event:?}");
    }
    for (i, exterior) in b.composite_shape().exterior().iter().enumerate() {
        println!("  exterior {i}: {:?}", b.loop_to_world(exterior));
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new();
    let board = scene.add_board(Board::new(BoardConfig::new(
        Size::new(10.0 * UNIT, 6.0 * UNIT),
        UNIT,
        Point::new(200.0, 40.0),
    )));

    let orange = Color::rgb(255, 140, 0);
    let purple = Color::rgb(128, 0, 128);
    let home = Point::new(20.0, 40.0);
    let block = |w: f64, h: f64, color: Color| {
        MovableShape::new(Size::new(w * UNIT, h * UNIT), color, home)
    };
    let square = scene.add_shape(block(2.0, 2.0, orange));
    let wide = scene.add_shape(block(3.0, 2.0, purple));
    let bar = scene.add_shape(block(1.0, 2.0, orange));

    drop_at(&mut scene, square, Point::new(270.0, 110.0));
    report(&mut scene, board, "one square");
    drop_at(&mut scene, wide, Point::new(340.0, 110.0));
    report(&mut scene, board, "square and wide block");
    drop_at(&mut scene, bar, Point::new(440.0, 100.0));
    report(&mut scene, board, "three pieces");

    if let Some(b) = scene.board(board) {
        println!("orange share: {}", b.proportion_of_color(orange));
    }

    // Pulling out the middle piece leaves two islands until it is dropped.
    scene.grab(wide);
    report(&mut scene, board, "middle held");
    scene.drag(wide, Point::new(20.0, 300.0));
    scene.release(wide);
    report(&mut scene, board, "middle dropped off the board");
    settle(&mut scene);
    println!("shapes left in the scene: {}", scene.shapes().len());
}
