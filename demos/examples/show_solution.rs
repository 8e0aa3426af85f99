// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show a solution.
//!
//! Play back a known layout with updates held until the last shape lands, check it
//! against a build challenge, then break it into unit squares and fade it away.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p area_builder_demos --example show_solution`

use area_builder_board::{
    Board, BoardConfig, BuildSpec, Color, DisplayToggles, Fraction, MovableShape, ReleaseMode,
    Scene,
};
use area_builder_grid::CellRect;
use kurbo::{Point, Size};

const UNIT: f64 = 32.0;

fn main() {
    env_logger::init();

    let toggles = DisplayToggles::default();
    toggles.show_grid.set(true);
    let mut scene = Scene::new();
    let board = scene.add_board(Board::new(
        BoardConfig::new(Size::new(8.0 * UNIT, 8.0 * UNIT), UNIT, Point::ZERO)
            .with_toggles(toggles.clone()),
    ));

    let red = Color::rgb(200, 30, 30);
    let blue = Color::rgb(30, 30, 200);
    // A ring of four blocks around a 3x3 hole.
    let layout = [
        (CellRect::new(1, 1, 4, 1), red),
        (CellRect::new(5, 1, 1, 4), blue),
        (CellRect::new(2, 5, 4, 1), red),
        (CellRect::new(1, 2, 1, 4), blue),
    ];
    let spec = BuildSpec::area_only(16)
        .with_perimeter(32)
        .with_proportion(red, Fraction::new(1, 2));

    if let Some(b) = scene.board_mut(board) {
        b.suspend_updates_for_block_placement();
    }
    let mut pieces = Vec::new();
    for (rect, color) in layout {
        let size = Size::new(f64::from(rect.width) * UNIT, f64::from(rect.height) * UNIT);
        let id = scene.add_shape(MovableShape::new(size, color, Point::new(-200.0, 0.0)));
        scene.place_directly(board, rect.column, rect.row, id);
        pieces.push(id);
    }
    for _ in 0..120 {
        scene.step(1.0 / 30.0);
    }

    let Some(b) = scene.board(board) else {
        return;
    };
    let outline = b.composite_shape();
    println!(
        "grid shown: {}, reading: {:?}, {} exterior / {} interior loops",
        b.show_grid(),
        b.measurement(),
        outline.exterior().len(),
        outline.interior().len()
    );
    println!("red share: {}", b.proportion_of_color(red));
    println!("challenge met: {}", spec.is_satisfied_by(b));

    let squares: usize = pieces
        .iter()
        .map(|&id| scene.replace_shape_with_unit_squares(board, id).len())
        .sum();
    println!("split into {squares} unit squares");

    scene.release_all(board, ReleaseMode::Fade);
    for _ in 0..30 {
        scene.step(1.0 / 30.0);
    }
    println!("shapes left after fading: {}", scene.shapes().len());
}
