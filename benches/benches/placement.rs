// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use area_builder_board::{Board, BoardConfig, Color, MovableShape, ShapeArena};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

const UNIT: f64 = 10.0;
const GRAY: Color = Color::rgb(128, 128, 128);

fn setup(n: i32) -> (Board, ShapeArena, Vec<area_builder_board::ShapeId>) {
    let side = f64::from(n) * UNIT;
    let board = Board::new(BoardConfig::new(Size::new(side, side), UNIT, Point::ZERO));
    let mut shapes = ShapeArena::new();
    // Every shape is dropped over the board's center so the ring search has to widen.
    let center = Point::new(side / 2.0, side / 2.0);
    let ids = (0..n * n)
        .map(|_| {
            let mut shape = MovableShape::unit_square(UNIT, GRAY, Point::new(-UNIT, -UNIT));
            shape.set_position(center);
            shapes.insert(shape)
        })
        .collect();
    (board, shapes, ids)
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_until_full");
    for &n in &[6, 10, 16] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("n{n}"), |b| {
            b.iter_batched(
                || setup(n),
                |(mut board, mut shapes, ids)| {
                    for id in ids {
                        if board.place_shape(&mut shapes, id) {
                            // Land immediately so the composite is re-traced per shape.
                            if let Some(shape) = shapes.get_mut(id) {
                                let dest = shape.destination();
                                shape.set_position(dest);
                            }
                            board.shape_landed(&mut shapes, id);
                        }
                    }
                    black_box(board.measurement());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_find_open_location(c: &mut Criterion) {
    let (mut board, mut shapes, ids) = setup(16);
    // Half-fill so searches from a corner must walk past occupied cells.
    for id in ids.into_iter().take(128) {
        if board.place_shape(&mut shapes, id) {
            if let Some(shape) = shapes.get_mut(id) {
                let dest = shape.destination();
                shape.set_position(dest);
            }
            board.shape_landed(&mut shapes, id);
        }
    }
    c.bench_function("find_open_location_16x16_half", |b| {
        b.iter(|| black_box(board.find_open_location(Point::ZERO, 2, 2)));
    });
}

criterion_group!(benches, bench_fill, bench_find_open_location);
criterion_main!(benches);
