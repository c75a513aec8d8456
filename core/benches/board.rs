use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minefield_core::*;

const CENTER: ScreenPos = (2048, 2048);

fn bench_seeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeding");
    for (name, size, mines) in [
        ("reference", (10, 10), 20),
        ("expert", (30, 16), 99),
        ("dense", (30, 16), 400),
    ] {
        let config = GameConfig::new(size, mines).unwrap();
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                Board::with_generator(RejectionSampler::new(seed), black_box(config), CENTER)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let layout = MineLayout::from_mine_coords((200, 200), &[(199, 199)]).unwrap();
    let mut group = c.benchmark_group("flood");
    for (name, rule) in [
        ("one_level", RevealRule::OneLevel),
        ("cascade", RevealRule::Cascade),
    ] {
        let board = Board::from_layout(&layout, rule, CENTER);
        group.bench_function(name, |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| board.reveal_at(black_box((0, 0))).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_seeding, bench_flood);
criterion_main!(benches);
