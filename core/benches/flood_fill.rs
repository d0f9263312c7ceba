use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mnswpr_core::*;

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for size in BoardSize::ALL {
        let center = (size.rows() / 2, size.cols() / 2);
        group.bench_function(size.name(), |b| {
            b.iter_batched(
                || Game::with_seed(size, 0x5eed),
                |mut game| game.reveal(center),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_open_board(c: &mut Criterion) {
    // all mines packed into the top rows, so one reveal floods everything below them
    let mines: Vec<Coord2> = (0..BoardSize::Hard.mines())
        .map(|index| from_linear_index(index, BoardSize::Hard.cols()))
        .collect();
    let Ok(game) = Game::from_layout(BoardSize::Hard, &mines) else {
        return;
    };

    c.bench_function("flood_open_board", |b| {
        b.iter_batched(
            || game.clone(),
            |mut game| game.reveal((23, 23)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_first_reveal, bench_open_board);
criterion_main!(benches);
