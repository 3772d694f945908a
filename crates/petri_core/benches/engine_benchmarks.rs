use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petri_core::{Board, NullRenderer, PartitionAxis, RunConfig, Simulation};

fn soup(rows: usize, cols: usize, iters: u64) -> Board {
    // Deterministic ~1/3 density fill
    let mut seed: u64 = 42;
    let mut cells = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (seed >> 33) % 3 == 0 {
                cells.push((r, c));
            }
        }
    }
    Board::new(rows, cols, iters).with_cells(cells)
}

fn bench_run(c: &mut Criterion, name: &str, threads: usize, axis: PartitionAxis) {
    let board = soup(256, 256, 20);
    let config = RunConfig {
        threads,
        axis,
        ..Default::default()
    };
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut sim = Simulation::new(&board, &config).unwrap();
            black_box(sim.run(&NullRenderer).unwrap())
        })
    });
}

fn bench_single_worker(c: &mut Criterion) {
    bench_run(c, "run_256x256_20_rounds_1_worker", 1, PartitionAxis::Rows);
}

fn bench_four_row_workers(c: &mut Criterion) {
    bench_run(c, "run_256x256_20_rounds_4_row_workers", 4, PartitionAxis::Rows);
}

fn bench_four_column_workers(c: &mut Criterion) {
    bench_run(c, "run_256x256_20_rounds_4_column_workers", 4, PartitionAxis::Columns);
}

criterion_group!(
    benches,
    bench_single_worker,
    bench_four_row_workers,
    bench_four_column_workers
);
criterion_main!(benches);
