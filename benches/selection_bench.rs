use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use index_trail::selection::Selection;
use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn random_gather(n: usize, seed: u64) -> Array1<usize> {
    let mut idxs: Vec<usize> = (0..2 * n).collect();
    idxs.shuffle(&mut SmallRng::seed_from_u64(seed));
    idxs.truncate(n);
    Array1::from(idxs)
}

fn random_mask(n: usize, seed: u64) -> Array1<bool> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Array1::from_iter((0..n).map(|_| rng.gen_bool(0.5)))
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    for &n in &[1_000usize, 100_000] {
        let gather = random_gather(n, 42);
        let mask = random_mask(n, 43);

        group.bench_with_input(BenchmarkId::new("from_indices", n), &n, |b, _| {
            b.iter(|| {
                let sel = Selection::from_indices(&gather).unwrap();
                black_box(sel);
            });
        });

        group.bench_with_input(BenchmarkId::new("from_mask", n), &n, |b, _| {
            b.iter(|| {
                let sel = Selection::from_mask(&mask).unwrap();
                black_box(sel);
            });
        });

        let sel = Selection::from_indices(&gather).unwrap();
        let lookups: Vec<usize> = gather.iter().copied().step_by(7).collect();

        group.bench_with_input(BenchmarkId::new("forward_lookup", n), &n, |b, _| {
            b.iter(|| {
                for k in &lookups {
                    black_box(sel.get(k));
                }
            });
        });

        let inv = sel.inverse();
        group.bench_with_input(BenchmarkId::new("inverse_lookup", n), &n, |b, _| {
            b.iter(|| {
                for j in 0..lookups.len() {
                    black_box(inv.get(&j));
                }
            });
        });

        // Chain two halving masks through the composite.
        let half1 = random_mask(sel.len(), 44);
        let step1 = Selection::from_mask(&half1).unwrap();
        let half2 = random_mask(step1.len(), 45);

        group.bench_with_input(BenchmarkId::new("compose_chain", n), &n, |b, _| {
            b.iter(|| {
                let composed = sel.then(&step1).unwrap();
                let composed = composed.then_mask(&half2).unwrap();
                black_box(composed);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
