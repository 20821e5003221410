use chart_core::geometry::{rings_contain, Point};
use chart_core::transform::stack::stack;
use chart_core::Topology;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_rows(n: usize, keys: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..keys).map(|k| ((i * 31 + k * 7) % 97) as f64 * 0.5).collect())
        .collect()
}

fn bench_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");
    for &n in &[1_000usize, 10_000usize] {
        for &k in &[5usize, 20usize] {
            let rows = gen_rows(n, k);
            let keys = (0..k).map(|i| format!("k{i}")).collect::<Vec<_>>();
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_k{k}")), &k, |b, _| {
                b.iter_batched(
                    || rows.clone(),
                    |r| { let _ = black_box(stack(&r, &keys, |row, i| row[i])); },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

/// Circle-like ring with `n` vertices.
fn gen_ring(n: usize) -> Vec<Point> {
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Point::new(500.0 + 400.0 * t.cos(), 500.0 + 400.0 * t.sin())
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("rings_contain");
    for &n in &[100usize, 1_000usize, 10_000usize] {
        let rings = vec![gen_ring(n)];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(rings_contain(&rings, black_box(Point::new(510.0, 480.0)))));
        });
    }
    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    let bytes = include_bytes!("../../../data/energy/grid-energy/states.topo.json");
    let topo = Topology::from_slice(bytes).expect("topology");
    c.bench_function("topology_features", |b| {
        b.iter(|| { let _ = black_box(topo.features("states")); });
    });
}

criterion_group!(benches, bench_stack, bench_hit_test, bench_topology);
criterion_main!(benches);
