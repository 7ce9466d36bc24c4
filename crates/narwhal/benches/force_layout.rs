use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::{Edge, ForceLayout, ForceOptions, Graph, Node};
use std::hint::black_box;

/// Ring with a chord every `stride` nodes, enough structure to keep the solver busy.
fn ring_with_chords(n: usize, stride: usize) -> Graph {
    let mut g = Graph {
        nodes: (0..n).map(|i| Node::new(format!("n{i}"))).collect(),
        edges: Vec::new(),
    };
    for i in 0..n {
        g.edges.push(Edge::new(
            format!("r{i}"),
            format!("n{i}"),
            format!("n{}", (i + 1) % n),
        ));
        if stride > 0 && i % stride == 0 {
            g.edges.push(Edge::new(
                format!("c{i}"),
                format!("n{i}"),
                format!("n{}", (i + n / 2) % n),
            ));
        }
    }
    g
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_tick");
    for &n in &[50usize, 200, 800] {
        let g = ring_with_chords(n, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter_batched(
                || {
                    let mut engine =
                        ForceLayout::from_graph(g, ForceOptions::default()).expect("engine");
                    engine.seed();
                    engine
                },
                |mut engine| {
                    engine.tick();
                    black_box(engine.state().energy)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_run");
    group.sample_size(10);
    for &n in &[25usize, 100] {
        let g = ring_with_chords(n, 5);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| {
                let mut engine =
                    ForceLayout::from_graph(black_box(g), ForceOptions::default()).expect("engine");
                let out = engine.run();
                black_box(out.nodes.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_run);
criterion_main!(benches);
