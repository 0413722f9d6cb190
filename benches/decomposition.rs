//! Benchmarks for graph construction and decomposition.
//!
//! Covers the shapes that stress different parts of the analyses:
//! - Long chains (deepest possible traversal, one component per node)
//! - Large rings (one component holding every node)
//! - Layered DAGs with many shared descendants (exit discovery and forest skipping)
//! - Random graphs (mixed)

extern crate cycleforest;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cycleforest::{Graph, GraphConfig, NaturalComparer};
use std::hint::black_box;

fn chain(n: u32) -> Vec<(u32, u32)> {
    (0..n - 1).map(|i| (i, i + 1)).collect()
}

fn ring(n: u32) -> Vec<(u32, u32)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

/// `layers` layers of `width` nodes; every node links to every node of the next layer.
fn layered(layers: u32, width: u32) -> Vec<(u32, u32)> {
    let mut edges = Vec::new();
    for layer in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                edges.push((layer * width + a, (layer + 1) * width + b));
            }
        }
    }
    edges
}

/// Deterministic pseudo-random graph (xorshift), `n` nodes and `m` edges.
fn random(n: u32, m: usize) -> Vec<(u32, u32)> {
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state % n
    };
    (0..m).map(|_| (next(), next())).collect()
}

fn build(edges: &[(u32, u32)]) -> Graph<u32> {
    let config = GraphConfig::default()
        .with_node_capacity(edges.len())
        .with_edge_capacity(edges.len());
    let graph = Graph::with_config(&config, NaturalComparer);
    graph.add_all(edges.iter().copied());
    graph
}

/// Benchmark sequential and parallel insertion.
fn bench_construction(c: &mut Criterion) {
    let edges = random(50_000, 200_000);

    let mut group = c.benchmark_group("construction");
    group.bench_function("add_all", |b| {
        b.iter(|| black_box(build(black_box(&edges))));
    });
    group.bench_function("par_add_all", |b| {
        b.iter(|| {
            let graph = Graph::new();
            graph.par_add_all(black_box(edges.clone()));
            black_box(graph)
        });
    });
    group.finish();
}

/// Benchmark Tarjan on the different graph shapes.
fn bench_tarjan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tarjan");
    for (name, edges) in [
        ("chain_100k", chain(100_000)),
        ("ring_100k", ring(100_000)),
        ("layered_50x40", layered(50, 40)),
        ("random_50k", random(50_000, 200_000)),
    ] {
        let mut graph = build(&edges);
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| black_box(graph.tarjan()));
        });
    }
    group.finish();
}

/// Benchmark the representative forest, counting emissions without collecting them.
fn bench_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("representative_forest");
    for (name, edges) in [
        ("chain_5k", chain(5_000)),
        ("ring_100k", ring(100_000)),
        ("layered_50x40", layered(50, 40)),
        ("random_50k", random(50_000, 200_000)),
    ] {
        let mut graph = build(&edges);
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| {
                let mut cycles = 0usize;
                let mut placed = 0usize;
                graph
                    .to_representative_forest(
                        |edge| {
                            cycles += 1;
                            black_box(edge);
                            Ok(())
                        },
                        |node| {
                            placed += 1;
                            black_box(node);
                            Ok::<(), cycleforest::Error>(())
                        },
                    )
                    .unwrap();
                black_box((cycles, placed))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_tarjan, bench_forest);
criterion_main!(benches);
