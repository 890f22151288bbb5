//! Benchmarks for graph reduction
//!
//! Builds layered module graphs where every module depends on every module
//! in all lower layers, the worst case for redundant edges.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pomgraph::graph::{remove_isolated_vertices, transitive_reduction, ModuleGraph};

/// Create a layered graph with `layers * width` modules
fn create_layered_graph(layers: usize, width: usize) -> ModuleGraph {
    let mut graph = ModuleGraph::with_capacity(layers * width, layers * layers * width * width);
    let name = |layer: usize, i: usize| format!("module-{layer}-{i}");

    for layer in 0..layers {
        for i in 0..width {
            graph.add_vertex(&name(layer, i));
        }
    }

    for upper in 0..layers {
        for lower in (upper + 1)..layers {
            for i in 0..width {
                for j in 0..width {
                    graph.add_edge(&name(upper, i), &name(lower, j));
                }
            }
        }
    }

    graph
}

/// Benchmark transitive reduction
fn bench_transitive_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("transitive_reduction");

    for (layers, width) in [(5, 4), (10, 5), (20, 5)] {
        let graph = create_layered_graph(layers, width);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{layers}x{width}")),
            &graph,
            |b, graph| {
                b.iter(|| {
                    let mut graph = graph.clone();
                    black_box(transitive_reduction(&mut graph))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark isolated vertex pruning
fn bench_prune(c: &mut Criterion) {
    let mut graph = create_layered_graph(10, 5);
    for i in 0..500 {
        graph.add_vertex(&format!("isolated-{i}"));
    }

    c.bench_function("remove_isolated_vertices", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            black_box(remove_isolated_vertices(&mut graph))
        })
    });
}

criterion_group!(benches, bench_transitive_reduction, bench_prune);
criterion_main!(benches);
