//! Benchmarks for graph transforms
//!
//! Runs the summarizer, the minimizer, cycle detection and closures over
//! synthetic graphs with a few thousand features.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depscope::closure::{Depth, TransitiveClosure};
use depscope::cycles::CycleDetector;
use depscope::graph::{NodeFactory, NodeKind};
use depscope::selection::{NullSelectionCriteria, RegularExpressionSelectionCriteria};
use depscope::transform::{GraphSummarizer, GraphTransform, LinkMaximizer, LinkMinimizer};

/// Create a graph with `packages` packages of `classes` classes of `features`
/// features each, where every feature calls one feature of the next class
/// over, wrapping around so the graph has cycles.
fn create_graph(packages: usize, classes: usize, features: usize) -> NodeFactory {
    let mut graph = NodeFactory::new();
    let mut ids = Vec::with_capacity(packages * classes * features);

    for p in 0..packages {
        for c in 0..classes {
            for f in 0..features {
                ids.push(graph.create_feature(&format!("p{}.C{}.f{}()", p, c, f), true));
            }
        }
    }

    let classes_total = packages * classes;
    for (i, &id) in ids.iter().enumerate() {
        let class = i / features;
        let next_class = (class + 1 + i % 3) % classes_total;
        let target = ids[next_class * features + (i * 7) % features];
        graph.add_dependency(id, target);
    }

    graph
}

fn feature_scope() -> RegularExpressionSelectionCriteria {
    let mut criteria = RegularExpressionSelectionCriteria::new();
    criteria.set_matching(NodeKind::Package, false);
    criteria.set_matching(NodeKind::Class, false);
    criteria
}

fn package_filter() -> RegularExpressionSelectionCriteria {
    let mut criteria = RegularExpressionSelectionCriteria::new();
    criteria.set_matching(NodeKind::Class, false);
    criteria.set_matching(NodeKind::Feature, false);
    criteria
}

/// Benchmark rolling feature edges up to packages
fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_f2p");

    for size in [10, 20, 40].iter() {
        let graph = create_graph(*size, 10, 10);

        group.bench_with_input(BenchmarkId::new("packages", size), &graph, |b, graph| {
            b.iter(|| {
                let mut summarizer = GraphSummarizer::new(feature_scope(), package_filter());
                summarizer.traverse_nodes(graph, graph.package_ids());
                black_box(summarizer.into_factory())
            });
        });
    }

    group.finish();
}

/// Benchmark minimizing a maximized graph
fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for size in [5, 10, 20].iter() {
        let mut graph = create_graph(*size, 10, 10);
        LinkMaximizer.apply(&mut graph);

        group.bench_with_input(BenchmarkId::new("packages", size), &graph, |b, graph| {
            b.iter(|| {
                let mut copy = graph.clone();
                black_box(LinkMinimizer.apply(&mut copy))
            });
        });
    }

    group.finish();
}

/// Benchmark cycle detection with a bounded cycle length
fn bench_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycles_max_4");

    for size in [5, 10, 20].iter() {
        let graph = create_graph(*size, 5, 4);

        group.bench_with_input(BenchmarkId::new("packages", size), &graph, |b, graph| {
            b.iter(|| {
                let mut detector = CycleDetector::with_maximum_cycle_length(4);
                detector.traverse_nodes(graph, graph.package_ids());
                black_box(detector.cycles().len())
            });
        });
    }

    group.finish();
}

/// Benchmark an unbounded outbound closure from one feature
fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure_outbound");

    for size in [10, 20, 40].iter() {
        let graph = create_graph(*size, 10, 10);
        let start = RegularExpressionSelectionCriteria::with_global_includes("/^p0.C0.f0/").unwrap();
        let mut closure = TransitiveClosure::new(start, NullSelectionCriteria);
        closure.set_maximum_outbound_depth(Depth::Unbounded);

        group.bench_with_input(BenchmarkId::new("packages", size), &graph, |b, graph| {
            b.iter(|| black_box(closure.compute(graph, graph.package_ids())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_minimize, bench_cycles, bench_closure);
criterion_main!(benches);
