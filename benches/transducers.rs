use algoviz::{to_graph, Algorithm, Graph, GraphRead};
use criterion::{criterion_group, criterion_main, Criterion};
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;
use std::hint::black_box;
use std::time::Duration;

fn make_graph(num_nodes: usize, num_edges: usize) -> Graph {
    let mut g: StableGraph<String, f64, Undirected> = StableGraph::default();
    for i in 0..num_nodes {
        g.add_node(format!("N{}", i + 1));
    }
    // add a simple chain for determinism
    for i in 1..num_nodes {
        g.add_edge(
            petgraph::prelude::NodeIndex::new(i - 1),
            petgraph::prelude::NodeIndex::new(i),
            ((i * 7) % 13 + 1) as f64,
        );
    }
    // sprinkle some extra edges up to num_edges
    let mut extra = num_edges.saturating_sub(num_nodes.saturating_sub(1));
    let mut i = 0usize;
    while extra > 0 && num_nodes >= 2 {
        let a = i % num_nodes;
        let b = (i * 37 + 11) % num_nodes;
        if a != b {
            g.add_edge(
                petgraph::prelude::NodeIndex::new(a),
                petgraph::prelude::NodeIndex::new(b),
                ((i * 5) % 17 + 1) as f64,
            );
            extra -= 1;
        }
        i += 1;
    }

    to_graph(&g)
}

fn bench_transducers(c: &mut Criterion) {
    let mut group = c.benchmark_group("transducers");
    group.sample_size(10);
    group.measurement_time(Duration::from_millis(600));
    group.warm_up_time(Duration::from_millis(200));

    let g = make_graph(40, 120);
    let start = g.nodes().next().map(algoviz::Node::id);

    for algorithm in Algorithm::ALL {
        group.bench_function(format!("{}_n40_m120", algorithm.key()), |b| {
            b.iter(|| {
                let steps = algorithm.run(black_box(&g), start);
                black_box(steps)
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().configure_from_args();
    targets = bench_transducers
}
criterion_main!(benches);
