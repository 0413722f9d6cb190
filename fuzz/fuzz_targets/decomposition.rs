#![no_main]

use std::collections::HashSet;

use cycleforest::{Error, Graph};
use libfuzzer_sys::fuzz_target;

// Every byte pair is one edge over at most 256 nodes
fuzz_target!(|data: &[u8]| {
    let mut graph: Graph<u8> = data.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();

    let sccs = graph.tarjan();
    let members: usize = sccs.iter().map(Vec::len).sum();
    assert_eq!(members, graph.node_count());

    let mut cycle_edges = 0;
    let mut paths = HashSet::new();
    graph
        .to_representative_forest(
            |_| {
                cycle_edges += 1;
                Ok(())
            },
            |node| {
                assert!(paths.insert(node.hierarchy().clone()));
                Ok::<(), Error>(())
            },
        )
        .unwrap();
    assert_eq!(cycle_edges, graph.node_count());
});
