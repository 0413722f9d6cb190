//! Integration tests for graph decomposition through the public API.
//!
//! Covers the reference scenarios (empty graph, single edge, cycle with an exit), the
//! fallback rooting of unreachable cycles, custom identity comparers, callback aborts and
//! very deep graphs.

use std::{collections::HashSet, sync::Arc, thread};

use cycleforest::{prelude::*, NodeId};

/// Runs the forest analysis and renders both streams as strings.
fn render<C: Comparer<&'static str>>(
    graph: &mut Graph<&'static str, C>,
) -> (Vec<String>, Vec<String>) {
    let mut cycles = Vec::new();
    let mut tree = Vec::new();
    graph
        .to_representative_forest(
            |edge| {
                cycles.push(edge.to_string());
                Ok(())
            },
            |node| {
                tree.push(node.to_string());
                Ok::<(), Error>(())
            },
        )
        .unwrap();
    (cycles, tree)
}

#[test]
fn test_empty_graph_reports_nothing() {
    let mut graph: Graph<&'static str> = Graph::new();

    assert!(graph.tarjan().is_empty());

    let mut calls = 0;
    graph
        .to_representative_forest(
            |_| {
                calls += 1;
                Ok::<(), Error>(())
            },
            |_| Ok(()),
        )
        .unwrap();
    assert_eq!(calls, 0);
    assert_eq!(render(&mut graph), (vec![], vec![]));
}

#[test]
fn test_single_edge() {
    let mut graph = Graph::new();
    graph.add("A", "B");

    let sccs = graph.tarjan();
    assert_eq!(sccs.len(), 2);
    assert!(sccs.iter().all(|scc| scc.len() == 1));

    let (cycles, tree) = render(&mut graph);
    let cycles: HashSet<String> = cycles.into_iter().collect();
    assert_eq!(cycles, HashSet::from(["A -> A".to_string(), "B -> B".to_string()]));
    assert_eq!(tree, vec!["/0/ A", "/0/0/ B"]);
}

#[test]
fn test_cycle_with_exit() {
    let mut graph = Graph::new();
    graph.add("A", "B");
    graph.add("B", "A");
    graph.add("B", "C");

    let mut sccs: Vec<HashSet<&str>> = graph
        .tarjan()
        .into_iter()
        .map(|scc| scc.into_iter().collect())
        .collect();
    sccs.sort_by_key(HashSet::len);
    assert_eq!(sccs, vec![HashSet::from(["C"]), HashSet::from(["A", "B"])]);

    let forest = graph.representative_forest().unwrap();
    let roots: Vec<_> = forest.roots().collect();
    assert_eq!(roots, vec![&TreeNode::new("A", vec![0])]);
    assert_eq!(
        forest.tree_nodes(),
        &[TreeNode::new("A", vec![0]), TreeNode::new("C", vec![0, 0])]
    );
    assert_eq!(forest.members(&"A").count(), 2);
}

#[test]
fn test_self_loop_stays_singleton() {
    let mut graph = Graph::new();
    graph.add("solo", "solo");

    assert_eq!(graph.tarjan(), vec![vec!["solo"]]);
    assert_eq!(graph.cycles(), vec![vec!["solo"]]);

    // The only node points at itself, so it is rooted by the fallback
    let (cycles, tree) = render(&mut graph);
    assert_eq!(cycles, vec!["solo -> solo"]);
    assert_eq!(tree, vec!["/0/ solo"]);
}

#[test]
fn test_unreachable_cycle_is_rooted_after_natural_roots() {
    let mut graph = Graph::new();
    graph.add("x", "y");
    graph.add("y", "x");
    graph.add("main", "lib");
    graph.add("y", "lib");

    let (_, tree) = render(&mut graph);
    assert_eq!(tree, vec!["/0/ main", "/0/0/ lib", "/1/ x"]);
}

#[test]
fn test_layered_forest() {
    // app -> {net, ui}; net <-> tls; tls -> crypto; ui -> crypto
    let mut graph = Graph::new();
    for (from, to) in [
        ("app", "net"),
        ("app", "ui"),
        ("net", "tls"),
        ("tls", "net"),
        ("tls", "crypto"),
        ("ui", "crypto"),
    ] {
        graph.add(from, to);
    }

    let (_, tree) = render(&mut graph);
    assert_eq!(tree, vec!["/0/ app", "/0/0/ net", "/0/0/0/ crypto", "/0/1/ ui"]);
}

#[test]
fn test_custom_comparer_merges_identities() {
    let comparer =
        KeyComparer::<&'static str, _, _>::new(|name: &&'static str| name.to_ascii_lowercase());
    let mut graph = Graph::with_comparer(comparer);
    graph.add("Parser", "lexer");
    graph.add("LEXER", "parser");
    graph.add("parser", "AST");

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.contains(&"ast"));

    // First spelling wins as the stored identity
    let mut sccs = graph.tarjan();
    sccs.sort_by_key(Vec::len);
    assert_eq!(sccs, vec![vec!["AST"], vec!["Parser", "lexer"]]);

    let (_, tree) = render(&mut graph);
    assert_eq!(tree, vec!["/0/ Parser", "/0/0/ AST"]);
}

#[test]
fn test_callback_error_aborts_traversal() {
    let mut graph = Graph::new();
    for i in 0..10u32 {
        graph.add(i, i + 1);
    }

    let mut cycle_calls = 0;
    let result = graph.to_representative_forest(
        |_| {
            cycle_calls += 1;
            if cycle_calls == 3 {
                Err(Error::InvalidArgument("enough".into()))
            } else {
                Ok(())
            }
        },
        |_| panic!("tree callback must not run after an aborted cycle callback"),
    );

    assert_eq!(result, Err(Error::InvalidArgument("enough".into())));
    assert_eq!(cycle_calls, 3);
}

#[test]
fn test_negative_capacity_is_rejected() {
    let err = Graph::<u8, _>::create(-4, NaturalComparer).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("-4"));
}

#[test]
fn test_deep_chain() {
    let n = 100_000u32;
    let mut graph = Graph::with_config(&GraphConfig::new(n as usize), NaturalComparer);
    graph.add_all((0..n - 1).map(|i| (i, i + 1)));

    assert_eq!(graph.tarjan().len(), n as usize);

    // Every tree node owns its full path, so keep the forest part shallower
    let mut graph: Graph<u32> = (0..2_000).map(|i| (i, i + 1)).collect();
    let forest = graph.representative_forest().unwrap();
    let deepest = forest.tree_nodes().last().unwrap();
    assert_eq!(*deepest.node(), 2_000);
    assert_eq!(deepest.hierarchy().depth(), 2_000);
}

#[test]
fn test_deep_cycle() {
    let n = 100_000u32;
    let mut graph = Graph::new();
    graph.add_all((0..n).map(|i| (i, (i + 1) % n)));

    let sccs = graph.tarjan();
    assert_eq!(sccs.len(), 1);
    assert_eq!(sccs[0].len(), n as usize);

    let forest = graph.representative_forest().unwrap();
    assert_eq!(forest.cycle_edges().len(), n as usize);
    assert_eq!(forest.tree_nodes(), &[TreeNode::new(0, vec![0])]);
}

#[test]
fn test_concurrent_construction_then_analysis() {
    let graph = Arc::new(Graph::<u32>::new());

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                for i in 0..100u32 {
                    // Eight disjoint rings of 100 nodes each
                    let base = t * 100;
                    graph.add(base + i, base + (i + 1) % 100);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut graph = Arc::try_unwrap(graph).unwrap();
    assert_eq!(graph.node_count(), 800);
    assert_eq!(graph.cycles().len(), 8);

    let forest = graph.representative_forest().unwrap();
    assert_eq!(forest.roots().count(), 8);
    assert_eq!(forest.representatives().count(), 8);
}

#[test]
fn test_node_ids_follow_first_reference() {
    assert_eq!(NodeId::new(3).index(), 3);

    let graph = Graph::new();
    graph.add("b", "a");
    graph.add("c", "b");
    assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}
