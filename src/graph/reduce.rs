//! Transitive reduction and isolated-vertex pruning.
//!
//! Both transforms mutate the graph in place and are idempotent. When both
//! are applied, reduction must run first: removing redundant edges can leave
//! vertices with no edges at all, which pruning then cleans up.
//!
//! # Cyclic graphs
//!
//! Reduction visits edges in index order and drops `u -> v` whenever `v` is
//! still reachable from `u` without it. Every removal keeps reachability
//! intact, so the result has the same reachability as the input for any
//! graph. On a DAG this is the unique transitive reduction. On a graph with
//! cycles the result is a minimal equivalent graph, but which edges of a
//! cycle survive depends on edge order. A self-loop survives unless its
//! vertex also sits on a longer cycle. Self-loops are routine in parent
//! graphs, so only cycles through several vertices are logged as warnings.

use tracing::{debug, instrument, warn};

use super::module_graph::ModuleGraph;

/// Counts reported by [`reduce`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Edges removed by transitive reduction.
    pub edges_removed: usize,
    /// Vertices removed by pruning.
    pub vertices_removed: usize,
}

/// Removes every edge implied by a longer path.
///
/// # Returns
///
/// The number of edges removed.
///
/// # Example
///
/// ```rust
/// use pomgraph::graph::{transitive_reduction, ModuleGraph};
///
/// let mut graph = ModuleGraph::new();
/// for v in ["app", "web", "core"] {
///     graph.add_vertex(v);
/// }
/// graph.add_edge("app", "web");
/// graph.add_edge("web", "core");
/// graph.add_edge("app", "core"); // implied by app -> web -> core
///
/// assert_eq!(transitive_reduction(&mut graph), 1);
/// assert!(!graph.contains_edge("app", "core"));
/// ```
#[instrument(skip_all, fields(edges = graph.edge_count()))]
pub fn transitive_reduction(graph: &mut ModuleGraph) -> usize {
    let cycles = graph.detect_cycles();
    let spanning = cycles.iter().filter(|cycle| cycle.len() > 1).count();
    if spanning > 0 {
        warn!(
            cycles = spanning,
            "Reducing a cyclic graph; surviving cycle edges depend on edge order"
        );
    } else if !cycles.is_empty() {
        debug!(self_loops = cycles.len(), "Reducing a graph with self-loops");
    }

    // Snapshot the edge list so removals don't disturb iteration.
    let edges: Vec<(String, String)> = graph
        .edges()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect();

    let mut removed = 0;
    for (source, target) in edges {
        if graph.has_indirect_path(&source, &target) && graph.remove_edge(&source, &target) {
            debug!(%source, %target, "Removed redundant edge");
            removed += 1;
        }
    }

    removed
}

/// Removes every vertex with no incoming and no outgoing edges.
///
/// # Returns
///
/// The number of vertices removed.
#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn remove_isolated_vertices(graph: &mut ModuleGraph) -> usize {
    let isolated: Vec<String> = graph
        .vertices()
        .filter(|v| graph.in_degree(v) == 0 && graph.out_degree(v) == 0)
        .map(str::to_string)
        .collect();

    for vertex in &isolated {
        graph.remove_vertex(vertex);
    }

    isolated.len()
}

/// Runs [`transitive_reduction`] followed by [`remove_isolated_vertices`].
pub fn reduce(graph: &mut ModuleGraph) -> ReductionStats {
    let edges_removed = transitive_reduction(graph);
    let vertices_removed = remove_isolated_vertices(graph);
    ReductionStats {
        edges_removed,
        vertices_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn graph_with(vertices: &[&str], edges: &[(&str, &str)]) -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    fn edge_set(graph: &ModuleGraph) -> BTreeSet<(String, String)> {
        graph
            .edges()
            .map(|e| (e.source.to_string(), e.target.to_string()))
            .collect()
    }

    fn vertex_set(graph: &ModuleGraph) -> BTreeSet<String> {
        graph.vertices().map(str::to_string).collect()
    }

    #[test]
    fn test_reduction_removes_shortcut() {
        let mut graph = graph_with(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]);

        assert_eq!(transitive_reduction(&mut graph), 1);
        assert!(graph.contains_edge("a", "b"));
        assert!(graph.contains_edge("b", "c"));
        assert!(!graph.contains_edge("a", "c"));
    }

    #[test]
    fn test_reduction_long_chain_with_shortcuts() {
        // a -> b -> c -> d plus every shortcut
        let mut graph = graph_with(
            &["a", "b", "c", "d"],
            &[
                ("a", "b"),
                ("b", "c"),
                ("c", "d"),
                ("a", "c"),
                ("a", "d"),
                ("b", "d"),
            ],
        );

        assert_eq!(transitive_reduction(&mut graph), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_edge("a", "b"));
        assert!(graph.contains_edge("b", "c"));
        assert!(graph.contains_edge("c", "d"));
    }

    #[test]
    fn test_reduction_diamond_keeps_both_branches() {
        let mut graph = graph_with(
            &["top", "left", "right", "bottom"],
            &[
                ("top", "left"),
                ("top", "right"),
                ("left", "bottom"),
                ("right", "bottom"),
                ("top", "bottom"),
            ],
        );

        assert_eq!(transitive_reduction(&mut graph), 1);
        assert_eq!(graph.edge_count(), 4);
        assert!(!graph.contains_edge("top", "bottom"));
    }

    #[test]
    fn test_reduction_keeps_vertices() {
        let mut graph = graph_with(&["a", "b", "c", "lonely"], &[("a", "b"), ("b", "c"), ("a", "c")]);
        transitive_reduction(&mut graph);
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn test_reduction_two_cycle_is_preserved() {
        let mut graph = graph_with(&["a", "b"], &[("a", "b"), ("b", "a")]);

        assert_eq!(transitive_reduction(&mut graph), 0);
        assert!(graph.is_reachable("a", "b"));
        assert!(graph.is_reachable("b", "a"));
    }

    #[test]
    fn test_reduction_cycle_with_chord() {
        // a -> b -> c -> a plus chord a -> c
        let mut graph = graph_with(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")],
        );

        assert_eq!(transitive_reduction(&mut graph), 1);
        assert!(!graph.contains_edge("a", "c"));
        for (u, v) in [("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")] {
            assert!(graph.is_reachable(u, v));
        }
    }

    #[test]
    fn test_reduction_lone_self_loop_is_kept() {
        let mut graph = graph_with(&["parent", "other"], &[("parent", "parent"), ("parent", "other")]);

        assert_eq!(transitive_reduction(&mut graph), 0);
        assert!(graph.contains_edge("parent", "parent"));
    }

    #[test]
    fn test_reduction_self_loop_on_longer_cycle_is_removed() {
        let mut graph = graph_with(&["a", "b"], &[("a", "a"), ("a", "b"), ("b", "a")]);

        assert_eq!(transitive_reduction(&mut graph), 1);
        assert!(!graph.contains_edge("a", "a"));
        assert!(graph.contains_edge("a", "b"));
        assert!(graph.contains_edge("b", "a"));
    }

    #[test]
    fn test_reduction_self_loops_do_not_warn() {
        let mut graph = graph_with(
            &["billing", "common"],
            &[("billing", "billing"), ("billing", "common")],
        );

        let (_, lines) = capture_logs(|| transitive_reduction(&mut graph));

        assert!(!lines.iter().any(|line| line.contains("WARN")));
        assert!(lines.iter().any(|line| line.contains("self_loops=1")));
    }

    #[test]
    fn test_reduction_multi_vertex_cycle_warns() {
        let mut graph = graph_with(
            &["a", "b", "c"],
            &[("a", "a"), ("a", "b"), ("b", "a"), ("c", "c")],
        );

        let (_, lines) = capture_logs(|| transitive_reduction(&mut graph));

        let warnings: Vec<&String> = lines.iter().filter(|line| line.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("cycles=1"));
    }

    #[test]
    fn test_reduction_empty_graph() {
        let mut graph = ModuleGraph::new();
        assert_eq!(transitive_reduction(&mut graph), 0);
    }

    #[test]
    fn test_remove_isolated_vertices() {
        let mut graph = graph_with(&["a", "b", "c", "d"], &[("a", "b")]);

        assert_eq!(remove_isolated_vertices(&mut graph), 2);
        let vertices: Vec<&str> = graph.vertices().collect();
        assert_eq!(vertices, vec!["a", "b"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_isolated_keeps_self_loop() {
        let mut graph = graph_with(&["a", "b"], &[("a", "a")]);

        assert_eq!(remove_isolated_vertices(&mut graph), 1);
        assert!(graph.contains_vertex("a"));
    }

    #[test]
    fn test_reduce_prunes_after_reduction() {
        let mut graph = graph_with(
            &["a", "b", "c", "island"],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        );

        let stats = reduce(&mut graph);
        assert_eq!(
            stats,
            ReductionStats {
                edges_removed: 1,
                vertices_removed: 1,
            }
        );
        assert!(!graph.contains_vertex("island"));
    }

    fn arb_edges(max_vertices: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..=max_vertices).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..(n * 3)),
            )
        })
    }

    fn build(n: usize, edges: &[(usize, usize)], acyclic: bool) -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        let names: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
        for name in &names {
            graph.add_vertex(name);
        }
        for &(a, b) in edges {
            if acyclic && a >= b {
                continue;
            }
            graph.add_edge(&names[a], &names[b]);
        }
        graph
    }

    fn reachability(graph: &ModuleGraph) -> BTreeSet<(String, String)> {
        let vertices: Vec<&str> = graph.vertices().collect();
        let mut pairs = BTreeSet::new();
        for u in &vertices {
            for v in &vertices {
                if u != v && graph.is_reachable(u, v) {
                    pairs.insert((u.to_string(), v.to_string()));
                }
            }
        }
        pairs
    }

    proptest! {
        #[test]
        fn prop_reduction_is_idempotent((n, edges) in arb_edges(8)) {
            let mut graph = build(n, &edges, false);
            transitive_reduction(&mut graph);
            let once = edge_set(&graph);
            prop_assert_eq!(transitive_reduction(&mut graph), 0);
            prop_assert_eq!(edge_set(&graph), once);
        }

        #[test]
        fn prop_reduction_preserves_dag_reachability((n, edges) in arb_edges(8)) {
            let mut graph = build(n, &edges, true);
            let before = reachability(&graph);
            transitive_reduction(&mut graph);
            prop_assert_eq!(reachability(&graph), before);
        }

        #[test]
        fn prop_reduction_preserves_cyclic_reachability((n, edges) in arb_edges(6)) {
            let mut graph = build(n, &edges, false);
            let before = reachability(&graph);
            transitive_reduction(&mut graph);
            prop_assert_eq!(reachability(&graph), before);
        }

        #[test]
        fn prop_reduced_dag_has_no_redundant_edge((n, edges) in arb_edges(8)) {
            let mut graph = build(n, &edges, true);
            transitive_reduction(&mut graph);
            for (u, v) in edge_set(&graph) {
                prop_assert!(!graph.has_indirect_path(&u, &v));
            }
        }

        #[test]
        fn prop_pruning_is_idempotent((n, edges) in arb_edges(8)) {
            let mut graph = build(n, &edges, false);
            remove_isolated_vertices(&mut graph);
            let vertices = vertex_set(&graph);
            let remaining_edges = edge_set(&graph);

            prop_assert_eq!(remove_isolated_vertices(&mut graph), 0);
            prop_assert_eq!(vertex_set(&graph), vertices);
            prop_assert_eq!(edge_set(&graph), remaining_edges);
            for v in graph.vertices() {
                prop_assert!(graph.in_degree(v) + graph.out_degree(v) >= 1);
            }
        }
    }
}
