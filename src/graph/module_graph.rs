//! Module graph implementation using petgraph.
//!
//! Provides a directed graph of module identifiers with at most one edge per
//! ordered vertex pair, backed by a `StableDiGraph` so that removing
//! vertices during reduction never reorders the remaining ones.

use petgraph::algo::{has_path_connecting, is_cyclic_directed, tarjan_scc};
use petgraph::stable_graph::{EdgeIndex, EdgeReference, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeFiltered, EdgeRef};
use petgraph::Direction;
use std::collections::HashMap;

/// Weight given to every edge unless the caller chooses another one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Represents an edge in the module graph.
///
/// Edges point from the depending module to the module it depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DependencyEdge {
    /// Edge weight, written to the exchange format.
    pub weight: f64,
}

impl DependencyEdge {
    /// Creates an edge with the default weight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edge with an explicit weight.
    pub fn weighted(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for DependencyEdge {
    fn default() -> Self {
        Self {
            weight: DEFAULT_EDGE_WEIGHT,
        }
    }
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    /// Identifier of the depending module.
    pub source: &'a str,
    /// Identifier of the dependency.
    pub target: &'a str,
    /// Edge weight.
    pub weight: f64,
}

/// A directed graph of module identifiers.
///
/// Vertices are unique strings. Edges are unique per ordered pair: adding an
/// edge that already exists is a no-op. Every edge endpoint is always a
/// vertex of the graph.
///
/// # Example
///
/// ```rust
/// use pomgraph::graph::ModuleGraph;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_vertex("web");
/// graph.add_vertex("core");
///
/// assert!(graph.add_edge("web", "core"));
/// assert!(!graph.add_edge("web", "core")); // already present
///
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    /// The underlying directed graph
    graph: StableDiGraph<String, DependencyEdge>,
    /// Maps module identifiers to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            graph: StableDiGraph::with_capacity(vertices, edges),
            node_indices: HashMap::with_capacity(vertices),
        }
    }

    /// Adds a vertex, returning its index. Adding an existing vertex returns
    /// the existing index without modification.
    pub fn add_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(id.to_string());
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Adds an edge with the default weight.
    ///
    /// Both vertices must already exist.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was added, `false` if either vertex is missing or
    /// the edge already exists.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.add_weighted_edge(from, to, DEFAULT_EDGE_WEIGHT)
    }

    /// Adds an edge with an explicit weight.
    ///
    /// An existing edge keeps its original weight.
    pub fn add_weighted_edge(&mut self, from: &str, to: &str, weight: f64) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        if self.graph.contains_edge(from_idx, to_idx) {
            return false;
        }

        self.graph
            .add_edge(from_idx, to_idx, DependencyEdge::weighted(weight));
        true
    }

    /// Removes the edge `from -> to`. Returns `true` if it existed.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let Some(edge) = self.find_edge(from, to) else {
            return false;
        };
        self.graph.remove_edge(edge).is_some()
    }

    /// Removes a vertex together with all of its incident edges.
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_indices.remove(id) else {
            return false;
        };
        self.graph.remove_node(idx).is_some()
    }

    /// Checks if a vertex exists in the graph.
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Checks if the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.find_edge(from, to).is_some()
    }

    /// Returns the weight of the edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e))
            .map(|e| e.weight)
    }

    /// Iterates vertex identifiers in index order.
    ///
    /// Index order is insertion order; removing a vertex leaves the relative
    /// order of the others untouched.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(String::as_str)
    }

    /// Iterates edges in index order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_indices().filter_map(|edge| {
            let (source, target) = self.graph.edge_endpoints(edge)?;
            Some(EdgeView {
                source: self.graph.node_weight(source)?,
                target: self.graph.node_weight(target)?,
                weight: self.graph.edge_weight(edge)?.weight,
            })
        })
    }

    /// Gets the identifiers this vertex has edges to.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Gets the identifiers that have edges to this vertex.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Number of incoming edges. Zero for unknown vertices.
    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    /// Number of outgoing edges. Zero for unknown vertices.
    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks whether `to` can be reached from `from` by following edges.
    ///
    /// A vertex always reaches itself. Unknown vertices reach nothing.
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// Checks if the graph contains cycles, self-loops included.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomgraph::graph::ModuleGraph;
    ///
    /// let mut graph = ModuleGraph::new();
    /// graph.add_vertex("a");
    /// graph.add_vertex("b");
    /// graph.add_edge("a", "b");
    /// graph.add_edge("b", "a"); // Creates a cycle
    ///
    /// assert!(graph.has_cycles());
    /// ```
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all cycles in the graph.
    ///
    /// Each cycle is a strongly connected component with more than one
    /// vertex, or a single vertex carrying a self-loop.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            let is_cycle = match scc.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                members => members.len() > 1,
            };
            if is_cycle {
                cycles.push(
                    scc.iter()
                        .filter_map(|&idx| self.graph.node_weight(idx))
                        .cloned()
                        .collect(),
                );
            }
        }

        cycles
    }

    /// Checks whether `to` is reachable from `from` along a path that does
    /// not use the direct edge `from -> to`.
    ///
    /// For `from == to` this asks whether the vertex lies on a cycle other
    /// than its own self-loop.
    pub fn has_indirect_path(&self, from: &str, to: &str) -> bool {
        let (Some(&start), Some(&goal)) = (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        let direct = self.graph.find_edge(start, goal);
        let without_direct = EdgeFiltered::from_fn(
            &self.graph,
            |edge: EdgeReference<'_, DependencyEdge>| Some(edge.id()) != direct,
        );

        if start != goal {
            return has_path_connecting(&without_direct, start, goal, None);
        }
        self.graph
            .neighbors_directed(start, Direction::Outgoing)
            .filter(|&next| next != start)
            .any(|next| has_path_connecting(&without_direct, next, goal, None))
    }

    fn find_edge(&self, from: &str, to: &str) -> Option<EdgeIndex> {
        let from_idx = *self.node_indices.get(from)?;
        let to_idx = *self.node_indices.get(to)?;
        self.graph.find_edge(from_idx, to_idx)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.graph.node_weight(n))
            .map(String::as_str)
            .collect()
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.node_indices
            .get(id)
            .map_or(0, |&idx| self.graph.edges_directed(idx, direction).count())
    }
}
