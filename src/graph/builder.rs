//! Construction of module graphs from loaded descriptors.
//!
//! Two views are built from the same [`ModelStore`]:
//!
//! 1. **Module graph**: one vertex per module and per kept dependency
//!    target, one edge per kept dependency.
//! 2. **Parent graph**: every module is replaced by its effective parent
//!    (the parent's identifier, or its own when it has none), so edges roll
//!    up to organizational units. Edges between siblings of the same parent
//!    become self-loops and are kept.

use tracing::{debug, warn};

use super::filter::{DependencyFilter, GroupFilter};
use super::module_graph::ModuleGraph;
use crate::parser::{ModelStore, ModuleDescriptor};

/// Builds the module-level dependency graph.
///
/// The vertex set is every descriptor's identifier plus every kept
/// dependency's target; there is one edge per kept dependency.
///
/// # Example
///
/// ```
/// use pomgraph::graph::{build_module_graph, GroupFilter};
/// use pomgraph::parser::{DependencyRef, ModuleDescriptor};
///
/// let modules = vec![
///     ModuleDescriptor::new("web", "com.acme")
///         .with_dependency(DependencyRef::new("core", "com.acme"))
///         .with_dependency(DependencyRef::new("guava", "com.google.guava")),
///     ModuleDescriptor::new("core", "com.acme"),
/// ];
///
/// let graph = build_module_graph(&modules, &GroupFilter::new("com.acme"));
/// assert_eq!(graph.vertex_count(), 2);
/// assert!(graph.contains_edge("web", "core"));
/// ```
pub fn build_module_graph<'a, I, F>(descriptors: I, filter: &F) -> ModuleGraph
where
    I: IntoIterator<Item = &'a ModuleDescriptor>,
    F: DependencyFilter + ?Sized,
{
    let mut graph = ModuleGraph::new();

    for module in descriptors {
        graph.add_vertex(&module.artifact_id);
        for dependency in module.dependencies.iter().filter(|d| filter.matches(d)) {
            graph.add_vertex(&dependency.artifact_id);
            graph.add_edge(&module.artifact_id, &dependency.artifact_id);
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Built module graph"
    );
    graph
}

/// Same as [`build_module_graph`], keeping only dependencies declared with
/// the given groupId.
pub fn build_module_graph_for_group<'a, I>(descriptors: I, group_id: &str) -> ModuleGraph
where
    I: IntoIterator<Item = &'a ModuleDescriptor>,
{
    build_module_graph(descriptors, &GroupFilter::new(group_id))
}

/// Builds a dependency graph whose vertices are effective parent
/// identifiers.
///
/// Dependencies pointing at modules missing from the store cannot be rolled
/// up; each occurrence is logged as a warning and skipped without affecting
/// the module's other dependencies.
///
/// # Example
///
/// ```
/// use pomgraph::graph::{build_parent_graph, AcceptAll};
/// use pomgraph::parser::{DependencyRef, ModelStore, ModuleDescriptor, ParentRef};
///
/// let store = ModelStore::from_descriptors(vec![
///     ModuleDescriptor::new("billing-api", "g")
///         .with_parent(ParentRef::new("billing", None))
///         .with_dependency(DependencyRef::new("common-util", "g")),
///     ModuleDescriptor::new("common-util", "g").with_parent(ParentRef::new("common", None)),
/// ]);
///
/// let graph = build_parent_graph(&store, &AcceptAll);
/// assert!(graph.contains_edge("billing", "common"));
/// ```
pub fn build_parent_graph<F>(store: &ModelStore, filter: &F) -> ModuleGraph
where
    F: DependencyFilter + ?Sized,
{
    let mut graph = ModuleGraph::new();

    for module in store.descriptors() {
        let parent_id = module.effective_parent_id();
        graph.add_vertex(parent_id);

        for dependency in module.dependencies.iter().filter(|d| filter.matches(d)) {
            let Some(target) = store.get(&dependency.artifact_id) else {
                warn!(
                    target: "pomgraph::integrity",
                    module = %module.artifact_id,
                    dependency = %dependency,
                    "Dependency target is missing from the model store, skipping edge"
                );
                continue;
            };

            let target_parent_id = target.effective_parent_id();
            graph.add_vertex(target_parent_id);
            graph.add_edge(parent_id, target_parent_id);
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Built parent graph"
    );
    graph
}

/// Same as [`build_parent_graph`], keeping only dependencies declared with
/// the given groupId.
pub fn build_parent_graph_for_group(store: &ModelStore, group_id: &str) -> ModuleGraph {
    build_parent_graph(store, &GroupFilter::new(group_id))
}
