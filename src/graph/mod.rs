//! Graph module for module dependency modeling.
//!
//! This module provides the [`ModuleGraph`] struct, the builders that fill
//! it from a [`ModelStore`](crate::parser::ModelStore), and the reductions
//! applied before export.
//!
//! # Example
//!
//! ```rust
//! use pomgraph::graph::{build_module_graph_for_group, reduce};
//! use pomgraph::parser::{DependencyRef, ModelStore, ModuleDescriptor};
//!
//! let store = ModelStore::from_descriptors(vec![
//!     ModuleDescriptor::new("app", "com.acme")
//!         .with_dependency(DependencyRef::new("web", "com.acme"))
//!         .with_dependency(DependencyRef::new("core", "com.acme")),
//!     ModuleDescriptor::new("web", "com.acme")
//!         .with_dependency(DependencyRef::new("core", "com.acme")),
//!     ModuleDescriptor::new("core", "com.acme"),
//! ]);
//!
//! let mut graph = build_module_graph_for_group(&store, "com.acme");
//! let stats = reduce(&mut graph);
//!
//! assert_eq!(stats.edges_removed, 1);
//! assert_eq!(graph.edge_count(), 2);
//! ```

mod builder;
mod filter;
mod module_graph;
mod reduce;

pub use builder::{
    build_module_graph, build_module_graph_for_group, build_parent_graph,
    build_parent_graph_for_group,
};
pub use filter::{AcceptAll, DependencyFilter, GroupFilter, RejectAll};
pub use module_graph::{DependencyEdge, EdgeView, ModuleGraph, DEFAULT_EDGE_WEIGHT};
pub use reduce::{reduce, remove_isolated_vertices, transitive_reduction, ReductionStats};
