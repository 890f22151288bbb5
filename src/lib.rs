//! pomgraph - Maven module dependency graphs
//!
//! This crate loads the `pom.xml` files of a multi-module project, builds a
//! directed graph of internal module dependencies and a coarser graph rolled
//! up to parent modules, reduces both, and exports them as Pajek networks
//! and Graphviz renderings.

pub mod export;
pub mod graph;
pub mod parser;
pub mod pipeline;
pub mod render;

#[cfg(test)]
mod test_support;
