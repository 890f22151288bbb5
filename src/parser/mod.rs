//! Parser module for pomgraph.
//!
//! This module turns Maven descriptors on disk into the in-memory
//! [`ModelStore`] the graph builders read from.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pomgraph::parser::load_descriptors;
//!
//! let store = load_descriptors(Path::new("."))?;
//! for module in store.descriptors() {
//!     println!("{} has {} dependencies", module, module.dependencies.len());
//! }
//! ```

pub mod loader;
pub mod pom;
pub mod types;

// Re-export commonly used types for convenience
pub use loader::{find_descriptor_files, load_descriptors, LoadError, LoadResult};
pub use pom::{parse_file, parse_str, ParseError, ParseResult};
pub use types::{DependencyRef, ModelStore, ModuleDescriptor, ParentRef};
