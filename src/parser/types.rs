//! Shared types for descriptor parsing.
//!
//! This module defines the in-memory records the graph builders consume:
//! one [`ModuleDescriptor`] per `pom.xml`, collected into a read-only
//! [`ModelStore`] keyed by artifact identifier.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// A single declared dependency of a module.
///
/// The group identifier is the one written on the *declaring* entry, which
/// is what group filtering looks at. It can differ from the target module's
/// own group when the dependency points outside the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRef {
    /// The target module identifier (Maven `artifactId`).
    pub artifact_id: String,

    /// The group identifier declared on the dependency entry.
    pub group_id: String,
}

impl DependencyRef {
    /// Creates a new dependency reference.
    pub fn new(artifact_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            group_id: group_id.into(),
        }
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Weak reference to a module's parent.
///
/// The parent does not have to be present in the [`ModelStore`]; only its
/// identifier is used when rolling edges up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentRef {
    /// The parent module identifier.
    pub artifact_id: String,

    /// The parent's group identifier, if declared.
    pub group_id: Option<String>,
}

impl ParentRef {
    /// Creates a new parent reference.
    pub fn new(artifact_id: impl Into<String>, group_id: Option<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            group_id,
        }
    }
}

/// Normalized description of one module.
///
/// # Example
///
/// ```
/// use pomgraph::parser::{DependencyRef, ModuleDescriptor, ParentRef};
///
/// let module = ModuleDescriptor::new("billing-core", "com.acme")
///     .with_parent(ParentRef::new("billing", None))
///     .with_dependency(DependencyRef::new("common-util", "com.acme"));
///
/// assert_eq!(module.effective_parent_id(), "billing");
/// assert_eq!(module.dependencies.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Unique module identifier (Maven `artifactId`).
    pub artifact_id: String,

    /// The module's group identifier, inherited from the parent when the
    /// descriptor does not declare one.
    pub group_id: String,

    /// Declared dependencies, in declaration order.
    pub dependencies: Vec<DependencyRef>,

    /// Optional parent reference.
    pub parent: Option<ParentRef>,
}

impl ModuleDescriptor {
    /// Creates a descriptor with no dependencies and no parent.
    pub fn new(artifact_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            group_id: group_id.into(),
            dependencies: Vec::new(),
            parent: None,
        }
    }

    /// Adds a dependency, builder style.
    pub fn with_dependency(mut self, dependency: DependencyRef) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Sets the parent reference, builder style.
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Returns the parent's identifier, or this module's own identifier when
    /// it has no parent.
    pub fn effective_parent_id(&self) -> &str {
        self.parent
            .as_ref()
            .map_or(self.artifact_id.as_str(), |p| p.artifact_id.as_str())
    }

    /// Returns true if the module declares a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }
}

impl fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Read-only mapping from module identifier to descriptor.
///
/// Backed by a `BTreeMap`, so iteration is sorted by identifier and every
/// graph built from the store has a reproducible vertex order.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    models: BTreeMap<String, ModuleDescriptor>,
}

impl ModelStore {
    /// Builds a store from descriptors. A later descriptor with the same
    /// identifier replaces an earlier one.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ModuleDescriptor>) -> Self {
        descriptors.into_iter().collect()
    }

    /// Looks up a descriptor by identifier.
    pub fn get(&self, artifact_id: &str) -> Option<&ModuleDescriptor> {
        self.models.get(artifact_id)
    }

    /// Returns true if a descriptor with this identifier is present.
    pub fn contains(&self, artifact_id: &str) -> bool {
        self.models.contains_key(artifact_id)
    }

    /// Number of descriptors in the store.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if the store holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterates descriptors in identifier order.
    pub fn descriptors(&self) -> btree_map::Values<'_, String, ModuleDescriptor> {
        self.models.values()
    }

    /// Iterates identifiers in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

impl FromIterator<ModuleDescriptor> for ModelStore {
    fn from_iter<I: IntoIterator<Item = ModuleDescriptor>>(iter: I) -> Self {
        let models = iter
            .into_iter()
            .map(|d| (d.artifact_id.clone(), d))
            .collect();
        Self { models }
    }
}

impl<'a> IntoIterator for &'a ModelStore {
    type Item = &'a ModuleDescriptor;
    type IntoIter = btree_map::Values<'a, String, ModuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.values()
    }
}
