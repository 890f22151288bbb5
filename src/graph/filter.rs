//! Dependency filters used by the graph builders.

use crate::parser::DependencyRef;

/// Decides which declared dependencies become edges.
pub trait DependencyFilter {
    /// Returns true if the dependency should be part of the graph.
    fn matches(&self, dependency: &DependencyRef) -> bool;
}

/// Keeps dependencies whose declared groupId equals a target group.
///
/// This is the default analysis filter: it keeps internal dependencies and
/// drops third-party libraries.
///
/// # Example
///
/// ```
/// use pomgraph::graph::{DependencyFilter, GroupFilter};
/// use pomgraph::parser::DependencyRef;
///
/// let filter = GroupFilter::new("com.acme");
/// assert!(filter.matches(&DependencyRef::new("billing", "com.acme")));
/// assert!(!filter.matches(&DependencyRef::new("guava", "com.google.guava")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    group_id: String,
}

impl GroupFilter {
    /// Creates a filter for the given group.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
        }
    }

    /// The group this filter keeps.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

impl DependencyFilter for GroupFilter {
    fn matches(&self, dependency: &DependencyRef) -> bool {
        dependency.group_id == self.group_id
    }
}

/// Keeps every dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl DependencyFilter for AcceptAll {
    fn matches(&self, _dependency: &DependencyRef) -> bool {
        true
    }
}

/// Drops every dependency, leaving only module vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl DependencyFilter for RejectAll {
    fn matches(&self, _dependency: &DependencyRef) -> bool {
        false
    }
}

impl<F> DependencyFilter for F
where
    F: Fn(&DependencyRef) -> bool,
{
    fn matches(&self, dependency: &DependencyRef) -> bool {
        self(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_filter() {
        let filter = GroupFilter::new("com.acme");

        assert_eq!(filter.group_id(), "com.acme");
        assert!(filter.matches(&DependencyRef::new("core", "com.acme")));
        assert!(!filter.matches(&DependencyRef::new("core", "com.acme.other")));
        assert!(!filter.matches(&DependencyRef::new("core", "")));
    }

    #[test]
    fn test_accept_and_reject_all() {
        let dep = DependencyRef::new("anything", "org.example");
        assert!(AcceptAll.matches(&dep));
        assert!(!RejectAll.matches(&dep));
    }

    #[test]
    fn test_closure_filter() {
        let starts_with_core = |d: &DependencyRef| d.artifact_id.starts_with("core");

        assert!(starts_with_core.matches(&DependencyRef::new("core-api", "g")));
        assert!(!starts_with_core.matches(&DependencyRef::new("web", "g")));
    }
}
