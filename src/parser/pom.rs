//! Parser for Maven `pom.xml` files.
//!
//! This module reads a POM with quick-xml's serde deserializer and
//! normalizes it into a [`ModuleDescriptor`]. Only the parts the dependency
//! graph needs are read: coordinates, the parent reference and the direct
//! `<dependencies>` block. Everything else in the POM is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{DependencyRef, ModuleDescriptor, ParentRef};

/// Errors that can occur during pom.xml parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse XML content.
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The POM is well-formed XML but lacks required coordinates.
    #[error("Invalid pom.xml: {0}")]
    InvalidDescriptor(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    parent: Option<RawCoordinates>,
    #[serde(default)]
    dependencies: RawDependencies,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencies {
    #[serde(default)]
    dependency: Vec<RawCoordinates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoordinates {
    group_id: Option<String>,
    artifact_id: Option<String>,
}

/// Parses a pom.xml file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pomgraph::parser::pom::parse_file;
///
/// let module = parse_file(Path::new("pom.xml")).unwrap();
/// println!("Module: {}", module.artifact_id);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<ModuleDescriptor> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a pom.xml from a string.
///
/// # Example
///
/// ```
/// use pomgraph::parser::pom::parse_str;
///
/// let xml = r#"<project>
///     <groupId>com.acme</groupId>
///     <artifactId>billing</artifactId>
///     <dependencies>
///         <dependency>
///             <groupId>com.acme</groupId>
///             <artifactId>common</artifactId>
///         </dependency>
///     </dependencies>
/// </project>"#;
///
/// let module = parse_str(xml).unwrap();
/// assert_eq!(module.artifact_id, "billing");
/// assert_eq!(module.dependencies[0].artifact_id, "common");
/// ```
pub fn parse_str(content: &str) -> ParseResult<ModuleDescriptor> {
    let raw: RawProject = quick_xml::de::from_str(content)?;
    normalize(raw)
}

fn normalize(raw: RawProject) -> ParseResult<ModuleDescriptor> {
    let artifact_id = non_empty(raw.artifact_id).ok_or_else(|| {
        ParseError::InvalidDescriptor("project has no artifactId".to_string())
    })?;

    let parent = match raw.parent {
        Some(coords) => {
            let parent_id = non_empty(coords.artifact_id).ok_or_else(|| {
                ParseError::InvalidDescriptor(format!(
                    "parent of '{artifact_id}' has no artifactId"
                ))
            })?;
            Some(ParentRef::new(parent_id, non_empty(coords.group_id)))
        }
        None => None,
    };

    // Maven inherits the groupId from the parent when the project omits it.
    let group_id = non_empty(raw.group_id)
        .or_else(|| parent.as_ref().and_then(|p| p.group_id.clone()))
        .ok_or_else(|| {
            ParseError::InvalidDescriptor(format!(
                "'{artifact_id}' has no groupId and no parent groupId"
            ))
        })?;

    let mut dependencies = Vec::with_capacity(raw.dependencies.dependency.len());
    for coords in raw.dependencies.dependency {
        let dep_id = non_empty(coords.artifact_id).ok_or_else(|| {
            ParseError::InvalidDescriptor(format!(
                "dependency of '{artifact_id}' has no artifactId"
            ))
        })?;
        let dep_group = non_empty(coords.group_id).ok_or_else(|| {
            ParseError::InvalidDescriptor(format!(
                "dependency '{dep_id}' of '{artifact_id}' has no groupId"
            ))
        })?;
        let dep_group = resolve_group_property(&dep_group, &group_id, parent.as_ref());
        dependencies.push(DependencyRef::new(dep_id, dep_group));
    }

    Ok(ModuleDescriptor {
        artifact_id,
        group_id,
        dependencies,
        parent,
    })
}

/// Resolves the handful of built-in properties commonly used for sibling
/// module groupIds. Anything else is returned verbatim.
fn resolve_group_property(value: &str, group_id: &str, parent: Option<&ParentRef>) -> String {
    match value {
        "${project.groupId}" | "${pom.groupId}" | "${groupId}" => group_id.to_string(),
        "${project.parent.groupId}" | "${parent.groupId}" => parent
            .and_then(|p| p.group_id.as_deref())
            .unwrap_or(group_id)
            .to_string(),
        other => other.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
