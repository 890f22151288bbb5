//! Recursive discovery of `pom.xml` files.
//!
//! Walks a directory tree, parses every POM it finds and collects the
//! results into a [`ModelStore`]. A single unreadable or malformed POM
//! fails the whole load, since a partial store would silently drop edges.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::pom::{self, ParseError};
use super::types::{ModelStore, ModuleDescriptor};

/// File name of a Maven descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// Directories that never contain source descriptors.
const IGNORED_DIRS: &[&str] = &["target", ".git", "node_modules", ".idea"];

/// Errors that can occur while loading descriptors from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The root directory does not exist or is not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The directory walk itself failed (permissions, broken links).
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A descriptor could not be read or parsed.
    #[error("Failed to load {}: {source}", path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Result type alias for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Finds every `pom.xml` under `root`, in a deterministic order.
pub fn find_descriptor_files(root: &Path) -> LoadResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(LoadError::RootNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && entry.file_name() == DESCRIPTOR_FILE_NAME {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Loads every descriptor under `root` into a [`ModelStore`].
///
/// When two POMs declare the same artifactId, the one found later in the
/// walk wins and a warning names both files.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pomgraph::parser::load_descriptors;
///
/// let store = load_descriptors(Path::new("./my-maven-project"))?;
/// println!("Loaded {} modules", store.len());
/// ```
pub fn load_descriptors(root: &Path) -> LoadResult<ModelStore> {
    let files = find_descriptor_files(root)?;
    info!(root = %root.display(), files = files.len(), "Loading descriptors");

    let mut seen: HashMap<String, PathBuf> = HashMap::with_capacity(files.len());
    let mut descriptors: Vec<ModuleDescriptor> = Vec::with_capacity(files.len());

    for path in files {
        let descriptor = pom::parse_file(&path).map_err(|source| LoadError::Descriptor {
            path: path.clone(),
            source,
        })?;
        debug!(
            path = %path.display(),
            module = %descriptor,
            dependencies = descriptor.dependencies.len(),
            "Loaded descriptor"
        );

        if let Some(previous) = seen.insert(descriptor.artifact_id.clone(), path.clone()) {
            warn!(
                module = %descriptor.artifact_id,
                previous = %previous.display(),
                replacement = %path.display(),
                "Duplicate module identifier"
            );
        }
        descriptors.push(descriptor);
    }

    let store = ModelStore::from_descriptors(descriptors);
    info!(modules = store.len(), "Loaded models");
    Ok(store)
}

/// Check if a directory should be skipped during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    entry
        .file_name()
        .to_str()
        .is_some_and(|name| IGNORED_DIRS.contains(&name))
}
