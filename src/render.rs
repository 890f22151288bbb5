//! Rendering of module graphs to PNG through Graphviz.
//!
//! The layout engine is the external `dot` executable. A graph named `name`
//! is written to `<dir>/<name>.dot` and rendered to `<dir>/<name>.png`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::export::{DotExporter, ExportFormat};
use crate::graph::ModuleGraph;

/// Default name of the Graphviz executable.
pub const DEFAULT_DOT_EXECUTABLE: &str = "dot";

/// Errors raised while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing the DOT source failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The layout engine could not be started.
    #[error("Graphviz executable '{executable}' is not available: {source}")]
    EngineUnavailable {
        executable: String,
        #[source]
        source: io::Error,
    },

    /// The layout engine ran but reported failure.
    #[error("Graphviz exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },
}

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Renders graphs into an output directory.
#[derive(Debug, Clone)]
pub struct Renderer {
    output_dir: PathBuf,
    executable: String,
}

impl Renderer {
    /// Creates a renderer using the default `dot` executable.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            executable: DEFAULT_DOT_EXECUTABLE.to_string(),
        }
    }

    /// Uses a different Graphviz executable.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Path of the DOT source for a graph name.
    pub fn dot_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.{}", ExportFormat::Dot.extension()))
    }

    /// Path of the rendered image for a graph name.
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.png"))
    }

    /// Writes the DOT source for `graph` and returns its path.
    pub fn write_dot(&self, graph: &ModuleGraph, name: &str) -> RenderResult<PathBuf> {
        let path = self.dot_path(name);
        let source = DotExporter::new(name).generate(graph);
        fs::write(&path, source).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Wrote DOT source");
        Ok(path)
    }

    /// Renders `graph` to `<name>.png` and returns the image path.
    pub fn render(&self, graph: &ModuleGraph, name: &str) -> RenderResult<PathBuf> {
        let dot_path = self.write_dot(graph, name)?;
        let image_path = self.image_path(name);

        info!(name, vertices = graph.vertex_count(), "Building visualization");
        run_engine(&self.executable, &dot_path, &image_path)?;
        Ok(image_path)
    }
}

fn run_engine(executable: &str, dot_path: &Path, image_path: &Path) -> RenderResult<()> {
    let output = Command::new(executable)
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(image_path)
        .output()
        .map_err(|source| RenderError::EngineUnavailable {
            executable: executable.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(RenderError::EngineFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}
