//! Export functionality for module graphs.
//!
//! This module provides exporters that serialize a [`ModuleGraph`] to a
//! writer: the Pajek network format for exchange with graph analysis tools,
//! and Graphviz DOT for rendering.

pub mod dot;
pub mod pajek;

use crate::graph::ModuleGraph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub use dot::DotExporter;
pub use pajek::{read_pajek, PajekExporter, PajekParseError};

/// Errors raised while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination rejected a write.
    #[error("Failed to write export: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pajek `.net` format - vertex/arc lists for network analysis tools
    #[default]
    Pajek,
    /// Graphviz DOT format - input for the layout engine
    Dot,
}

impl ExportFormat {
    /// File extension conventionally used for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pajek => "net",
            ExportFormat::Dot => "dot",
        }
    }
}

/// Produces the display label of a vertex.
pub trait LabelProvider {
    /// Returns the label for the vertex with this identifier.
    fn label(&self, vertex: &str) -> String;
}

/// Labels every vertex with its own identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierLabels;

impl LabelProvider for IdentifierLabels {
    fn label(&self, vertex: &str) -> String {
        vertex.to_string()
    }
}

impl<F> LabelProvider for F
where
    F: Fn(&str) -> String,
{
    fn label(&self, vertex: &str) -> String {
        self(vertex)
    }
}

/// Trait for graph exporters.
pub trait GraphExporter {
    /// Export the graph to the given writer.
    fn export_graph<W: Write>(&self, graph: &ModuleGraph, writer: &mut W) -> ExportResult<()>;
}

/// Export a graph to a string.
pub fn export_to_string<E: GraphExporter>(exporter: &E, graph: &ModuleGraph) -> ExportResult<String> {
    let mut buffer = Vec::new();
    exporter.export_graph(graph, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Export a graph to a file, creating or truncating it.
pub fn export_to_file<E: GraphExporter>(
    exporter: &E,
    graph: &ModuleGraph,
    path: &Path,
) -> ExportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    exporter.export_graph(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}
