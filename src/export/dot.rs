//! DOT format generator for Graphviz visualization.

use std::fmt::Write as _;
use std::io::Write;

use super::{ExportResult, GraphExporter, IdentifierLabels, LabelProvider};
use crate::graph::ModuleGraph;

const NODE_SHAPE: &str = "box";

/// Writes a graph as a Graphviz `digraph`.
#[derive(Debug, Clone)]
pub struct DotExporter<L = IdentifierLabels> {
    name: String,
    labels: L,
}

impl DotExporter<IdentifierLabels> {
    /// Creates an exporter for a graph with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: IdentifierLabels,
        }
    }
}

impl<L: LabelProvider> DotExporter<L> {
    /// Creates an exporter with a custom label provider.
    pub fn with_labels(name: impl Into<String>, labels: L) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// Renders the graph to a DOT string.
    #[must_use]
    pub fn generate(&self, graph: &ModuleGraph) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "digraph \"{}\" {{", escape_dot_string(&self.name));
        let _ = writeln!(output, "    node [shape={NODE_SHAPE}];");

        write_vertices(&mut output, graph, &self.labels);
        write_edges(&mut output, graph);

        output.push_str("}\n");
        output
    }
}

impl<L: LabelProvider> GraphExporter for DotExporter<L> {
    fn export_graph<W: Write>(&self, graph: &ModuleGraph, writer: &mut W) -> ExportResult<()> {
        writer.write_all(self.generate(graph).as_bytes())?;
        Ok(())
    }
}

fn write_vertices<L: LabelProvider>(output: &mut String, graph: &ModuleGraph, labels: &L) {
    if graph.is_empty() {
        return;
    }

    output.push('\n');
    for vertex in graph.vertices() {
        let _ = writeln!(
            output,
            "    \"{}\" [label=\"{}\"];",
            escape_dot_string(vertex),
            escape_dot_string(&labels.label(vertex))
        );
    }
}

fn write_edges(output: &mut String, graph: &ModuleGraph) {
    if graph.edge_count() == 0 {
        return;
    }

    output.push('\n');
    for edge in graph.edges() {
        let _ = writeln!(
            output,
            "    \"{}\" -> \"{}\";",
            escape_dot_string(edge.source),
            escape_dot_string(edge.target)
        );
    }
}

fn escape_dot_string(s: &str) -> String {
    if s.contains(['"', '\\']) {
        s.replace('\\', r"\\").replace('"', r#"\""#)
    } else {
        s.to_string()
    }
}
