//! Pajek network (`.net`) export and import.
//!
//! The written form is:
//!
//! ```text
//! *Vertices <N>
//! <i> <label>
//! *Arcs
//! <from> <to> <weight>
//! ```
//!
//! Vertices are numbered from 1 in graph iteration order and weights are
//! written with six decimal digits.

use super::{ExportResult, GraphExporter, IdentifierLabels, LabelProvider};
use crate::graph::{ModuleGraph, DEFAULT_EDGE_WEIGHT};
use std::collections::{HashMap, HashSet};
use std::io::Write;

const VERTICES_HEADER: &str = "*Vertices";
const ARCS_HEADER: &str = "*Arcs";

/// Pajek exporter with a pluggable label provider.
///
/// # Example
///
/// ```
/// use pomgraph::export::{export_to_string, PajekExporter};
/// use pomgraph::graph::ModuleGraph;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_vertex("a");
/// graph.add_vertex("b");
/// graph.add_edge("a", "b");
///
/// let net = export_to_string(&PajekExporter::new(), &graph).unwrap();
/// assert_eq!(net, "*Vertices 2\n1 a\n2 b\n*Arcs\n1 2 1.000000\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PajekExporter<L = IdentifierLabels> {
    labels: L,
}

impl PajekExporter<IdentifierLabels> {
    /// Creates an exporter that labels vertices with their identifiers.
    pub fn new() -> Self {
        Self {
            labels: IdentifierLabels,
        }
    }
}

impl<L: LabelProvider> PajekExporter<L> {
    /// Creates an exporter with a custom label provider.
    pub fn with_labels(labels: L) -> Self {
        Self { labels }
    }
}

impl<L: LabelProvider> GraphExporter for PajekExporter<L> {
    fn export_graph<W: Write>(&self, graph: &ModuleGraph, writer: &mut W) -> ExportResult<()> {
        writeln!(writer, "{} {}", VERTICES_HEADER, graph.vertex_count())?;

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.vertex_count());
        for (i, vertex) in graph.vertices().enumerate() {
            let number = i + 1;
            index.insert(vertex, number);
            writeln!(writer, "{} {}", number, self.labels.label(vertex))?;
        }

        writeln!(writer, "{}", ARCS_HEADER)?;
        for edge in graph.edges() {
            let (Some(from), Some(to)) = (index.get(edge.source), index.get(edge.target)) else {
                continue;
            };
            writeln!(writer, "{} {} {:.6}", from, to, edge.weight)?;
        }

        Ok(())
    }
}

/// Errors raised while reading a Pajek network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PajekParseError {
    /// The input does not start with a `*Vertices` line.
    #[error("Missing *Vertices header")]
    MissingVerticesHeader,

    /// The `*Arcs` line never appears.
    #[error("Missing *Arcs header")]
    MissingArcsHeader,

    /// A line could not be parsed.
    #[error("Line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    /// An arc refers to a vertex number that was never declared.
    #[error("Line {line}: unknown vertex number {index}")]
    UnknownVertex { line: usize, index: usize },
}

/// Reads a Pajek network written by [`PajekExporter`] back into a graph.
///
/// Labels become vertex identifiers. Vertex lines may appear in any order
/// but every number from 1 to N must be declared exactly once, and no two
/// vertices may share a label. Arc lines
/// without a weight get the default weight.
///
/// # Example
///
/// ```
/// use pomgraph::export::read_pajek;
///
/// let graph = read_pajek("*Vertices 2\n1 a\n2 b\n*Arcs\n1 2 1.000000\n").unwrap();
/// assert!(graph.contains_edge("a", "b"));
/// assert_eq!(graph.edge_weight("a", "b"), Some(1.0));
/// ```
pub fn read_pajek(input: &str) -> Result<ModuleGraph, PajekParseError> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    let mut lines = lines.into_iter();

    let (header_line, header) = lines
        .next()
        .ok_or(PajekParseError::MissingVerticesHeader)?;
    let count = parse_vertices_header(header_line, header)?;

    // Each vertex needs its own line, so the count is bounded by the input.
    let remaining = lines.len();
    if count > remaining {
        return Err(invalid(
            header_line,
            &format!("declares {count} vertices but only {remaining} lines follow"),
        ));
    }

    let mut labels: Vec<Option<String>> = vec![None; count];
    let mut seen: HashSet<String> = HashSet::with_capacity(count);
    for _ in 0..count {
        let (line_no, line) = lines.next().ok_or(PajekParseError::MissingArcsHeader)?;
        let (number, label) = line
            .split_once(' ')
            .ok_or_else(|| invalid(line_no, "expected '<index> <label>'"))?;
        let number = parse_index(line_no, number)?;
        let slot = number
            .checked_sub(1)
            .and_then(|i| labels.get_mut(i))
            .ok_or_else(|| invalid(line_no, &format!("vertex number {number} out of range")))?;
        if slot.is_some() {
            return Err(invalid(line_no, &format!("vertex number {number} declared twice")));
        }
        let label = label.trim().to_string();
        if !seen.insert(label.clone()) {
            return Err(invalid(line_no, &format!("label '{label}' declared twice")));
        }
        *slot = Some(label);
    }

    match lines.next() {
        Some((_, line)) if line.eq_ignore_ascii_case(ARCS_HEADER) => {}
        Some((line_no, _)) => return Err(invalid(line_no, "expected *Arcs")),
        None => return Err(PajekParseError::MissingArcsHeader),
    }

    let mut graph = ModuleGraph::with_capacity(count, count);
    let labels: Vec<String> = labels.into_iter().flatten().collect();
    for label in &labels {
        graph.add_vertex(label);
    }

    for (line_no, line) in lines {
        let mut fields = line.split_whitespace();
        let from = parse_index(line_no, fields.next().unwrap_or_default())?;
        let to = fields
            .next()
            .ok_or_else(|| invalid(line_no, "expected '<from> <to> [weight]'"))
            .and_then(|f| parse_index(line_no, f))?;
        let weight = match fields.next() {
            Some(w) => w
                .parse::<f64>()
                .map_err(|_| invalid(line_no, &format!("invalid weight '{w}'")))?,
            None => DEFAULT_EDGE_WEIGHT,
        };

        let source = vertex_label(&labels, line_no, from)?;
        let target = vertex_label(&labels, line_no, to)?;
        graph.add_weighted_edge(source, target, weight);
    }

    Ok(graph)
}

fn parse_vertices_header(line_no: usize, line: &str) -> Result<usize, PajekParseError> {
    let mut fields = line.split_whitespace();
    match fields.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case(VERTICES_HEADER) => {}
        _ => return Err(PajekParseError::MissingVerticesHeader),
    }
    let count = fields
        .next()
        .ok_or_else(|| invalid(line_no, "missing vertex count"))?;
    count
        .parse()
        .map_err(|_| invalid(line_no, &format!("invalid vertex count '{count}'")))
}

fn parse_index(line_no: usize, field: &str) -> Result<usize, PajekParseError> {
    field
        .parse()
        .map_err(|_| invalid(line_no, &format!("invalid vertex number '{field}'")))
}

fn vertex_label(labels: &[String], line_no: usize, index: usize) -> Result<&str, PajekParseError> {
    index
        .checked_sub(1)
        .and_then(|i| labels.get(i))
        .map(String::as_str)
        .ok_or(PajekParseError::UnknownVertex {
            line: line_no,
            index,
        })
}

fn invalid(line: usize, reason: &str) -> PajekParseError {
    PajekParseError::InvalidLine {
        line,
        reason: reason.to_string(),
    }
}
