//! End-to-end analysis run.
//!
//! Loads descriptors, builds the module and parent graphs, reduces them,
//! renders them and writes the Pajek exports. All parameters travel in a
//! [`RunConfig`] so independent runs never share state.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::export::{export_to_file, ExportError, ExportFormat, PajekExporter};
use crate::graph::{
    build_module_graph_for_group, build_parent_graph_for_group, remove_isolated_vertices,
    transitive_reduction, ModuleGraph,
};
use crate::parser::{load_descriptors, LoadError, ModelStore};
use crate::render::{RenderError, Renderer, DEFAULT_DOT_EXECUTABLE};

/// Name of the module-level graph outputs.
pub const DEPENDENCIES_GRAPH_NAME: &str = "dependencies";

/// Name of the parent-level graph outputs.
pub const PARENTS_GRAPH_NAME: &str = "parents";

/// Parameters of one analysis run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned recursively for `pom.xml` files.
    pub root: PathBuf,
    /// Only dependencies declared with this groupId become edges.
    pub group_id: String,
    /// Where `.net`, `.dot` and `.png` files are written.
    pub output_dir: PathBuf,
    /// Whether to invoke Graphviz.
    pub render: bool,
    /// Graphviz executable used when rendering.
    pub dot_executable: String,
}

impl RunConfig {
    /// Creates a config that writes into the current directory and renders.
    pub fn new(root: impl Into<PathBuf>, group_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            group_id: group_id.into(),
            output_dir: PathBuf::from("."),
            render: true,
            dot_executable: DEFAULT_DOT_EXECUTABLE.to_string(),
        }
    }

    /// Sets the output directory, builder style.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Enables or disables rendering, builder style.
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Checks the parameters before any work is done.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.group_id.trim().is_empty() {
            return Err(PipelineError::Config("group id must not be empty".to_string()));
        }
        if !self.output_dir.is_dir() {
            return Err(PipelineError::Config(format!(
                "output directory {} does not exist",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}

/// Errors that abort a run, one kind per stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The run parameters are unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Descriptors could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An export file could not be written.
    #[error("Failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },

    /// A graph could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Size of a graph after a pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
}

impl GraphStats {
    fn of(graph: &ModuleGraph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of loaded descriptors.
    pub modules: usize,
    /// Module graph after transitive reduction.
    pub dependency_graph: GraphStats,
    /// Parent graph after reduction and pruning.
    pub parent_graph: GraphStats,
    /// Every file written by the run.
    pub written: Vec<PathBuf>,
}

/// The two reduced graphs produced from a model store.
#[derive(Debug, Clone)]
pub struct AnalysisGraphs {
    pub dependencies: ModuleGraph,
    pub parents: ModuleGraph,
}

/// Builds and reduces both graphs without touching the filesystem.
///
/// The module graph is transitively reduced. The parent graph is reduced
/// and then stripped of isolated vertices.
pub fn analyze(store: &ModelStore, group_id: &str) -> AnalysisGraphs {
    info!("Building graph");
    let mut dependencies = build_module_graph_for_group(store.descriptors(), group_id);
    log_stats(DEPENDENCIES_GRAPH_NAME, &dependencies);

    info!("Transitive reduction");
    transitive_reduction(&mut dependencies);
    log_stats(DEPENDENCIES_GRAPH_NAME, &dependencies);

    info!("Building parent graph");
    let mut parents = build_parent_graph_for_group(store, group_id);
    transitive_reduction(&mut parents);
    remove_isolated_vertices(&mut parents);
    log_stats(PARENTS_GRAPH_NAME, &parents);

    AnalysisGraphs {
        dependencies,
        parents,
    }
}

/// Runs the whole pipeline.
///
/// # Example
///
/// ```ignore
/// use pomgraph::pipeline::{run, RunConfig};
///
/// let config = RunConfig::new("./services", "com.acme").with_render(false);
/// let summary = run(&config)?;
/// println!("{} modules", summary.modules);
/// ```
pub fn run(config: &RunConfig) -> Result<RunSummary, PipelineError> {
    config.validate()?;

    info!("Loading models");
    let store = load_descriptors(&config.root)?;

    let graphs = analyze(&store, &config.group_id);
    let mut written = Vec::new();

    if config.render {
        let renderer =
            Renderer::new(&config.output_dir).with_executable(config.dot_executable.clone());
        written.push(renderer.render(&graphs.dependencies, DEPENDENCIES_GRAPH_NAME)?);
        written.push(renderer.render(&graphs.parents, PARENTS_GRAPH_NAME)?);
    }

    for (name, graph) in [
        (DEPENDENCIES_GRAPH_NAME, &graphs.dependencies),
        (PARENTS_GRAPH_NAME, &graphs.parents),
    ] {
        written.push(write_pajek(&config.output_dir, name, graph)?);
    }

    Ok(RunSummary {
        modules: store.len(),
        dependency_graph: GraphStats::of(&graphs.dependencies),
        parent_graph: GraphStats::of(&graphs.parents),
        written,
    })
}

fn write_pajek(dir: &Path, name: &str, graph: &ModuleGraph) -> Result<PathBuf, PipelineError> {
    let path = dir.join(format!("{name}.{}", ExportFormat::Pajek.extension()));
    export_to_file(&PajekExporter::new(), graph, &path).map_err(|source| {
        PipelineError::Export {
            path: path.clone(),
            source,
        }
    })?;
    info!(path = %path.display(), "Exported graph");
    Ok(path)
}

fn log_stats(name: &str, graph: &ModuleGraph) {
    info!(
        graph = name,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Graph has {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
}
