use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pomgraph::pipeline::{run, RunConfig};
use pomgraph::render::DEFAULT_DOT_EXECUTABLE;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pomgraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Maven module dependency graphs with transitive reduction and Pajek export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze module dependencies under a directory
    Analyze {
        /// Root directory scanned for pom.xml files
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Only dependencies declared with this groupId become edges
        #[arg(short, long)]
        group_id: String,

        /// Directory receiving .net, .dot and .png files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Skip Graphviz rendering
        #[arg(long)]
        no_render: bool,

        /// Graphviz executable used for rendering
        #[arg(long, default_value = DEFAULT_DOT_EXECUTABLE)]
        dot: String,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            path,
            group_id,
            output_dir,
            no_render,
            dot,
        }) => {
            let mut config = RunConfig::new(&path, group_id)
                .with_output_dir(output_dir)
                .with_render(!no_render);
            config.dot_executable = dot;

            let summary = run(&config)
                .with_context(|| format!("Failed to analyze {}", path.display()))?;

            println!("Analyzed {} modules", summary.modules);
            println!(
                "  dependencies: {} vertices, {} edges",
                summary.dependency_graph.vertices, summary.dependency_graph.edges
            );
            println!(
                "  parents:      {} vertices, {} edges",
                summary.parent_graph.vertices, summary.parent_graph.edges
            );
            for file in &summary.written {
                println!("  wrote {}", file.display());
            }
        }
        Some(Commands::Version) => {
            println!("pomgraph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("pomgraph - Maven module dependency graphs");
            println!("Run 'pomgraph analyze --group-id <groupId>' to analyze a project");
            println!("Run 'pomgraph --help' for more information");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pomgraph=info,warn"));

    let format = env::var("POMGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
