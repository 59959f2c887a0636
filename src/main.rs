use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use graph_walk::{
    config::{Config, OutputFormat},
    input::{AncestryDefinition, GraphDefinition},
    AncestorResolver, Graph, NO_ANCESTOR,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graph-walk")]
#[command(about = "Directed graph traversals and earliest-ancestor lookup")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every traversal over the built-in sample graph
    Demo,

    /// Run one traversal over a graph file
    Traverse {
        /// Graph definition (YAML, or JSON by extension)
        #[arg(short, long)]
        graph: PathBuf,

        /// Starting vertex
        #[arg(short, long)]
        start: i64,

        /// Destination vertex for path searches
        #[arg(short, long)]
        destination: Option<i64>,

        /// Traversal to run
        #[arg(short, long, value_enum, default_value = "bft")]
        algorithm: Algorithm,
    },

    /// Find the earliest ancestor of a vertex
    Ancestor {
        /// Ancestry definition (YAML, or JSON by extension)
        #[arg(short, long)]
        pairs: PathBuf,

        /// Vertex to resolve
        #[arg(short, long)]
        start: i64,
    },

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "graph-walk.yml")]
        config_file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Bft,
    Dft,
    DftRecursive,
    Bfs,
    Dfs,
    DfsRecursive,
    Paths,
}

const SAMPLE_EDGES: [(i64, i64); 10] = [
    (5, 3),
    (6, 3),
    (7, 1),
    (4, 7),
    (1, 2),
    (7, 6),
    (2, 4),
    (3, 5),
    (2, 3),
    (4, 6),
];

const SAMPLE_ANCESTORS: [(i64, i64); 10] = [
    (1, 3),
    (2, 3),
    (3, 6),
    (5, 6),
    (5, 7),
    (4, 5),
    (4, 8),
    (8, 9),
    (11, 8),
    (10, 1),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    init_tracing(&config.logging.level)?;

    match cli.command {
        Commands::Demo => run_demo(&config)?,

        Commands::Traverse {
            graph,
            start,
            destination,
            algorithm,
        } => {
            let graph = GraphDefinition::load(&graph)?.build()?;
            run_traversal(&graph, algorithm, start, destination, &config)?;
        }

        Commands::Ancestor { pairs, start } => {
            let resolver = AncestryDefinition::load(&pairs)?
                .resolver()?
                .with_cycle_guard(config.traversal.cycle_guard);
            let ancestor = resolver
                .earliest_ancestor(&start)?
                .unwrap_or(NO_ANCESTOR);
            emit(&config, "earliest ancestor", &ancestor)?;
        }

        Commands::Init { config_file } => init_config(config_file)?,
    }

    Ok(())
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Defaults, then environment, then the config file if one was given
fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    let mut config = Config::load_from_env()?;

    if let Some(path) = config_path {
        if path.exists() {
            config.merge_with(Config::load_from_file(path)?);
        } else {
            // Tracing is not set up yet at this point
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
        }
    }

    Ok(config)
}

fn run_demo(config: &Config) -> Result<()> {
    info!("Running sample graph demo");

    let mut graph = Graph::new();
    for vertex in 1..=7 {
        graph.add_vertex(vertex);
    }
    for (from, to) in &SAMPLE_EDGES {
        graph.add_edge(from, to)?;
    }

    emit(config, "adjacency", &graph.adjacency())?;
    emit(config, "leaves", &graph.leaf_vertices())?;
    emit(config, "bft", &graph.breadth_first_traverse(&1)?)?;
    emit(config, "dft", &graph.depth_first_traverse(&1)?)?;
    emit(config, "dft (recursive)", &graph.depth_first_traverse_recursive(&1)?)?;
    emit(config, "bfs 1 -> 6", &graph.shortest_path_breadth_first(&1, &6)?)?;
    emit(config, "dfs 1 -> 6", &graph.path_depth_first(&1, &6)?)?;
    emit(
        config,
        "dfs (recursive) 1 -> 6",
        &graph.shortest_path_depth_first_recursive(&1, &6),
    )?;

    let resolver = AncestorResolver::from_pairs(&SAMPLE_ANCESTORS)?
        .with_cycle_guard(config.traversal.cycle_guard);
    for vertex in 1..=11 {
        let ancestor = resolver.earliest_ancestor(&vertex)?.unwrap_or(NO_ANCESTOR);
        emit(config, &format!("earliest ancestor of {}", vertex), &ancestor)?;
    }

    Ok(())
}

fn run_traversal(
    graph: &Graph<i64>,
    algorithm: Algorithm,
    start: i64,
    destination: Option<i64>,
    config: &Config,
) -> Result<()> {
    info!("Running {:?} from vertex {}", algorithm, start);

    let require_destination = || {
        destination.with_context(|| format!("--destination is required for {:?}", algorithm))
    };

    match algorithm {
        Algorithm::Bft => emit(config, "bft", &graph.breadth_first_traverse(&start)?),
        Algorithm::Dft => emit(config, "dft", &graph.depth_first_traverse(&start)?),
        Algorithm::DftRecursive => emit(
            config,
            "dft (recursive)",
            &graph.depth_first_traverse_recursive(&start)?,
        ),
        Algorithm::Bfs => {
            let destination = require_destination()?;
            let path = graph.shortest_path_breadth_first(&start, &destination)?;
            report_path(config, "bfs", path)
        }
        Algorithm::Dfs => {
            let destination = require_destination()?;
            let path = graph.path_depth_first(&start, &destination)?;
            report_path(config, "dfs", path)
        }
        Algorithm::DfsRecursive => {
            let destination = require_destination()?;
            let path = graph.shortest_path_depth_first_recursive(&start, &destination);
            report_path(config, "dfs (recursive)", path)
        }
        Algorithm::Paths => {
            let paths = if config.traversal.cycle_guard {
                graph.try_collect_maximal_paths(&start)?
            } else {
                graph.collect_maximal_paths(&start)?
            };
            emit(config, "maximal paths", &paths)
        }
    }
}

fn report_path(config: &Config, label: &str, path: Option<Vec<i64>>) -> Result<()> {
    if path.is_none() {
        warn!("No path found");
    }
    emit(config, label, &path)
}

/// Print one labelled result in the configured output format
fn emit<T: Serialize + std::fmt::Debug>(config: &Config, label: &str, value: &T) -> Result<()> {
    match config.output.format {
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert(
                label.to_string(),
                serde_json::to_value(value).context("Failed to serialize result")?,
            );
            println!("{}", serde_json::Value::Object(object));
        }
        OutputFormat::Text => println!("{}: {:?}", label, value),
    }
    Ok(())
}

/// Write the default configuration to disk
fn init_config(config_file: PathBuf) -> Result<()> {
    if config_file.exists() {
        warn!("Configuration file already exists: {:?}", config_file);
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_file)
        .with_context(|| format!("Failed to write config file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);
    Ok(())
}
