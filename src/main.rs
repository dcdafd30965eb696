use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::path::PathBuf;

use context_cluster::data::files::{self, SizeMetric};
use context_cluster::data::json;
use context_cluster::engine::ContextClustering;
use context_cluster::graph::FileNode;
use context_cluster::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "context-cluster",
    about = "Group related files into size-bounded clusters"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0", global = true)]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cluster a JSON graph of nodes and weighted edges
    Cluster {
        /// Path to input JSON file
        #[clap(long)]
        input: PathBuf,

        /// Output directory for results
        #[clap(long, default_value = "cluster_results")]
        output_dir: PathBuf,

        /// Maximum aggregate size per cluster (overrides N from the input)
        #[clap(long)]
        max_size: Option<u64>,

        /// Target maximum number of clusters (overrides M from the input)
        #[clap(long)]
        max_clusters: Option<usize>,
    },

    /// Measure files and print them as clustering nodes
    Measure {
        /// Files to measure
        #[clap(required = true)]
        files: Vec<PathBuf>,

        /// Which measurement becomes the node size
        #[clap(long, value_enum, default_value = "chars")]
        metric: SizeMetric,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::debug!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    match args.command {
        Command::Cluster {
            input,
            output_dir,
            max_size,
            max_clusters,
        } => run_cluster(input, output_dir, max_size, max_clusters),
        Command::Measure { files, metric } => run_measure(&files, metric),
    }
}

fn run_cluster(
    input: PathBuf,
    output_dir: PathBuf,
    max_size: Option<u64>,
    max_clusters: Option<usize>,
) -> Result<()> {
    log::info!("Starting clustering");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", output_dir.display());

    // 1. Load and validate
    let request = json::load_input(&input)?.into_input(max_size, max_clusters)?;
    let run = ContextClustering::new(request)?;

    // 2. Cluster
    let report = run.report();
    for summary in &report.clusters {
        log::info!(
            "Cluster {} (size {}): {}",
            summary.id + 1,
            summary.size,
            summary.members.iter().join(", ")
        );
    }
    if !report.target_reached {
        log::warn!(
            "Could not reach {} clusters without exceeding size {}; kept {}",
            report.max_clusters,
            report.max_cluster_size,
            report.clusters.len()
        );
    }

    // 3. Save results
    storage::save_results(&report, &output_dir)?;

    println!("{}", serde_json::to_string_pretty(&report.cluster_paths())?);

    log::info!("Clustering complete. Results saved to {}", output_dir.display());

    Ok(())
}

fn run_measure(paths: &[PathBuf], metric: SizeMetric) -> Result<()> {
    let stats = files::measure_files(paths);
    log::info!("Measured {} of {} files", stats.len(), paths.len());

    for s in &stats {
        log::debug!("{}: {} bytes, {} chars", s.path.display(), s.bytes, s.chars);
    }

    let nodes: Vec<FileNode> = stats.iter().map(|s| s.to_node(metric)).collect();
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "nodes": nodes }))?);

    Ok(())
}
