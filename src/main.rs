//! CLI for maze graph generation

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use maze_graph::maze_generator::MazeGenerator;
use maze_graph::{RunConfig, RunOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a maze and write it as a graph document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze half-size; the grid is `2 * size + 1` cells wide
    #[arg(long)]
    size: Option<usize>,

    /// Number of candidate mazes to generate
    #[arg(long, default_value_t = 10)]
    monte_mazes: usize,

    /// Entrance and solve attempts per candidate maze
    #[arg(long, default_value_t = 10)]
    monte_attempts: usize,

    /// Complexity preference, 0.0 picks the simplest candidate, 1.0 the hardest
    #[arg(long, default_value_t = 1.0)]
    difficulty: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// File, where to write the graph. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Keep an existing output file instead of regenerating
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    reuse: bool,

    /// Indent the JSON document
    #[arg(long)]
    pretty: bool,
}

/// Generate maze, write graph
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = RunConfig::new(
        args.size,
        args.monte_mazes,
        args.monte_attempts,
        args.difficulty,
        args.output,
        args.reuse,
    )?
    .with_pretty(args.pretty);

    let engine = MazeGenerator::new(args.seed);
    match maze_graph::run(&config, engine).context("maze graph generation failed")? {
        RunOutcome::Reused => info!("existing output kept"),
        RunOutcome::Written(graph) => info!(
            vertices = graph.vertices.len(),
            edges = graph.edges.len(),
            "done"
        ),
    }
    Ok(())
}
