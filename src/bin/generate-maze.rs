//! CLI for previewing generated mazes

use clap::Parser;
use maze_graph::maze_generator::MazeGenerator;
use maze_graph::{CandidateSelector, SelectionParams};
use tracing_subscriber::EnvFilter;

/// Generate one maze and print it as emojis
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze half-size
    #[arg(long, default_value_t = 7)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Highlight the shortest route
    #[arg(long)]
    solve: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let params = SelectionParams::single(args.size)?;
    let gen = MazeGenerator::new(args.seed);
    let maze = CandidateSelector::new(gen, params).select()?;

    let path = if args.solve { &maze.waypoints[..] } else { &[] };
    println!("{}", maze.layout.render(path));
    eprintln!("Shortest route is {} steps.", maze.waypoints.len() + 1);
    Ok(())
}
