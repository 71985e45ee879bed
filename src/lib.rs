//! Turn generated mazes into compact graph datasets
//!
//! A maze is a square occupancy grid with a designated start and end. The
//! walkable cells become vertices, numbered in scan order, 4-neighbors
//! become edges, and the solver's route is projected onto vertex indices.
//!
//! # Examples
//! ```
//! use maze_graph::{build_graph, Coordinate, MazeLayout, SolvedMaze};
//!
//! let layout = MazeLayout::parse_emojis("
//! 🟫🏃🟫
//! 🟫🟩🟫
//! 🟫❎🟫".trim()).unwrap();
//! let maze = SolvedMaze { layout, waypoints: vec![Coordinate::new(1, 1)] };
//! let graph = build_graph(&maze).unwrap();
//!
//! assert_eq!(graph.vertices.len(), 3);
//! assert_eq!(graph.edges[&1], vec![0, 2]);
//! assert_eq!(graph.shortest_path, vec![0, 1, 2]);
//! ```

pub mod adjacency;
pub mod config;
pub mod error;
pub mod grid;
pub mod indexer;
#[cfg(feature = "mapgen")]
pub mod maze_generator;
pub mod path;
pub mod selector;
pub mod serializer;

use tracing::info;

pub use adjacency::{build_adjacency, AdjacencyMap};
pub use config::RunConfig;
pub use error::{GraphError, Result};
pub use grid::{Coordinate, MazeLayout, OccupancyGrid};
pub use indexer::VertexIndex;
pub use path::project_path;
pub use selector::{should_reuse, CandidateSelector, MazeEngine, SelectionParams, SolvedMaze};
pub use serializer::MazeGraph;

/// Reduce a solved maze into its graph document
pub fn build_graph(maze: &SolvedMaze) -> Result<MazeGraph> {
    let layout = &maze.layout;
    let index = VertexIndex::build(layout);
    let edges = build_adjacency(layout, &index);
    let shortest_path = project_path(layout, &index, &maze.waypoints)?;

    Ok(MazeGraph {
        size: layout.size(),
        start: shortest_path[0],
        end: shortest_path[shortest_path.len() - 1],
        vertices: index.vertices().to_vec(),
        edges,
        shortest_path,
    })
}

/// What a run did
#[derive(Debug)]
pub enum RunOutcome {
    /// Output existed and was left untouched
    Reused,
    /// A new graph was generated and written
    Written(MazeGraph),
}

/// Run the full pipeline: reuse check, selection, reduction, output
pub fn run<E: MazeEngine>(config: &RunConfig, engine: E) -> Result<RunOutcome> {
    if should_reuse(config.output.as_deref(), config.reuse) {
        return Ok(RunOutcome::Reused);
    }

    let maze = CandidateSelector::new(engine, config.selection).select()?;
    let graph = build_graph(&maze)?;
    info!(
        size = graph.size,
        vertices = graph.vertices.len(),
        path = graph.shortest_path.len(),
        "built maze graph"
    );
    graph.write(config.output.as_deref(), config.pretty)?;
    Ok(RunOutcome::Written(graph))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3(waypoints: Vec<Coordinate>) -> SolvedMaze {
        let layout = MazeLayout::new(
            OccupancyGrid::open(3),
            Coordinate::new(0, 0),
            Coordinate::new(2, 2),
        )
        .unwrap();
        SolvedMaze { layout, waypoints }
    }

    #[test]
    fn open_grid_without_waypoints() {
        let graph = build_graph(&open_3x3(vec![])).unwrap();

        let order: Vec<_> = graph.vertices.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            order,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
        assert_eq!(graph.size, 3);
        assert_eq!(graph.start, 0);
        assert_eq!(graph.end, 8);
        assert_eq!(graph.edges[&0], vec![1, 3]);
        assert_eq!(graph.edges[&4], vec![3, 5, 1, 7]);
        assert_eq!(graph.shortest_path, vec![0, 8]);
    }

    #[test]
    fn open_grid_with_waypoints() {
        let waypoints = vec![
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
            Coordinate::new(1, 2),
        ];
        let graph = build_graph(&open_3x3(waypoints)).unwrap();

        assert_eq!(graph.shortest_path, vec![0, 1, 4, 7, 8]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn walled_cell_is_excluded_and_rejected_as_waypoint() {
        let mut maze = open_3x3(vec![]);
        let mut grid = maze.layout.grid().clone();
        grid.set_blocked(Coordinate::new(1, 0), true);
        maze.layout = MazeLayout::new(grid, maze.layout.start(), maze.layout.end()).unwrap();

        let graph = build_graph(&maze).unwrap();
        assert_eq!(graph.vertices.len(), 8);
        assert!(!graph.vertices.contains(&Coordinate::new(1, 0)));

        maze.waypoints = vec![Coordinate::new(1, 0)];
        assert!(matches!(
            build_graph(&maze),
            Err(GraphError::CollaboratorContractViolation { x: 1, y: 0 })
        ));
    }

    #[test]
    fn identical_input_gives_identical_json() {
        let emojis = "
🟫🏃🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟩🟫🟩🟫
🟫🟩🟩🟩🟫
🟫🟫🟫❎🟫"
            .trim();
        let maze = SolvedMaze {
            layout: MazeLayout::parse_emojis(emojis).unwrap(),
            waypoints: vec![
                Coordinate::new(1, 1),
                Coordinate::new(1, 2),
                Coordinate::new(1, 3),
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
            ],
        };

        let first = build_graph(&maze).unwrap().to_json(false).unwrap();
        let second = build_graph(&maze).unwrap().to_json(false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn edges_are_symmetric() {
        let layout = MazeLayout::parse_emojis(
            "
🟫🏃🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟩🟫🟫🟫
🟫🟩🟩🟩❎
🟫🟫🟫🟫🟫"
                .trim(),
        )
        .unwrap();
        let graph = build_graph(&SolvedMaze {
            layout,
            waypoints: vec![],
        })
        .unwrap();

        for (a, neighbors) in &graph.edges {
            for b in neighbors {
                assert!(graph.edges[b].contains(a));
            }
        }
    }
}
