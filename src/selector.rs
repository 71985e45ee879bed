//! Candidate maze selection and the reuse-skip policy

use std::path::Path;

use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::grid::{Coordinate, MazeLayout, OccupancyGrid};

/// Maze together with the solver's interior waypoints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedMaze {
    pub layout: MazeLayout,
    /// Solution cells strictly between start and end
    pub waypoints: Vec<Coordinate>,
}

/// Maze generation and solving backend.
///
/// The graph pipeline only consumes what an engine produces; generation,
/// entrance placement, solving and scoring all live behind this trait.
pub trait MazeEngine {
    /// Generate a grid of dimension `2 * half_size + 1`
    fn generate(&mut self, half_size: usize) -> Result<OccupancyGrid>;

    /// Choose start and end for `grid`
    fn place_entrances(&mut self, grid: &OccupancyGrid) -> Result<MazeLayout>;

    /// Interior waypoints of a route from start to end.
    ///
    /// Every waypoint must be an unblocked cell of the layout.
    fn solve(&mut self, layout: &MazeLayout) -> Result<Vec<Coordinate>>;

    /// Complexity of a solved maze; higher is harder
    fn score(&self, maze: &SolvedMaze) -> usize {
        maze.waypoints.len()
    }
}

impl<E: MazeEngine + ?Sized> MazeEngine for &mut E {
    fn generate(&mut self, half_size: usize) -> Result<OccupancyGrid> {
        (**self).generate(half_size)
    }

    fn place_entrances(&mut self, grid: &OccupancyGrid) -> Result<MazeLayout> {
        (**self).place_entrances(grid)
    }

    fn solve(&mut self, layout: &MazeLayout) -> Result<Vec<Coordinate>> {
        (**self).solve(layout)
    }

    fn score(&self, maze: &SolvedMaze) -> usize {
        (**self).score(maze)
    }
}

/// Largest accepted half-size; the grid then holds about 67 million cells
pub const MAX_HALF_SIZE: usize = 4096;

/// Repetition parameters of a selection run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionParams {
    half_size: usize,
    candidate_count: usize,
    attempts_per_candidate: usize,
    difficulty: f64,
}

impl SelectionParams {
    /// Returns [GraphError::Configuration], if any count is zero,
    /// `half_size` exceeds [MAX_HALF_SIZE] or `difficulty` lies outside
    /// `[0, 1]`.
    pub fn new(
        half_size: usize,
        candidate_count: usize,
        attempts_per_candidate: usize,
        difficulty: f64,
    ) -> Result<Self> {
        if half_size == 0 {
            return Err(GraphError::config("size must be at least 1"));
        }
        let cells = half_size
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .and_then(|d| d.checked_mul(d));
        if half_size > MAX_HALF_SIZE || cells.is_none() {
            return Err(GraphError::config(format!(
                "size {} exceeds the maximum of {}",
                half_size, MAX_HALF_SIZE
            )));
        }
        if candidate_count == 0 {
            return Err(GraphError::config("monte-mazes must be at least 1"));
        }
        if attempts_per_candidate == 0 {
            return Err(GraphError::config("monte-attempts must be at least 1"));
        }
        if !(0.0..=1.0).contains(&difficulty) {
            return Err(GraphError::config(format!(
                "difficulty {} is outside of [0, 1]",
                difficulty
            )));
        }
        Ok(Self {
            half_size,
            candidate_count,
            attempts_per_candidate,
            difficulty,
        })
    }

    /// One maze, one attempt
    pub fn single(half_size: usize) -> Result<Self> {
        Self::new(half_size, 1, 1, 1.0)
    }

    pub fn half_size(&self) -> usize {
        self.half_size
    }

    /// Grid dimension produced for these parameters
    pub fn grid_size(&self) -> usize {
        2 * self.half_size + 1
    }
}

/// Runs the engine repeatedly and picks one candidate by complexity
pub struct CandidateSelector<E> {
    engine: E,
    params: SelectionParams,
}

impl<E: MazeEngine> CandidateSelector<E> {
    pub fn new(engine: E, params: SelectionParams) -> Self {
        Self { engine, params }
    }

    /// Generate candidates and return the chosen one.
    ///
    /// Each candidate keeps its highest scoring attempt. Candidates are
    /// ranked by score and the one at `difficulty` along that ranking
    /// wins: `0.0` picks the simplest, `1.0` the most complex.
    pub fn select(&mut self) -> Result<SolvedMaze> {
        let mut candidates = Vec::with_capacity(self.params.candidate_count);
        for candidate in 0..self.params.candidate_count {
            let grid = self.engine.generate(self.params.half_size)?;
            let best = self.best_attempt(&grid)?;
            debug!(candidate, score = best.0, "generated candidate");
            candidates.push(best);
        }

        // Stable sort keeps generation order among equal scores
        candidates.sort_by_key(|(score, _)| *score);
        let position = ((candidates.len() - 1) as f64 * self.params.difficulty).floor() as usize;
        let (score, maze) = candidates.swap_remove(position);
        info!(
            score,
            position,
            candidates = self.params.candidate_count,
            "selected maze"
        );
        Ok(maze)
    }

    fn best_attempt(&mut self, grid: &OccupancyGrid) -> Result<(usize, SolvedMaze)> {
        let mut best: Option<(usize, SolvedMaze)> = None;
        for _ in 0..self.params.attempts_per_candidate {
            let layout = self.engine.place_entrances(grid)?;
            let waypoints = self.engine.solve(&layout)?;
            let maze = SolvedMaze { layout, waypoints };
            let score = self.engine.score(&maze);
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, maze));
            }
        }
        // attempts_per_candidate >= 1 is checked by SelectionParams
        best.ok_or(GraphError::Unsolvable)
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}

/// Whether an existing output may be kept instead of regenerating
pub fn should_reuse(output: Option<&Path>, reuse: bool) -> bool {
    match output {
        Some(path) if reuse && path.exists() => {
            info!(
                path = %path.display(),
                "maze already exists and reuse is specified"
            );
            true
        }
        _ => false,
    }
}
