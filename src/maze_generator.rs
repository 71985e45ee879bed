//! Maze generation and solving backend

use std::collections::VecDeque;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::{GraphError, Result};
use crate::grid::{Coordinate, MazeLayout, OccupancyGrid};
use crate::selector::MazeEngine;

/// Randomized maze generator with a breadth-first solver
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    const DIRECTIONS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a perfect maze with randomized Prim's algorithm
    ///
    /// Cells of the half-resolution lattice sit at odd coordinates; every
    /// one of them is carved and joined to the tree through the wall cell
    /// between it and an already carved lattice neighbor.
    pub fn generate_grid(&mut self, half_size: usize) -> OccupancyGrid {
        let size = 2 * half_size + 1;
        let mut grid = OccupancyGrid::filled(size);
        if half_size == 0 {
            return grid;
        }

        let first = Coordinate::new(
            1 + 2 * self.random.gen_range(0..half_size),
            1 + 2 * self.random.gen_range(0..half_size),
        );
        grid.set_blocked(first, false);

        let mut frontier = Vec::new();
        let mut in_frontier = vec![false; size * size];
        Self::extend_frontier(&grid, first, &mut frontier, &mut in_frontier);

        while !frontier.is_empty() {
            let cell = frontier.swap_remove(self.random.gen_range(0..frontier.len()));
            let carved: Vec<Coordinate> = Self::DIRECTIONS
                .iter()
                .filter_map(|d| grid.offset(cell, *d))
                .filter(|n| !grid.is_blocked(*n))
                .collect();
            // Frontier cells always border at least one carved cell
            if let Some(link) = carved.choose(&mut self.random) {
                let wall = Coordinate::new((cell.x + link.x) / 2, (cell.y + link.y) / 2);
                grid.set_blocked(wall, false);
            }
            grid.set_blocked(cell, false);
            Self::extend_frontier(&grid, cell, &mut frontier, &mut in_frontier);
        }

        grid
    }

    fn extend_frontier(
        grid: &OccupancyGrid,
        from: Coordinate,
        frontier: &mut Vec<Coordinate>,
        in_frontier: &mut [bool],
    ) {
        for n in Self::DIRECTIONS.iter().filter_map(|d| grid.offset(from, *d)) {
            let index = grid.global_index(n);
            if grid.is_blocked(n) && !in_frontier[index] {
                in_frontier[index] = true;
                frontier.push(n);
            }
        }
    }

    /// Random distinct start and end on the outer wall, each facing a
    /// lattice cell
    pub fn random_entrances(&mut self, grid: &OccupancyGrid) -> Result<(Coordinate, Coordinate)> {
        let size = grid.size();
        if size < 3 {
            return Err(GraphError::config(format!(
                "{}x{} grid is too small for entrances",
                size, size
            )));
        }
        let start = self.border_cell(size);
        let mut end = self.border_cell(size);
        while end == start {
            end = self.border_cell(size);
        }
        Ok((start, end))
    }

    fn border_cell(&mut self, size: usize) -> Coordinate {
        let along = 1 + 2 * self.random.gen_range(0..size / 2);
        match self.random.gen_range(0..4) {
            0 => Coordinate::new(along, 0),
            1 => Coordinate::new(along, size - 1),
            2 => Coordinate::new(0, along),
            _ => Coordinate::new(size - 1, along),
        }
    }
}

/// Shortest route between start and end by breadth-first search.
///
/// Returns the interior waypoints only, or [GraphError::Unsolvable] if
/// end is unreachable.
pub fn solve_shortest(layout: &MazeLayout) -> Result<Vec<Coordinate>> {
    let grid = layout.grid();
    let (start, end) = (layout.start(), layout.end());
    if start == end {
        return Ok(Vec::new());
    }

    let mut prev: Vec<Option<Coordinate>> = vec![None; grid.size() * grid.size()];
    let mut visited = vec![false; grid.size() * grid.size()];
    let mut queue = VecDeque::from([start]);
    visited[grid.global_index(start)] = true;

    while let Some(c) = queue.pop_front() {
        if c == end {
            break;
        }
        for n in layout.walkable_neighbors(c) {
            let index = grid.global_index(n);
            if !visited[index] {
                visited[index] = true;
                prev[index] = Some(c);
                queue.push_back(n);
            }
        }
    }

    let mut waypoints = Vec::new();
    let mut current = prev[grid.global_index(end)].ok_or(GraphError::Unsolvable)?;
    while current != start {
        waypoints.push(current);
        current = prev[grid.global_index(current)].ok_or(GraphError::Unsolvable)?;
    }
    waypoints.reverse();
    Ok(waypoints)
}

impl MazeEngine for MazeGenerator {
    fn generate(&mut self, half_size: usize) -> Result<OccupancyGrid> {
        Ok(self.generate_grid(half_size))
    }

    fn place_entrances(&mut self, grid: &OccupancyGrid) -> Result<MazeLayout> {
        let (start, end) = self.random_entrances(grid)?;
        MazeLayout::new(grid.clone(), start, end)
    }

    fn solve(&mut self, layout: &MazeLayout) -> Result<Vec<Coordinate>> {
        solve_shortest(layout)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::indexer::VertexIndex;

    fn is_adjacent(a: Coordinate, b: Coordinate) -> bool {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1
    }

    #[test]
    fn generated_maze_is_a_spanning_tree() {
        let mut gen = MazeGenerator::new(Some(0));
        let grid = gen.generate_grid(6);

        assert_eq!(grid.size(), 13);
        let mut lattice = grid.coordinates().filter(|c| c.x % 2 == 1 && c.y % 2 == 1);
        assert!(lattice.all(|c| !grid.is_blocked(c)));

        // n lattice cells joined by n - 1 passages
        let open = grid.coordinates().filter(|c| !grid.is_blocked(*c)).count();
        assert_eq!(open, 36 + 35);

        let mut border = grid
            .coordinates()
            .filter(|c| c.x == 0 || c.y == 0 || c.x == 12 || c.y == 12);
        assert!(border.all(|c| grid.is_blocked(c)));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = MazeGenerator::new(Some(42)).generate_grid(5);
        let b = MazeGenerator::new(Some(42)).generate_grid(5);
        assert_eq!(a, b);
    }

    #[test]
    fn entrances_are_distinct_border_cells() {
        let mut gen = MazeGenerator::new(Some(7));
        let grid = gen.generate_grid(4);
        for _ in 0..20 {
            let (start, end) = gen.random_entrances(&grid).unwrap();
            assert_ne!(start, end);
            for c in [start, end] {
                assert!(c.x == 0 || c.y == 0 || c.x == 8 || c.y == 8);
                assert!(c.x % 2 == 1 || c.y % 2 == 1);
            }
        }
    }

    #[test]
    fn solution_is_a_connected_route() {
        let mut gen = MazeGenerator::new(Some(3));
        let grid = gen.generate_grid(5);
        let layout = gen.place_entrances(&grid).unwrap();
        let waypoints = gen.solve(&layout).unwrap();

        assert!(waypoints.iter().all(|c| !layout.grid().is_blocked(*c)));
        let route: Vec<_> = std::iter::once(layout.start())
            .chain(waypoints.iter().copied())
            .chain(std::iter::once(layout.end()))
            .collect();
        assert!(route.iter().tuple_windows().all(|(a, b)| is_adjacent(*a, *b)));
        assert!(route.iter().all_unique());
    }

    #[test]
    fn solver_finds_shortest_route() {
        let emojis = "
🟫🏃🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟩🟫🟩🟫
🟫🟩🟩🟩🟫
🟫🟫🟫❎🟫"
            .trim();
        let layout = MazeLayout::parse_emojis(emojis).unwrap();
        let waypoints = solve_shortest(&layout).unwrap();

        assert_eq!(
            waypoints,
            vec![
                Coordinate::new(1, 1),
                Coordinate::new(2, 1),
                Coordinate::new(3, 1),
                Coordinate::new(3, 2),
                Coordinate::new(3, 3),
            ]
        );
    }

    #[test]
    fn walled_off_end_is_unsolvable() {
        let layout = MazeLayout::parse_emojis("🏃🟫🟫\n🟫🟫🟫\n🟫🟫❎").unwrap();
        assert!(matches!(
            solve_shortest(&layout),
            Err(GraphError::Unsolvable)
        ));
    }

    #[test]
    fn generate_parseable_emoji_maze() {
        let mut gen = MazeGenerator::new(Some(0));
        let grid = gen.generate_grid(7);
        let layout = gen.place_entrances(&grid).unwrap();

        let parsed = MazeLayout::parse_emojis(&layout.to_string()).unwrap();
        assert_eq!(parsed.start(), layout.start());
        assert_eq!(parsed.end(), layout.end());
        assert_eq!(VertexIndex::build(&parsed), VertexIndex::build(&layout));
    }
}
