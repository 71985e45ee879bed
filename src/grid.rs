//! Occupancy grid and the immutable maze context threaded through the pipeline

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Axis-aligned neighbor offsets, in the order edges are discovered
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Location in the grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Square occupancy matrix, `true` marks a wall
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: usize,
    /// Row-major cell states, indexed by [Self::global_index]
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Grid where every cell is a wall
    pub fn filled(size: usize) -> Self {
        Self {
            size,
            blocked: vec![true; size * size],
        }
    }

    /// Grid without any walls
    pub fn open(size: usize) -> Self {
        Self {
            size,
            blocked: vec![false; size * size],
        }
    }

    /// Build grid from rows of wall flags.
    ///
    /// Returns error, if the rows do not form a non-empty square.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(GraphError::config("grid must contain at least one cell"));
        }
        if let Some((y, row)) = rows.iter().find_position(|row| row.len() != size) {
            return Err(GraphError::config(format!(
                "grid is not square: row {} has {} cells, expected {}",
                y,
                row.len(),
                size
            )));
        }
        Ok(Self {
            size,
            blocked: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.x < self.size && c.y < self.size
    }

    /// Row-major linear index of `c`
    pub fn global_index(&self, c: Coordinate) -> usize {
        c.y * self.size + c.x
    }

    pub fn is_blocked(&self, c: Coordinate) -> bool {
        self.blocked[self.global_index(c)]
    }

    pub fn set_blocked(&mut self, c: Coordinate, blocked: bool) {
        let index = self.global_index(c);
        self.blocked[index] = blocked;
    }

    /// All coordinates in scan order: `y` outer, `x` inner
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coordinate { x, y }))
    }

    /// Neighbor of `c` at offset `(dx, dy)`, if it lies within the grid
    pub fn offset(&self, c: Coordinate, (dx, dy): (isize, isize)) -> Option<Coordinate> {
        let x = c.x.checked_add_signed(dx)?;
        let y = c.y.checked_add_signed(dy)?;
        let n = Coordinate { x, y };
        self.contains(n).then_some(n)
    }
}

/// Grid together with its designated start and end.
///
/// Built once per run and shared read-only by every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    grid: OccupancyGrid,
    start: Coordinate,
    end: Coordinate,
}

impl MazeLayout {
    const S_START: char = '🏃';
    const S_END: char = '❎';
    const S_VALID: char = '🟩';
    const S_WALL: char = '🟫';
    const S_PATH: char = '🟨';

    /// Returns error, if start or end lie outside the grid.
    pub fn new(grid: OccupancyGrid, start: Coordinate, end: Coordinate) -> Result<Self> {
        for (name, c) in [("start", start), ("end", end)] {
            if !grid.contains(c) {
                return Err(GraphError::config(format!(
                    "{} {} is outside of {}x{} grid",
                    name,
                    c,
                    grid.size(),
                    grid.size()
                )));
            }
        }
        Ok(Self { grid, start, end })
    }

    /// Parse layout from its emoji representation.
    ///
    /// - `emojis`: rows separated by newlines; `🟫` wall, `🟩` open,
    ///   `🏃` start, `❎` end. Solution cells `🟨` are read as open.
    ///
    /// Returns error, if the maze contains unknown characters, is not
    /// square, or lacks start or end.
    ///
    /// # Examples
    /// ```
    /// use maze_graph::{Coordinate, MazeLayout};
    /// let layout = MazeLayout::parse_emojis("🏃🟩🟩\n🟫🟫🟩\n🟩🟩❎").unwrap();
    /// assert_eq!(layout.start(), Coordinate::new(0, 0));
    /// assert_eq!(layout.end(), Coordinate::new(2, 2));
    /// ```
    pub fn parse_emojis(emojis: &str) -> Result<Self> {
        let mut start = None;
        let mut end = None;
        let mut rows = Vec::new();

        for (y, line) in emojis.split('\n').enumerate() {
            let mut row = Vec::new();
            for (x, c) in line.chars().enumerate() {
                let blocked = match c {
                    Self::S_WALL => true,
                    Self::S_VALID | Self::S_PATH => false,
                    Self::S_START => {
                        start = Some(Coordinate { x, y });
                        false
                    }
                    Self::S_END => {
                        end = Some(Coordinate { x, y });
                        false
                    }
                    val => {
                        return Err(GraphError::config(format!(
                            "unexpected character `{}` at x={}, y={}",
                            val, x, y
                        )))
                    }
                };
                row.push(blocked);
            }
            rows.push(row);
        }

        let grid = OccupancyGrid::from_rows(&rows)?;
        let start = start.ok_or_else(|| GraphError::config("start is not found in maze"))?;
        let end = end.ok_or_else(|| GraphError::config("end is not found in maze"))?;
        Self::new(grid, start, end)
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Start and end are always walkable, other cells when unblocked
    pub fn is_walkable(&self, c: Coordinate) -> bool {
        c == self.start || c == self.end || !self.grid.is_blocked(c)
    }

    /// Walkable 4-neighbors of `c`, in [NEIGHBOR_OFFSETS] order
    pub fn walkable_neighbors(&self, c: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |d| self.grid.offset(c, d))
            .filter(move |n| self.is_walkable(*n))
    }

    /// Emoji rendering with `path` cells highlighted
    pub fn render(&self, path: &[Coordinate]) -> String {
        let size = self.size();
        (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        let c = Coordinate { x, y };
                        if c == self.start {
                            Self::S_START
                        } else if c == self.end {
                            Self::S_END
                        } else if path.contains(&c) {
                            Self::S_PATH
                        } else if self.grid.is_blocked(c) {
                            Self::S_WALL
                        } else {
                            Self::S_VALID
                        }
                    })
                    .join("")
            })
            .join("\n")
    }
}

impl fmt::Display for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
