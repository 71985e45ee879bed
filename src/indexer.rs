//! Compact vertex indexing of walkable cells

use tracing::debug;

use crate::grid::{Coordinate, MazeLayout};

/// Vertices of the graph and the mapping from grid cells to them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexIndex {
    /// Vertex coordinates; position equals compact index
    vertices: Vec<Coordinate>,
    /// Compact index per global index, `None` if the cell is not a vertex
    global_to_local: Vec<Option<usize>>,
}

impl VertexIndex {
    /// Assign compact indices to every walkable cell of `layout`.
    ///
    /// Cells are visited in scan order (`y` outer, `x` inner), so indices
    /// are stable across runs on identical layouts.
    pub fn build(layout: &MazeLayout) -> Self {
        let grid = layout.grid();
        let mut vertices = Vec::new();
        let mut global_to_local = vec![None; grid.size() * grid.size()];

        for c in grid.coordinates().filter(|c| layout.is_walkable(*c)) {
            global_to_local[grid.global_index(c)] = Some(vertices.len());
            vertices.push(c);
        }
        debug!(
            vertices = vertices.len(),
            cells = global_to_local.len(),
            "indexed walkable cells"
        );

        Self {
            vertices,
            global_to_local,
        }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Compact index of the cell at `global_index`
    pub fn local(&self, global_index: usize) -> Option<usize> {
        self.global_to_local.get(global_index).copied().flatten()
    }

    /// Coordinate of vertex `index`
    pub fn coordinate(&self, index: usize) -> Option<Coordinate> {
        self.vertices.get(index).copied()
    }
}
