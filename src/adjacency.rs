//! 4-neighbor adjacency over compact indices

use std::collections::BTreeMap;

use tracing::debug;

use crate::grid::MazeLayout;
use crate::indexer::VertexIndex;

/// Neighbors per vertex; vertices without neighbors have no entry
pub type AdjacencyMap = BTreeMap<usize, Vec<usize>>;

/// Build adjacency lists for every vertex of `index`.
///
/// Each vertex lists its walkable neighbors in offset order
/// left, right, up, down. Both ends of an adjacency are scanned, so every
/// connection is recorded in both directions.
pub fn build_adjacency(layout: &MazeLayout, index: &VertexIndex) -> AdjacencyMap {
    let grid = layout.grid();
    let mut edges = AdjacencyMap::new();

    for (from, &c) in index.vertices().iter().enumerate() {
        for n in layout.walkable_neighbors(c) {
            if let Some(to) = index.local(grid.global_index(n)) {
                edges.entry(from).or_insert_with(Vec::new).push(to);
            }
        }
    }
    debug!(
        connected = edges.len(),
        directed_edges = edges.values().map(Vec::len).sum::<usize>(),
        "built adjacency"
    );

    edges
}
