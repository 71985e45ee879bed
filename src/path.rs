//! Projection of the solver's coordinate path into compact indices

use crate::error::{GraphError, Result};
use crate::grid::{Coordinate, MazeLayout};
use crate::indexer::VertexIndex;

/// Compact index of `c`, or a contract violation if it is not a vertex
fn vertex_of(layout: &MazeLayout, index: &VertexIndex, c: Coordinate) -> Result<usize> {
    if !layout.grid().contains(c) {
        return Err(GraphError::CollaboratorContractViolation { x: c.x, y: c.y });
    }
    index
        .local(layout.grid().global_index(c))
        .ok_or(GraphError::CollaboratorContractViolation { x: c.x, y: c.y })
}

/// Project `waypoints` onto the graph.
///
/// The result starts at the start vertex, visits every waypoint in order
/// and ends at the end vertex, so its length is `waypoints.len() + 2`.
///
/// Returns [GraphError::CollaboratorContractViolation] for the first
/// waypoint that is not a vertex.
pub fn project_path(
    layout: &MazeLayout,
    index: &VertexIndex,
    waypoints: &[Coordinate],
) -> Result<Vec<usize>> {
    let mut path = Vec::with_capacity(waypoints.len() + 2);
    path.push(vertex_of(layout, index, layout.start())?);
    for &c in waypoints {
        path.push(vertex_of(layout, index, c)?);
    }
    path.push(vertex_of(layout, index, layout.end())?);
    Ok(path)
}
