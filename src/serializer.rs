//! JSON graph document

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adjacency::AdjacencyMap;
use crate::error::{GraphError, Result};
use crate::grid::Coordinate;

/// Serialized maze graph.
///
/// `edges` is keyed by compact index; JSON object keys are the decimal
/// strings of those indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGraph {
    /// Grid dimension
    pub size: usize,
    /// Compact index of the start vertex
    pub start: usize,
    /// Compact index of the end vertex
    pub end: usize,
    pub vertices: Vec<Coordinate>,
    pub edges: AdjacencyMap,
    pub shortest_path: Vec<usize>,
}

impl MazeGraph {
    /// Render the document, compact or indented
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Load a previously written document
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a document from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Check the structural invariants of the document.
    ///
    /// Vertices must lie inside the grid without duplicates, edges must
    /// reference existing vertices and be symmetric, and the path must run
    /// from `start` to `end` along edges.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        let invalid = |msg: String| Err(GraphError::InvalidDocument(msg));

        for (i, v) in self.vertices.iter().enumerate() {
            if v.x >= self.size || v.y >= self.size {
                return invalid(format!("vertex {} at {} is outside the grid", i, v));
            }
        }
        let mut ranks: Vec<_> = self.vertices.iter().map(|v| v.y * self.size + v.x).collect();
        if ranks.windows(2).any(|w| w[0] >= w[1]) {
            ranks.sort_unstable();
            ranks.dedup();
            if ranks.len() != n {
                return invalid("duplicate vertex coordinates".to_string());
            }
            return invalid("vertices are not in scan order".to_string());
        }
        for idx in [self.start, self.end] {
            if idx >= n {
                return invalid(format!("endpoint {} is not a vertex", idx));
            }
        }
        for (&a, neighbors) in &self.edges {
            if neighbors.is_empty() {
                return invalid(format!("vertex {} has an empty edge list", a));
            }
            for &b in neighbors {
                if a >= n || b >= n {
                    return invalid(format!("edge {} -> {} references a missing vertex", a, b));
                }
                if !self.edges.get(&b).is_some_and(|back| back.contains(&a)) {
                    return invalid(format!("edge {} -> {} has no reverse edge", a, b));
                }
            }
        }
        match (self.shortest_path.first(), self.shortest_path.last()) {
            (Some(&first), Some(&last)) if first == self.start && last == self.end => {}
            _ => return invalid("path does not run from start to end".to_string()),
        }
        // A bare [start, end] path carries no waypoints to check
        if self.shortest_path.len() > 2 {
            for w in self.shortest_path.windows(2) {
                let connected = self.edges.get(&w[0]).is_some_and(|e| e.contains(&w[1]));
                if !connected {
                    return invalid(format!("path step {} -> {} is not an edge", w[0], w[1]));
                }
            }
        }
        Ok(())
    }

    /// Write the document to `output`, or to stdout if `None`.
    ///
    /// Files are replaced atomically: the document is written to a sibling
    /// temporary file which is then renamed over the destination.
    pub fn write(&self, output: Option<&Path>, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        match output {
            Some(path) => {
                write_atomic(path, json.as_bytes())?;
                info!(path = %path.display(), bytes = json.len(), "wrote maze graph");
            }
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json)
                    .and_then(|_| stdout.flush())
                    .map_err(|e| GraphError::io("<stdout>", e))?;
            }
        }
        Ok(())
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `contents`, leaving no partial file behind
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = temporary_sibling(path);
    let written = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(GraphError::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3_graph() -> MazeGraph {
        let vertices = (0..3)
            .flat_map(|y| (0..3).map(move |x| Coordinate::new(x, y)))
            .collect();
        let edges = AdjacencyMap::from([
            (0, vec![1, 3]),
            (1, vec![0, 2, 4]),
            (2, vec![1, 5]),
            (3, vec![4, 0, 6]),
            (4, vec![3, 5, 1, 7]),
            (5, vec![4, 2, 8]),
            (6, vec![7, 3]),
            (7, vec![6, 8, 4]),
            (8, vec![7, 5]),
        ]);
        MazeGraph {
            size: 3,
            start: 0,
            end: 8,
            vertices,
            edges,
            shortest_path: vec![0, 1, 4, 7, 8],
        }
    }

    #[test]
    fn json_uses_string_keys_for_edges() {
        let graph = MazeGraph {
            size: 3,
            start: 0,
            end: 1,
            vertices: vec![Coordinate::new(0, 0), Coordinate::new(1, 0)],
            edges: AdjacencyMap::from([(0, vec![1]), (1, vec![0])]),
            shortest_path: vec![0, 1],
        };
        assert_eq!(
            graph.to_json(false).unwrap(),
            r#"{"size":3,"start":0,"end":1,"vertices":[{"x":0,"y":0},{"x":1,"y":0}],"edges":{"0":[1],"1":[0]},"shortest_path":[0,1]}"#
        );
    }

    #[test]
    fn document_loads_back() {
        let graph = open_3x3_graph();
        let json = graph.to_json(true).unwrap();
        let loaded = MazeGraph::from_reader(json.as_bytes()).unwrap();

        assert_eq!(loaded, graph);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn validate_rejects_asymmetric_edges() {
        let mut graph = open_3x3_graph();
        graph.edges.insert(0, vec![1, 3, 4]);

        assert!(matches!(
            graph.validate(),
            Err(GraphError::InvalidDocument(_))
        ));
    }

    #[test]
    fn validate_rejects_disconnected_path_step() {
        let mut graph = open_3x3_graph();
        graph.shortest_path = vec![0, 4, 8];

        assert!(graph.validate().is_err());
    }

    #[test]
    fn validate_rejects_path_not_ending_at_end() {
        let mut graph = open_3x3_graph();
        graph.shortest_path = vec![0, 1, 4];

        assert!(graph.validate().is_err());
    }

    #[test]
    fn validate_rejects_unordered_vertices() {
        let mut graph = open_3x3_graph();
        graph.vertices.swap(1, 2);

        assert!(graph.validate().is_err());
    }

    #[test]
    fn temporary_file_is_a_hidden_sibling() {
        let tmp = temporary_sibling(Path::new("/data/maze.json"));
        assert_eq!(tmp, PathBuf::from("/data/.maze.json.tmp"));
    }
}
