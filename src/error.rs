//! Error taxonomy of the graph pipeline

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or writing a maze graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// Missing or invalid input, detected before any generation
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The solver reported a cell that is not a vertex of the graph
    #[error("solver reported non-walkable waypoint at x={x}, y={y}")]
    CollaboratorContractViolation { x: usize, y: usize },

    /// The solver could not connect start and end
    #[error("no route between start and end")]
    Unsolvable,

    #[error("invalid graph document: {0}")]
    InvalidDocument(String),

    #[error("graph document is not valid json")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GraphError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
