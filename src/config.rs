//! Validated run configuration

use std::path::PathBuf;

use crate::error::{GraphError, Result};
use crate::selector::SelectionParams;

/// Everything a run needs, checked before any generation happens
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub selection: SelectionParams,
    /// Destination file; stdout when `None`
    pub output: Option<PathBuf>,
    /// Keep an existing `output` instead of regenerating
    pub reuse: bool,
    pub pretty: bool,
}

impl RunConfig {
    /// - `half_size`: required; grid dimension is `2 * half_size + 1`.
    /// - `monte_mazes`: number of candidate mazes.
    /// - `monte_attempts`: entrance and solve attempts per candidate.
    /// - `difficulty`: complexity preference in `[0, 1]`.
    pub fn new(
        half_size: Option<usize>,
        monte_mazes: usize,
        monte_attempts: usize,
        difficulty: f64,
        output: Option<PathBuf>,
        reuse: bool,
    ) -> Result<Self> {
        let half_size = half_size.ok_or_else(|| GraphError::config("--size is required"))?;
        Ok(Self {
            selection: SelectionParams::new(half_size, monte_mazes, monte_attempts, difficulty)?,
            output,
            reuse,
            pretty: false,
        })
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
