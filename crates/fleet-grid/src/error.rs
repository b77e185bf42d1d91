//! Error types for topology construction.

use crate::coord::{GridDims, NodeCoord};

/// Errors raised while building a [`Topology`](crate::Topology).
///
/// All of these are setup-time failures: a topology that fails to build never
/// reaches the simulation loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// At least one grid dimension is zero.
    #[error("invalid grid dimensions: {}x{}x{}", .0.layers, .0.rows, .0.cols)]
    InvalidDimensions(GridDims),

    /// The grid has more cells than a topology may hold.
    #[error(
        "grid {}x{}x{} exceeds {} cells",
        .0.layers, .0.rows, .0.cols, GridDims::MAX_CELLS
    )]
    GridTooLarge(GridDims),

    /// An obstacle lies outside the grid.
    #[error("obstacle {0} is outside the grid")]
    ObstacleOutOfBounds(NodeCoord),

    /// A resource node lies outside the grid.
    #[error("resource node {0} is outside the grid")]
    ResourceOutOfBounds(NodeCoord),

    /// A node was assigned both as an obstacle and as a resource.
    #[error("resource node {0} is also an obstacle")]
    ResourceOnObstacle(NodeCoord),

    /// No resource node survives obstacle removal.
    #[error("resource set is empty")]
    EmptyResourceSet,
}

impl ConfigurationError {
    /// Returns the offending node, if the error is about a specific node.
    #[must_use]
    pub const fn node(&self) -> Option<NodeCoord> {
        match self {
            Self::ObstacleOutOfBounds(node)
            | Self::ResourceOutOfBounds(node)
            | Self::ResourceOnObstacle(node) => Some(*node),
            Self::InvalidDimensions(_) | Self::GridTooLarge(_) | Self::EmptyResourceSet => None,
        }
    }
}

/// A string could not be parsed as an `L{layer}_{row}-{col}` node name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node name {input:?}, expected L<layer>_<row>-<col>")]
pub struct ParseNodeError {
    input: String,
}

impl ParseNodeError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
