//! Layered grid topology for warehouse fleets.
//!
//! This crate provides the static graph a fleet of robots moves over:
//!
//! - [`NodeCoord`] - Layer/row/column node address, also the node identity
//! - [`NodeId`] - Dense 1-based node numbering for operators and displays
//! - [`GridDims`] - Extents of the layered grid
//! - [`Topology`] - Surviving nodes, implicit unit-weight edges, resource nodes
//!
//! # Layer 0 Crate
//!
//! No simulation or search logic lives here. Pathfinding is in
//! `fleet-pathfind`, agent behaviour in `fleet-sim`.
//!
//! # Connectivity
//!
//! Nodes are connected when they differ by one step along one axis: left and
//! right within a row, up and down within a column, and vertically between
//! layers at the same row and column. Obstacles are removed before the
//! topology is frozen and take all of their edges with them.
//!
//! # Example
//!
//! ```
//! use fleet_grid::{GridDims, NodeCoord, Topology};
//!
//! // Two layers of 3x4 with a blocked cell and one charging station
//! let topology = Topology::new(
//!     GridDims::new(2, 3, 4),
//!     [NodeCoord::new(0, 1, 1)],
//!     [NodeCoord::new(1, 0, 0)],
//! )
//! .unwrap();
//!
//! assert_eq!(topology.node_count(), 23);
//! assert!(topology.is_resource(NodeCoord::new(1, 0, 0)));
//!
//! // Vertical edge between layers
//! let below = NodeCoord::new(0, 2, 3);
//! assert!(topology.neighbors(below).any(|n| n == NodeCoord::new(1, 2, 3)));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod coord;
mod error;
mod topology;

pub use coord::{GridDims, NodeCoord, NodeId};
pub use error::{ConfigurationError, ParseNodeError};
pub use topology::Topology;
