//! Pathfinding over layered warehouse grids.
//!
//! This crate answers the two questions agents ask while they move:
//! "what is the shortest way from here to there?" and "which charging station
//! is nearest?". It integrates `fleet-grid` topologies with the
//! `fleet-types` plan and error types.
//!
//! # Overview
//!
//! - **[`PathPlanner`]**: the narrow interface agents call back into
//! - **A\*** ([`astar::AStarPlanner`]): A* over the unit-weight 6-connected
//!   grid, with a swappable heuristic
//! - **Heuristics** ([`heuristics`]): Manhattan distance over
//!   `[layer, row, col]`, or zero for plain Dijkstra
//!
//! # Quick Start
//!
//! ```
//! use fleet_pathfind::{AStarPlanner, PathPlanner};
//! use fleet_types::PlannerConfig;
//! use fleet_grid::{GridDims, NodeCoord, Topology};
//!
//! // Two layers, a blocked cell, one charging station upstairs
//! let topology = Topology::new(
//!     GridDims::new(2, 4, 4),
//!     [NodeCoord::new(0, 1, 1)],
//!     [NodeCoord::new(1, 3, 3)],
//! )
//! .unwrap();
//!
//! let planner = AStarPlanner::new(&topology, PlannerConfig::default());
//!
//! let plan = planner.shortest_path(NodeCoord::new(0, 0, 0), NodeCoord::new(0, 2, 2));
//! assert_eq!(plan.hops(), 4);
//!
//! let station = planner.nearest_resource(NodeCoord::new(0, 0, 0)).unwrap();
//! assert_eq!(station, NodeCoord::new(1, 3, 3));
//! ```
//!
//! # Failure Handling
//!
//! [`PathPlanner::shortest_path`] never fails: an unreachable target yields
//! an empty [`Plan`](fleet_types::Plan). Use
//! [`AStarPlanner::try_shortest_path`] to see why.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod astar;
pub mod heuristics;
pub mod neighbors;
pub mod planner;

// Re-export main types for convenience
pub use astar::AStarPlanner;
pub use heuristics::compute_heuristic;
pub use neighbors::NeighborGenerator;
pub use planner::PathPlanner;
