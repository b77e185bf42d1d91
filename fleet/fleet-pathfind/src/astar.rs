//! A* planning over grid topologies.
//!
//! This module provides the [`AStarPlanner`], built on the `pathfinding`
//! crate's A* and Dijkstra implementations.
//!
//! # Example
//!
//! ```
//! use fleet_pathfind::{AStarPlanner, PathPlanner};
//! use fleet_types::PlannerConfig;
//! use fleet_grid::{GridDims, NodeCoord, Topology};
//!
//! let topology = Topology::new(
//!     GridDims::planar(4, 4),
//!     [],
//!     [NodeCoord::planar(0, 0)],
//! )
//! .unwrap();
//!
//! let planner = AStarPlanner::new(&topology, PlannerConfig::default());
//! let plan = planner.shortest_path(NodeCoord::planar(3, 3), NodeCoord::planar(0, 3));
//! assert_eq!(plan.hops(), 3);
//!
//! let station = planner.nearest_resource(NodeCoord::planar(2, 3)).unwrap();
//! assert_eq!(station, NodeCoord::planar(0, 0));
//! ```

use fleet_grid::{NodeCoord, Topology};
use fleet_types::{Plan, PlannerConfig, PlanningError};
use pathfinding::prelude::{astar, dijkstra_all};
use tracing::{debug, trace};

use crate::heuristics::compute_heuristic;
use crate::neighbors::NeighborGenerator;
use crate::planner::PathPlanner;

/// A* planner over a borrowed topology.
///
/// The topology is read-only for the planner's lifetime, so the planner can
/// be shared by every agent in a simulation.
#[derive(Debug, Clone, Copy)]
pub struct AStarPlanner<'a> {
    /// The graph being searched.
    topology: &'a Topology,
    /// Algorithm configuration.
    config: PlannerConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Creates a new planner with the given topology and configuration.
    #[must_use]
    pub const fn new(topology: &'a Topology, config: PlannerConfig) -> Self {
        Self { topology, config }
    }

    /// Returns the topology.
    #[must_use]
    pub const fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Finds a shortest plan between two nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either endpoint is not in the topology
    /// - No path exists
    pub fn try_shortest_path(
        &self,
        source: NodeCoord,
        target: NodeCoord,
    ) -> Result<Plan, PlanningError> {
        if !self.topology.contains(source) {
            return Err(PlanningError::UnknownNode(source));
        }
        let Some(goal) = self.topology.coordinates(target) else {
            return Err(PlanningError::UnknownNode(target));
        };

        // Trivial case
        if source == target {
            return Ok(Plan::new(vec![source]));
        }

        let generator = NeighborGenerator::new(self.topology);
        let heuristic = self.config.heuristic();

        let result = astar(
            &source,
            |node| generator.successors(*node).collect::<Vec<_>>(),
            |node| {
                self.topology
                    .coordinates(*node)
                    .map_or(0, |from| compute_heuristic(from, goal, heuristic))
            },
            |node| *node == target,
        );

        match result {
            Some((nodes, cost)) => {
                trace!(%source, %target, cost, "A* found path");
                Ok(Plan::new(nodes))
            }
            None => Err(PlanningError::NoPathFound {
                start: source,
                goal: target,
            }),
        }
    }

    /// Number of moves on a shortest path, or `None` if unreachable.
    #[must_use]
    pub fn path_length(&self, source: NodeCoord, target: NodeCoord) -> Option<usize> {
        self.try_shortest_path(source, target)
            .ok()
            .map(|plan| plan.hops())
    }

    /// Shortest-path distance from `source` to every reachable resource node,
    /// sorted by distance and then by node.
    #[must_use]
    pub fn resource_distances(&self, source: NodeCoord) -> Vec<(NodeCoord, u32)> {
        if !self.topology.contains(source) {
            return Vec::new();
        }

        let generator = NeighborGenerator::new(self.topology);
        let reached = dijkstra_all(&source, |node| {
            generator.successors(*node).collect::<Vec<_>>()
        });

        let mut distances: Vec<_> = self
            .topology
            .resources()
            .iter()
            .filter_map(|&resource| {
                if resource == source {
                    Some((resource, 0))
                } else {
                    reached.get(&resource).map(|&(_, cost)| (resource, cost))
                }
            })
            .collect();
        distances.sort_by_key(|&(resource, cost)| (cost, resource));
        distances
    }
}

impl PathPlanner for AStarPlanner<'_> {
    fn shortest_path(&self, source: NodeCoord, target: NodeCoord) -> Plan {
        self.try_shortest_path(source, target)
            .unwrap_or_else(|error| {
                debug!(%error, "Returning empty plan");
                Plan::empty()
            })
    }

    fn nearest_resource(&self, source: NodeCoord) -> Result<NodeCoord, PlanningError> {
        if !self.topology.contains(source) {
            return Err(PlanningError::UnknownNode(source));
        }

        self.resource_distances(source)
            .first()
            .map(|&(resource, _)| resource)
            .ok_or(PlanningError::NoResourceReachable { from: source })
    }
}
