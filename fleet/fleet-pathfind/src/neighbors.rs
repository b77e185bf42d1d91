//! Neighbour generation for topology-based pathfinding.
//!
//! # Example
//!
//! ```
//! use fleet_pathfind::neighbors::NeighborGenerator;
//! use fleet_grid::{GridDims, NodeCoord, Topology};
//!
//! let topology = Topology::new(GridDims::new(2, 3, 3), [], [NodeCoord::new(0, 0, 0)]).unwrap();
//! let generator = NeighborGenerator::new(&topology);
//!
//! // Four in-layer neighbours plus the node above
//! let neighbors: Vec<_> = generator.neighbors(NodeCoord::new(0, 1, 1)).collect();
//! assert_eq!(neighbors.len(), 5);
//! ```

use fleet_grid::{NodeCoord, Topology};

use crate::heuristics::MOVE_COST;

/// Generator for valid neighbouring nodes during search.
///
/// Wraps the topology's 6-connected adjacency and attaches the unit move cost.
pub struct NeighborGenerator<'a> {
    /// The topology being searched.
    topology: &'a Topology,
}

impl NeighborGenerator<'_> {
    /// Creates a new neighbour generator over a topology.
    #[must_use]
    pub const fn new(topology: &Topology) -> NeighborGenerator<'_> {
        NeighborGenerator { topology }
    }

    /// Returns an iterator over the neighbours of a node.
    pub fn neighbors(&self, node: NodeCoord) -> impl Iterator<Item = NodeCoord> + '_ {
        self.topology.neighbors(node)
    }

    /// Returns an iterator over neighbours with their move costs.
    ///
    /// This is the primary interface for the `pathfinding` search functions.
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_pathfind::neighbors::NeighborGenerator;
    /// use fleet_grid::{GridDims, NodeCoord, Topology};
    ///
    /// let topology = Topology::new(GridDims::planar(2, 2), [], [NodeCoord::planar(0, 0)]).unwrap();
    /// let generator = NeighborGenerator::new(&topology);
    ///
    /// let successors: Vec<_> = generator.successors(NodeCoord::planar(0, 0)).collect();
    /// assert_eq!(successors.len(), 2);
    /// assert!(successors.iter().all(|(_, cost)| *cost == 1));
    /// ```
    pub fn successors(&self, node: NodeCoord) -> impl Iterator<Item = (NodeCoord, u32)> + '_ {
        self.neighbors(node).map(|n| (n, MOVE_COST))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fleet_grid::GridDims;

    fn grid_with_obstacle(obstacle: NodeCoord) -> Topology {
        Topology::new(GridDims::new(3, 3, 3), [obstacle], [NodeCoord::new(0, 0, 0)]).unwrap()
    }

    #[test]
    fn test_interior_node_has_six_neighbors() {
        let topology = Topology::new(GridDims::new(3, 3, 3), [], [NodeCoord::new(0, 0, 0)]).unwrap();
        let generator = NeighborGenerator::new(&topology);
        assert_eq!(generator.neighbors(NodeCoord::new(1, 1, 1)).count(), 6);
    }

    #[test]
    fn test_obstacle_is_skipped() {
        let topology = grid_with_obstacle(NodeCoord::new(1, 1, 2));
        let generator = NeighborGenerator::new(&topology);

        let neighbors: Vec<_> = generator.neighbors(NodeCoord::new(1, 1, 1)).collect();
        assert_eq!(neighbors.len(), 5);
        assert!(!neighbors.contains(&NodeCoord::new(1, 1, 2)));
    }

    #[test]
    fn test_successors_cost_one() {
        let topology = grid_with_obstacle(NodeCoord::new(2, 2, 2));
        let generator = NeighborGenerator::new(&topology);
        let successors: Vec<_> = generator.successors(NodeCoord::new(0, 0, 0)).collect();
        assert_eq!(successors.len(), 3);
        assert!(successors.iter().all(|(_, cost)| *cost == MOVE_COST));
    }
}
