//! The planning interface agents call back into.

use fleet_grid::NodeCoord;
use fleet_types::{Plan, PlanningError};

/// Shortest-path and nearest-resource queries over a fixed topology.
///
/// Implementations must be deterministic: identical arguments on an unchanged
/// topology always produce identical answers.
pub trait PathPlanner {
    /// Returns a shortest plan from `source` to `target`, both inclusive.
    ///
    /// An empty plan means `target` is unreachable (or either endpoint is not
    /// in the topology). Callers treat that as a recoverable condition.
    fn shortest_path(&self, source: NodeCoord, target: NodeCoord) -> Plan;

    /// Returns the resource node with the shortest path from `source`.
    ///
    /// Ties are broken by the lowest node. A `source` that is itself a
    /// resource node is its own nearest resource.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NoResourceReachable`] if no resource node can
    /// be reached, or [`PlanningError::UnknownNode`] if `source` is not in
    /// the topology.
    fn nearest_resource(&self, source: NodeCoord) -> Result<NodeCoord, PlanningError>;
}

impl<P: PathPlanner + ?Sized> PathPlanner for &P {
    fn shortest_path(&self, source: NodeCoord, target: NodeCoord) -> Plan {
        (**self).shortest_path(source, target)
    }

    fn nearest_resource(&self, source: NodeCoord) -> Result<NodeCoord, PlanningError> {
        (**self).nearest_resource(source)
    }
}
