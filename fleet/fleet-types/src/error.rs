//! Error types for planning and agent setup.
//!
//! [`PlanningError`] covers per-tick search failures, which agents recover
//! from locally. [`AssignmentError`] covers invalid start/goal assignments,
//! which are rejected before an agent joins the simulation.

use fleet_grid::NodeCoord;

use crate::status::AgentId;

/// Errors that can occur during path planning.
///
/// # Example
///
/// ```
/// use fleet_types::PlanningError;
/// use fleet_grid::NodeCoord;
///
/// let error = PlanningError::NoPathFound {
///     start: NodeCoord::planar(0, 0),
///     goal: NodeCoord::planar(3, 3),
/// };
/// assert!(error.is_no_path_found());
/// assert!(error.to_string().contains("no path found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PlanningError {
    /// An endpoint is not part of the topology.
    #[error("node {0} is not in the topology")]
    UnknownNode(NodeCoord),

    /// The goal cannot be reached from the start.
    #[error("no path found from {start} to {goal}")]
    NoPathFound {
        /// The starting node.
        start: NodeCoord,
        /// The unreachable goal.
        goal: NodeCoord,
    },

    /// No resource node can be reached from the given node.
    #[error("no resource node reachable from {from}")]
    NoResourceReachable {
        /// The node the search started from.
        from: NodeCoord,
    },
}

impl PlanningError {
    /// Returns `true` if this is a "no path found" error.
    #[must_use]
    pub const fn is_no_path_found(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }

    /// Returns `true` if no resource node was reachable.
    #[must_use]
    pub const fn is_no_resource_reachable(&self) -> bool {
        matches!(self, Self::NoResourceReachable { .. })
    }
}

/// An agent's start/goal assignment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AssignmentError {
    /// Start and goal are the same node.
    #[error("start and goal are both {0}")]
    StartEqualsGoal(NodeCoord),

    /// The start node is not part of the topology.
    #[error("start {0} is not in the topology")]
    UnknownStart(NodeCoord),

    /// The goal node is not part of the topology.
    #[error("goal {0} is not in the topology")]
    UnknownGoal(NodeCoord),

    /// Another agent already starts on this node.
    #[error("start {start} is already occupied by agent {by}")]
    StartOccupied {
        /// The contested start node.
        start: NodeCoord,
        /// The agent already placed there.
        by: AgentId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_found_display() {
        let error = PlanningError::NoPathFound {
            start: NodeCoord::planar(0, 0),
            goal: NodeCoord::new(1, 2, 3),
        };
        let msg = error.to_string();
        assert!(msg.contains("L0_0-0"));
        assert!(msg.contains("L1_2-3"));
        assert!(!error.is_no_resource_reachable());
    }

    #[test]
    fn test_no_resource_reachable() {
        let error = PlanningError::NoResourceReachable {
            from: NodeCoord::planar(4, 4),
        };
        assert!(error.is_no_resource_reachable());
        assert!(!error.is_no_path_found());
        assert!(error.to_string().contains("L0_4-4"));
    }

    #[test]
    fn test_unknown_node_display() {
        let error = PlanningError::UnknownNode(NodeCoord::planar(9, 9));
        assert!(error.to_string().contains("not in the topology"));
    }

    #[test]
    fn test_assignment_errors_display() {
        let node = NodeCoord::planar(1, 1);
        assert!(
            AssignmentError::StartEqualsGoal(node)
                .to_string()
                .contains("start and goal")
        );
        let occupied = AssignmentError::StartOccupied {
            start: node,
            by: AgentId(3),
        };
        assert!(occupied.to_string().contains("agent 3"));
    }
}
