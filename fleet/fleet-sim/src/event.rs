//! Per-tick agent events.

use fleet_grid::NodeCoord;
use fleet_types::AgentId;

/// Why an agent could not take its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockReason {
    /// Another agent stood on the cell when the tick started.
    Occupied,
    /// The cell was free but a lower-numbered agent claimed it this tick.
    Yielded {
        /// The agent that takes the cell.
        to: AgentId,
    },
}

/// Something that happened to an agent during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum AgentEvent {
    /// Energy fell to the threshold; now heading for a resource node.
    Rerouted {
        /// The resource node chosen.
        resource: NodeCoord,
        /// Energy when the reroute happened.
        energy: u32,
    },
    /// Energy restored on a resource node.
    Recharged {
        /// The resource node.
        at: NodeCoord,
    },
    /// A fresh plan was computed.
    Replanned {
        /// Where the plan leads.
        target: NodeCoord,
        /// Moves in the new plan.
        hops: usize,
    },
    /// A plan was requested but the target cannot be reached.
    Unreachable {
        /// The unreachable target.
        target: NodeCoord,
    },
    /// No resource node can be reached; the agent waits indefinitely.
    Stuck {
        /// Where the agent is stranded.
        at: NodeCoord,
    },
    /// The agent moved one node.
    Moved {
        /// Previous node.
        from: NodeCoord,
        /// New node.
        to: NodeCoord,
    },
    /// The next node was unavailable; the agent stayed put.
    Blocked {
        /// Where the agent stayed.
        at: NodeCoord,
        /// The node it wanted.
        wanted: NodeCoord,
        /// Why it could not go there.
        reason: BlockReason,
    },
    /// The agent reached its final goal.
    Completed {
        /// The goal node.
        at: NodeCoord,
    },
}

impl AgentEvent {
    /// Returns `true` for [`AgentEvent::Blocked`].
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Returns `true` for [`AgentEvent::Moved`].
    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}
