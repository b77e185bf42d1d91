//! Read-only agent status exposed to presentation collaborators.

use std::fmt;

use fleet_grid::NodeCoord;

/// Identifier of an agent within one simulation.
///
/// Agents are processed and arbitrated in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable state of an agent.
///
/// `Blocked` only describes the most recent tick: an agent that was blocked
/// resumes `Traveling` or `SeekingResource` on its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    /// Heading for the final goal.
    Traveling,
    /// Rerouted to a resource node to recharge.
    SeekingResource,
    /// Could not take its next step this tick.
    Blocked,
    /// Reached the final goal. Terminal.
    Completed,
}

impl AgentState {
    /// Returns `true` for the terminal state.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Short label for logs and text rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Traveling => "traveling",
            Self::SeekingResource => "seeking",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tick view of one agent, without its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    /// Agent identifier.
    pub id: AgentId,
    /// Current node.
    pub position: NodeCoord,
    /// Final goal.
    pub goal: NodeCoord,
    /// Observable state.
    pub state: AgentState,
    /// Current energy level.
    pub energy: u32,
}
