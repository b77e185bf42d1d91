//! The per-tick occupancy snapshot.

use fleet_grid::NodeCoord;
use fleet_types::AgentId;
use hashbrown::{HashMap, HashSet};

/// Positions held at the start of a tick, plus the claims agents placed on
/// free cells during that tick.
///
/// A coordinator builds one `Occupancy` per tick, hands the same value to
/// every agent, and drops it afterwards.
///
/// # Example
///
/// ```
/// use fleet_sim::Occupancy;
/// use fleet_grid::NodeCoord;
/// use fleet_types::AgentId;
///
/// let mut occupancy = Occupancy::snapshot([NodeCoord::planar(0, 0)]);
/// assert!(occupancy.is_occupied(NodeCoord::planar(0, 0)));
///
/// // Occupied cells cannot be claimed
/// assert!(!occupancy.claim(NodeCoord::planar(0, 0), AgentId(1)));
///
/// // The lowest claimant wins a free cell
/// occupancy.claim(NodeCoord::planar(0, 1), AgentId(3));
/// occupancy.claim(NodeCoord::planar(0, 1), AgentId(2));
/// assert_eq!(occupancy.claimant(NodeCoord::planar(0, 1)), Some(AgentId(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    occupied: HashSet<NodeCoord>,
    claims: HashMap<NodeCoord, AgentId>,
}

impl Occupancy {
    /// Creates a snapshot from the positions of every active agent.
    pub fn snapshot(positions: impl IntoIterator<Item = NodeCoord>) -> Self {
        Self {
            occupied: positions.into_iter().collect(),
            claims: HashMap::new(),
        }
    }

    /// Checks whether a node was held when the tick started.
    #[must_use]
    pub fn is_occupied(&self, node: NodeCoord) -> bool {
        self.occupied.contains(&node)
    }

    /// Records `agent`'s intent to enter a free node.
    ///
    /// Among several claimants the lowest id is kept, whatever order the
    /// claims arrive in. Returns `false` (and records nothing) if the node
    /// is occupied.
    pub fn claim(&mut self, node: NodeCoord, agent: AgentId) -> bool {
        if self.is_occupied(node) {
            return false;
        }
        self.claims
            .entry(node)
            .and_modify(|holder| *holder = (*holder).min(agent))
            .or_insert(agent);
        true
    }

    /// The agent that won the claim on a node, if any.
    #[must_use]
    pub fn claimant(&self, node: NodeCoord) -> Option<AgentId> {
        self.claims.get(&node).copied()
    }

    /// Number of occupied nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Returns `true` if no node is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Iterates over occupied nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeCoord> + '_ {
        self.occupied.iter().copied()
    }
}
