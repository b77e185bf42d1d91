//! Plans: ordered node sequences produced by the path planner.
//!
//! # Example
//!
//! ```
//! use fleet_types::Plan;
//! use fleet_grid::NodeCoord;
//!
//! let plan = Plan::new(vec![
//!     NodeCoord::planar(0, 0),
//!     NodeCoord::planar(0, 1),
//!     NodeCoord::planar(0, 2),
//! ]);
//! assert_eq!(plan.hops(), 2);
//! assert_eq!(plan.next_step(), Some(NodeCoord::planar(0, 1)));
//! ```

use fleet_grid::{NodeCoord, Topology};

/// An ordered sequence of nodes from a source to a target, both inclusive.
///
/// Consecutive nodes are joined by a topology edge. An empty plan means the
/// target was unreachable. Plans are replaced wholesale rather than edited:
/// [`Plan::advanced`] returns a new plan with the first node dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    nodes: Vec<NodeCoord>,
}

impl Plan {
    /// Creates a plan from a node sequence.
    #[must_use]
    pub const fn new(nodes: Vec<NodeCoord>) -> Self {
        Self { nodes }
    }

    /// Creates an empty (unreachable) plan.
    #[must_use]
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes, endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the plan has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of moves needed to follow the plan to its end.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// The nodes in travel order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeCoord] {
        &self.nodes
    }

    /// Starting node.
    #[must_use]
    pub fn source(&self) -> Option<NodeCoord> {
        self.nodes.first().copied()
    }

    /// Final node.
    #[must_use]
    pub fn target(&self) -> Option<NodeCoord> {
        self.nodes.last().copied()
    }

    /// The node the holder of this plan should occupy next.
    ///
    /// This is the second node, or the sole node of a single-node plan.
    /// `None` for an empty plan.
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_types::Plan;
    /// use fleet_grid::NodeCoord;
    ///
    /// let here = NodeCoord::planar(2, 2);
    /// assert_eq!(Plan::new(vec![here]).next_step(), Some(here));
    /// assert_eq!(Plan::empty().next_step(), None);
    /// ```
    #[must_use]
    pub fn next_step(&self) -> Option<NodeCoord> {
        match self.nodes.as_slice() {
            [] => None,
            [only] => Some(*only),
            [_, next, ..] => Some(*next),
        }
    }

    /// Returns the plan that remains after moving one node forward.
    ///
    /// A single-node or empty plan advances to an empty plan.
    #[must_use]
    pub fn advanced(&self) -> Self {
        Self::new(self.nodes.iter().skip(1).copied().collect())
    }

    /// Checks that every node is in the topology and consecutive nodes are
    /// joined by an edge.
    ///
    /// An empty plan is trivially connected.
    #[must_use]
    pub fn is_connected_in(&self, topology: &Topology) -> bool {
        self.nodes.iter().all(|n| topology.contains(*n))
            && self.nodes.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Iterates over the nodes.
    pub fn iter(&self) -> impl Iterator<Item = &NodeCoord> {
        self.nodes.iter()
    }
}

impl FromIterator<NodeCoord> for Plan {
    fn from_iter<I: IntoIterator<Item = NodeCoord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Plan {
    type Item = NodeCoord;
    type IntoIter = std::vec::IntoIter<NodeCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a NodeCoord;
    type IntoIter = std::slice::Iter<'a, NodeCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fleet_grid::GridDims;

    fn line(cols: u32) -> Plan {
        (0..cols).map(|c| NodeCoord::planar(0, c)).collect()
    }

    #[test]
    fn test_empty_plan() {
        let plan = Plan::empty();
        assert!(plan.is_empty());
        assert_eq!(plan.hops(), 0);
        assert_eq!(plan.source(), None);
        assert_eq!(plan.target(), None);
        assert_eq!(plan.next_step(), None);
        assert!(plan.advanced().is_empty());
    }

    #[test]
    fn test_endpoints() {
        let plan = line(4);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.hops(), 3);
        assert_eq!(plan.source(), Some(NodeCoord::planar(0, 0)));
        assert_eq!(plan.target(), Some(NodeCoord::planar(0, 3)));
    }

    #[test]
    fn test_advanced_drops_consumed_prefix() {
        let plan = line(3);
        let next = plan.advanced();
        assert_eq!(next.nodes(), &[NodeCoord::planar(0, 1), NodeCoord::planar(0, 2)]);
        // The original plan is untouched
        assert_eq!(plan.len(), 3);

        let last = next.advanced();
        assert_eq!(last.next_step(), Some(NodeCoord::planar(0, 2)));
        assert!(last.advanced().is_empty());
    }

    #[test]
    fn test_connectivity_check() {
        let topology = Topology::new(
            GridDims::planar(1, 4),
            [NodeCoord::planar(0, 2)],
            [NodeCoord::planar(0, 0)],
        )
        .unwrap();

        assert!(line(2).is_connected_in(&topology));
        // Passes through the obstacle
        assert!(!line(4).is_connected_in(&topology));
        // Skips a node
        let jump = Plan::new(vec![NodeCoord::planar(0, 0), NodeCoord::planar(0, 3)]);
        assert!(!jump.is_connected_in(&topology));
        assert!(Plan::empty().is_connected_in(&topology));
    }

    #[test]
    fn test_iteration() {
        let plan = line(3);
        let borrowed: Vec<_> = (&plan).into_iter().copied().collect();
        let owned: Vec<_> = plan.into_iter().collect();
        assert_eq!(borrowed, owned);
    }
}
