//! Layered grid topology with obstacles and resource nodes.

use std::collections::BTreeSet;

use tracing::debug;

use crate::coord::{GridDims, NodeCoord, NodeId};
use crate::error::ConfigurationError;

/// The static graph the fleet moves over.
///
/// Nodes are the cells of a `layers × rows × cols` grid minus the removed
/// obstacles. Edges are implicit and unit-weight: two surviving nodes are
/// connected when they differ by one step along exactly one axis (column,
/// row, or layer). A non-empty subset of the surviving nodes is marked as
/// resource nodes (charging stations).
///
/// A `Topology` is immutable once built, so plans cached by agents between
/// ticks always stay consistent with the graph.
///
/// # Example
///
/// ```
/// use fleet_grid::{GridDims, NodeCoord, Topology};
///
/// let topology = Topology::new(
///     GridDims::planar(3, 3),
///     [NodeCoord::planar(1, 1)],
///     [NodeCoord::planar(0, 0)],
/// )
/// .unwrap();
///
/// assert_eq!(topology.node_count(), 8);
/// assert!(!topology.contains(NodeCoord::planar(1, 1)));
/// assert!(topology.is_resource(NodeCoord::planar(0, 0)));
/// assert_eq!(topology.neighbors(NodeCoord::planar(0, 1)).count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Topology {
    dims: GridDims,
    /// Node id per grid cell, `None` for obstacles.
    ids: Vec<Option<NodeId>>,
    /// Surviving nodes indexed by `id - 1`.
    nodes: Vec<NodeCoord>,
    obstacles: BTreeSet<NodeCoord>,
    resources: BTreeSet<NodeCoord>,
}

impl Topology {
    /// Builds a topology from grid dimensions, an obstacle set and a resource
    /// set.
    ///
    /// Duplicate entries in either set are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if:
    /// - any dimension is zero
    /// - the grid spans more than [`GridDims::MAX_CELLS`] cells
    /// - an obstacle or resource lies outside the grid
    /// - a resource is also listed as an obstacle
    /// - the resource set is empty
    pub fn new(
        dims: GridDims,
        obstacles: impl IntoIterator<Item = NodeCoord>,
        resources: impl IntoIterator<Item = NodeCoord>,
    ) -> Result<Self, ConfigurationError> {
        if dims.is_degenerate() {
            return Err(ConfigurationError::InvalidDimensions(dims));
        }
        let Some(cells) = dims.checked_capacity() else {
            return Err(ConfigurationError::GridTooLarge(dims));
        };

        let obstacles: BTreeSet<_> = obstacles.into_iter().collect();
        if let Some(&outside) = obstacles.iter().find(|c| !dims.contains(**c)) {
            return Err(ConfigurationError::ObstacleOutOfBounds(outside));
        }

        let resources: BTreeSet<_> = resources.into_iter().collect();
        if let Some(&outside) = resources.iter().find(|c| !dims.contains(**c)) {
            return Err(ConfigurationError::ResourceOutOfBounds(outside));
        }
        if let Some(&clash) = resources.intersection(&obstacles).next() {
            return Err(ConfigurationError::ResourceOnObstacle(clash));
        }
        if resources.is_empty() {
            return Err(ConfigurationError::EmptyResourceSet);
        }

        let mut ids = vec![None; cells];
        let mut nodes = Vec::with_capacity(cells - obstacles.len());
        for (index, coord) in dims.iter().enumerate() {
            if obstacles.contains(&coord) {
                continue;
            }
            nodes.push(coord);
            #[allow(clippy::cast_possible_truncation)]
            let id = NodeId(nodes.len() as u32);
            ids[index] = Some(id);
        }

        debug!(
            layers = dims.layers,
            rows = dims.rows,
            cols = dims.cols,
            nodes = nodes.len(),
            obstacles = obstacles.len(),
            resources = resources.len(),
            "Built topology"
        );

        Ok(Self {
            dims,
            ids,
            nodes,
            obstacles,
            resources,
        })
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of surviving (non-obstacle) nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether a node is part of the graph.
    ///
    /// Out-of-bounds coordinates and removed obstacles are not.
    #[must_use]
    pub fn contains(&self, node: NodeCoord) -> bool {
        self.node_id(node).is_some()
    }

    /// Checks whether an in-bounds cell was removed as an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, node: NodeCoord) -> bool {
        self.obstacles.contains(&node)
    }

    /// Checks whether a node is a resource (charging) node.
    #[must_use]
    pub fn is_resource(&self, node: NodeCoord) -> bool {
        self.resources.contains(&node)
    }

    /// Resource nodes in ascending coordinate order.
    #[must_use]
    pub const fn resources(&self) -> &BTreeSet<NodeCoord> {
        &self.resources
    }

    /// Removed obstacle cells in ascending coordinate order.
    #[must_use]
    pub const fn obstacles(&self) -> &BTreeSet<NodeCoord> {
        &self.obstacles
    }

    /// Returns the identifier of a surviving node.
    #[must_use]
    pub fn node_id(&self, node: NodeCoord) -> Option<NodeId> {
        self.dims.index_of(node).and_then(|index| self.ids[index])
    }

    /// Returns the node with the given identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeCoord> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.nodes.get(index).copied()
    }

    /// Heuristic embedding of a node as `[layer, row, col]`.
    ///
    /// Returns `None` for nodes that are not part of the graph.
    #[must_use]
    pub fn coordinates(&self, node: NodeCoord) -> Option<[u32; 3]> {
        self.contains(node).then(|| node.as_array())
    }

    /// Iterates over surviving nodes in id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeCoord> + '_ {
        self.nodes.iter().copied()
    }

    /// Iterates over `(id, node)` pairs in id order.
    pub fn node_map(&self) -> impl Iterator<Item = (NodeId, NodeCoord)> + '_ {
        self.nodes.iter().enumerate().map(|(i, coord)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = NodeId(i as u32 + 1);
            (id, *coord)
        })
    }

    /// Iterates over the graph neighbours of a node.
    ///
    /// Order is fixed (column −/+, row −/+, layer −/+), which keeps every
    /// search over the topology deterministic. A node outside the graph has
    /// no neighbours.
    pub fn neighbors(&self, node: NodeCoord) -> impl Iterator<Item = NodeCoord> + '_ {
        let candidates = if self.contains(node) {
            node.axis_neighbors()
        } else {
            [None; 6]
        };
        candidates
            .into_iter()
            .flatten()
            .filter(move |n| self.contains(*n))
    }

    /// Iterates over every undirected edge exactly once, as `(lower, higher)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeCoord, NodeCoord)> + '_ {
        self.nodes().flat_map(move |node| {
            self.neighbors(node)
                .filter(move |n| node < *n)
                .map(move |n| (node, n))
        })
    }
}
