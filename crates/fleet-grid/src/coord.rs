//! Node coordinate types.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseNodeError;

/// A node in the layered warehouse grid, addressed by layer, row and column.
///
/// Node identity is the coordinate triple itself, so two nodes are equal
/// exactly when their coordinates are. The derived ordering compares
/// `layer`, then `row`, then `col`, and is the order used for every
/// deterministic tie-break in the fleet crates.
///
/// # Example
///
/// ```
/// use fleet_grid::NodeCoord;
///
/// let node = NodeCoord::new(1, 2, 3);
/// assert_eq!(node.layer, 1);
/// assert_eq!(node.to_string(), "L1_2-3");
///
/// // Same coordinates, same node
/// assert_eq!(node, "L1_2-3".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeCoord {
    /// Layer (vertical level) index.
    pub layer: u32,
    /// Row index within the layer.
    pub row: u32,
    /// Column index within the row.
    pub col: u32,
}

impl NodeCoord {
    /// Creates a new node coordinate.
    #[must_use]
    pub const fn new(layer: u32, row: u32, col: u32) -> Self {
        Self { layer, row, col }
    }

    /// Creates a coordinate on layer 0.
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_grid::NodeCoord;
    ///
    /// assert_eq!(NodeCoord::planar(3, 4), NodeCoord::new(0, 3, 4));
    /// ```
    #[must_use]
    pub const fn planar(row: u32, col: u32) -> Self {
        Self::new(0, row, col)
    }

    /// Returns the coordinate as a `[layer, row, col]` array.
    ///
    /// This is the embedding used by distance heuristics.
    #[must_use]
    pub const fn as_array(self) -> [u32; 3] {
        [self.layer, self.row, self.col]
    }

    /// Returns the six axis-aligned neighbours that do not underflow.
    ///
    /// Order is fixed: column −/+, row −/+, layer −/+. Neighbours past the
    /// upper grid bounds are still returned; bounds and obstacle filtering is
    /// the topology's job.
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_grid::NodeCoord;
    ///
    /// let origin = NodeCoord::new(0, 0, 0);
    /// let neighbors: Vec<_> = origin.axis_neighbors().into_iter().flatten().collect();
    /// assert_eq!(neighbors.len(), 3);
    /// ```
    #[must_use]
    pub fn axis_neighbors(self) -> [Option<Self>; 6] {
        let Self { layer, row, col } = self;
        [
            col.checked_sub(1).map(|c| Self::new(layer, row, c)),
            col.checked_add(1).map(|c| Self::new(layer, row, c)),
            row.checked_sub(1).map(|r| Self::new(layer, r, col)),
            row.checked_add(1).map(|r| Self::new(layer, r, col)),
            layer.checked_sub(1).map(|l| Self::new(l, row, col)),
            layer.checked_add(1).map(|l| Self::new(l, row, col)),
        ]
    }

    /// Computes the Manhattan distance to another node.
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_grid::NodeCoord;
    ///
    /// let a = NodeCoord::new(0, 0, 0);
    /// let b = NodeCoord::new(1, 3, 4);
    /// assert_eq!(a.manhattan_distance(b), 8);
    /// ```
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        let dl = self.layer.abs_diff(other.layer);
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dl.saturating_add(dr).saturating_add(dc)
    }

    /// Returns `true` if `other` differs from `self` by exactly one step along
    /// a single axis.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for NodeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}_{}-{}", self.layer, self.row, self.col)
    }
}

impl FromStr for NodeCoord {
    type Err = ParseNodeError;

    /// Parses the `L{layer}_{row}-{col}` node name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseNodeError::new(s);

        let rest = s.strip_prefix('L').ok_or_else(invalid)?;
        let (layer, rest) = rest.split_once('_').ok_or_else(invalid)?;
        let (row, col) = rest.split_once('-').ok_or_else(invalid)?;

        Ok(Self::new(
            layer.parse().map_err(|_| invalid())?,
            row.parse().map_err(|_| invalid())?,
            col.parse().map_err(|_| invalid())?,
        ))
    }
}

impl From<(u32, u32, u32)> for NodeCoord {
    fn from((layer, row, col): (u32, u32, u32)) -> Self {
        Self::new(layer, row, col)
    }
}

impl From<[u32; 3]> for NodeCoord {
    fn from([layer, row, col]: [u32; 3]) -> Self {
        Self::new(layer, row, col)
    }
}

impl From<NodeCoord> for [u32; 3] {
    fn from(coord: NodeCoord) -> Self {
        coord.as_array()
    }
}

/// Dense 1-based identifier of a surviving node.
///
/// Identifiers are assigned in [`NodeCoord`] order over the nodes that remain
/// after obstacle removal, so a lower id always means a lower coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extents of a layered grid.
///
/// # Example
///
/// ```
/// use fleet_grid::{GridDims, NodeCoord};
///
/// let dims = GridDims::new(2, 15, 20);
/// assert_eq!(dims.capacity(), 600);
/// assert!(dims.contains(NodeCoord::new(1, 14, 19)));
/// assert!(!dims.contains(NodeCoord::new(2, 0, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    /// Number of layers.
    pub layers: u32,
    /// Rows per layer.
    pub rows: u32,
    /// Columns per row.
    pub cols: u32,
}

impl GridDims {
    /// Creates new grid dimensions.
    #[must_use]
    pub const fn new(layers: u32, rows: u32, cols: u32) -> Self {
        Self { layers, rows, cols }
    }

    /// Creates single-layer dimensions.
    #[must_use]
    pub const fn planar(rows: u32, cols: u32) -> Self {
        Self::new(1, rows, cols)
    }

    /// Returns `true` if any dimension is zero.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.layers == 0 || self.rows == 0 || self.cols == 0
    }

    /// Total number of grid cells, obstacles included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.layers as usize)
            .saturating_mul(self.rows as usize)
            .saturating_mul(self.cols as usize)
    }

    /// Largest number of cells a topology may span.
    pub const MAX_CELLS: usize = 1 << 24;

    /// Total number of grid cells, or `None` if the product overflows or
    /// exceeds [`GridDims::MAX_CELLS`].
    ///
    /// # Example
    ///
    /// ```
    /// use fleet_grid::GridDims;
    ///
    /// assert_eq!(GridDims::new(2, 15, 20).checked_capacity(), Some(600));
    /// assert_eq!(GridDims::new(u32::MAX, u32::MAX, 2).checked_capacity(), None);
    /// ```
    #[must_use]
    pub fn checked_capacity(&self) -> Option<usize> {
        usize::try_from(self.layers)
            .ok()?
            .checked_mul(usize::try_from(self.rows).ok()?)?
            .checked_mul(usize::try_from(self.cols).ok()?)
            .filter(|cells| *cells <= Self::MAX_CELLS)
    }

    /// Checks if a coordinate lies within these dimensions.
    #[must_use]
    pub const fn contains(&self, coord: NodeCoord) -> bool {
        coord.layer < self.layers && coord.row < self.rows && coord.col < self.cols
    }

    /// Linear index of a coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn index_of(&self, coord: NodeCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let per_layer = self.rows as usize * self.cols as usize;
        Some(
            coord.layer as usize * per_layer
                + coord.row as usize * self.cols as usize
                + coord.col as usize,
        )
    }

    /// Iterates over every coordinate in [`NodeCoord`] order.
    pub fn iter(&self) -> impl Iterator<Item = NodeCoord> + use<> {
        let Self { layers, rows, cols } = *self;
        (0..layers).flat_map(move |layer| {
            (0..rows).flat_map(move |row| (0..cols).map(move |col| NodeCoord::new(layer, row, col)))
        })
    }
}
