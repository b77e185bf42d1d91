//! Heuristic functions for A* over grid topologies.
//!
//! Heuristics work on the `[layer, row, col]` embedding a topology hands out
//! through [`Topology::coordinates`](fleet_grid::Topology::coordinates).
//!
//! # Example
//!
//! ```
//! use fleet_pathfind::heuristics::compute_heuristic;
//! use fleet_types::Heuristic;
//!
//! let from = [0, 0, 0];
//! let to = [1, 3, 4];
//!
//! assert_eq!(compute_heuristic(from, to, Heuristic::Manhattan), 8);
//! assert_eq!(compute_heuristic(from, to, Heuristic::Zero), 0);
//! ```

use fleet_types::Heuristic;

/// Cost of traversing one edge.
pub const MOVE_COST: u32 = 1;

/// Computes the heuristic distance between two embeddings.
///
/// Both heuristics are admissible for the unit-weight 6-connected grid, so
/// A* returns a shortest path with either.
#[must_use]
pub fn compute_heuristic(from: [u32; 3], to: [u32; 3], heuristic: Heuristic) -> u32 {
    match heuristic {
        Heuristic::Manhattan => manhattan_distance(from, to),
        Heuristic::Zero => 0,
    }
}

/// Manhattan distance between `[layer, row, col]` embeddings, in moves.
///
/// Also consistent: it changes by exactly one across every edge.
#[must_use]
pub fn manhattan_distance(from: [u32; 3], to: [u32; 3]) -> u32 {
    from.iter()
        .zip(to)
        .fold(0u32, |sum, (a, b)| sum.saturating_add(a.abs_diff(b)))
        .saturating_mul(MOVE_COST)
}
