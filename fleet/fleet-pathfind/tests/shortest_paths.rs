//! Property-based tests for A* planning.
//!
//! A* plans are checked against breadth-first search on the same graph.
//!
//! Run with: cargo test -p fleet-pathfind -- proptest

#![allow(clippy::unwrap_used)]

use fleet_grid::{GridDims, NodeCoord, Topology};
use fleet_pathfind::{AStarPlanner, PathPlanner};
use fleet_types::{Heuristic, PlannerConfig};
use pathfinding::prelude::bfs;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A random layered grid with obstacles and one resource, plus two picks of
/// surviving nodes.
fn arb_topology() -> impl Strategy<Value = (Topology, NodeCoord, NodeCoord)> {
    (1u32..=2, 2u32..=7, 2u32..=7)
        .prop_flat_map(|(layers, rows, cols)| {
            let dims = GridDims::new(layers, rows, cols);
            let count = dims.capacity();
            (
                Just(dims),
                prop::collection::vec(prop::bool::weighted(0.25), count),
                0..count,
                any::<prop::sample::Index>(),
                any::<prop::sample::Index>(),
            )
        })
        .prop_map(|(dims, mask, resource_index, a, b)| {
            let cells: Vec<_> = dims.iter().collect();
            let resource = cells[resource_index];
            let obstacles: Vec<_> = cells
                .iter()
                .zip(mask)
                .filter(|(cell, blocked)| *blocked && **cell != resource)
                .map(|(cell, _)| *cell)
                .collect();
            let topology = Topology::new(dims, obstacles, [resource]).unwrap();
            let nodes: Vec<_> = topology.nodes().collect();
            let source = *a.get(&nodes);
            let target = *b.get(&nodes);
            (topology, source, target)
        })
}

fn bfs_length(topology: &Topology, source: NodeCoord, target: NodeCoord) -> Option<usize> {
    bfs(
        &source,
        |node| topology.neighbors(*node).collect::<Vec<_>>(),
        |node| *node == target,
    )
    .map(|path| path.len() - 1)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_astar_matches_bfs((topology, source, target) in arb_topology()) {
        let planner = AStarPlanner::new(&topology, PlannerConfig::default());
        let plan = planner.shortest_path(source, target);

        match bfs_length(&topology, source, target) {
            Some(length) => {
                prop_assert_eq!(plan.hops(), length);
                prop_assert_eq!(plan.source(), Some(source));
                prop_assert_eq!(plan.target(), Some(target));
                prop_assert!(plan.is_connected_in(&topology));
            }
            None => prop_assert!(plan.is_empty()),
        }
    }

    #[test]
    fn proptest_heuristics_agree_on_length((topology, source, target) in arb_topology()) {
        let manhattan = AStarPlanner::new(&topology, PlannerConfig::default());
        let zero = AStarPlanner::new(
            &topology,
            PlannerConfig::default().with_heuristic(Heuristic::Zero),
        );

        prop_assert_eq!(
            manhattan.path_length(source, target),
            zero.path_length(source, target)
        );
    }

    #[test]
    fn proptest_shortest_path_is_idempotent((topology, source, target) in arb_topology()) {
        let planner = AStarPlanner::new(&topology, PlannerConfig::default());
        prop_assert_eq!(
            planner.shortest_path(source, target),
            planner.shortest_path(source, target)
        );
    }

    #[test]
    fn proptest_nearest_resource_is_closest((topology, source, _target) in arb_topology()) {
        let planner = AStarPlanner::new(&topology, PlannerConfig::default());
        let reachable: Vec<_> = topology
            .resources()
            .iter()
            .filter_map(|r| bfs_length(&topology, source, *r).map(|d| (d, *r)))
            .collect();

        match planner.nearest_resource(source) {
            Ok(resource) => {
                let best = reachable.iter().min().copied();
                prop_assert_eq!(best.map(|(_, r)| r), Some(resource));
            }
            Err(error) => {
                prop_assert!(error.is_no_resource_reachable());
                prop_assert!(reachable.is_empty());
            }
        }
    }
}
