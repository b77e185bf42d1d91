//! End-to-end fleet scenarios and tick invariants.
//!
//! Run with: cargo test -p fleet-sim

#![allow(clippy::unwrap_used)]

use fleet_grid::{GridDims, NodeCoord, Topology};
use fleet_pathfind::AStarPlanner;
use fleet_sim::{AgentEvent, BlockReason, StepCoordinator, TickReport};
use fleet_types::{AgentId, AgentState, EnergyPolicy, PlannerConfig};
use proptest::prelude::*;

fn coordinator(topology: &Topology) -> StepCoordinator<'_, AStarPlanner<'_>> {
    StepCoordinator::new(
        topology,
        AStarPlanner::new(topology, PlannerConfig::default()),
        EnergyPolicy::default(),
    )
}

fn run_to_end(coordinator: &mut StepCoordinator<'_, AStarPlanner<'_>>, max: u64) -> Vec<TickReport> {
    let mut reports = Vec::new();
    coordinator.run(max, |report| reports.push(report.clone()));
    reports
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn single_agent_reroutes_recharges_and_completes() {
    let station = NodeCoord::planar(0, 0);
    let start = NodeCoord::planar(3, 3);
    let goal = NodeCoord::planar(0, 3);
    let topology = Topology::new(GridDims::planar(4, 4), [], [station]).unwrap();
    let mut coordinator = coordinator(&topology);
    let id = coordinator.add_agent_with_energy(start, goal, 12).unwrap();

    let reports = run_to_end(&mut coordinator, 100);
    let events: Vec<_> = reports
        .iter()
        .flat_map(|r| r.events_for(id).copied().collect::<Vec<_>>())
        .collect();

    let rerouted = events
        .iter()
        .position(|e| *e == AgentEvent::Rerouted { resource: station, energy: 7 })
        .unwrap();
    let recharged = events
        .iter()
        .position(|e| *e == AgentEvent::Recharged { at: station })
        .unwrap();
    let completed = events
        .iter()
        .position(|e| *e == AgentEvent::Completed { at: goal })
        .unwrap();
    assert!(rerouted < recharged && recharged < completed);

    // Only the final arrival counts as completion
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, AgentEvent::Completed { .. }))
            .count(),
        1
    );

    // One move, five to the station, three to the goal
    assert_eq!(coordinator.tick_count(), 9);
    let agent = coordinator.agent(id).unwrap();
    assert_eq!(agent.state(), AgentState::Completed);
    assert_eq!(agent.position(), goal);
    assert_eq!(agent.energy(), 85);

    let recharge_tick = reports
        .iter()
        .find(|r| r.events_for(id).any(|e| matches!(e, AgentEvent::Recharged { .. })))
        .unwrap();
    // Recharged to full, then one move on the same tick
    assert_eq!(recharge_tick.snapshots[0].energy, 95);
}

#[test]
fn crossing_agents_block_exactly_once() {
    let topology = Topology::new(GridDims::planar(1, 3), [], [NodeCoord::planar(0, 0)]).unwrap();
    let mut coordinator = coordinator(&topology);
    coordinator
        .add_agent(NodeCoord::planar(0, 2), NodeCoord::planar(0, 1))
        .unwrap();
    coordinator
        .add_agent(NodeCoord::planar(0, 0), NodeCoord::planar(0, 2))
        .unwrap();

    let reports = run_to_end(&mut coordinator, 20);
    assert!(coordinator.is_complete());

    let blocked: Vec<_> = reports
        .iter()
        .flat_map(|r| {
            r.events
                .iter()
                .filter(|(_, e)| e.is_blocked())
                .map(move |(id, e)| (r.tick, *id, *e))
        })
        .collect();
    assert_eq!(blocked.len(), 1);
    let (tick, id, event) = blocked[0];
    assert_eq!((tick, id), (1, AgentId(1)));
    assert!(matches!(
        event,
        AgentEvent::Blocked {
            reason: BlockReason::Yielded { to: AgentId(0) },
            ..
        }
    ));
}

#[test]
fn agents_in_separate_lanes_finish_together() {
    let topology = Topology::new(GridDims::planar(5, 5), [], [NodeCoord::planar(1, 0)]).unwrap();
    let mut coordinator = coordinator(&topology);
    for row in [0, 2, 4] {
        coordinator
            .add_agent(NodeCoord::planar(row, 0), NodeCoord::planar(row, 4))
            .unwrap();
    }

    let reports = run_to_end(&mut coordinator, 50);
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.blocked_count() == 0));
    assert!(reports.last().unwrap().all_completed);
}

#[test]
fn stranded_agent_never_completes() {
    // The station sits behind a wall
    let topology = Topology::new(
        GridDims::planar(3, 3),
        [
            NodeCoord::planar(0, 1),
            NodeCoord::planar(1, 1),
            NodeCoord::planar(2, 1),
        ],
        [NodeCoord::planar(0, 0)],
    )
    .unwrap();
    let mut coordinator = coordinator(&topology);
    let id = coordinator
        .add_agent_with_energy(NodeCoord::planar(0, 2), NodeCoord::planar(2, 2), 5)
        .unwrap();

    let reports = run_to_end(&mut coordinator, 10);
    assert_eq!(reports.len(), 10);
    assert_eq!(
        reports[0].events_for(id).next(),
        Some(&AgentEvent::Stuck { at: NodeCoord::planar(0, 2) })
    );
    let agent = coordinator.agent(id).unwrap();
    assert_eq!(agent.state(), AgentState::SeekingResource);
    assert_eq!(agent.position(), NodeCoord::planar(0, 2));
}

#[test]
fn identical_setups_produce_identical_runs() {
    let topology = Topology::new(
        GridDims::new(2, 5, 6),
        [NodeCoord::new(0, 2, 2), NodeCoord::new(0, 2, 3), NodeCoord::new(1, 1, 4)],
        [NodeCoord::new(0, 0, 0), NodeCoord::new(1, 4, 5)],
    )
    .unwrap();
    let assignments = [
        (NodeCoord::new(0, 4, 5), NodeCoord::new(0, 0, 5), 30),
        (NodeCoord::new(0, 0, 5), NodeCoord::new(1, 4, 0), 15),
        (NodeCoord::new(1, 2, 2), NodeCoord::new(0, 4, 0), 100),
    ];

    let run = || {
        let mut coordinator = coordinator(&topology);
        for (start, goal, energy) in assignments {
            coordinator.add_agent_with_energy(start, goal, energy).unwrap();
        }
        run_to_end(&mut coordinator, 200)
    };

    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

// =============================================================================
// Properties
// =============================================================================

/// A small grid with obstacles, one station, and up to five agent
/// assignments as `(start, goal, energy)` picks.
fn arb_fleet() -> impl Strategy<Value = (Topology, Vec<(NodeCoord, NodeCoord, u32)>)> {
    (2u32..=6, 2u32..=6)
        .prop_flat_map(|(rows, cols)| {
            let dims = GridDims::planar(rows, cols);
            let count = dims.capacity();
            (
                Just(dims),
                prop::collection::vec(prop::bool::weighted(0.2), count),
                0..count,
                prop::collection::vec(
                    (
                        any::<prop::sample::Index>(),
                        any::<prop::sample::Index>(),
                        0u32..=100,
                    ),
                    1..=5,
                ),
            )
        })
        .prop_map(|(dims, mask, station_index, picks)| {
            let cells: Vec<_> = dims.iter().collect();
            let station = cells[station_index];
            let obstacles: Vec<_> = cells
                .iter()
                .zip(mask)
                .filter(|(cell, blocked)| *blocked && **cell != station)
                .map(|(cell, _)| *cell)
                .collect();
            let topology = Topology::new(dims, obstacles, [station]).unwrap();
            let nodes: Vec<_> = topology.nodes().collect();
            let assignments = picks
                .into_iter()
                .map(|(start, goal, energy)| (*start.get(&nodes), *goal.get(&nodes), energy))
                .collect();
            (topology, assignments)
        })
}

proptest! {
    #[test]
    fn proptest_no_collisions_or_swaps((topology, assignments) in arb_fleet()) {
        let mut coordinator = coordinator(&topology);
        for (start, goal, energy) in assignments {
            // Shared starts and start == goal are rejected; keep the rest
            let _ = coordinator.add_agent_with_energy(start, goal, energy);
        }

        let mut previous = coordinator.snapshots();
        for _ in 0..60 {
            let report = coordinator.tick();

            let active: Vec<_> = report
                .snapshots
                .iter()
                .filter(|s| s.state != AgentState::Completed)
                .map(|s| s.position)
                .collect();
            let mut distinct = active.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(distinct.len(), active.len());

            for (before, after) in previous.iter().zip(&report.snapshots) {
                prop_assert!(
                    before.position == after.position
                        || before.position.is_adjacent(after.position)
                );
            }

            for (i, (a0, a1)) in previous.iter().zip(&report.snapshots).enumerate() {
                for (b0, b1) in previous.iter().zip(&report.snapshots).skip(i + 1) {
                    let swapped = a0.position != a1.position
                        && a1.position == b0.position
                        && b1.position == a0.position;
                    prop_assert!(!swapped);
                }
            }

            previous = report.snapshots;
            if report.all_completed {
                break;
            }
        }
    }

    #[test]
    fn proptest_energy_stays_in_bounds((topology, assignments) in arb_fleet()) {
        let policy = EnergyPolicy::default();
        let mut coordinator = coordinator(&topology);
        for (start, goal, energy) in assignments {
            let _ = coordinator.add_agent_with_energy(start, goal, energy);
        }

        let mut previous = coordinator.snapshots();
        for _ in 0..60 {
            let report = coordinator.tick();
            for (before, after) in previous.iter().zip(&report.snapshots) {
                prop_assert!(after.energy <= policy.max_energy());

                let moved = report
                    .events_for(after.id)
                    .any(AgentEvent::is_move);
                let recharged = report
                    .events_for(after.id)
                    .any(|e| matches!(e, AgentEvent::Recharged { .. }));
                if !moved && !recharged {
                    prop_assert_eq!(before.energy, after.energy);
                }
                if moved && !recharged {
                    prop_assert_eq!(after.energy, policy.drain(before.energy));
                }
            }
            previous = report.snapshots;
        }
    }

    #[test]
    fn proptest_completed_agents_stay_put((topology, assignments) in arb_fleet()) {
        let mut coordinator = coordinator(&topology);
        for (start, goal, energy) in assignments {
            let _ = coordinator.add_agent_with_energy(start, goal, energy);
        }

        let mut previous = coordinator.snapshots();
        for _ in 0..60 {
            let report = coordinator.tick();
            for (before, after) in previous.iter().zip(&report.snapshots) {
                if before.state == AgentState::Completed {
                    prop_assert_eq!(before, after);
                    prop_assert!(report.events_for(after.id).next().is_none());
                }
                if after.state == AgentState::Completed {
                    prop_assert_eq!(after.position, after.goal);
                }
            }
            previous = report.snapshots;
        }
    }
}
