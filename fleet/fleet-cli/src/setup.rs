//! Building a warehouse and its robot assignments from a scenario.
//!
//! All randomness comes from one `StdRng` seeded by the scenario, so the
//! same scenario always produces the same warehouse.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use fleet_grid::{ConfigurationError, NodeCoord, Topology};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::scenario::{Placement, Scenario};

/// One robot ready to join the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Start node.
    pub start: NodeCoord,
    /// Goal node, never equal to `start`.
    pub goal: NodeCoord,
    /// Starting energy override.
    pub energy: Option<u32>,
}

/// A built topology with its robots.
#[derive(Debug, Clone)]
pub struct Warehouse {
    /// The graph robots move over.
    pub topology: Topology,
    /// Robots in id order.
    pub assignments: Vec<Assignment>,
}

/// Builds the topology and robot assignments for a scenario.
pub fn build(scenario: &Scenario) -> Result<Warehouse> {
    let mut rng = StdRng::seed_from_u64(scenario.seed);
    let dims = scenario.dims;
    if dims.is_degenerate() {
        return Err(ConfigurationError::InvalidDimensions(dims)).context("invalid warehouse");
    }
    if dims.checked_capacity().is_none() {
        return Err(ConfigurationError::GridTooLarge(dims)).context("invalid warehouse");
    }
    let cells: Vec<NodeCoord> = dims.iter().collect();

    let obstacles: BTreeSet<NodeCoord> = match &scenario.obstacles {
        Placement::Random(count) => {
            if *count >= cells.len() {
                bail!("{count} obstacles leave no free node in a {}-cell grid", cells.len());
            }
            cells.choose_multiple(&mut rng, *count).copied().collect()
        }
        Placement::Nodes(nodes) => nodes
            .iter()
            .map(|node| {
                let coord = node.resolve_coord().context("obstacle")?;
                if !dims.contains(coord) {
                    bail!("obstacle {coord} is outside the grid");
                }
                Ok(coord)
            })
            .collect::<Result<_>>()?,
    };

    let free: Vec<NodeCoord> = cells
        .iter()
        .copied()
        .filter(|c| !obstacles.contains(c))
        .collect();

    let stations: BTreeSet<NodeCoord> = match &scenario.stations {
        Placement::Random(count) => {
            if *count > free.len() {
                bail!("{count} stations requested but only {} free nodes", free.len());
            }
            free.choose_multiple(&mut rng, *count).copied().collect()
        }
        Placement::Nodes(nodes) => nodes
            .iter()
            .map(|node| node.resolve_coord().context("station"))
            .collect::<Result<_>>()?,
    };

    let topology = Topology::new(dims, obstacles, stations).context("invalid warehouse")?;
    let assignments = assign(scenario, &topology, &mut rng)?;

    info!(
        nodes = topology.node_count(),
        stations = topology.resources().len(),
        robots = assignments.len(),
        seed = scenario.seed,
        "Warehouse ready"
    );

    Ok(Warehouse {
        topology,
        assignments,
    })
}

/// Picks starts and goals. Explicit starts are placed first so random ones
/// avoid them.
fn assign(scenario: &Scenario, topology: &Topology, rng: &mut StdRng) -> Result<Vec<Assignment>> {
    let count = scenario.robot_count();
    if count > topology.node_count() {
        bail!(
            "{count} robots cannot start on {} free nodes",
            topology.node_count()
        );
    }

    let mut explicit = Vec::with_capacity(count);
    for index in 0..count {
        let spec = scenario.agents.get(index);
        let start = spec
            .and_then(|s| s.start.as_ref())
            .map(|node| node.resolve(topology))
            .transpose()
            .with_context(|| format!("start of robot {index}"))?;
        explicit.push(start);
    }

    let mut taken: BTreeSet<NodeCoord> = BTreeSet::new();
    for (index, start) in explicit.iter().enumerate() {
        if let Some(start) = start {
            if !taken.insert(*start) {
                bail!("robot {index} shares its start {start} with another robot");
            }
        }
    }

    let mut spare: Vec<NodeCoord> = topology.nodes().filter(|n| !taken.contains(n)).collect();
    spare.shuffle(rng);

    let nodes: Vec<NodeCoord> = topology.nodes().collect();
    let mut assignments = Vec::with_capacity(count);
    for (index, start) in explicit.into_iter().enumerate() {
        let start = match start {
            Some(start) => start,
            None => spare.pop().context("ran out of free start nodes")?,
        };

        let spec = scenario.agents.get(index);
        let goal = match spec.and_then(|s| s.goal.as_ref()) {
            Some(node) => node
                .resolve(topology)
                .with_context(|| format!("goal of robot {index}"))?,
            None => random_goal(&nodes, start, rng)?,
        };
        if goal == start {
            bail!("robot {index}: final position cannot be the same as the start position {start}");
        }

        let energy = spec.and_then(|s| s.energy);
        debug!(robot = index, %start, %goal, ?energy, "Assigned");
        assignments.push(Assignment {
            start,
            goal,
            energy,
        });
    }

    Ok(assignments)
}

fn random_goal(nodes: &[NodeCoord], start: NodeCoord, rng: &mut StdRng) -> Result<NodeCoord> {
    if nodes.len() < 2 {
        bail!("a single-node warehouse has no goal distinct from the start");
    }
    loop {
        if let Some(goal) = nodes.choose(rng) {
            if *goal != start {
                return Ok(*goal);
            }
        }
    }
}
