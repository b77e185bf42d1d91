//! Lock-step coordination of a fleet of agents.
//!
//! Each tick the coordinator:
//!
//! 1. Snapshots the positions of every agent that has not completed.
//! 2. Lets every agent run its energy transitions.
//! 3. Collects every agent's intended step as a claim; the lowest id wins a
//!    contested free node.
//! 4. Lets every agent move (or block) against that single snapshot.
//!
//! Because every agent sees the same snapshot and claims are settled by id,
//! the outcome of a tick does not depend on the order agents are visited.
//! No two active agents ever share a node after a tick, and two agents never
//! swap places in one tick.

use fleet_grid::{NodeCoord, Topology};
use fleet_pathfind::PathPlanner;
use fleet_types::{AgentId, AgentSnapshot, AssignmentError, EnergyPolicy};
use tracing::{debug, debug_span, info};

use crate::agent::Agent;
use crate::event::AgentEvent;
use crate::occupancy::Occupancy;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Events in agent order, then in transition order.
    pub events: Vec<(AgentId, AgentEvent)>,
    /// Every agent after the tick, in id order.
    pub snapshots: Vec<AgentSnapshot>,
    /// Whether every agent has now completed.
    pub all_completed: bool,
}

impl TickReport {
    /// Events of one agent.
    pub fn events_for(&self, id: AgentId) -> impl Iterator<Item = &AgentEvent> + '_ {
        self.events
            .iter()
            .filter(move |(agent, _)| *agent == id)
            .map(|(_, event)| event)
    }

    /// Number of agents that could not move this tick.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.events.iter().filter(|(_, e)| e.is_blocked()).count()
    }
}

/// How [`StepCoordinator::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every agent reached its goal.
    Completed {
        /// Ticks taken.
        ticks: u64,
    },
    /// The tick limit was reached first.
    TickLimit {
        /// Ticks taken.
        ticks: u64,
    },
}

impl RunOutcome {
    /// Returns `true` if every agent completed.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Drives every agent through synchronous ticks.
///
/// # Example
///
/// ```
/// use fleet_grid::{GridDims, NodeCoord, Topology};
/// use fleet_pathfind::AStarPlanner;
/// use fleet_sim::StepCoordinator;
/// use fleet_types::{EnergyPolicy, PlannerConfig};
///
/// let topology = Topology::new(GridDims::planar(3, 3), [], [NodeCoord::planar(0, 0)]).unwrap();
/// let planner = AStarPlanner::new(&topology, PlannerConfig::default());
/// let mut coordinator = StepCoordinator::new(&topology, planner, EnergyPolicy::default());
///
/// coordinator.add_agent(NodeCoord::planar(2, 2), NodeCoord::planar(0, 2)).unwrap();
/// coordinator.add_agent(NodeCoord::planar(2, 0), NodeCoord::planar(0, 0)).unwrap();
///
/// while !coordinator.is_complete() {
///     coordinator.tick();
/// }
/// assert_eq!(coordinator.tick_count(), 2);
/// ```
#[derive(Debug)]
pub struct StepCoordinator<'a, P> {
    topology: &'a Topology,
    planner: P,
    policy: EnergyPolicy,
    agents: Vec<Agent>,
    tick: u64,
}

impl<'a, P: PathPlanner> StepCoordinator<'a, P> {
    /// Creates a coordinator with no agents.
    pub const fn new(topology: &'a Topology, planner: P, policy: EnergyPolicy) -> Self {
        Self {
            topology,
            planner,
            policy,
            agents: Vec::new(),
            tick: 0,
        }
    }

    /// The topology agents move on.
    #[must_use]
    pub const fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// The energy policy applied to new agents.
    #[must_use]
    pub const fn policy(&self) -> &EnergyPolicy {
        &self.policy
    }

    /// Adds an agent with the policy's initial energy.
    ///
    /// Ids are assigned in insertion order starting at 0.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError`] if the assignment is invalid or another
    /// active agent already stands on `start`.
    pub fn add_agent(
        &mut self,
        start: NodeCoord,
        goal: NodeCoord,
    ) -> Result<AgentId, AssignmentError> {
        self.add_agent_with_energy(start, goal, self.policy.initial_energy())
    }

    /// Adds an agent with an explicit starting energy.
    ///
    /// # Errors
    ///
    /// See [`StepCoordinator::add_agent`].
    pub fn add_agent_with_energy(
        &mut self,
        start: NodeCoord,
        goal: NodeCoord,
        energy: u32,
    ) -> Result<AgentId, AssignmentError> {
        if let Some(other) = self
            .agents
            .iter()
            .find(|a| !a.is_completed() && a.position() == start)
        {
            return Err(AssignmentError::StartOccupied {
                start,
                by: other.id(),
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let id = AgentId(self.agents.len() as u32);
        let agent = Agent::new(id, start, goal, self.topology, &self.planner, self.policy)?
            .with_energy(energy);
        debug!(agent = %id, %start, %goal, energy = agent.energy(), "Agent added");
        self.agents.push(agent);
        Ok(id)
    }

    /// Advances every agent by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let _span = debug_span!("tick", tick = self.tick).entered();

        let mut occupancy = Occupancy::snapshot(
            self.agents
                .iter()
                .filter(|a| !a.is_completed())
                .map(Agent::position),
        );

        let mut events: Vec<Vec<AgentEvent>> = self
            .agents
            .iter_mut()
            .map(|agent| agent.prepare(self.topology, &self.planner))
            .collect();

        for agent in &self.agents {
            if let Some(next) = agent.intended_step() {
                occupancy.claim(next, agent.id());
            }
        }

        for (agent, agent_events) in self.agents.iter_mut().zip(&mut events) {
            agent_events.extend(agent.advance(&occupancy));
        }

        let report = TickReport {
            tick: self.tick,
            events: self
                .agents
                .iter()
                .zip(events)
                .flat_map(|(agent, agent_events)| {
                    let id = agent.id();
                    agent_events.into_iter().map(move |e| (id, e))
                })
                .collect(),
            snapshots: self.snapshots(),
            all_completed: self.is_complete(),
        };

        debug!(
            events = report.events.len(),
            blocked = report.blocked_count(),
            "Tick finished"
        );
        if report.all_completed {
            info!(ticks = self.tick, "All agents completed");
        }
        report
    }

    /// Ticks until every agent completes or `max_ticks` more ticks have run.
    ///
    /// `on_tick` sees each report as it is produced.
    pub fn run(&mut self, max_ticks: u64, mut on_tick: impl FnMut(&TickReport)) -> RunOutcome {
        let mut remaining = max_ticks;
        while !self.is_complete() {
            if remaining == 0 {
                return RunOutcome::TickLimit { ticks: self.tick };
            }
            remaining -= 1;
            let report = self.tick();
            on_tick(&report);
        }
        RunOutcome::Completed { ticks: self.tick }
    }

    /// Asks one agent to recompute its plan.
    ///
    /// Returns `None` if no agent has that id.
    pub fn request_replan(&mut self, id: AgentId) -> Option<Vec<AgentEvent>> {
        let planner = &self.planner;
        self.agents
            .iter_mut()
            .find(|a| a.id() == id)
            .map(|agent| agent.request_replan(planner))
    }

    /// Returns `true` when every agent has completed.
    ///
    /// A coordinator with no agents is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.agents.iter().all(Agent::is_completed)
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// All agents in id order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// One agent by id.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Snapshots of every agent in id order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(Agent::snapshot).collect()
    }
}
