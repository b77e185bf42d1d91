//! An energy-aware robot following plans across the topology.
//!
//! Each tick applies, in order:
//!
//! 1. Low energy: at or below the threshold and not already seeking, plan to
//!    the nearest resource node and start seeking.
//! 2. Recharge: seeking and standing on a resource node, restore energy to
//!    the maximum and plan back to the goal.
//! 3. Move: take the next node of the plan if the occupancy snapshot allows
//!    it, otherwise stay put and report blocked.
//! 4. Complete: on the goal and not seeking, stop for good.
//!
//! The first two transitions run in [`Agent::prepare`], the last two in
//! [`Agent::advance`], so a coordinator can gather every agent's intended
//! step in between.

use fleet_grid::{NodeCoord, Topology};
use fleet_pathfind::PathPlanner;
use fleet_types::{AgentId, AgentSnapshot, AgentState, AssignmentError, EnergyPolicy, Plan};
use tracing::{debug, info, warn};

use crate::event::{AgentEvent, BlockReason};
use crate::occupancy::Occupancy;

/// A single robot.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    position: NodeCoord,
    goal: NodeCoord,
    plan: Plan,
    energy: u32,
    seeking: bool,
    blocked: bool,
    completed: bool,
    policy: EnergyPolicy,
}

impl Agent {
    /// Creates an agent at `start` with a plan towards `goal`.
    ///
    /// The agent starts with the policy's initial energy. An unreachable goal
    /// is not an error here: the agent starts with an empty plan and tries
    /// again on its next replan.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError`] if `start == goal` or either node is not
    /// part of the topology.
    pub fn new<P: PathPlanner + ?Sized>(
        id: AgentId,
        start: NodeCoord,
        goal: NodeCoord,
        topology: &Topology,
        planner: &P,
        policy: EnergyPolicy,
    ) -> Result<Self, AssignmentError> {
        if !topology.contains(start) {
            return Err(AssignmentError::UnknownStart(start));
        }
        if !topology.contains(goal) {
            return Err(AssignmentError::UnknownGoal(goal));
        }
        if start == goal {
            return Err(AssignmentError::StartEqualsGoal(start));
        }

        let plan = planner.shortest_path(start, goal);
        if plan.is_empty() {
            warn!(agent = %id, %start, %goal, "Goal unreachable from start");
        }

        Ok(Self {
            id,
            position: start,
            goal,
            plan,
            energy: policy.initial_energy(),
            seeking: false,
            blocked: false,
            completed: false,
            policy,
        })
    }

    /// Overrides the starting energy, clamped to the policy maximum.
    #[must_use]
    pub const fn with_energy(mut self, energy: u32) -> Self {
        self.energy = self.policy.clamp(energy);
        self
    }

    /// Agent identifier.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Current node.
    #[must_use]
    pub const fn position(&self) -> NodeCoord {
        self.position
    }

    /// Final goal.
    #[must_use]
    pub const fn goal(&self) -> NodeCoord {
        self.goal
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Returns `true` while rerouted to a resource node.
    #[must_use]
    pub const fn is_seeking(&self) -> bool {
        self.seeking
    }

    /// Returns `true` once the goal has been reached.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Moves left in the current plan.
    #[must_use]
    pub fn remaining_hops(&self) -> usize {
        self.plan.hops()
    }

    #[cfg(test)]
    pub(crate) const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Observable state, derived from the agent's flags.
    #[must_use]
    pub const fn state(&self) -> AgentState {
        if self.completed {
            AgentState::Completed
        } else if self.blocked {
            AgentState::Blocked
        } else if self.seeking {
            AgentState::SeekingResource
        } else {
            AgentState::Traveling
        }
    }

    /// Read-only view for presentation.
    #[must_use]
    pub const fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            position: self.position,
            goal: self.goal,
            state: self.state(),
            energy: self.energy,
        }
    }

    /// Runs the low-energy and recharge transitions.
    ///
    /// Clears the blocked flag from the previous tick. Does nothing once the
    /// agent has completed.
    pub fn prepare<P: PathPlanner + ?Sized>(
        &mut self,
        topology: &Topology,
        planner: &P,
    ) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        if self.completed {
            return events;
        }
        self.blocked = false;

        if !self.seeking && self.policy.is_low(self.energy) {
            self.seeking = true;
            match planner.nearest_resource(self.position) {
                Ok(resource) => {
                    info!(
                        agent = %self.id,
                        energy = self.energy,
                        %resource,
                        "Low energy, rerouting to resource"
                    );
                    events.push(AgentEvent::Rerouted {
                        resource,
                        energy: self.energy,
                    });
                    self.replan_to(resource, planner, &mut events);
                }
                Err(error) => {
                    warn!(agent = %self.id, %error, "Low energy and stuck");
                    self.plan = Plan::empty();
                    events.push(AgentEvent::Stuck { at: self.position });
                }
            }
        }

        if self.seeking && topology.is_resource(self.position) {
            self.energy = self.policy.max_energy();
            self.seeking = false;
            info!(
                agent = %self.id,
                at = %self.position,
                energy = self.energy,
                "Recharged"
            );
            events.push(AgentEvent::Recharged { at: self.position });
            self.replan_to(self.goal, planner, &mut events);
        }

        events
    }

    /// The node this agent wants to enter this tick, if any.
    ///
    /// `None` when completed, when the plan is empty, or when the plan ends
    /// at the current node.
    #[must_use]
    pub fn intended_step(&self) -> Option<NodeCoord> {
        if self.completed {
            return None;
        }
        self.plan.next_step().filter(|next| *next != self.position)
    }

    /// Runs the move and completion transitions against a tick's occupancy.
    ///
    /// A step is refused when the node was occupied at the start of the
    /// tick, or when another agent holds the claim on it. A plan that ends
    /// where the agent stands counts as an occupied step. Only a successful
    /// move spends energy.
    pub fn advance(&mut self, occupancy: &Occupancy) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        if self.completed {
            return events;
        }

        match self.plan.next_step() {
            Some(next) => {
                if let Some(reason) = self.block_reason(next, occupancy) {
                    self.blocked = true;
                    debug!(agent = %self.id, at = %self.position, wanted = %next, ?reason, "Blocked");
                    events.push(AgentEvent::Blocked {
                        at: self.position,
                        wanted: next,
                        reason,
                    });
                } else {
                    let from = self.position;
                    self.position = next;
                    self.plan = self.plan.advanced();
                    self.energy = self.policy.drain(self.energy);
                    debug!(agent = %self.id, %from, to = %next, energy = self.energy, "Moved");
                    events.push(AgentEvent::Moved { from, to: next });
                }
            }
            None => {}
        }

        if !self.seeking && self.position == self.goal {
            self.completed = true;
            self.blocked = false;
            self.plan = Plan::empty();
            info!(agent = %self.id, at = %self.position, "Reached goal");
            events.push(AgentEvent::Completed { at: self.position });
        }

        events
    }

    /// Runs a whole tick for an agent acting alone.
    ///
    /// `occupancy` holds the positions of every other active agent.
    pub fn step<P: PathPlanner + ?Sized>(
        &mut self,
        topology: &Topology,
        planner: &P,
        occupancy: &Occupancy,
    ) -> Vec<AgentEvent> {
        let mut events = self.prepare(topology, planner);
        events.extend(self.advance(occupancy));
        events
    }

    /// Recomputes the plan from the current position.
    ///
    /// While seeking the target is the nearest resource node, otherwise the
    /// goal. A no-op for completed agents.
    pub fn request_replan<P: PathPlanner + ?Sized>(&mut self, planner: &P) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        if self.completed {
            return events;
        }

        if self.seeking {
            match planner.nearest_resource(self.position) {
                Ok(resource) => self.replan_to(resource, planner, &mut events),
                Err(error) => {
                    warn!(agent = %self.id, %error, "Replan found no resource");
                    self.plan = Plan::empty();
                    events.push(AgentEvent::Stuck { at: self.position });
                }
            }
        } else {
            self.replan_to(self.goal, planner, &mut events);
        }
        events
    }

    fn replan_to<P: PathPlanner + ?Sized>(
        &mut self,
        target: NodeCoord,
        planner: &P,
        events: &mut Vec<AgentEvent>,
    ) {
        self.plan = planner.shortest_path(self.position, target);
        if self.plan.is_empty() {
            warn!(agent = %self.id, from = %self.position, %target, "Target unreachable");
            events.push(AgentEvent::Unreachable { target });
        } else {
            events.push(AgentEvent::Replanned {
                target,
                hops: self.plan.hops(),
            });
        }
    }

    fn block_reason(&self, next: NodeCoord, occupancy: &Occupancy) -> Option<BlockReason> {
        if next == self.position || occupancy.is_occupied(next) {
            return Some(BlockReason::Occupied);
        }
        match occupancy.claimant(next) {
            Some(holder) if holder != self.id => Some(BlockReason::Yielded { to: holder }),
            _ => None,
        }
    }
}
