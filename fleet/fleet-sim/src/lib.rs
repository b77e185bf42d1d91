//! Energy-aware agents moving in lock step over a warehouse topology.
//!
//! # Overview
//!
//! - **[`Agent`]**: one robot with a position, a goal, an energy level and
//!   the plan it is following
//! - **[`StepCoordinator`]**: owns the fleet, advances it tick by tick and
//!   settles contested nodes
//! - **[`Occupancy`]**: the positions held at the start of a tick
//! - **[`AgentEvent`]**: what each agent did during a tick
//!
//! # Quick Start
//!
//! ```
//! use fleet_grid::{GridDims, NodeCoord, Topology};
//! use fleet_pathfind::AStarPlanner;
//! use fleet_sim::{AgentEvent, StepCoordinator};
//! use fleet_types::{EnergyPolicy, PlannerConfig};
//!
//! let topology = Topology::new(GridDims::planar(4, 4), [], [NodeCoord::planar(0, 0)]).unwrap();
//! let planner = AStarPlanner::new(&topology, PlannerConfig::default());
//! let mut coordinator = StepCoordinator::new(&topology, planner, EnergyPolicy::default());
//!
//! // Too little charge to reach the goal directly
//! coordinator
//!     .add_agent_with_energy(NodeCoord::planar(3, 3), NodeCoord::planar(0, 3), 12)
//!     .unwrap();
//!
//! let mut recharged = false;
//! let outcome = coordinator.run(50, |report| {
//!     recharged |= report
//!         .events
//!         .iter()
//!         .any(|(_, e)| matches!(e, AgentEvent::Recharged { .. }));
//! });
//!
//! assert!(outcome.is_completed());
//! assert!(recharged);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod agent;
pub mod coordinator;
pub mod event;
pub mod occupancy;

pub use agent::Agent;
pub use coordinator::{RunOutcome, StepCoordinator, TickReport};
pub use event::{AgentEvent, BlockReason};
pub use occupancy::Occupancy;
