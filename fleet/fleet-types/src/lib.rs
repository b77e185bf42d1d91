//! Core types for warehouse fleet routing: plans, agent status, configuration
//! and errors.
//!
//! # Overview
//!
//! - **Plans**: node sequences produced by the planner ([`Plan`])
//! - **Status**: what presentation code may see of an agent ([`AgentId`],
//!   [`AgentState`], [`AgentSnapshot`])
//! - **Configuration**: planner and energy settings ([`PlannerConfig`],
//!   [`Heuristic`], [`EnergyPolicy`])
//! - **Errors**: [`PlanningError`] for per-tick search failures,
//!   [`AssignmentError`] for rejected start/goal assignments
//!
//! # Example
//!
//! ```
//! use fleet_types::{EnergyPolicy, Plan};
//! use fleet_grid::NodeCoord;
//!
//! let policy = EnergyPolicy::default();
//! let plan = Plan::new(vec![NodeCoord::planar(0, 0), NodeCoord::planar(0, 1)]);
//!
//! // One move left, costing 5 energy
//! assert_eq!(plan.hops(), 1);
//! assert_eq!(policy.drain(policy.initial_energy()), 95);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod plan;
pub mod status;

pub use config::{EnergyPolicy, Heuristic, PlannerConfig};
pub use error::{AssignmentError, PlanningError};
pub use plan::Plan;
pub use status::{AgentId, AgentSnapshot, AgentState};

#[cfg(all(test, feature = "serde"))]
#[allow(clippy::unwrap_used)]
mod serde_tests {
    use super::*;
    use fleet_grid::NodeCoord;

    #[test]
    fn test_snapshot_json() {
        let snapshot = AgentSnapshot {
            id: AgentId(1),
            position: NodeCoord::planar(0, 1),
            goal: NodeCoord::planar(2, 2),
            state: AgentState::SeekingResource,
            energy: 40,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"seeking_resource\""));
        let parsed: AgentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_energy_policy_partial_json() {
        let policy: EnergyPolicy = serde_json::from_str(r#"{"move_cost": 2}"#).unwrap();
        assert_eq!(policy.move_cost(), 2);
        assert_eq!(policy.max_energy(), 100);
    }
}
