//! Configuration types for planning and energy accounting.
//!
//! # Example
//!
//! ```
//! use fleet_types::{EnergyPolicy, Heuristic, PlannerConfig};
//!
//! let planner = PlannerConfig::default().with_heuristic(Heuristic::Manhattan);
//! let energy = EnergyPolicy::default()
//!     .with_low_threshold(20)
//!     .with_move_cost(2);
//!
//! assert!(energy.validate().is_empty());
//! ```

/// Heuristic functions for A* over the grid topology.
///
/// Every edge costs 1 and joins nodes one axis step apart, so the Manhattan
/// distance between `[layer, row, col]` embeddings never overestimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Manhattan distance: `|dlayer| + |drow| + |dcol|`.
    ///
    /// Admissible and consistent for the unit-weight axis-aligned grid.
    #[default]
    Manhattan,

    /// Zero heuristic (Dijkstra's algorithm).
    ///
    /// Always returns 0. Still optimal, explores more nodes.
    Zero,
}

/// Configuration for the A* planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Heuristic function to use.
    heuristic: Heuristic,
}

impl PlannerConfig {
    /// Creates a planner configuration with the Manhattan heuristic.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
        }
    }

    /// Sets the heuristic function.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Returns the heuristic function.
    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

/// Energy accounting rules shared by every agent.
///
/// Defaults:
/// - Maximum energy: 100
/// - Low-energy threshold: 10 (at or below, the agent reroutes to a station)
/// - Move cost: 5 per successful move
/// - Initial energy: 100
///
/// # Example
///
/// ```
/// use fleet_types::EnergyPolicy;
///
/// let policy = EnergyPolicy::default();
/// assert_eq!(policy.drain(12), 7);
/// assert_eq!(policy.drain(3), 0);
/// assert!(policy.is_low(10));
/// assert!(!policy.is_low(11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyPolicy {
    /// Energy after a recharge, and the upper clamp.
    max_energy: u32,
    /// Energy level at or below which an agent seeks a station.
    low_threshold: u32,
    /// Energy spent per successful move.
    move_cost: u32,
    /// Energy a newly created agent starts with.
    initial_energy: u32,
}

impl EnergyPolicy {
    /// Default maximum energy.
    pub const DEFAULT_MAX_ENERGY: u32 = 100;
    /// Default low-energy threshold.
    pub const DEFAULT_LOW_THRESHOLD: u32 = 10;
    /// Default cost of one move.
    pub const DEFAULT_MOVE_COST: u32 = 5;

    /// Creates the default energy policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_energy: Self::DEFAULT_MAX_ENERGY,
            low_threshold: Self::DEFAULT_LOW_THRESHOLD,
            move_cost: Self::DEFAULT_MOVE_COST,
            initial_energy: Self::DEFAULT_MAX_ENERGY,
        }
    }

    /// Sets the maximum energy.
    #[must_use]
    pub const fn with_max_energy(mut self, max: u32) -> Self {
        self.max_energy = max;
        self
    }

    /// Sets the low-energy threshold.
    #[must_use]
    pub const fn with_low_threshold(mut self, threshold: u32) -> Self {
        self.low_threshold = threshold;
        self
    }

    /// Sets the energy spent per move.
    #[must_use]
    pub const fn with_move_cost(mut self, cost: u32) -> Self {
        self.move_cost = cost;
        self
    }

    /// Sets the starting energy of new agents.
    #[must_use]
    pub const fn with_initial_energy(mut self, energy: u32) -> Self {
        self.initial_energy = energy;
        self
    }

    /// Returns the maximum energy.
    #[must_use]
    pub const fn max_energy(&self) -> u32 {
        self.max_energy
    }

    /// Returns the low-energy threshold.
    #[must_use]
    pub const fn low_threshold(&self) -> u32 {
        self.low_threshold
    }

    /// Returns the energy spent per move.
    #[must_use]
    pub const fn move_cost(&self) -> u32 {
        self.move_cost
    }

    /// Returns the starting energy, clamped to the maximum.
    #[must_use]
    pub const fn initial_energy(&self) -> u32 {
        self.clamp(self.initial_energy)
    }

    /// Clamps an energy level into `0..=max_energy`.
    #[must_use]
    pub const fn clamp(&self, energy: u32) -> u32 {
        if energy > self.max_energy {
            self.max_energy
        } else {
            energy
        }
    }

    /// Energy left after one move, saturating at zero.
    #[must_use]
    pub const fn drain(&self, energy: u32) -> u32 {
        energy.saturating_sub(self.move_cost)
    }

    /// Returns `true` if `energy` is at or below the low-energy threshold.
    #[must_use]
    pub const fn is_low(&self, energy: u32) -> bool {
        energy <= self.low_threshold
    }

    /// Validates the policy and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.max_energy == 0 {
            issues.push("max_energy must be positive".to_string());
        }
        if self.low_threshold >= self.max_energy {
            issues.push(format!(
                "low_threshold {} must be below max_energy {}",
                self.low_threshold, self.max_energy
            ));
        }
        if self.initial_energy > self.max_energy {
            issues.push(format!(
                "initial_energy {} exceeds max_energy {}",
                self.initial_energy, self.max_energy
            ));
        }

        issues
    }
}

impl Default for EnergyPolicy {
    fn default() -> Self {
        Self::new()
    }
}
