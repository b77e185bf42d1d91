//! Scenario files and command-line overrides.
//!
//! A scenario describes one warehouse run. Every field is optional in JSON
//! and falls back to the defaults of the two-layer demo warehouse:
//!
//! ```json
//! {
//!   "dims": { "layers": 2, "rows": 15, "cols": 20 },
//!   "obstacles": 50,
//!   "stations": ["L0_0-0", { "layer": 1, "row": 14, "col": 19 }],
//!   "agents": [
//!     { "start": "L0_3-3", "goal": 42 },
//!     { "goal": "L1_7-7", "energy": 15 }
//!   ],
//!   "energy": { "low_threshold": 10, "move_cost": 5 },
//!   "seed": 7
//! }
//! ```
//!
//! Obstacles and stations are either a count (sampled with the seed) or an
//! explicit node list of names or coordinate objects. Agent starts and goals
//! may also be a 1-based node id, since ids only exist once the topology is
//! built. Agents without a start get a random free one.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use fleet_grid::{GridDims, NodeCoord, NodeId, Topology};
use fleet_types::{EnergyPolicy, PlannerConfig};
use serde::{Deserialize, Serialize};

/// Default grid of the demo warehouse.
pub const DEFAULT_DIMS: GridDims = GridDims::new(2, 15, 20);
/// Default number of randomly placed obstacles.
pub const DEFAULT_OBSTACLES: usize = 50;
/// Default number of randomly placed charging stations.
pub const DEFAULT_STATIONS: usize = 8;
/// Default number of robots when no agents are listed.
pub const DEFAULT_ROBOTS: usize = 10;
/// Default tick limit.
pub const DEFAULT_MAX_TICKS: u64 = 10_000;

/// A node reference as written in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// 1-based node id, as printed by `fleet nodes`.
    Id(NodeId),
    /// Node name such as `L0_3-4`.
    Name(String),
    /// Explicit coordinates.
    Coord(NodeCoord),
}

impl NodeRef {
    /// Resolves the reference against a grid, without checking obstacles.
    pub fn resolve_coord(&self) -> Result<NodeCoord> {
        match self {
            Self::Coord(coord) => Ok(*coord),
            Self::Name(name) => name
                .parse()
                .with_context(|| format!("invalid node name {name:?}")),
            Self::Id(id) => bail!("node id {id} needs a built topology"),
        }
    }

    /// Resolves the reference to a surviving node of `topology`.
    pub fn resolve(&self, topology: &Topology) -> Result<NodeCoord> {
        let coord = match self {
            Self::Id(id) => topology
                .node(*id)
                .with_context(|| format!("node id {id} does not exist"))?,
            other => other.resolve_coord()?,
        };
        if !topology.contains(coord) {
            bail!("node {coord} is an obstacle or outside the grid");
        }
        Ok(coord)
    }
}

/// Obstacle or station placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    /// Sample this many nodes.
    Random(usize),
    /// Use exactly these nodes.
    Nodes(Vec<NodeRef>),
}

/// One robot in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Start node; random if absent.
    #[serde(default)]
    pub start: Option<NodeRef>,
    /// Goal node; random if absent.
    #[serde(default)]
    pub goal: Option<NodeRef>,
    /// Starting energy; the policy's initial energy if absent.
    #[serde(default)]
    pub energy: Option<u32>,
}

/// A complete run description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Grid extents.
    pub dims: GridDims,
    /// Obstacle placement.
    pub obstacles: Placement,
    /// Charging station placement.
    pub stations: Placement,
    /// Explicit robots. When empty, `robots` random robots are created.
    pub agents: Vec<AgentSpec>,
    /// Number of random robots when `agents` is empty.
    pub robots: usize,
    /// Energy rules.
    pub energy: EnergyPolicy,
    /// Planner settings.
    pub planner: PlannerConfig,
    /// Tick limit.
    pub max_ticks: u64,
    /// Seed for every random placement.
    pub seed: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            dims: DEFAULT_DIMS,
            obstacles: Placement::Random(DEFAULT_OBSTACLES),
            stations: Placement::Random(DEFAULT_STATIONS),
            agents: Vec::new(),
            robots: DEFAULT_ROBOTS,
            energy: EnergyPolicy::default(),
            planner: PlannerConfig::default(),
            max_ticks: DEFAULT_MAX_TICKS,
            seed: 0,
        }
    }
}

/// Values given on the command line, applied over a scenario.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Grid layers.
    pub layers: Option<u32>,
    /// Grid rows.
    pub rows: Option<u32>,
    /// Grid columns.
    pub cols: Option<u32>,
    /// Random obstacle count.
    pub obstacles: Option<usize>,
    /// Random station count.
    pub stations: Option<usize>,
    /// Random robot count.
    pub robots: Option<usize>,
    /// Placement seed.
    pub seed: Option<u64>,
    /// Tick limit.
    pub max_ticks: Option<u64>,
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Applies command-line values on top of this scenario.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(layers) = overrides.layers {
            self.dims.layers = layers;
        }
        if let Some(rows) = overrides.rows {
            self.dims.rows = rows;
        }
        if let Some(cols) = overrides.cols {
            self.dims.cols = cols;
        }
        if let Some(count) = overrides.obstacles {
            self.obstacles = Placement::Random(count);
        }
        if let Some(count) = overrides.stations {
            self.stations = Placement::Random(count);
        }
        if let Some(robots) = overrides.robots {
            self.robots = robots;
            self.agents.clear();
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(max_ticks) = overrides.max_ticks {
            self.max_ticks = max_ticks;
        }
        self
    }

    /// Rejects settings no run could use.
    pub fn validate(&self) -> Result<()> {
        let issues = self.energy.validate();
        if !issues.is_empty() {
            bail!("invalid energy policy: {}", issues.join("; "));
        }
        if self.dims.is_degenerate() {
            bail!(
                "grid dimensions must be positive, got {}x{}x{}",
                self.dims.layers,
                self.dims.rows,
                self.dims.cols
            );
        }
        if self.dims.checked_capacity().is_none() {
            bail!(
                "grid {}x{}x{} exceeds {} cells",
                self.dims.layers,
                self.dims.rows,
                self.dims.cols,
                GridDims::MAX_CELLS
            );
        }
        if let Placement::Random(0) = self.stations {
            bail!("at least one charging station is required");
        }
        Ok(())
    }

    /// Number of robots the run will create.
    pub fn robot_count(&self) -> usize {
        if self.agents.is_empty() {
            self.robots
        } else {
            self.agents.len()
        }
    }
}
