//! Warehouse fleet simulation driver.
//!
//! Builds a layered warehouse, places robots with start and goal nodes, and
//! runs the fleet tick by tick until every robot has reached its goal.
//!
//! # Commands
//!
//! - `fleet run` - Simulate a warehouse (random or from `--scenario`)
//! - `fleet nodes` - Print the node map so goals can be picked by id
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` or `-v`/`-vv`.

mod render;
mod scenario;
mod setup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fleet_pathfind::AStarPlanner;
use fleet_sim::{RunOutcome, StepCoordinator};
use owo_colors::OwoColorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::RenderMode;
use crate::scenario::{Overrides, Scenario};

/// Warehouse robot fleet simulation
#[derive(Parser)]
#[command(name = "fleet")]
#[command(about = "Simulate energy-aware warehouse robots", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation until every robot completes
    Run {
        #[command(flatten)]
        warehouse: WarehouseArgs,

        /// Number of random robots (replaces robots from the scenario)
        #[arg(long)]
        robots: Option<usize>,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Per-tick output
        #[arg(long, value_enum, default_value = "summary")]
        render: RenderMode,

        /// Disable colored map output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the node map table
    Nodes {
        #[command(flatten)]
        warehouse: WarehouseArgs,
    },
}

/// Warehouse layout options shared by every command.
#[derive(Args)]
struct WarehouseArgs {
    /// JSON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of layers
    #[arg(long)]
    layers: Option<u32>,

    /// Rows per layer
    #[arg(long)]
    rows: Option<u32>,

    /// Columns per row
    #[arg(long)]
    cols: Option<u32>,

    /// Number of random obstacles
    #[arg(long)]
    obstacles: Option<usize>,

    /// Number of random charging stations
    #[arg(long)]
    stations: Option<usize>,

    /// Seed for random placement
    #[arg(long)]
    seed: Option<u64>,
}

impl WarehouseArgs {
    fn scenario(&self, overrides: Overrides) -> Result<Scenario> {
        let base = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };
        let scenario = base.with_overrides(&Overrides {
            layers: self.layers,
            rows: self.rows,
            cols: self.cols,
            obstacles: self.obstacles,
            stations: self.stations,
            seed: self.seed,
            ..overrides
        });
        scenario.validate()?;
        Ok(scenario)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            warehouse,
            robots,
            max_ticks,
            render,
            no_color,
        } => {
            let scenario = warehouse.scenario(Overrides {
                robots,
                max_ticks,
                ..Overrides::default()
            })?;
            run(&scenario, render, !no_color)
        }
        Commands::Nodes { warehouse } => {
            let scenario = warehouse.scenario(Overrides::default())?;
            let built = setup::build(&scenario)?;
            print!("{}", render::node_table(&built.topology));
            Ok(())
        }
    }
}

fn run(scenario: &Scenario, mode: RenderMode, color: bool) -> Result<()> {
    let warehouse = setup::build(scenario)?;
    let topology = &warehouse.topology;
    let planner = AStarPlanner::new(topology, scenario.planner);
    let mut coordinator = StepCoordinator::new(topology, planner, scenario.energy);

    for (index, assignment) in warehouse.assignments.iter().enumerate() {
        let energy = assignment
            .energy
            .unwrap_or_else(|| scenario.energy.initial_energy());
        coordinator
            .add_agent_with_energy(assignment.start, assignment.goal, energy)
            .with_context(|| format!("cannot place robot {index}"))?;
    }

    if mode == RenderMode::Ascii {
        println!("Step 0");
        print!("{}", render::ascii_map(topology, &coordinator.snapshots(), color));
    }

    let outcome = coordinator.run(scenario.max_ticks, |report| match mode {
        RenderMode::None => {}
        RenderMode::Summary | RenderMode::Ascii => {
            for (id, event) in &report.events {
                if let Some(line) = render::event_line(*id, event) {
                    println!("{line}");
                }
            }
            println!("{}", render::tick_summary(report));
            if mode == RenderMode::Ascii {
                print!("{}", render::ascii_map(topology, &report.snapshots, color));
            }
        }
    });

    println!();
    print!("{}", render::final_summary(&coordinator.snapshots()));
    match outcome {
        RunOutcome::Completed { ticks } => {
            info!(ticks, "Run finished");
            let done = "All robots completed their tasks.";
            if color {
                println!("{}", done.green().bold());
            } else {
                println!("{done}");
            }
            Ok(())
        }
        RunOutcome::TickLimit { ticks } => {
            warn!(ticks, "Tick limit reached");
            anyhow::bail!(
                "stopped after {ticks} ticks with {} of {} robots still working",
                coordinator
                    .agents()
                    .iter()
                    .filter(|a| !a.is_completed())
                    .count(),
                coordinator.agents().len()
            )
        }
    }
}
