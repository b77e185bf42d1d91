//! Text output: node tables, per-tick maps and event lines.

use std::fmt::Write as _;

use clap::ValueEnum;
use fleet_grid::{NodeCoord, Topology};
use fleet_sim::{AgentEvent, BlockReason, TickReport};
use fleet_types::{AgentId, AgentSnapshot, AgentState};
use owo_colors::OwoColorize;

/// How each tick is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// A character map of every layer plus the summary.
    Ascii,
    /// One summary line per tick plus notable events.
    Summary,
    /// Nothing until the run ends.
    None,
}

/// The `ID  Node Name` table.
pub fn node_table(topology: &Topology) -> String {
    let mut out = String::from("Node Map:\n");
    let _ = writeln!(out, "{:<5}{:<15}", "ID", "Node Name");
    for (id, node) in topology.node_map() {
        let _ = writeln!(out, "{:<5}{:<15}", id.to_string(), node.to_string());
    }
    out
}

/// Glyph for an agent: its id in base 36.
fn glyph(id: AgentId) -> char {
    char::from_digit(id.0 % 36, 36).unwrap_or('?')
}

fn paint(glyph: char, state: AgentState, color: bool) -> String {
    if !color {
        return glyph.to_string();
    }
    match state {
        AgentState::Traveling => glyph.cyan().bold().to_string(),
        AgentState::SeekingResource => glyph.yellow().bold().to_string(),
        AgentState::Blocked => glyph.red().bold().to_string(),
        AgentState::Completed => glyph.green().to_string(),
    }
}

/// A character map of every layer.
///
/// `#` is an obstacle, `+` a charging station, `.` a free node. Agents are
/// drawn by id; an active agent hides a completed one on the same node.
pub fn ascii_map(topology: &Topology, snapshots: &[AgentSnapshot], color: bool) -> String {
    let dims = topology.dims();
    let mut out = String::new();

    for layer in 0..dims.layers {
        let _ = writeln!(out, "Layer {layer}");
        for row in 0..dims.rows {
            for col in 0..dims.cols {
                let node = NodeCoord::new(layer, row, col);
                let here = snapshots
                    .iter()
                    .filter(|s| s.position == node)
                    .min_by_key(|s| (s.state == AgentState::Completed, s.id));
                let cell = match here {
                    Some(s) => paint(glyph(s.id), s.state, color),
                    None if topology.is_obstacle(node) => "#".to_string(),
                    None if topology.is_resource(node) => "+".to_string(),
                    None => ".".to_string(),
                };
                out.push_str(&cell);
            }
            out.push('\n');
        }
    }
    out
}

/// One line describing a tick.
pub fn tick_summary(report: &TickReport) -> String {
    let moved = report.events.iter().filter(|(_, e)| e.is_move()).count();
    let done = report
        .snapshots
        .iter()
        .filter(|s| s.state.is_completed())
        .count();
    format!(
        "Step {}: {moved} moved, {} blocked, {done}/{} completed",
        report.tick,
        report.blocked_count(),
        report.snapshots.len()
    )
}

/// A line for events worth showing; moves and replans are skipped.
pub fn event_line(id: AgentId, event: &AgentEvent) -> Option<String> {
    let line = match event {
        AgentEvent::Blocked { at, reason, .. } => match reason {
            BlockReason::Occupied => format!("Robot {id} waiting at {at} (blocked)."),
            BlockReason::Yielded { to } => {
                format!("Robot {id} waiting at {at} (yielding to robot {to}).")
            }
        },
        AgentEvent::Rerouted { resource, energy } => {
            format!("Robot {id} low on energy ({energy}), heading to station {resource}.")
        }
        AgentEvent::Recharged { at } => format!("Robot {id} recharged at {at}."),
        AgentEvent::Unreachable { target } => format!("Robot {id} has no path to {target}."),
        AgentEvent::Stuck { at } => format!("Robot {id} stranded at {at}: no station reachable."),
        AgentEvent::Completed { at } => format!("Robot {id} reached {at}."),
        AgentEvent::Replanned { .. } | AgentEvent::Moved { .. } => return None,
    };
    Some(line)
}

/// Final per-robot lines.
pub fn final_summary(snapshots: &[AgentSnapshot]) -> String {
    let mut out = String::new();
    for s in snapshots {
        let _ = writeln!(
            out,
            "Robot {:<3} {:<10} at {:<10} goal {:<10} energy {}",
            s.id.to_string(),
            s.state.label(),
            s.position.to_string(),
            s.goal.to_string(),
            s.energy
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fleet_grid::GridDims;

    fn topology() -> Topology {
        Topology::new(
            GridDims::new(2, 2, 3),
            [NodeCoord::new(0, 0, 1)],
            [NodeCoord::new(1, 1, 2)],
        )
        .unwrap()
    }

    fn snapshot(id: u32, position: NodeCoord, state: AgentState) -> AgentSnapshot {
        AgentSnapshot {
            id: AgentId(id),
            position,
            goal: NodeCoord::new(1, 0, 0),
            state,
            energy: 50,
        }
    }

    #[test]
    fn test_node_table() {
        let table = node_table(&topology());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Node Map:");
        assert!(lines[1].starts_with("ID   Node Name"));
        assert!(lines[2].starts_with("1    L0_0-0"));
        // Obstacle L0_0-1 is skipped
        assert!(lines[3].starts_with("2    L0_0-2"));
        assert_eq!(lines.len(), 2 + 11);
    }

    #[test]
    fn test_ascii_map_plain() {
        let snapshots = [
            snapshot(0, NodeCoord::new(0, 1, 0), AgentState::Traveling),
            snapshot(11, NodeCoord::new(1, 0, 0), AgentState::Blocked),
        ];
        let map = ascii_map(&topology(), &snapshots, false);
        assert_eq!(map, "Layer 0\n.#.\n0..\nLayer 1\nb..\n..+\n");
    }

    #[test]
    fn test_active_agent_drawn_over_completed() {
        let node = NodeCoord::new(0, 0, 0);
        let snapshots = [
            snapshot(1, node, AgentState::Completed),
            snapshot(2, node, AgentState::Traveling),
        ];
        let map = ascii_map(&topology(), &snapshots, false);
        assert!(map.starts_with("Layer 0\n2#."));
    }

    #[test]
    fn test_event_lines() {
        let at = NodeCoord::planar(0, 0);
        let blocked = AgentEvent::Blocked {
            at,
            wanted: NodeCoord::planar(0, 1),
            reason: BlockReason::Occupied,
        };
        assert_eq!(
            event_line(AgentId(3), &blocked).unwrap(),
            "Robot 3 waiting at L0_0-0 (blocked)."
        );
        assert!(event_line(AgentId(3), &AgentEvent::Moved { from: at, to: at }).is_none());
    }

    #[test]
    fn test_tick_summary() {
        let report = TickReport {
            tick: 4,
            events: vec![(
                AgentId(0),
                AgentEvent::Moved {
                    from: NodeCoord::planar(0, 0),
                    to: NodeCoord::planar(0, 1),
                },
            )],
            snapshots: vec![
                snapshot(0, NodeCoord::planar(0, 1), AgentState::Traveling),
                snapshot(1, NodeCoord::planar(1, 1), AgentState::Completed),
            ],
            all_completed: false,
        };
        assert_eq!(tick_summary(&report), "Step 4: 1 moved, 0 blocked, 1/2 completed");
    }
}
