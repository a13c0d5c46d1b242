//! Coordinate assignment and connector geometry.
//!
//! Levels become columns spaced left to right; each column is centered
//! vertically as a block against the tallest column, with a fixed pitch
//! between rows. Milestone nodes render as a smaller diamond glyph whose
//! center lines up with standard task node centers, so all positions here
//! are glyph centers.

use std::collections::HashMap;

use keel_model::{Task, TaskId};
use serde::{Deserialize, Serialize};

use crate::error::DiagramResult;
use crate::graph::{CyclePolicy, DependencyGraph};

/// A point in layout space.
pub type Point = (f64, f64);

/// Half-extents of a standard task node box.
const NODE_HALF_WIDTH: f64 = 110.0;
const NODE_HALF_HEIGHT: f64 = 40.0;

/// Half-diagonal of a milestone diamond.
const MILESTONE_HALF_EXTENT: f64 = 28.0;

/// Spacing constants for the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between column origins.
    pub column_spacing: f64,
    /// Vertical pitch between rows within a column.
    pub row_pitch: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 350.0,
            row_pitch: 140.0,
        }
    }
}

/// Render shape of a laid-out node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphKind {
    Task,
    Milestone,
}

impl GlyphKind {
    /// Horizontal half-extent, used for connector anchor offsets.
    pub fn half_width(self) -> f64 {
        match self {
            Self::Task => NODE_HALF_WIDTH,
            Self::Milestone => MILESTONE_HALF_EXTENT,
        }
    }

    /// Vertical half-extent.
    pub fn half_height(self) -> f64 {
        match self {
            Self::Task => NODE_HALF_HEIGHT,
            Self::Milestone => MILESTONE_HALF_EXTENT,
        }
    }
}

/// A positioned node; `x`/`y` are the glyph center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub task_id: TaskId,
    pub level: usize,
    pub x: f64,
    pub y: f64,
    pub glyph: GlyphKind,
    /// Flagged on the critical path; drives node styling.
    pub critical: bool,
}

/// A cubic bezier connector for one dependency edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPath {
    /// Predecessor task.
    pub from: TaskId,
    /// Successor task.
    pub to: TaskId,
    /// Both endpoints flagged critical; drives line weight and color.
    pub critical: bool,
    /// Right-center anchor of the predecessor glyph.
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    /// Left-center anchor of the successor glyph.
    pub end: Point,
}

/// Complete layout for a dependency network diagram.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkLayout {
    pub nodes: Vec<NodePlacement>,
    pub connectors: Vec<ConnectorPath>,
    /// Bounding width of the laid-out content.
    pub width: f64,
    /// Bounding height of the laid-out content.
    pub height: f64,
}

impl NetworkLayout {
    /// Look up a node placement by task id.
    pub fn node(&self, id: &TaskId) -> Option<&NodePlacement> {
        self.nodes.iter().find(|n| &n.task_id == id)
    }
}

/// Compute the full network diagram layout for a task list.
///
/// Pure function over its inputs: builds the dependency graph, assigns
/// levels, places nodes on the centered grid, and emits one bezier
/// connector per dependency edge. An empty task list yields an empty
/// layout.
///
/// # Errors
///
/// Propagates graph validation failures and, under
/// [`CyclePolicy::Reject`], cycle detection.
pub fn layout_network(
    tasks: &[Task],
    config: &LayoutConfig,
    policy: CyclePolicy,
) -> DiagramResult<NetworkLayout> {
    if tasks.is_empty() {
        return Ok(NetworkLayout::default());
    }

    let graph = DependencyGraph::from_tasks(tasks)?;
    let levels = graph.assign_levels(policy)?;

    tracing::debug!(
        tasks = tasks.len(),
        edges = graph.edge_count(),
        "computing network diagram layout"
    );

    // Bucket tasks into ordered columns, preserving input order per row.
    let max_level = levels.values().copied().max().unwrap_or(0);
    let mut columns: Vec<Vec<&Task>> = vec![Vec::new(); max_level + 1];
    for task in tasks {
        let level = levels.get(&task.id).copied().unwrap_or(0);
        columns[level].push(task);
    }

    let max_rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let total_height = max_rows as f64 * config.row_pitch;

    let mut nodes = Vec::with_capacity(tasks.len());
    for (level, column) in columns.iter().enumerate() {
        // Center this column's block against the tallest column.
        let block_offset = (total_height - column.len() as f64 * config.row_pitch) / 2.0;
        for (row, task) in column.iter().enumerate() {
            let glyph = if task.is_milestone() {
                GlyphKind::Milestone
            } else {
                GlyphKind::Task
            };
            nodes.push(NodePlacement {
                task_id: task.id.clone(),
                level,
                x: level as f64 * config.column_spacing + NODE_HALF_WIDTH,
                y: block_offset + (row as f64 + 0.5) * config.row_pitch,
                glyph,
                critical: task.critical,
            });
        }
    }

    let by_id: HashMap<&TaskId, &NodePlacement> =
        nodes.iter().map(|n| (&n.task_id, n)).collect();

    let mut connectors = Vec::new();
    for task in tasks {
        for dep in &task.dependencies {
            let (Some(from), Some(to)) = (by_id.get(&dep.predecessor), by_id.get(&task.id))
            else {
                // from_tasks already validated the edge; placements exist.
                continue;
            };
            connectors.push(connector(from, to));
        }
    }

    Ok(NetworkLayout {
        width: max_level as f64 * config.column_spacing + 2.0 * NODE_HALF_WIDTH,
        height: total_height,
        nodes,
        connectors,
    })
}

/// Build the bezier connector between two placed nodes.
///
/// Anchors sit at the predecessor's right-center and the successor's
/// left-center, with milestone glyphs using their smaller half-extent.
/// Control points extend horizontally so the curve leaves and enters
/// flat.
fn connector(from: &NodePlacement, to: &NodePlacement) -> ConnectorPath {
    let start = (from.x + from.glyph.half_width(), from.y);
    let end = (to.x - to.glyph.half_width(), to.y);

    let reach = ((end.0 - start.0) * 0.5).max(40.0);

    ConnectorPath {
        from: from.task_id.clone(),
        to: to.task_id.clone(),
        critical: from.critical && to.critical,
        start,
        control1: (start.0 + reach, start.1),
        control2: (end.0 - reach, end.1),
        end,
    }
}
