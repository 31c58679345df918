//! Layered layout for flow graphs
//!
//! Fills in every node position of a [`FlowGraph`]. Rank (depth from the
//! root) advances along the primary axis; siblings spread along the
//! secondary axis. Each subtree occupies a contiguous secondary band and
//! every node is centered in its own band, so a parent sits midway
//! across its children and no two boxes overlap.

use std::collections::{HashMap, VecDeque};

use crate::core::error::LayoutError;
use crate::core::models::{Direction, FlowGraph, NodeSize, Point};

/// Default gap between consecutive ranks, in layout units
pub const DEFAULT_RANK_SPACING: f64 = 50.0;
/// Default gap between adjacent subtree bands, in layout units
pub const DEFAULT_NODE_SPACING: f64 = 50.0;

/// Spacing knobs for the layout engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Gap between consecutive ranks along the primary axis
    pub rank_spacing: f64,
    /// Gap between adjacent subtree bands along the secondary axis
    pub node_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_spacing: DEFAULT_RANK_SPACING,
            node_spacing: DEFAULT_NODE_SPACING,
        }
    }
}

/// Lay out `graph` with the default spacing.
///
/// # Errors
///
/// Returns [`LayoutError::DanglingEdge`] if an edge references a node id
/// that is not present in the graph.
pub fn layout(graph: &mut FlowGraph, direction: Direction) -> Result<(), LayoutError> {
    layout_with(graph, direction, &LayoutConfig::default())
}

/// Lay out `graph`, publishing a top-left corner position per node.
///
/// The engine reasons in centers and converts on the way out, so
/// `position + size / 2` is always the node's computed center. Identical
/// inputs produce bit-identical positions: node and edge order drive
/// every placement decision and no map is ever iterated.
///
/// # Errors
///
/// Returns [`LayoutError::DanglingEdge`] if an edge references a node id
/// that is not present in the graph.
pub fn layout_with(
    graph: &mut FlowGraph,
    direction: Direction,
    config: &LayoutConfig,
) -> Result<(), LayoutError> {
    if graph.nodes.is_empty() {
        return Ok(());
    }

    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();

    // Validate every endpoint before moving anything.
    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !index.contains_key(endpoint.as_str()) {
                return Err(LayoutError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }

    let node_count = graph.nodes.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut parent: Vec<Option<usize>> = vec![None; node_count];
    for edge in &graph.edges {
        let source = index[edge.source.as_str()];
        let target = index[edge.target.as_str()];
        // A tree gives each node exactly one parent; the first edge wins.
        if parent[target].is_none() && source != target {
            parent[target] = Some(source);
            children[source].push(target);
        }
    }

    // Breadth-first from the roots, children in edge order. Nodes
    // unreachable from a root keep their seeded positions.
    let mut rank = vec![0_usize; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut queue: VecDeque<usize> = parent
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(idx, _)| idx)
        .collect();
    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &child in &children[idx] {
            rank[child] = rank[idx] + 1;
            queue.push_back(child);
        }
    }

    let Some(max_rank) = order.iter().map(|&idx| rank[idx]).max() else {
        return Ok(());
    };

    // Primary axis: every rank is as wide as its widest node and the
    // offsets accumulate rank extent plus spacing.
    let mut rank_extent = vec![0.0_f64; max_rank + 1];
    for &idx in &order {
        let extent = primary_extent(graph.nodes[idx].size, direction);
        if extent > rank_extent[rank[idx]] {
            rank_extent[rank[idx]] = extent;
        }
    }
    let mut rank_offset = vec![0.0_f64; max_rank + 1];
    let mut cursor = 0.0;
    for (offset, extent) in rank_offset.iter_mut().zip(&rank_extent) {
        *offset = cursor;
        cursor += extent + config.rank_spacing;
    }

    // Secondary axis: a subtree's band covers its own extent or the sum
    // of its child bands, whichever is larger. Children before parents.
    let mut band = vec![0.0_f64; node_count];
    for &idx in order.iter().rev() {
        let own = secondary_extent(graph.nodes[idx].size, direction);
        band[idx] = own.max(child_spread(&children[idx], &band, config));
    }

    let mut band_start = vec![0.0_f64; node_count];
    let mut root_cursor = 0.0;
    for (idx, p) in parent.iter().enumerate() {
        if p.is_none() {
            band_start[idx] = root_cursor;
            root_cursor += band[idx] + config.node_spacing;
        }
    }

    // Parents before children: center the child block inside the parent
    // band, then center each node in its own band and publish corners.
    for &idx in &order {
        let spread = child_spread(&children[idx], &band, config);
        let mut child_cursor = band_start[idx] + (band[idx] - spread) / 2.0;
        for &child in &children[idx] {
            band_start[child] = child_cursor;
            child_cursor += band[child] + config.node_spacing;
        }

        let primary_center = rank_offset[rank[idx]] + rank_extent[rank[idx]] / 2.0;
        let secondary_center = band_start[idx] + band[idx] / 2.0;
        let node = &mut graph.nodes[idx];
        let (x, y) = match direction {
            Direction::LeftToRight => (primary_center, secondary_center),
            Direction::TopToBottom => (secondary_center, primary_center),
        };
        node.position = Point {
            x: x - node.size.width / 2.0,
            y: y - node.size.height / 2.0,
        };
    }

    logger::debug!(
        "Laid out {} nodes across {} ranks ({direction})",
        graph.node_count(),
        max_rank + 1
    );

    Ok(())
}

const fn primary_extent(size: NodeSize, direction: Direction) -> f64 {
    match direction {
        Direction::LeftToRight => size.width,
        Direction::TopToBottom => size.height,
    }
}

const fn secondary_extent(size: NodeSize, direction: Direction) -> f64 {
    match direction {
        Direction::LeftToRight => size.height,
        Direction::TopToBottom => size.width,
    }
}

fn child_spread(children: &[usize], band: &[f64], config: &LayoutConfig) -> f64 {
    let mut spread = 0.0;
    for (pos, &child) in children.iter().enumerate() {
        if pos > 0 {
            spread += config.node_spacing;
        }
        spread += band[child];
    }
    spread
}
