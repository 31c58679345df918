//! Mindmap tree flattening
//!
//! Converts a rooted topic tree into a flow graph: one node per tree node
//! in depth-first preorder, one edge per parent-child relation, with fresh
//! sequential identifiers.

use crate::core::error::FlattenError;
use crate::core::models::{FlowEdge, FlowGraph, FlowNode, MindTreeNode, NodeRole, NodeSize, Point};

/// Deepest tree the flattener accepts. Mindmaps come from a remote
/// service, so a runaway depth is treated as hostile input rather than
/// recursed into.
pub const MAX_TREE_DEPTH: usize = 64;

/// Flatten a mindmap tree into a flow graph.
///
/// Nodes are visited in depth-first preorder with children in their
/// original order; ids are assigned sequentially (`n1`, `n2`, ... and
/// `e1`, `e2`, ...) in visit order, so the same tree always yields the
/// same graph. The traversal root gets [`NodeRole::Root`] even when it
/// has no children; other nodes are [`NodeRole::Leaf`] or
/// [`NodeRole::Internal`] by child count. Labels carry the source text
/// verbatim.
///
/// # Errors
/// Returns [`FlattenError::TreeTooDeep`] when the tree nests beyond
/// [`MAX_TREE_DEPTH`] levels.
pub fn flatten(root: &MindTreeNode) -> Result<FlowGraph, FlattenError> {
    let mut graph = FlowGraph::new();
    visit(root, None, 0, &mut graph)?;
    logger::debug!(
        "Flattened mindmap into {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn visit(
    node: &MindTreeNode,
    parent_id: Option<&str>,
    depth: usize,
    graph: &mut FlowGraph,
) -> Result<(), FlattenError> {
    if depth >= MAX_TREE_DEPTH {
        return Err(FlattenError::TreeTooDeep {
            max_depth: MAX_TREE_DEPTH,
        });
    }

    let id = format!("n{}", graph.node_count() + 1);
    let role = if parent_id.is_none() {
        NodeRole::Root
    } else if node.children.is_empty() {
        NodeRole::Leaf
    } else {
        NodeRole::Internal
    };

    graph.nodes.push(FlowNode {
        id: id.clone(),
        role,
        label: node.text.clone(),
        size: NodeSize::default(),
        position: Point::default(),
    });

    if let Some(parent) = parent_id {
        graph.edges.push(FlowEdge {
            id: format!("e{}", graph.edge_count() + 1),
            source: parent.to_string(),
            target: id.clone(),
        });
    }

    for child in &node.children {
        visit(child, Some(&id), depth + 1, graph)?;
    }

    Ok(())
}
