//! Flow graph model produced from mindmap trees

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default node width in layout units, used when no measured size is known
pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
/// Default node height in layout units, used when no measured size is known
pub const DEFAULT_NODE_HEIGHT: f64 = 40.0;

/// Structural role of a node within the flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// The traversal root (takes precedence over `Leaf` for a single-node tree)
    Root,
    /// A node without children
    Leaf,
    /// Any other node
    Internal,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Leaf => write!(f, "leaf"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Flow direction for the layered layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks advance along the horizontal axis
    #[default]
    LeftToRight,
    /// Ranks advance along the vertical axis
    TopToBottom,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-to-right" => Ok(Self::LeftToRight),
            "tb" | "top-to-bottom" => Ok(Self::TopToBottom),
            _ => Err(format!(
                "Unknown direction: '{s}'. Supported directions: lr, tb"
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftToRight => write!(f, "lr"),
            Self::TopToBottom => write!(f, "tb"),
        }
    }
}

/// Node extent in layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Default for NodeSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

/// A 2D position in layout units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// One node of the flow graph
///
/// `position` is the top-left corner of the node box; the node's center
/// is therefore `position + size / 2`. Positions are all zero until the
/// layout engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Graph-unique identifier assigned at flatten time
    pub id: String,
    /// Structural role
    pub role: NodeRole,
    /// Display label, verbatim from the source tree
    pub label: String,
    /// Node extent used by the layout engine
    pub size: NodeSize,
    /// Top-left corner assigned by the layout engine
    pub position: Point,
}

/// A directed parent-to-child edge of the flow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    /// Graph-unique identifier assigned at flatten time
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
}

/// A flow graph: nodes and edges in discovery order
///
/// Produced by flattening a mindmap tree. The node list is in
/// depth-first preorder and every edge points from a parent to one of
/// its children, so the graph is acyclic with `nodes.len() - 1` edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Nodes in discovery order
    pub nodes: Vec<FlowNode>,
    /// Edges in emission order
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Create an empty graph
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Number of nodes
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!(Direction::from_str("lr").unwrap(), Direction::LeftToRight);
        assert_eq!(Direction::from_str("TB").unwrap(), Direction::TopToBottom);
        assert_eq!(
            Direction::from_str("left-to-right").unwrap(),
            Direction::LeftToRight
        );
        assert!(Direction::from_str("diagonal").is_err());
    }

    #[test]
    fn test_direction_display_round_trip() {
        for dir in [Direction::LeftToRight, Direction::TopToBottom] {
            let parsed = Direction::from_str(&dir.to_string()).unwrap();
            assert_eq!(parsed, dir);
        }
    }

    #[test]
    fn test_default_size_matches_viewer_defaults() {
        let size = NodeSize::default();
        assert!((size.width - 180.0).abs() < f64::EPSILON);
        assert!((size.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_node_role_serializes_lowercase() {
        let json = serde_json::to_string(&NodeRole::Internal).unwrap();
        assert_eq!(json, r#""internal""#);
    }

    #[test]
    fn test_find_node() {
        let graph = FlowGraph {
            nodes: vec![FlowNode {
                id: "n1".to_string(),
                role: NodeRole::Root,
                label: "only".to_string(),
                size: NodeSize::default(),
                position: Point::default(),
            }],
            edges: Vec::new(),
        };
        assert!(graph.find_node("n1").is_some());
        assert!(graph.find_node("n2").is_none());
    }
}
