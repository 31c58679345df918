//! Flow graph exporters
//!
//! Serializes a laid-out flow graph either as JSON (positions included,
//! for downstream viewers) or as Mermaid flowchart syntax that Markdown
//! viewers render directly.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use crate::core::models::{Direction, FlowGraph};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON with node positions
    Json,
    /// Mermaid flowchart syntax
    Mermaid,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Mermaid => "mmd",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Mermaid => write!(f, "mermaid"),
        }
    }
}

/// Serialize a flow graph as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(graph: &FlowGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(graph)
}

/// Generate Mermaid flowchart syntax for a flow graph.
///
/// Node ids are emitted as-is (the flattener only produces alphanumeric
/// ids); labels are quoted and escaped.
#[must_use]
pub fn to_mermaid(graph: &FlowGraph, direction: Direction) -> String {
    let header = match direction {
        Direction::LeftToRight => "LR",
        Direction::TopToBottom => "TB",
    };
    let mut output = format!("flowchart {header}\n");

    for node in &graph.nodes {
        let label = escape_label(&node.label);
        let _ = writeln!(output, "    {}[\"{label}\"]", node.id);
    }

    output.push('\n');

    for edge in &graph.edges {
        let _ = writeln!(output, "    {} --> {}", edge.source, edge.target);
    }

    output
}

/// Escape a label for use inside a quoted Mermaid node
fn escape_label(label: &str) -> String {
    label
        .replace('"', "&quot;")
        .replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flatten::flatten;
    use crate::core::models::MindTreeNode;

    fn sample_graph() -> FlowGraph {
        let tree = MindTreeNode::branch(
            "root".to_string(),
            vec![
                MindTreeNode::leaf("first".to_string()),
                MindTreeNode::leaf("second".to_string()),
            ],
        );
        flatten(&tree).unwrap()
    }

    #[test]
    fn test_mermaid_lists_nodes_and_edges() {
        let diagram = to_mermaid(&sample_graph(), Direction::LeftToRight);

        assert!(diagram.starts_with("flowchart LR\n"));
        assert!(diagram.contains("n1[\"root\"]"));
        assert!(diagram.contains("n2[\"first\"]"));
        assert!(diagram.contains("n3[\"second\"]"));
        assert!(diagram.contains("n1 --> n2"));
        assert!(diagram.contains("n1 --> n3"));
    }

    #[test]
    fn test_mermaid_top_to_bottom_header() {
        let diagram = to_mermaid(&sample_graph(), Direction::TopToBottom);
        assert!(diagram.starts_with("flowchart TB\n"));
    }

    #[test]
    fn test_mermaid_escapes_quotes_in_labels() {
        let tree = MindTreeNode::leaf(r#"say "hi""#.to_string());
        let graph = flatten(&tree).unwrap();
        let diagram = to_mermaid(&graph, Direction::LeftToRight);
        assert!(diagram.contains(r#"n1["say &quot;hi&quot;"]"#));
    }

    #[test]
    fn test_json_keeps_camel_case_wire_shape() {
        let json = to_json(&sample_graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"][0]["id"], "n1");
        assert_eq!(value["nodes"][0]["role"], "root");
        assert!(value["nodes"][0]["position"]["x"].is_number());
        assert_eq!(value["edges"][0]["source"], "n1");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(
            ExportFormat::from_str("Mermaid").unwrap(),
            ExportFormat::Mermaid
        );
        assert_eq!(ExportFormat::from_str("mmd").unwrap(), ExportFormat::Mermaid);
        assert!(ExportFormat::from_str("svg").is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Mermaid.extension(), "mmd");
    }
}
