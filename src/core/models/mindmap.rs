//! Mindmap topic tree model

use serde::{Deserialize, Serialize};

/// One node of an article's mindmap topic tree
///
/// The backend serves the tree as nested `{ text, children }` objects;
/// leaves simply have an empty `children` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindTreeNode {
    /// Topic label
    pub text: String,
    /// Subtopics in display order
    #[serde(default)]
    pub children: Vec<MindTreeNode>,
}

impl MindTreeNode {
    /// Create a leaf node
    #[must_use]
    pub const fn leaf(text: String) -> Self {
        Self {
            text,
            children: Vec::new(),
        }
    }

    /// Create a node with children
    #[must_use]
    pub const fn branch(text: String, children: Vec<MindTreeNode>) -> Self {
        Self { text, children }
    }

    /// Total number of nodes in this subtree, including self
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MindTreeNode::node_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_counts_whole_subtree() {
        let tree = MindTreeNode::branch(
            "root".to_string(),
            vec![
                MindTreeNode::leaf("a".to_string()),
                MindTreeNode::branch(
                    "b".to_string(),
                    vec![MindTreeNode::leaf("b1".to_string())],
                ),
            ],
        );
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_deserializes_missing_children_as_empty() {
        let node: MindTreeNode = serde_json::from_str(r#"{"text":"leaf"}"#).unwrap();
        assert_eq!(node.text, "leaf");
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_deserializes_nested_tree() {
        let json = r#"{"text":"r","children":[{"text":"c","children":[]}]}"#;
        let node: MindTreeNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].text, "c");
    }
}
