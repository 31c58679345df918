//! Data models for Glossmap

pub mod article;
pub mod flow;
pub mod mindmap;

pub use article::{AnnotatedArticle, Article, DefinitionMap, HardWordPair, LookupResult};
pub use flow::{Direction, FlowEdge, FlowGraph, FlowNode, NodeRole, NodeSize, Point};
pub use mindmap::MindTreeNode;
