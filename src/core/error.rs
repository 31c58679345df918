//! Error types for the annotation and layout pipelines

use thiserror::Error;

/// Errors from talking to the companion backend service
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status
    #[error("backend returned status {status} for {endpoint}")]
    Status {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body did not match the expected schema
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors from reading or rewriting article markup
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The article body is not parseable markup
    #[error("malformed article markup: {0}")]
    Parse(#[from] quick_xml::Error),
}

/// Errors from flattening a mindmap tree
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The tree nests deeper than the supported bound
    #[error("mindmap tree exceeds maximum depth of {max_depth} levels")]
    TreeTooDeep {
        /// The enforced depth bound
        max_depth: usize,
    },
}

/// Errors from the layered layout engine
#[derive(Debug, Error)]
pub enum LayoutError {
    /// An edge references a node id that is not in the graph
    #[error("edge '{edge_id}' references unknown node '{node_id}'")]
    DanglingEdge {
        /// Id of the offending edge
        edge_id: String,
        /// The node id that could not be resolved
        node_id: String,
    },
}

/// Top-level pipeline error, unifying the stage errors for callers
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Backend communication failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Article markup could not be processed
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// Mindmap tree could not be flattened
    #[error(transparent)]
    Flatten(#[from] FlattenError),

    /// Flow graph layout failed
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Rendered output could not be produced
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}
