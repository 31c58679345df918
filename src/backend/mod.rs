//! Backend service interface
//!
//! The companion backend fetches articles, defines words, and serves
//! mindmap trees. The pipelines depend only on the [`Backend`] trait so
//! tests can substitute a scripted double; [`HttpBackend`] is the wire
//! implementation.

pub mod http;

pub use http::HttpBackend;

use serde::{Deserialize, Serialize};

use crate::core::error::BackendError;
use crate::core::models::{Article, HardWordPair, LookupResult, MindTreeNode};

/// The collaborator calls the pipelines suspend on
pub trait Backend {
    /// Fetch an article by source URL
    ///
    /// # Errors
    /// Returns [`BackendError`] when the article cannot be retrieved.
    fn fetch_article(&self, url: &str) -> Result<Article, BackendError>;

    /// Look up definitions for a batch of hard-word pairs in one request
    ///
    /// Results may come back in any order and are matched by word id;
    /// unknown words carry no text.
    ///
    /// # Errors
    /// Returns [`BackendError`] when the batch request fails as a whole.
    fn lookup_words(&self, pairs: &[HardWordPair]) -> Result<Vec<LookupResult>, BackendError>;

    /// Fetch the mindmap topic tree for an article
    ///
    /// # Errors
    /// Returns [`BackendError`] when the tree cannot be retrieved.
    fn fetch_mindmap(&self, article_id: &str) -> Result<MindTreeNode, BackendError>;
}

/// Request body for `POST /article/fetch`
#[derive(Debug, Serialize)]
pub struct FetchArticleRequest<'a> {
    /// Source URL of the article
    pub url: &'a str,
}

/// Request body for `POST /mindmap`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMindmapRequest<'a> {
    /// Backend article identifier
    pub article_id: &'a str,
}

/// Response body of `POST /mindmap`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapResponse {
    /// Backend article identifier
    pub article_id: String,
    /// Root of the topic tree
    pub data: MindTreeNode,
}
