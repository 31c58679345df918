//! Blocking HTTP implementation of the backend interface

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{Backend, FetchArticleRequest, FetchMindmapRequest, MindmapResponse};
use crate::core::error::BackendError;
use crate::core::models::{Article, HardWordPair, LookupResult, MindTreeNode};
use crate::shared::config::BackendConfig;

/// Backend client speaking JSON over HTTP
///
/// All three collaborator calls are `POST` requests against a common base
/// URL; responses are decoded from camelCase JSON bodies.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpBackend {
    /// Create a client for the given base URL
    ///
    /// A trailing slash on `endpoint` is tolerated. When `timeout` is
    /// `None` requests wait indefinitely.
    ///
    /// # Errors
    /// Returns [`BackendError::Transport`] if the underlying client cannot
    /// be constructed.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[backend]` section of the configuration
    ///
    /// A `timeout_secs` of zero means no timeout.
    ///
    /// # Errors
    /// Returns [`BackendError::Transport`] if the underlying client cannot
    /// be constructed.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::new(&config.endpoint, timeout)
    }

    /// POST a JSON body to `path` and decode a JSON response
    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, path);
        logger::debug!("POST {url}");

        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(serde_json::from_reader(response)?)
    }
}

impl Backend for HttpBackend {
    fn fetch_article(&self, url: &str) -> Result<Article, BackendError> {
        self.post_json("/article/fetch", &FetchArticleRequest { url })
    }

    fn lookup_words(&self, pairs: &[HardWordPair]) -> Result<Vec<LookupResult>, BackendError> {
        self.post_json("/word/lookup", pairs)
    }

    fn fetch_mindmap(&self, article_id: &str) -> Result<MindTreeNode, BackendError> {
        let response: MindmapResponse =
            self.post_json("/mindmap", &FetchMindmapRequest { article_id })?;
        Ok(response.data)
    }
}
