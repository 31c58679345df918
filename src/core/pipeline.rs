//! Pipeline runs with stale-result suppression
//!
//! Each run snapshots its own article or tree; nothing is shared between
//! runs except the [`RunRegistry`], which tracks the newest run per
//! source key. A run checks its token after every backend call and
//! reports [`RunOutcome::Superseded`] instead of applying results that a
//! newer run for the same key has made stale.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::backend::Backend;
use crate::core::annotate::annotate;
use crate::core::error::PipelineError;
use crate::core::extract::extract;
use crate::core::flatten::flatten;
use crate::core::layout::layout;
use crate::core::lookup::lookup_definitions;
use crate::core::models::{AnnotatedArticle, Direction, FlowGraph};

/// Tracks the newest run generation per source key
#[derive(Debug, Default)]
pub struct RunRegistry {
    generations: Mutex<HashMap<String, u64>>,
}

impl RunRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run for `key`, invalidating every earlier token
    /// issued for the same key.
    pub fn begin(&self, key: &str) -> RunToken {
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = generations
            .entry(key.to_string())
            .and_modify(|g| *g += 1)
            .or_insert(1);
        RunToken {
            key: key.to_string(),
            generation: *generation,
        }
    }

    /// Whether `token` still belongs to the newest run for its key
    #[must_use]
    pub fn is_current(&self, token: &RunToken) -> bool {
        let generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        generations.get(&token.key) == Some(&token.generation)
    }
}

/// Proof of participation in one pipeline run
///
/// Issued by [`RunRegistry::begin`]; stops being current as soon as a
/// newer run starts for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunToken {
    key: String,
    generation: u64,
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The run finished and its output is current
    Completed(T),
    /// A newer run for the same key started; the output was discarded
    Superseded,
}

impl<T> RunOutcome<T> {
    /// Whether the run was overtaken by a newer one
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    /// The produced value, if the run completed
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

/// Fetches an article and annotates its hard words with definitions
pub struct AnnotatePipeline<'a> {
    backend: &'a dyn Backend,
    registry: &'a RunRegistry,
}

impl<'a> AnnotatePipeline<'a> {
    /// Create a pipeline talking to `backend`
    pub const fn new(backend: &'a dyn Backend, registry: &'a RunRegistry) -> Self {
        Self { backend, registry }
    }

    /// Run the full annotation pipeline for an article URL.
    ///
    /// Fetch failures surface as errors. A definition lookup failure is
    /// recovered locally: the run still completes, carrying the original
    /// body with `annotated = false`, because readability must not break
    /// when enrichment does.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Backend`] when the article fetch fails
    /// and [`PipelineError::Markup`] when the body cannot be parsed.
    pub fn run(&self, url: &str) -> Result<RunOutcome<AnnotatedArticle>, PipelineError> {
        let token = self.registry.begin(url);
        logger::info!("Annotating article from {url}");

        let article = self.backend.fetch_article(url)?;
        if !self.registry.is_current(&token) {
            logger::debug!("Dropping fetched article for {url}: run superseded");
            return Ok(RunOutcome::Superseded);
        }

        let pairs = extract(&article.raw_html)?;
        let definitions = match lookup_definitions(self.backend, &pairs) {
            Ok(map) => map,
            Err(err) => {
                logger::warn!("Definition lookup failed, keeping article unannotated: {err}");
                return Ok(RunOutcome::Completed(AnnotatedArticle::unannotated(
                    &article,
                )));
            }
        };
        if !self.registry.is_current(&token) {
            logger::debug!("Dropping looked-up definitions for {url}: run superseded");
            return Ok(RunOutcome::Superseded);
        }

        let html = annotate(&article.raw_html, &definitions)?;
        Ok(RunOutcome::Completed(AnnotatedArticle::annotated(
            &article,
            html,
            pairs.len(),
        )))
    }
}

/// Fetches an article's mindmap and lays it out as a flow graph
pub struct MindmapPipeline<'a> {
    backend: &'a dyn Backend,
    registry: &'a RunRegistry,
}

impl<'a> MindmapPipeline<'a> {
    /// Create a pipeline talking to `backend`
    pub const fn new(backend: &'a dyn Backend, registry: &'a RunRegistry) -> Self {
        Self { backend, registry }
    }

    /// Fetch, flatten and lay out the mindmap for an article id.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Backend`] when the tree fetch fails,
    /// [`PipelineError::Flatten`] for an over-deep tree and
    /// [`PipelineError::Layout`] if the flattened graph is inconsistent.
    pub fn run(
        &self,
        article_id: &str,
        direction: Direction,
    ) -> Result<RunOutcome<FlowGraph>, PipelineError> {
        let token = self.registry.begin(article_id);
        logger::info!("Building mindmap flow graph for article {article_id}");

        let tree = self.backend.fetch_mindmap(article_id)?;
        if !self.registry.is_current(&token) {
            logger::debug!("Dropping fetched mindmap for {article_id}: run superseded");
            return Ok(RunOutcome::Superseded);
        }

        let mut graph = flatten(&tree)?;
        layout(&mut graph, direction)?;
        Ok(RunOutcome::Completed(graph))
    }
}
