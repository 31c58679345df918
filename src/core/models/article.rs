//! Article content and hard-word lookup models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Map from word identifier to definition text.
///
/// Contains an entry only for words whose lookup produced usable text;
/// words with no definition are simply absent.
pub type DefinitionMap = HashMap<String, String>;

/// A hard-word occurrence, keyed by the sentence it appears in and the
/// word identifier assigned by the backend.
///
/// Two markers with the same `(sentence_id, word_id)` are the same
/// occurrence for lookup purposes; repeats of a word in different
/// sentences are distinct pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardWordPair {
    /// Identifier of the enclosing sentence container
    pub sentence_id: String,
    /// Identifier of the marked word
    pub word_id: String,
}

impl HardWordPair {
    /// Create a new pair
    #[must_use]
    pub const fn new(sentence_id: String, word_id: String) -> Self {
        Self {
            sentence_id,
            word_id,
        }
    }

    /// Composite de-duplication key in `sentenceId:wordId` form
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.sentence_id, self.word_id)
    }
}

/// One definition lookup outcome for a word identifier
///
/// `text` is `None` when the backend has no definition for the word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Identifier of the looked-up word
    pub word_id: String,
    /// Definition text, absent when the word is unknown
    pub text: Option<String>,
}

/// A fetched article as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article title
    pub title: String,
    /// Author line
    pub author: String,
    /// BCP 47 language tag of the article body
    pub lang: String,
    /// Sentence- and word-segmented HTML body
    pub raw_html: String,
}

/// The output of the annotation pipeline
///
/// Wraps the article metadata together with the (possibly annotated)
/// body. When the definition lookup fails the pipeline degrades to the
/// original body and marks `annotated = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedArticle {
    /// Article title
    pub title: String,
    /// Author line
    pub author: String,
    /// Language tag
    pub lang: String,
    /// Article body HTML, with ruby annotations when `annotated` is true
    pub html: String,
    /// Number of hard-word pairs sent to lookup
    pub gloss_count: usize,
    /// False when the pipeline fell back to the unannotated body
    pub annotated: bool,
}

impl AnnotatedArticle {
    /// Build an annotated result from a fetched article and rewritten body
    #[must_use]
    pub fn annotated(article: &Article, html: String, gloss_count: usize) -> Self {
        Self {
            title: article.title.clone(),
            author: article.author.clone(),
            lang: article.lang.clone(),
            html,
            gloss_count,
            annotated: true,
        }
    }

    /// Build a fallback result carrying the original body unchanged
    #[must_use]
    pub fn unannotated(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            author: article.author.clone(),
            lang: article.lang.clone(),
            html: article.raw_html.clone(),
            gloss_count: 0,
            annotated: false,
        }
    }
}
