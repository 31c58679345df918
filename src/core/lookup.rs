//! Batched definition lookup

use crate::backend::Backend;
use crate::core::error::BackendError;
use crate::core::models::{DefinitionMap, HardWordPair, LookupResult};

/// Resolve definitions for a batch of hard-word pairs.
///
/// Issues exactly one backend call for the whole batch; an empty batch
/// short-circuits to an empty map without calling out at all. The result
/// map contains only words the backend returned usable text for.
///
/// # Errors
/// Propagates [`BackendError`] from the batch call; the caller decides
/// whether to fail open.
pub fn lookup_definitions(
    backend: &dyn Backend,
    pairs: &[HardWordPair],
) -> Result<DefinitionMap, BackendError> {
    if pairs.is_empty() {
        logger::debug!("No hard-word pairs; skipping definition lookup");
        return Ok(DefinitionMap::new());
    }

    let results = backend.lookup_words(pairs)?;
    let map = to_definition_map(results);
    logger::debug!(
        "Definition lookup produced {} captions for {} pairs",
        map.len(),
        pairs.len()
    );
    Ok(map)
}

/// Reduce raw lookup results to a word-id to definition-text map.
///
/// Entries with absent or empty text are dropped, so the map's contract
/// holds: every entry is a usable caption.
#[must_use]
pub fn to_definition_map(results: Vec<LookupResult>) -> DefinitionMap {
    results
        .into_iter()
        .filter_map(|r| match r.text {
            Some(text) if !text.is_empty() => Some((r.word_id, text)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Article, MindTreeNode};
    use std::cell::Cell;

    /// Scripted backend double counting lookup calls
    struct CountingBackend {
        calls: Cell<usize>,
        results: Vec<LookupResult>,
    }

    impl CountingBackend {
        fn returning(results: Vec<LookupResult>) -> Self {
            Self {
                calls: Cell::new(0),
                results,
            }
        }
    }

    impl Backend for CountingBackend {
        fn fetch_article(&self, _url: &str) -> Result<Article, BackendError> {
            unreachable!("lookup tests never fetch articles")
        }

        fn lookup_words(
            &self,
            _pairs: &[HardWordPair],
        ) -> Result<Vec<LookupResult>, BackendError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.results.clone())
        }

        fn fetch_mindmap(&self, _article_id: &str) -> Result<MindTreeNode, BackendError> {
            unreachable!("lookup tests never fetch mindmaps")
        }
    }

    fn pair(sentence_id: &str, word_id: &str) -> HardWordPair {
        HardWordPair::new(sentence_id.to_string(), word_id.to_string())
    }

    fn result(word_id: &str, text: Option<&str>) -> LookupResult {
        LookupResult {
            word_id: word_id.to_string(),
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn empty_batch_skips_the_backend_call() {
        let backend = CountingBackend::returning(vec![]);
        let map = lookup_definitions(&backend, &[]).unwrap();
        assert!(map.is_empty());
        assert_eq!(backend.calls.get(), 0, "empty batch must not call out");
    }

    #[test]
    fn batch_issues_exactly_one_call() {
        let backend = CountingBackend::returning(vec![
            result("1", Some("first")),
            result("2", Some("second")),
        ]);
        let pairs = vec![pair("1", "1"), pair("1", "2"), pair("2", "1")];
        let map = lookup_definitions(&backend, &pairs).unwrap();
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn absent_and_empty_text_are_excluded() {
        let results = vec![
            result("1", Some("kept")),
            result("2", None),
            result("3", Some("")),
        ];
        let map = to_definition_map(results);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("1").map(String::as_str), Some("kept"));
        assert!(!map.contains_key("2"));
        assert!(!map.contains_key("3"));
    }

    #[test]
    fn lookup_errors_propagate() {
        struct FailingBackend;
        impl Backend for FailingBackend {
            fn fetch_article(&self, _url: &str) -> Result<Article, BackendError> {
                unreachable!()
            }
            fn lookup_words(
                &self,
                _pairs: &[HardWordPair],
            ) -> Result<Vec<LookupResult>, BackendError> {
                Err(BackendError::Status {
                    endpoint: "/word/lookup".to_string(),
                    status: 503,
                })
            }
            fn fetch_mindmap(&self, _article_id: &str) -> Result<MindTreeNode, BackendError> {
                unreachable!()
            }
        }

        let err = lookup_definitions(&FailingBackend, &[pair("1", "1")]).unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 503, .. }));
    }
}
