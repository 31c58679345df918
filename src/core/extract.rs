//! Hard-word span extraction
//!
//! Walks an article body and collects every qualifying hard-word marker as
//! a `(sentence id, word id)` pair, in document order, de-duplicated on
//! first occurrence.

use std::collections::HashSet;

use crate::core::error::MarkupError;
use crate::core::markup;
use crate::core::models::HardWordPair;

/// Extract the ordered, de-duplicated hard-word pairs of an article body.
///
/// Markers are elements whose `class` contains the `hard-word` token. A
/// marker only yields a pair when it carries a `word-id` attribute, sits
/// inside an element carrying a `sent-id` attribute, and contains
/// non-whitespace text; anything else is skipped without diagnostics.
/// Repeats of the same `sentenceId:wordId` key keep the first occurrence.
///
/// # Errors
/// Returns [`MarkupError`] only when the markup itself cannot be parsed;
/// skipped markers are not errors.
pub fn extract(html: &str) -> Result<Vec<HardWordPair>, MarkupError> {
    let scan = markup::scan(html)?;

    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    let mut skipped = 0usize;

    for marker in &scan.markers {
        if !marker.qualifies() {
            skipped += 1;
            continue;
        }
        let (Some(sentence_id), Some(word_id)) =
            (marker.sentence_id.clone(), marker.word_id.clone())
        else {
            continue;
        };
        let pair = HardWordPair::new(sentence_id, word_id);
        if seen.insert(pair.key()) {
            pairs.push(pair);
        }
    }

    if skipped > 0 {
        logger::debug!("Skipped {skipped} hard-word markers missing ids or text");
    }
    logger::debug!("Extracted {} unique hard-word pairs", pairs.len());

    Ok(pairs)
}
