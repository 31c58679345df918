//! Annotation merging
//!
//! Re-walks an article body and wraps every qualifying hard-word marker in
//! a ruby annotation carrying its definition caption. Everything else in
//! the document passes through byte-preserved.

use std::collections::{HashMap, HashSet};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::error::MarkupError;
use crate::core::markup;
use crate::core::models::DefinitionMap;

/// Element wrapped around an annotated marker
const ANNOTATION_TAG: &str = "ruby";
/// Element carrying the caption inside the annotation
const CAPTION_TAG: &str = "rt";
/// Caption used when a word has no definition
const FALLBACK_CAPTION: &str = "not found";

/// Rewrite an article body, wrapping qualifying hard-word markers in
/// `<ruby>` with an `<rt>` caption.
///
/// A marker qualifies under exactly the same rules the extractor uses
/// (word id, sentence ancestor, meaningful text); every qualifying
/// occurrence is wrapped, including repeats of the same pair. The caption
/// is the definition for the marker's word id, or the literal
/// `"not found"` when the map has none. Non-qualifying markers and all
/// surrounding content are emitted unchanged, so the rewrite is additive
/// and deterministic.
///
/// # Errors
/// Returns [`MarkupError`] when the markup cannot be parsed or rewritten.
pub fn annotate(html: &str, definitions: &DefinitionMap) -> Result<String, MarkupError> {
    let scan = markup::scan(html)?;

    // Wrap decisions keyed by event index. A close index can carry several
    // captions when malformed nesting forces markers to share an end tag.
    let mut opens: HashSet<usize> = HashSet::new();
    let mut closes: HashMap<usize, Vec<String>> = HashMap::new();
    let mut wrapped = 0usize;

    for marker in &scan.markers {
        if !marker.qualifies() {
            continue;
        }
        let (Some(word_id), Some(end)) = (&marker.word_id, marker.end_event) else {
            continue;
        };
        let caption = definitions
            .get(word_id)
            .map_or(FALLBACK_CAPTION, String::as_str)
            .to_string();
        opens.insert(marker.start_event);
        closes.entry(end).or_default().push(caption);
        wrapped += 1;
    }

    let mut writer = Writer::new(Vec::new());
    for (idx, event) in scan.events.iter().enumerate() {
        if opens.contains(&idx) {
            writer.write_event(Event::Start(BytesStart::new(ANNOTATION_TAG)))?;
        }
        writer.write_event(event.clone())?;
        if let Some(captions) = closes.get(&idx) {
            // Innermost marker closes first to keep the wraps nested.
            for caption in captions.iter().rev() {
                writer.write_event(Event::Start(BytesStart::new(CAPTION_TAG)))?;
                writer.write_event(Event::Text(BytesText::new(caption)))?;
                writer.write_event(Event::End(BytesEnd::new(CAPTION_TAG)))?;
                writer.write_event(Event::End(BytesEnd::new(ANNOTATION_TAG)))?;
            }
        }
    }

    logger::debug!("Annotated {wrapped} hard-word markers");

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
