//! Shared marker scanning over article markup
//!
//! The span extractor and the annotation merger walk the same event stream
//! and must agree byte-for-byte on which markers qualify. This module holds
//! the single scan pass they share.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::error::MarkupError;

/// Class token that marks a hard word
pub const MARKER_CLASS: &str = "hard-word";
/// Attribute carrying the word identifier on markers
pub const WORD_ID_ATTR: &str = "word-id";
/// Attribute carrying the sentence identifier on sentence containers
pub const SENT_ID_ATTR: &str = "sent-id";

/// HTML void elements: they never receive a closing tag
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta", b"param",
    b"source", b"track", b"wbr",
];

/// One hard-word marker occurrence found in the markup
#[derive(Debug, Clone)]
pub struct MarkerOccurrence {
    /// Value of the marker's `word-id` attribute, when present
    pub word_id: Option<String>,
    /// Identifier of the nearest enclosing sentence container, when found
    pub sentence_id: Option<String>,
    /// Whether the marker subtree contains non-whitespace text
    pub has_text: bool,
    /// Index of the event that opened the marker
    pub start_event: usize,
    /// Index of the event that closed the marker (`None` if never closed)
    pub end_event: Option<usize>,
}

impl MarkerOccurrence {
    /// A marker qualifies when it carries a word id, sits inside a sentence
    /// container, holds meaningful text, and was properly closed. Anything
    /// else is skipped silently by both pipeline stages.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.word_id.is_some()
            && self.sentence_id.is_some()
            && self.has_text
            && self.end_event.is_some()
    }
}

/// The event stream of a document plus every marker occurrence in it
pub struct MarkupScan<'a> {
    /// All events in document order
    pub events: Vec<Event<'a>>,
    /// Marker occurrences in document order
    pub markers: Vec<MarkerOccurrence>,
}

/// An element currently open during the scan
struct OpenElement {
    name: Vec<u8>,
    sent_id: Option<String>,
    marker: Option<usize>,
}

/// Walk the document once, collecting its events and every hard-word
/// marker occurrence together with the context the skip rules need.
///
/// The scan is lenient where real article markup is messy: HTML void
/// elements are treated as self-closing, mismatched end tags close
/// through to the nearest matching open element, and unknown entities
/// count as text content.
///
/// # Errors
/// Returns [`MarkupError::Parse`] if the markup is not structurally
/// parseable.
pub fn scan(html: &str) -> Result<MarkupScan<'_>, MarkupError> {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);

    let mut events = Vec::new();
    let mut markers: Vec<MarkerOccurrence> = Vec::new();
    let mut open: Vec<OpenElement> = Vec::new();

    loop {
        let event = reader.read_event()?;
        if matches!(event, Event::Eof) {
            break;
        }
        let idx = events.len();
        match &event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let sent_id = attr_value(e, SENT_ID_ATTR.as_bytes());
                let marker = if has_marker_class(e) {
                    markers.push(MarkerOccurrence {
                        word_id: attr_value(e, WORD_ID_ATTR.as_bytes()),
                        // closest() semantics: the marker itself wins over ancestors
                        sentence_id: sent_id.clone().or_else(|| nearest_sentence_id(&open)),
                        has_text: false,
                        start_event: idx,
                        end_event: None,
                    });
                    Some(markers.len() - 1)
                } else {
                    None
                };
                if VOID_ELEMENTS.contains(&name.as_slice()) {
                    // No closing tag will come; the element owns no subtree.
                    if let Some(m) = marker {
                        markers[m].end_event = Some(idx);
                    }
                } else {
                    open.push(OpenElement {
                        name,
                        sent_id,
                        marker,
                    });
                }
            }
            Event::Empty(e) => {
                if has_marker_class(e) {
                    let sent_id = attr_value(e, SENT_ID_ATTR.as_bytes());
                    markers.push(MarkerOccurrence {
                        word_id: attr_value(e, WORD_ID_ATTR.as_bytes()),
                        sentence_id: sent_id.or_else(|| nearest_sentence_id(&open)),
                        has_text: false,
                        start_event: idx,
                        end_event: Some(idx),
                    });
                }
            }
            Event::End(e) => {
                close_through(&mut open, &mut markers, e.name().as_ref(), idx);
            }
            Event::Text(t) => {
                let meaningful = match t.unescape() {
                    Ok(text) => !text.trim().is_empty(),
                    // Unknown entities still count as text content
                    Err(_) => !String::from_utf8_lossy(t).trim().is_empty(),
                };
                if meaningful {
                    mark_text_seen(&open, &mut markers);
                }
            }
            Event::CData(c) => {
                if !String::from_utf8_lossy(c).trim().is_empty() {
                    mark_text_seen(&open, &mut markers);
                }
            }
            _ => {}
        }
        events.push(event);
    }

    Ok(MarkupScan { events, markers })
}

/// Read a single attribute value off a start tag, skipping malformed
/// attributes the way the rest of the scan skips malformed markers.
fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

/// Whether the element's class attribute contains the hard-word token
fn has_marker_class(e: &BytesStart<'_>) -> bool {
    attr_value(e, b"class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == MARKER_CLASS))
}

/// Nearest enclosing sentence id, innermost open element first
fn nearest_sentence_id(open: &[OpenElement]) -> Option<String> {
    open.iter().rev().find_map(|el| el.sent_id.clone())
}

/// Record text content on every marker currently open
fn mark_text_seen(open: &[OpenElement], markers: &mut [MarkerOccurrence]) {
    for el in open {
        if let Some(m) = el.marker {
            markers[m].has_text = true;
        }
    }
}

/// Close open elements down to and including the one matching `name`.
///
/// Anything unclosed above the match is closed implicitly, and an end tag
/// with no matching open element is ignored.
fn close_through(
    open: &mut Vec<OpenElement>,
    markers: &mut [MarkerOccurrence],
    name: &[u8],
    idx: usize,
) {
    let Some(pos) = open.iter().rposition(|el| el.name == name) else {
        return;
    };
    while open.len() > pos {
        if let Some(el) = open.pop() {
            if let Some(m) = el.marker {
                markers[m].end_event = Some(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_marker_with_sentence_ancestor() {
        let html = r#"<p><span class="sent" sent-id="1">A <span class="word hard-word" word-id="7">word</span>.</span></p>"#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers.len(), 1);
        let m = &scan.markers[0];
        assert_eq!(m.word_id.as_deref(), Some("7"));
        assert_eq!(m.sentence_id.as_deref(), Some("1"));
        assert!(m.qualifies());
    }

    #[test]
    fn void_elements_do_not_desync_nesting() {
        let html = r#"<span sent-id="2">line<br>break <span class="hard-word" word-id="3">term</span></span>"#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers.len(), 1);
        assert_eq!(scan.markers[0].sentence_id.as_deref(), Some("2"));
        assert!(scan.markers[0].qualifies());
    }

    #[test]
    fn unclosed_marker_never_qualifies() {
        let html = r#"<span sent-id="1"><span class="hard-word" word-id="4">dangling"#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers.len(), 1);
        assert!(scan.markers[0].end_event.is_none());
        assert!(!scan.markers[0].qualifies());
    }

    #[test]
    fn marker_own_sent_id_wins_over_ancestor() {
        let html = r#"<span sent-id="1"><span class="hard-word" sent-id="9" word-id="4">w</span></span>"#;
        let scan = scan(html).unwrap();
        assert_eq!(scan.markers[0].sentence_id.as_deref(), Some("9"));
    }

    #[test]
    fn whitespace_only_marker_has_no_text() {
        let html = r#"<span sent-id="1"><span class="hard-word" word-id="4">   </span></span>"#;
        let scan = scan(html).unwrap();
        assert!(!scan.markers[0].has_text);
        assert!(!scan.markers[0].qualifies());
    }
}
