//! Integration tests for the article annotation pipeline

use std::cell::{Cell, RefCell};

use glossmap::backend::Backend;
use glossmap::core::error::BackendError;
use glossmap::core::models::{Article, HardWordPair, LookupResult, MindTreeNode};
use glossmap::core::pipeline::{AnnotatePipeline, RunRegistry};
use glossmap::core::render::render_page;

/// Backend double that serves a fixed article and records lookup batches
struct RecordingBackend {
    article: Article,
    results: Vec<LookupResult>,
    lookup_calls: Cell<usize>,
    last_batch: RefCell<Vec<HardWordPair>>,
    fail_lookup: bool,
}

impl RecordingBackend {
    fn new(article: Article, results: Vec<LookupResult>) -> Self {
        Self {
            article,
            results,
            lookup_calls: Cell::new(0),
            last_batch: RefCell::new(Vec::new()),
            fail_lookup: false,
        }
    }
}

impl Backend for RecordingBackend {
    fn fetch_article(&self, _url: &str) -> Result<Article, BackendError> {
        Ok(self.article.clone())
    }

    fn lookup_words(&self, pairs: &[HardWordPair]) -> Result<Vec<LookupResult>, BackendError> {
        self.lookup_calls.set(self.lookup_calls.get() + 1);
        self.last_batch.replace(pairs.to_vec());
        if self.fail_lookup {
            return Err(BackendError::Status {
                endpoint: "/word/lookup".to_string(),
                status: 502,
            });
        }
        Ok(self.results.clone())
    }

    fn fetch_mindmap(&self, _article_id: &str) -> Result<MindTreeNode, BackendError> {
        unreachable!("annotation tests never fetch mindmaps")
    }
}

fn article_with_body(body: &str) -> Article {
    Article {
        title: "Spring Tides".to_string(),
        author: "I. Shore".to_string(),
        lang: "en".to_string(),
        raw_html: body.to_string(),
    }
}

fn sentence(id: &str, body: &str) -> String {
    format!(r#"<span class="sent" sent-id="{id}">{body}</span>"#)
}

fn hard_word(word_id: &str, text: &str) -> String {
    format!(r#"<span class="word hard-word" word-id="{word_id}">{text}</span>"#)
}

fn definition(word_id: &str, text: &str) -> LookupResult {
    LookupResult {
        word_id: word_id.to_string(),
        text: Some(text.to_string()),
    }
}

/// Two sentences; w1 occurs twice in the first and once in the second.
fn tidal_body() -> String {
    let s1 = sentence(
        "s1",
        &format!(
            "The {} peaks at {}, a {} of sorts.",
            hard_word("w1", "syzygy"),
            hard_word("w2", "perigee"),
            hard_word("w1", "syzygy"),
        ),
    );
    let s2 = sentence("s2", &format!("That {} raises the tide.", hard_word("w1", "syzygy")));
    format!("<p>{s1}</p><p>{s2}</p>")
}

#[test]
fn test_one_lookup_call_covers_the_whole_article() {
    let backend = RecordingBackend::new(
        article_with_body(&tidal_body()),
        vec![definition("w1", "alignment of three bodies")],
    );
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/tides")
        .expect("pipeline run failed")
        .into_value()
        .expect("run should complete");

    // One batched request, whatever the marker count
    assert_eq!(backend.lookup_calls.get(), 1);

    // The batch is de-duplicated per (sentence, word) but keeps the same
    // word across different sentences as distinct pairs.
    let keys: Vec<String> = backend
        .last_batch
        .borrow()
        .iter()
        .map(HardWordPair::key)
        .collect();
    assert_eq!(keys, vec!["s1:w1", "s1:w2", "s2:w1"]);
    assert_eq!(out.gloss_count, 3);
}

#[test]
fn test_every_occurrence_gets_its_caption() {
    let backend = RecordingBackend::new(
        article_with_body(&tidal_body()),
        vec![definition("w1", "alignment of three bodies")],
    );
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/tides")
        .expect("pipeline run failed")
        .into_value()
        .expect("run should complete");

    assert!(out.annotated);
    // All three w1 markers are wrapped, including the repeat within s1
    assert_eq!(
        out.html.matches("<rt>alignment of three bodies</rt>").count(),
        3,
        "every marker occurrence should carry the caption"
    );
    // w2 had no definition in the response
    assert_eq!(out.html.matches("<rt>not found</rt>").count(), 1);
}

#[test]
fn test_prose_outside_markers_is_untouched() {
    let backend = RecordingBackend::new(
        article_with_body(&tidal_body()),
        vec![definition("w1", "alignment"), definition("w2", "closest approach")],
    );
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/tides")
        .expect("pipeline run failed")
        .into_value()
        .expect("run should complete");

    assert!(out.html.contains(" peaks at "));
    assert!(out.html.contains(" raises the tide."));
    assert!(out.html.contains(r#"<span class="word hard-word" word-id="w2">perigee</span>"#));
}

#[test]
fn test_lookup_failure_keeps_the_article_readable() {
    let mut backend = RecordingBackend::new(article_with_body(&tidal_body()), Vec::new());
    backend.fail_lookup = true;
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/tides")
        .expect("a failed lookup must not fail the run")
        .into_value()
        .expect("run should complete");

    // The original body survives byte for byte
    assert_eq!(out.html, tidal_body());
    assert!(!out.annotated);
    assert_eq!(out.gloss_count, 0);

    // And the rendered page says so instead of showing broken output
    let page = render_page(&out).expect("render failed");
    assert!(page.contains("shown without annotations"));
    assert!(!page.contains("<ruby>"));
}

#[test]
fn test_article_without_markers_skips_the_lookup() {
    let backend = RecordingBackend::new(
        article_with_body("<p>Plain prose, nothing marked.</p>"),
        Vec::new(),
    );
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/plain")
        .expect("pipeline run failed")
        .into_value()
        .expect("run should complete");

    assert_eq!(backend.lookup_calls.get(), 0, "empty batch must not call out");
    assert!(out.annotated);
    assert_eq!(out.gloss_count, 0);
    assert_eq!(out.html, "<p>Plain prose, nothing marked.</p>");
}

#[test]
fn test_rendered_page_embeds_body_and_counts() {
    let backend = RecordingBackend::new(
        article_with_body(&tidal_body()),
        vec![definition("w1", "alignment"), definition("w2", "closest approach")],
    );
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let out = pipeline
        .run("http://news.example/tides")
        .expect("pipeline run failed")
        .into_value()
        .expect("run should complete");
    let page = render_page(&out).expect("render failed");

    assert!(page.contains("<title>Spring Tides</title>"));
    assert!(page.contains("I. Shore"));
    assert!(page.contains(r#"<html lang="en">"#));
    assert!(page.contains("<ruby>"), "annotated body must embed unescaped");
    assert!(page.contains("3 hard words annotated."));
}

/// Backend whose fetch starts a newer run for the same article, the way
/// a reader switching away and back mid-load would.
struct SwitchingBackend<'a> {
    registry: &'a RunRegistry,
    url: String,
    article: Article,
}

impl Backend for SwitchingBackend<'_> {
    fn fetch_article(&self, _url: &str) -> Result<Article, BackendError> {
        self.registry.begin(&self.url);
        Ok(self.article.clone())
    }

    fn lookup_words(&self, _pairs: &[HardWordPair]) -> Result<Vec<LookupResult>, BackendError> {
        unreachable!("a superseded run must stop before looking words up")
    }

    fn fetch_mindmap(&self, _article_id: &str) -> Result<MindTreeNode, BackendError> {
        unreachable!("annotation tests never fetch mindmaps")
    }
}

#[test]
fn test_run_overtaken_during_fetch_is_discarded() {
    let registry = RunRegistry::new();
    let url = "http://news.example/tides";
    let backend = SwitchingBackend {
        registry: &registry,
        url: url.to_string(),
        article: article_with_body(&tidal_body()),
    };
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let outcome = pipeline.run(url).expect("pipeline run failed");
    assert!(outcome.is_superseded());
    assert!(outcome.into_value().is_none());
}
