//! Annotate command handler
//!
//! Drives the annotation pipeline for one article URL and writes the
//! resulting standalone HTML page.

use glossmap::backend::HttpBackend;
use glossmap::config::Config;
use glossmap::core::models::AnnotatedArticle;
use glossmap::core::pipeline::{AnnotatePipeline, RunRegistry};
use glossmap::core::render::render_page;
use logger::{error, info};
use std::path::{Path, PathBuf};

/// Run the annotate command.
///
/// # Arguments
/// * `url` - Article URL to fetch and annotate
/// * `output_file` - Optional output path
/// * `config` - Configuration containing backend endpoint and pages directory
/// * `verbose` - Whether to show a per-article summary
pub fn run(url: &str, output_file: Option<&Path>, config: &Config, verbose: bool) {
    if let Err(err) = annotate_article(url, output_file, config, verbose) {
        error!("Annotation failed for {url}: {err}");
        eprintln!("{err}");
    }
}

fn annotate_article(
    url: &str,
    output_file: Option<&Path>,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let backend = HttpBackend::from_config(&config.backend)
        .map_err(|e| format!("✗ Failed to set up backend client: {e}"))?;
    let registry = RunRegistry::new();
    let pipeline = AnnotatePipeline::new(&backend, &registry);

    let outcome = pipeline
        .run(url)
        .map_err(|e| format!("✗ Failed to annotate {url}: {e}"))?;
    let Some(article) = outcome.into_value() else {
        return Err(format!("✗ Annotation run for {url} was superseded"));
    };

    let page = render_page(&article).map_err(|e| format!("✗ Failed to render page: {e}"))?;

    let output_path = resolve_output_path(output_file, config, &article.title)?;
    std::fs::write(&output_path, page)
        .map_err(|e| format!("✗ Failed to write {}: {e}", output_path.display()))?;

    println!("✓ Annotated page written: {}", output_path.display());
    info!("Annotated page exported to: {}", output_path.display());

    if !article.annotated {
        println!("⚠️  Definitions were unavailable; the page is unannotated.");
    }
    if verbose {
        print_summary(&article);
    }

    Ok(())
}

/// Print a summary of the annotated article
fn print_summary(article: &AnnotatedArticle) {
    println!("\n=== Summary ===");
    println!("Title: {}", article.title);
    if !article.author.is_empty() {
        println!("Author: {}", article.author);
    }
    println!("Language: {}", article.lang);
    println!("Hard words: {}", article.gloss_count);
}

/// Determine the output path, defaulting to `pages_dir` with a name
/// derived from the article title
fn resolve_output_path(
    output_file: Option<&Path>,
    config: &Config,
    title: &str,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let pages_dir = PathBuf::from(&config.paths.pages_dir);
    std::fs::create_dir_all(&pages_dir).map_err(|e| {
        format!(
            "✗ Failed to create pages directory {}: {e}",
            pages_dir.display()
        )
    })?;

    Ok(pages_dir.join(format!("{}.html", filename_slug(title))))
}

/// Reduce a title to a filesystem-safe file stem
fn filename_slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .take(48)
        .collect();

    if slug.trim_matches('_').is_empty() {
        "article".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_slug_keeps_alphanumerics() {
        assert_eq!(filename_slug("Spring Tides"), "spring_tides");
        assert_eq!(filename_slug("C++ for Readers!"), "c___for_readers_");
    }

    #[test]
    fn test_filename_slug_falls_back_for_empty_titles() {
        assert_eq!(filename_slug(""), "article");
        assert_eq!(filename_slug("???"), "article");
    }

    #[test]
    fn test_explicit_output_path_wins() {
        let config = Config::default();
        let path =
            resolve_output_path(Some(Path::new("/tmp/out.html")), &config, "Ignored").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out.html"));
    }
}
