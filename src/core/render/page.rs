//! Self-contained HTML page rendering for annotated articles

use askama::Template;

use crate::core::models::AnnotatedArticle;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ title }}</title>
    <style>
      body { max-width: 42rem; margin: 2rem auto; padding: 0 1rem; font-family: Georgia, serif; line-height: 1.9; }
      header { margin-bottom: 2rem; }
      h1 { margin-bottom: 0.25rem; }
      .byline { color: #666; font-style: italic; }
      ruby > rt { font-size: 0.6em; color: #993333; }
      footer { color: #666; font-size: 0.85em; border-top: 1px solid #ddd; margin-top: 2rem; padding-top: 0.5rem; }
    </style>
  </head>
  <body>
    <header>
      <h1>{{ title }}</h1>
      {% if author.len() > 0 %}
      <p class="byline">{{ author }}</p>
      {% endif %}
    </header>
    <article>{{ body|safe }}</article>
    <footer>
      {% if annotated %}
      <p>{{ gloss_count }} hard word{% if gloss_count != 1 %}s{% endif %} annotated.</p>
      {% else %}
      <p>Definitions were unavailable; the article is shown without annotations.</p>
      {% endif %}
    </footer>
  </body>
</html>"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    title: &'a str,
    author: &'a str,
    lang: &'a str,
    body: &'a str,
    gloss_count: usize,
    annotated: bool,
}

/// Render an annotated article as a standalone HTML page.
///
/// The body is emitted verbatim (it is already HTML); the metadata is
/// escaped by the template engine.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_page(article: &AnnotatedArticle) -> Result<String, askama::Error> {
    let lang = if article.lang.is_empty() {
        "en"
    } else {
        &article.lang
    };
    PageTemplate {
        title: &article.title,
        author: &article.author,
        lang,
        body: &article.html,
        gloss_count: article.gloss_count,
        annotated: article.annotated,
    }
    .render()
}
