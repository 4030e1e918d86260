pub mod classifier;
pub mod cleaner;
pub mod language;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::{Article, ExtractError};

use url::Url;

/// Turns a captured page into its readable article.
///
/// Implementations must be pure: no network access (the base URL is only used
/// to resolve relative references) and the same output for the same input.
#[cfg_attr(test, mockall::automock)]
pub trait Extractor: Send + Sync {
    fn extract(&self, base_url: &Url, html: &str) -> Result<Article, ExtractError>;
}

/// Readability-style extractor built on `scraper` and `ammonia`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

impl Extractor for ReadabilityExtractor {
    fn extract(&self, base_url: &Url, html: &str) -> Result<Article, ExtractError> {
        extract(base_url, html)
    }
}

pub fn extract(base_url: &Url, html: &str) -> Result<Article, ExtractError> {
    // 1. Find the readable block
    let mut result = reader::extract(html).ok_or(ExtractError::NoContentFound)?;

    // 2. Clean and sanitize HTML, resolve links
    cleaner::sanitize_and_resolve_links(&mut result, base_url);

    // 3. Detect language and topic
    let language = language::detect_language(&result.text);
    let category = classifier::categorize(&classifier::PageSignals {
        title: &result.title,
        keywords: result.keywords.as_deref().unwrap_or_default(),
        description: result.description.as_deref().unwrap_or_default(),
        content: &result.text,
    });

    Ok(Article::new(result.title, result.text)
        .with_html(result.html)
        .with_site_name(result.site_name)
        .with_language(language)
        .with_category(category))
}
