use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::extractor::classifier::UNCATEGORIZED;

static SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x{a0}]+").expect("Failed to compile space regex"));
static NEWLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("Failed to compile newline regex"));

/// Readable article pulled out of a captured page.
///
/// `word_count` is derived from `content` when the article is built and the
/// fields are only reachable through accessors, so the two can never drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    title: String,
    content: String,
    word_count: usize,
    html: String,
    site_name: Option<String>,
    language: Option<String>,
    category: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            title: title.into(),
            word_count: count_words(&content),
            content,
            html: String::new(),
            site_name: None,
            language: None,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn with_site_name(mut self, site_name: Option<String>) -> Self {
        self.site_name = site_name;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    /// Plain text with markup stripped.
    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn word_count(&self) -> usize {
        self.word_count
    }
    /// Sanitized article HTML with links resolved against the page URL.
    pub fn html(&self) -> &str {
        &self.html
    }
    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    /// Topic from the keyword classifier, `Uncategorized` when unsure.
    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no readable content found")]
    NoContentFound,

    #[error("extraction exceeded {0} ms")]
    Timeout(u128),

    /// Every extraction slot is taken.
    #[error("extraction capacity exhausted")]
    Busy,

    #[error("internal extractor error: {0}")]
    Internal(String),
}

/// Raw pieces produced by the reader before cleaning.
#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: String,
    pub site_name: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub text: String,
    pub html: String,
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapses runs of spaces and trims every line; blank lines are dropped so
/// each block ends up on its own line.
pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_REGEX.replace_all(text.trim(), " ");
    NEWLINE_REGEX.replace_all(&spaced, "\n").trim().to_string()
}
