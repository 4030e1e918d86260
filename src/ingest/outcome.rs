use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::extractor::{Article, ExtractError};

pub const ACCEPTED_BODY: &str = "Ingested successfully\n";
pub const EXTRACTION_FAILED_BODY: &str = "failed to parse article";
pub const BUSY_BODY: &str = "server busy, retry later";

/// Result of handling one webhook call. Every path through the handler ends
/// in exactly one of these.
#[derive(Debug)]
pub enum Outcome {
    Accepted(ArticleSummary),
    Rejected(Rejection),
    ExtractionFailed(ExtractError),
}

/// Caller mistakes. The display text is safe to send back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Malformed JSON, an unreadable body, or a body over the size limit.
    #[error("bad request body")]
    BadBody,

    #[error("missing url or html")]
    MissingField,

    #[error("invalid url format")]
    InvalidUrl,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::BadBody | Rejection::MissingField | Rejection::InvalidUrl => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// What gets reported for an accepted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub language: Option<String>,
    pub category: String,
    /// md5 of the extracted text, hex encoded.
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

impl ArticleSummary {
    pub fn new(url: &Url, article: &Article) -> Self {
        Self {
            url: url.to_string(),
            title: article.title().to_string(),
            word_count: article.word_count(),
            language: article.language().map(str::to_string),
            category: article.category().to_string(),
            checksum: format!("{:x}", md5::compute(article.content().as_bytes())),
            ingested_at: Utc::now(),
        }
    }
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Accepted(_) => StatusCode::OK,
            Outcome::Rejected(rejection) => rejection.status(),
            Outcome::ExtractionFailed(ExtractError::Busy) => StatusCode::SERVICE_UNAVAILABLE,
            Outcome::ExtractionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Outcome::Accepted(_) => (status, ACCEPTED_BODY).into_response(),
            Outcome::Rejected(rejection) => (status, rejection.reason()).into_response(),
            Outcome::ExtractionFailed(ExtractError::Busy) => (status, BUSY_BODY).into_response(),
            // Extractor detail stays in the logs.
            Outcome::ExtractionFailed(_) => (status, EXTRACTION_FAILED_BODY).into_response(),
        }
    }
}
