use std::{sync::Arc, time::Duration};

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, header::CONTENT_LENGTH},
};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::{
    app_state::AppState,
    config::Config,
    extractor::{Article, ExtractError, Extractor},
    ingest::{
        dtos::Payload,
        outcome::{ArticleSummary, Outcome, Rejection},
        sink::ArticleSink,
    },
};

/// Per-request resource bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    pub max_body_bytes: usize,
    pub extract_timeout: Duration,
    pub max_concurrent_extractions: usize,
}

impl IngestLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes(),
            extract_timeout: config.extract_timeout(),
            max_concurrent_extractions: config.max_concurrent_extractions(),
        }
    }
}

/// Validates webhook calls, runs the extractor and reports the result.
///
/// Holds no per-request state; clones share the same collaborators.
#[derive(Clone)]
pub struct IngestHandler {
    extractor: Arc<dyn Extractor>,
    sink: Option<Arc<dyn ArticleSink>>,
    limits: IngestLimits,
    // Shared by all clones; one permit per running extraction
    extraction_slots: Arc<Semaphore>,
}

impl IngestHandler {
    pub fn new(extractor: Arc<dyn Extractor>, limits: IngestLimits) -> Self {
        Self {
            extractor,
            sink: None,
            extraction_slots: Arc::new(Semaphore::new(limits.max_concurrent_extractions)),
            limits,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ArticleSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn limits(&self) -> IngestLimits {
        self.limits
    }

    #[instrument(skip_all, fields(method = %request.method()))]
    pub async fn ingest(&self, request: Request) -> Outcome {
        if request.method() != Method::POST {
            debug!("rejecting request with wrong method");
            return Outcome::Rejected(Rejection::MethodNotAllowed);
        }

        let (parts, body) = request.into_parts();
        let payload = match self.decode(&parts.headers, body).await {
            Ok(payload) => payload,
            Err(rejection) => return Outcome::Rejected(rejection),
        };

        let url = match payload.validate() {
            Ok(url) => url,
            Err(rejection) => {
                info!(reason = %rejection, "rejecting invalid payload");
                return Outcome::Rejected(rejection);
            }
        };

        let article = match self.run_extractor(url.clone(), payload.html).await {
            Ok(article) => article,
            // Already logged when the slot was refused
            Err(ExtractError::Busy) => return Outcome::ExtractionFailed(ExtractError::Busy),
            Err(err) => {
                error!(url = %url, error = %err, "failed to extract article");
                return Outcome::ExtractionFailed(err);
            }
        };

        let summary = ArticleSummary::new(&url, &article);
        info!(
            url = %summary.url,
            title = %summary.title,
            word_count = summary.word_count,
            language = ?summary.language,
            category = %summary.category,
            checksum = %summary.checksum,
            "article ingested"
        );

        if let Some(sink) = &self.sink
            && let Err(err) = sink.deliver(&url, &article).await
        {
            error!(url = %url, error = %err, "failed to deliver article");
        }

        Outcome::Accepted(summary)
    }

    /// Reads at most `max_body_bytes` and decodes the JSON payload. Nothing
    /// from the body is logged.
    async fn decode(&self, headers: &HeaderMap, body: Body) -> Result<Payload, Rejection> {
        let limit = self.limits.max_body_bytes;

        // Refuse up front when the client announces an oversized body
        if let Some(length) = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            && length > limit as u64
        {
            warn!(content_length = length, limit, "request body over limit");
            return Err(Rejection::BadBody);
        }

        // Chunked or lying clients are cut off once the limit is crossed
        let bytes = to_bytes(body, limit).await.map_err(|err| {
            warn!(error = %err, limit, "failed to read request body");
            Rejection::BadBody
        })?;

        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(
                category = ?err.classify(),
                line = err.line(),
                column = err.column(),
                "malformed request body"
            );
            Rejection::BadBody
        })
    }

    /// Runs the CPU-bound extractor off the async workers, bounded by the
    /// extraction budget. A timed-out extraction finishes in the background
    /// and its result is discarded.
    ///
    /// The blocking task owns its permit, so an abandoned extraction keeps its
    /// slot until it actually stops. When no slot is free the request is
    /// turned away instead of queueing.
    async fn run_extractor(&self, url: Url, html: String) -> Result<Article, ExtractError> {
        let permit = Arc::clone(&self.extraction_slots)
            .try_acquire_owned()
            .map_err(|_| {
                warn!(
                    limit = self.limits.max_concurrent_extractions,
                    "no extraction slot available"
                );
                ExtractError::Busy
            })?;
        let extractor = Arc::clone(&self.extractor);
        let budget = self.limits.extract_timeout;

        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit; // Hold permit until extraction completes
            extractor.extract(&url, &html)
        });

        match tokio::time::timeout(budget, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ExtractError::Internal(join_error.to_string())),
            Err(_) => Err(ExtractError::Timeout(budget.as_millis())),
        }
    }
}

#[utoipa::path(
    post,
    path = "/ingest",
    tag = "ingest",
    request_body = Payload,
    responses(
        (status = 200, description = "Article extracted and reported", body = String),
        (status = 400, description = "Malformed, oversized or invalid payload", body = String),
        (status = 405, description = "Method other than POST", body = String),
        (status = 500, description = "No readable content could be extracted", body = String),
        (status = 503, description = "Every extraction slot is busy", body = String)
    )
)]
pub async fn ingest(State(state): State<AppState>, request: Request) -> Outcome {
    state.ingest.ingest(request).await
}
