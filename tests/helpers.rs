use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use url::Url;

use pageingest::{
    app_state::AppState,
    config::Config,
    extractor::{Article, ReadabilityExtractor},
    ingest::{ArticleSink, IngestHandler, IngestLimits},
    server,
};

pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Records every delivered article so tests can inspect what left the core.
#[derive(Default)]
pub struct RecordingSink {
    pub delivered: Mutex<Vec<(String, Article)>>,
}

#[async_trait]
impl ArticleSink for RecordingSink {
    async fn deliver(&self, url: &Url, article: &Article) -> anyhow::Result<()> {
        self.delivered
            .lock()
            .unwrap()
            .push((url.to_string(), article.clone()));
        Ok(())
    }
}

pub fn test_app(sink: Arc<RecordingSink>) -> Router {
    let limits = IngestLimits {
        max_body_bytes: TEST_BODY_LIMIT,
        extract_timeout: Duration::from_secs(5),
        max_concurrent_extractions: 4,
    };
    let state = AppState {
        ingest: IngestHandler::new(Arc::new(ReadabilityExtractor), limits).with_sink(sink),
    };
    server::router(state)
}

pub fn default_app() -> Router {
    server::router(AppState::new(&Config::default()))
}

pub fn post_ingest(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ingest")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn read_response(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
