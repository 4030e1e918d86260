use std::sync::Arc;

use crate::{
    config::Config,
    extractor::ReadabilityExtractor,
    ingest::{IngestHandler, IngestLimits},
};

#[derive(Clone)]
pub struct AppState {
    pub ingest: IngestHandler,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            ingest: IngestHandler::new(
                Arc::new(ReadabilityExtractor),
                IngestLimits::from_config(config),
            ),
        }
    }
}
