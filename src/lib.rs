pub mod app_state;
pub mod config;
pub mod extractor;
pub mod health;
pub mod ingest;
pub mod openapi;
pub mod server;
pub mod telemetry;
