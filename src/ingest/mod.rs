pub mod dtos;
pub mod handlers;
pub mod outcome;
pub mod sink;

pub use dtos::Payload;
pub use handlers::{IngestHandler, IngestLimits};
pub use outcome::{ArticleSummary, Outcome, Rejection};
pub use sink::ArticleSink;
