use serde::Deserialize;
use url::Url;
use utoipa::ToSchema;

use crate::ingest::outcome::Rejection;

/// Body posted by the capture bridge: one page per request.
///
/// Absent fields decode as empty strings so a missing field and an empty one
/// are rejected the same way.
#[derive(Debug, Deserialize, ToSchema)]
pub struct Payload {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html: String,
}

impl Payload {
    /// Checks the fields and returns the page URL as an absolute base for
    /// resolving links.
    pub fn validate(&self) -> Result<Url, Rejection> {
        if self.url.is_empty() || self.html.is_empty() {
            return Err(Rejection::MissingField);
        }

        let url = Url::parse(&self.url).map_err(|_| Rejection::InvalidUrl)?;
        if url.cannot_be_a_base() {
            return Err(Rejection::InvalidUrl);
        }
        Ok(url)
    }
}
