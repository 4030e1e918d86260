use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use crate::extractor::Article;

/// Downstream consumer of accepted articles (a database, a queue, a model).
///
/// Delivery is best effort: the webhook has already accepted the page, so a
/// failing sink is logged and the caller still gets its confirmation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSink: Send + Sync {
    async fn deliver(&self, url: &Url, article: &Article) -> Result<()>;
}
