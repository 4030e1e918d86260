use ammonia::{Builder, UrlRelative};
use url::Url;

use crate::extractor::model::{ReadabilityResult, normalize_whitespace};

pub fn sanitize_and_resolve_links(result: &mut ReadabilityResult, base_url: &Url) {
    // Strip scripts, styles and event handlers; rewrite relative href/src
    // against the page URL. The base is only joined, never fetched.
    result.html = Builder::default()
        .url_relative(UrlRelative::RewriteWithBase(base_url.clone()))
        .clean(&result.html)
        .to_string();

    result.text = normalize_whitespace(&result.text);
}
