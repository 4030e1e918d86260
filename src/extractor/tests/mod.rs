use std::fs;
use url::Url;

use crate::extractor::{ExtractError, Extractor, ReadabilityExtractor, extract};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn base(url: &str) -> Url {
    Url::parse(url).unwrap()
}

#[test]
fn test_extract_article() {
    let html = fixture("article.html");

    let article = extract(&base("https://example.com/article"), &html).unwrap();

    assert!(article.title().contains("Sample Article"));
    assert_eq!(article.site_name(), Some("News Site"));
    assert!(article.content().contains("first paragraph"));
    assert!(article.content().contains("second paragraph"));
    assert!(!article.content().contains("Copyright"));
    assert!(!article.content().contains("Trending"));
    assert!(!article.content().contains("injected"));
    assert!(!article.html().contains("<script"));
    assert!(!article.html().contains("<nav"));

    // Relative links and media are resolved against the page URL
    assert!(article.html().contains("https://example.com/related"));
    assert!(article.html().contains("https://example.com/images/sample.jpg"));
}

#[test]
fn test_extract_blog_post() {
    let html = fixture("blog.html");

    let article = extract(&base("https://blog.example.com/post"), &html).unwrap();

    assert_eq!(article.title(), "How to Build Better Software");
    assert_eq!(article.site_name(), Some("Tech Blog"));
    assert!(article.content().contains("Building better software"));
    assert!(article.content().contains("Key Principles"));
    assert!(!article.content().contains("newsletter"));
    assert!(!article.content().starts_with("How to Build Better Software"));
    assert_eq!(article.language(), Some("en"));
    assert_eq!(article.category(), "Technology");
}

#[test]
fn test_reject_empty_page() {
    let html = fixture("empty.html");

    let result = extract(&base("https://example.com/empty"), &html);

    assert_eq!(result, Err(ExtractError::NoContentFound));
}

#[test]
fn test_minimal_article() {
    let html = "<html><body><article><h1>Hi</h1><p>one two three</p></article></body></html>";

    let article = extract(&base("https://example.com/a"), html).unwrap();

    assert_eq!(article.title(), "Hi");
    assert_eq!(article.content(), "one two three");
    assert_eq!(article.word_count(), 3);
    assert_eq!(article.category(), "Uncategorized");
}

#[test]
fn test_word_count_matches_content() {
    for name in ["article.html", "blog.html"] {
        let html = fixture(name);
        let article = extract(&base("https://example.com/"), &html).unwrap();
        assert_eq!(
            article.word_count(),
            article.content().split_whitespace().count(),
            "{name}"
        );
    }
}

#[test]
fn test_extract_is_deterministic() {
    let html = fixture("article.html");
    let url = base("https://example.com/article");
    let extractor = ReadabilityExtractor;

    let first = extractor.extract(&url, &html).unwrap();
    let second = extractor.extract(&url, &html).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    let article = extract(&base("https://example.com/broken"), html).unwrap();

    assert_eq!(article.title(), "Broken");
    assert!(article.content().contains("Unclosed tags"));
    assert!(article.content().contains("More content"));
}

#[test]
fn test_fragment_without_document() {
    let article = extract(&base("https://example.com/"), "<p>x</p>").unwrap();
    assert_eq!(article.title(), "");
    assert_eq!(article.word_count(), 1);
}

fn nested(open: &str, close: &str, depth: usize, inner: &str) -> String {
    format!(
        "<html><body>{}{inner}{}</body></html>",
        open.repeat(depth),
        close.repeat(depth)
    )
}

#[test]
fn test_deeply_nested_markup_is_refused() {
    let html = nested("<div>", "</div>", 10_000, "text");

    // Blocking-pool threads get 2 MiB of stack
    let result = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || extract(&base("https://example.com/deep"), &html))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(result, Err(ExtractError::NoContentFound));
}

#[test]
fn test_moderate_nesting_still_extracts() {
    let html = nested("<div>", "</div>", 300, "text");

    let article = extract(&base("https://example.com/nested"), &html).unwrap();

    assert_eq!(article.content(), "text");
    assert_eq!(article.word_count(), 1);
}

#[test]
fn test_nested_candidate_containers() {
    let html = nested(r#"<div class="content">word "#, "</div>", 400, "");

    let article = extract(&base("https://example.com/nested"), &html).unwrap();

    assert_eq!(article.word_count(), 400);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    const NESTING_TAGS: &[&str] = &[
        "div",
        "article",
        "section",
        "span",
        "blockquote",
        "li",
        "main",
    ];

    fn nested_markup() -> impl Strategy<Value = (String, usize)> {
        (
            proptest::collection::vec(proptest::sample::select(NESTING_TAGS), 0..2_000),
            proptest::collection::vec("[a-z]{1,8}", 1..5),
        )
            .prop_map(|(tags, words)| {
                let mut html = String::from("<html><body>");
                for tag in &tags {
                    html.push_str(&format!(r#"<{tag} class="content">"#));
                }
                html.push_str(&words.join(" "));
                for tag in tags.iter().rev() {
                    html.push_str(&format!("</{tag}>"));
                }
                html.push_str("</body></html>");
                (html, words.len())
            })
    }

    proptest! {
        #[test]
        fn test_nested_markup_never_panics((html, words) in nested_markup()) {
            match extract(&base("https://example.com"), &html) {
                Ok(article) => prop_assert_eq!(article.word_count(), words),
                Err(err) => prop_assert_eq!(err, ExtractError::NoContentFound),
            }
        }

        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z]*"
        ) {
            // Should never panic regardless of input
            let _ = extract(&base(&url), &html);
        }

        #[test]
        fn test_word_count_always_derived(
            words in proptest::collection::vec("[a-z]{1,8}", 0..40),
        ) {
            let html = format!("<article><p>{}</p></article>", words.join(" "));
            match extract(&base("https://example.com"), &html) {
                Ok(article) => prop_assert_eq!(article.word_count(), words.len()),
                Err(err) => {
                    prop_assert!(words.is_empty());
                    prop_assert_eq!(err, ExtractError::NoContentFound);
                }
            }
        }
    }
}
