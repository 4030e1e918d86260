use scraper::{ElementRef, Html, Node, Selector};

use crate::extractor::model::{ReadabilityResult, count_words};

/// Containers that usually hold the article body, most specific first.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    ".entry-content",
    ".post",
    ".article",
    ".content",
    "#main",
];

/// Subtrees that never contribute readable text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
    "iframe", "svg", "button", "head",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Documents nested deeper than this are refused outright. Real pages stay
/// far below it.
pub const MAX_NESTING_DEPTH: usize = 512;

pub fn extract(html: &str) -> Option<ReadabilityResult> {
    let document = Html::parse_document(html);
    if nesting_depth(&document) > MAX_NESTING_DEPTH {
        return None;
    }

    let title = extract_title(&document).unwrap_or_default();
    let block = find_content_block(&document, &title)?;

    let text = block_text(block, &title);
    if text.trim().is_empty() {
        return None;
    }

    Some(ReadabilityResult {
        site_name: extract_site_name(&document),
        description: meta_content(
            &document,
            &["meta[name='description']", "meta[property='og:description']"],
        ),
        keywords: meta_content(&document, &["meta[name='keywords']"]),
        title,
        text,
        html: block.html(),
    })
}

fn extract_title(document: &Html) -> Option<String> {
    // Try og:title first
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content")
                && !content.trim().is_empty()
            {
                return Some(content.trim().to_string());
            }
        }
    }

    for tag in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(tag) {
            for element in document.select(&selector) {
                let title = collapse(&element.text().collect::<String>());
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    None
}

fn extract_site_name(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta[property='og:site_name']")
        && let Some(element) = document.select(&selector).next()
        && let Some(content) = element.value().attr("content")
    {
        return Some(content.trim().to_string());
    }

    // "Article Title - Site Name" or "Article Title | Site Name"
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?.text().collect::<String>();
    let title = title.trim();
    for separator in [" - ", " | "] {
        if let Some(pos) = title.rfind(separator) {
            return Some(title[pos + separator.len()..].trim().to_string());
        }
    }

    None
}

/// First non-empty `content` attribute among the selectors, in order.
fn meta_content(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .filter_map(|element| element.value().attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(str::to_string)
        })
}

/// Picks the candidate container with the most words, falling back to
/// `<body>` when no container has any text.
///
/// Only the outermost match of a selector is scored; nested matches repeat
/// text already counted for their ancestor.
fn find_content_block<'a>(document: &'a Html, title: &str) -> Option<ElementRef<'a>> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let mut best: Option<(usize, ElementRef<'a>)> = None;
        let mut scored: Option<ElementRef<'a>> = None;
        // `select` yields in document order, so a match inside the last scored
        // candidate always comes right after it
        for element in document.select(&selector) {
            if let Some(outer) = scored
                && element.ancestors().any(|node| node.id() == outer.id())
            {
                continue;
            }
            scored = Some(element);

            let words = count_words(&block_text(element, title));
            if words > 0 && best.is_none_or(|(most, _)| words >= most) {
                best = Some((words, element));
            }
        }
        if let Some((_, element)) = best {
            return Some(element);
        }
    }

    let body = Selector::parse("body").ok()?;
    document.select(&body).next()
}

enum Step<'a> {
    Visit(ElementRef<'a>),
    Text(&'a str),
    Break,
}

/// Text of a block with chrome and the repeated headline left out. Block
/// elements are wrapped in line breaks.
///
/// Walks with an explicit stack so arbitrarily deep markup cannot exhaust the
/// thread's stack.
fn block_text(element: ElementRef<'_>, title: &str) -> String {
    let mut out = String::new();
    let mut stack = Vec::new();
    push_children(element, &mut stack);

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Break => out.push('\n'),
            Step::Visit(child) => {
                let name = child.value().name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                // The headline is reported as the title, not repeated in the body.
                if HEADINGS.contains(&name) && is_title(child, title) {
                    continue;
                }
                if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                    stack.push(Step::Break);
                }
                push_children(child, &mut stack);
            }
        }
    }
    out
}

/// Pushes in reverse so the first child is popped first.
fn push_children<'a>(element: ElementRef<'a>, stack: &mut Vec<Step<'a>>) {
    for child in element.children().rev() {
        match child.value() {
            Node::Text(text) => stack.push(Step::Text(text)),
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    stack.push(Step::Visit(child_ref));
                }
            }
            _ => {}
        }
    }
}

fn nesting_depth(document: &Html) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(document.tree.root(), 0usize)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.children().map(|child| (child, depth + 1)));
    }
    deepest
}

fn is_title(heading: ElementRef<'_>, title: &str) -> bool {
    !title.is_empty() && collapse(&heading.text().collect::<String>()) == title
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
