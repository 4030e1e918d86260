use std::collections::HashMap;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Weighted keyword score below which a page stays uncategorized.
const MIN_SCORE: usize = 2;

const TITLE_WEIGHT: usize = 3;
const KEYWORDS_WEIGHT: usize = 3;
const DESCRIPTION_WEIGHT: usize = 2;
const CONTENT_WEIGHT: usize = 1;

/// Categories in tie-break order: on equal scores the earlier one wins.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "software",
            "programming",
            "hardware",
            "app",
            "developer",
            "cloud",
            "ai",
            "cybersecurity",
            "tech",
            "algorithm",
            "javascript",
            "python",
            "computer",
        ],
    ),
    (
        "Sports",
        &[
            "football",
            "basketball",
            "soccer",
            "olympics",
            "tournament",
            "championship",
            "coach",
            "athlete",
            "nfl",
            "nba",
            "pitch",
            "goal",
            "stadium",
        ],
    ),
    (
        "Politics",
        &[
            "election",
            "government",
            "congress",
            "senate",
            "lawmaker",
            "democrat",
            "republican",
            "policy",
            "president",
            "vote",
            "campaign",
            "parliament",
        ],
    ),
    (
        "History",
        &[
            "century",
            "ancient",
            "war",
            "historical",
            "empire",
            "archaeology",
            "museum",
            "medieval",
            "chronicle",
            "artifact",
            "dynasty",
        ],
    ),
    (
        "Science",
        &[
            "research",
            "study",
            "scientist",
            "physics",
            "biology",
            "space",
            "astronomy",
            "dna",
            "chemistry",
            "quantum",
            "experiment",
            "molecule",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "film",
            "celebrity",
            "music",
            "album",
            "actor",
            "hollywood",
            "concert",
            "singer",
            "pop",
            "tv",
            "show",
            "director",
        ],
    ),
];

/// Text of a page the classifier looks at. Missing metadata is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSignals<'a> {
    pub title: &'a str,
    pub keywords: &'a str,
    pub description: &'a str,
    pub content: &'a str,
}

/// Keyword-dictionary topic of a page.
///
/// A keyword found in the title scores 3 once; every occurrence scores 3 in
/// the meta keywords, 2 in the description and 1 in the body. Keywords only
/// match whole words, so "app" does not match "apple".
pub fn categorize(page: &PageSignals<'_>) -> &'static str {
    let title = word_counts(page.title);
    let keywords = word_counts(page.keywords);
    let description = word_counts(page.description);
    let content = word_counts(page.content);

    let mut top = UNCATEGORIZED;
    let mut top_score = 0;
    for &(category, words) in CATEGORIES {
        let score: usize = words
            .iter()
            .map(|&word| {
                let in_title = if title.contains_key(word) { TITLE_WEIGHT } else { 0 };
                in_title
                    + occurrences(&keywords, word) * KEYWORDS_WEIGHT
                    + occurrences(&description, word) * DESCRIPTION_WEIGHT
                    + occurrences(&content, word) * CONTENT_WEIGHT
            })
            .sum();
        if score > top_score {
            top = category;
            top_score = score;
        }
    }

    if top_score < MIN_SCORE {
        return UNCATEGORIZED;
    }
    top
}

// Words are runs of ASCII letters, digits and underscores, lowercased.
fn word_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in text
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
    {
        *counts.entry(word.to_ascii_lowercase()).or_insert(0) += 1;
    }
    counts
}

fn occurrences(counts: &HashMap<String, usize>, word: &str) -> usize {
    counts.get(word).copied().unwrap_or(0)
}
