#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use pageingest::extractor::extract;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let base = Url::parse("https://example.com/article/").unwrap();

    // Never panics, and the word count always agrees with the text
    if let Ok(article) = extract(&base, &html) {
        assert_eq!(
            article.word_count(),
            article.content().split_whitespace().count()
        );
    }
});
