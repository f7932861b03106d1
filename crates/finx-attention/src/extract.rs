//! Pulling tickers and recurring keywords out of free text.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static CASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Z]{1,5})\b").expect("cashtag pattern"));
static BARE_TICKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{1,5})\b").expect("bare ticker pattern"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]{3,}").expect("word pattern"));

pub const DEFAULT_MIN_FREQ: usize = 5;
pub const DEFAULT_TOP_N: usize = 20;

const STOPWORDS: &[&str] = &[
    "the", "are", "was", "were", "been", "being", "have", "has", "had", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "shall", "for", "with", "from", "into",
    "through", "during", "before", "after", "above", "below", "between", "out", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "each", "every", "both", "few", "more", "most", "other", "some", "such", "nor", "not",
    "only", "own", "same", "than", "too", "very", "just", "because", "but", "and", "while",
    "about", "down", "this", "that", "these", "those", "what", "which", "who", "whom", "its",
    "she", "they", "them", "you", "your", "his", "her", "our", "their", "him", "don",
];

/// Tickers mentioned in `text`, sorted and deduplicated.
///
/// `$TSLA`-style cashtags are always accepted. Bare uppercase words count
/// only when they appear in `known`. Anything in `blacklist` is dropped.
pub fn extract_tickers(
    text: &str,
    known: &HashSet<String>,
    blacklist: &HashSet<String>,
) -> Vec<String> {
    let mut found = BTreeSet::new();

    for capture in CASHTAG.captures_iter(text) {
        let ticker = &capture[1];
        if !blacklist.contains(ticker) {
            found.insert(ticker.to_owned());
        }
    }

    if !known.is_empty() {
        for capture in BARE_TICKER.captures_iter(text) {
            let ticker = &capture[1];
            if known.contains(ticker) && !blacklist.contains(ticker) {
                found.insert(ticker.to_owned());
            }
        }
    }

    found.into_iter().collect()
}

/// Lowercase words of three or more letters that recur across `titles`.
///
/// Returns at most `top_n` `(word, count)` pairs with `count >= min_freq`,
/// most frequent first and alphabetical within a count.
pub fn extract_hot_keywords(
    titles: &[&str],
    min_freq: usize,
    top_n: usize,
) -> Vec<(String, usize)> {
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for title in titles {
        let lowered = title.to_lowercase();
        for word in WORD.find_iter(&lowered) {
            let word = word.as_str();
            if !stopwords.contains(word) {
                *counts.entry(word.to_owned()).or_default() += 1;
            }
        }
    }

    let mut hot: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_freq)
        .collect();
    hot.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    hot.truncate(top_n);
    hot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn cashtags_are_trusted_bare_words_need_known_set() {
        let text = "Loading $PLTR and $NVDA, also AMD and YOLO. $PLTR again";
        assert_eq!(
            extract_tickers(text, &HashSet::new(), &HashSet::new()),
            vec!["NVDA", "PLTR"]
        );
        assert_eq!(
            extract_tickers(text, &set(&["AMD", "NVDA"]), &HashSet::new()),
            vec!["AMD", "NVDA", "PLTR"]
        );
    }

    #[test]
    fn blacklist_wins_over_both_paths() {
        let text = "$YOLO on CEO news, buying AI";
        let known = set(&["CEO", "AI"]);
        let blacklist = set(&["YOLO", "CEO"]);
        assert_eq!(extract_tickers(text, &known, &blacklist), vec!["AI"]);
    }

    #[test]
    fn words_longer_than_five_letters_are_not_tickers() {
        let known = set(&["BIGWORD"]);
        assert!(extract_tickers("$TOOLONG BIGWORD", &known, &HashSet::new()).is_empty());
    }

    #[test]
    fn hot_keywords_respect_frequency_and_stopwords() {
        let titles = [
            "Tariff fears hit chips",
            "Chips rally on tariff relief",
            "Why the tariff matters for chips",
            "Memory chips and the tariff",
            "Tariff talk: chips up",
            "Robotics hype",
        ];
        let hot = extract_hot_keywords(&titles, 5, 20);
        assert_eq!(
            hot,
            vec![("chips".to_owned(), 5), ("tariff".to_owned(), 5)]
        );

        let top_one = extract_hot_keywords(&titles, 1, 1);
        assert_eq!(top_one, vec![("chips".to_owned(), 5)]);
    }
}
