use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9']+").unwrap());

// Standard English stop-word set.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't",
        "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "few", "for",
        "from", "further", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in",
        "into", "is", "isn't", "it", "its", "itself", "just", "me", "more", "most", "mustn't",
        "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
        "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shan't",
        "she", "should", "shouldn't", "so", "some", "such", "than", "that", "the", "their",
        "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
        "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "were",
        "weren't", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
        "with", "won't", "would", "wouldn't", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lower-case, split into word tokens, and drop stop words.
///
/// This runs over the raw document only to size the extraction report.
/// Running it before section extraction would destroy the line breaks the
/// heading patterns anchor on.
pub fn tokenize_and_filter(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|word| !STOP_WORDS.contains(word.as_str()))
        .collect()
}

/// Split a section body into blank-line-separated entries, dropping
/// whitespace-only entries.
pub fn split_entries(body: &str) -> Vec<&str> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Trimmed, non-empty lines of a block of text.
pub fn content_lines(block: &str) -> Vec<&str> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
