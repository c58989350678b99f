//! Keyword extraction and density scoring over raw sentences.

use std::collections::HashSet;

/// Common English function words excluded from keyword extraction.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "amid", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "may", "me", "might", "more", "most", "must", "my", "myself", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "onto", "or", "other", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "per", "same", "shall", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "upon", "very", "via", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "within", "without", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Sentences shorter than this are fragments, not answer material.
pub const MIN_SENTENCE_CHARS: usize = 20;
/// Sentences longer than this read as walls of text when surfaced.
pub const MAX_SENTENCE_CHARS: usize = 400;

/// Whether a sentence falls inside the length band considered for
/// lexical scoring.
pub fn in_score_band(sentence: &str) -> bool {
    let len = sentence.chars().count();
    (MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len)
}

/// Lowercased, de-duplicated content words of `text`, in first-seen
/// order.
///
/// Tokens split on any non-alphanumeric character; tokens of two
/// characters or fewer and stop words are dropped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if token.chars().count() <= 2 {
            continue;
        }
        if STOP_WORDS.contains(&token) {
            continue;
        }
        if seen.insert(token.to_string()) {
            out.push(token.to_string());
        }
    }
    out
}

/// Fraction of `keywords` that occur in `sentence`, case-insensitive.
/// Zero when there are no keywords.
pub fn score_sentence(sentence: &str, keywords: &[String]) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }
    let lower = sentence.to_lowercase();
    let matched = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
    matched as f32 / keywords.len() as f32
}
