//! Template-based answer synthesis over ranked candidates.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use localqa_core::types::Candidate;
use localqa_text::{extract_keywords, split_sentences};

use crate::intent::QuestionIntent;

/// Only the strongest candidates contribute to an answer.
const MAX_CANDIDATES: usize = 3;

/// Render the top candidates into answer text for the given intent.
///
/// Deterministic and template-based; no model call. An empty candidate
/// list short-circuits to an empty string (the "could not answer"
/// result) before any per-intent strategy runs.
pub fn synthesize(query: &str, candidates: &[Candidate], intent: QuestionIntent) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let top = &candidates[..candidates.len().min(MAX_CANDIDATES)];
    match intent {
        QuestionIntent::Summary => summary(top),
        QuestionIntent::List => list(top),
        QuestionIntent::Definition => prefer_cue(top, &["is defined", "means", "refers to"]),
        QuestionIntent::HowTo => how_to(top),
        QuestionIntent::Reason => prefer_cue(top, &["because", "reason", "due to"]),
        QuestionIntent::YesNo => yes_no(top),
        QuestionIntent::Count => count(top),
        QuestionIntent::Comparison => prefer_cue(top, &["vs", "versus", "compared"]),
        QuestionIntent::Informational => informational(query, top),
    }
}

fn summary(top: &[Candidate]) -> String {
    top.iter()
        .take(2)
        .map(|c| format!("• {}", c.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Break candidate texts into list items, keep fragments of a readable
/// length, de-duplicate, bullet up to five.
fn list(top: &[Candidate]) -> String {
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    'outer: for c in top {
        for part in c.text.split(|ch: char| matches!(ch, '\n' | ';' | ',')) {
            let part = part.trim();
            let len = part.chars().count();
            if !(5..=100).contains(&len) {
                continue;
            }
            if seen.insert(part.to_lowercase()) {
                items.push(format!("• {part}"));
            }
            if items.len() == 5 {
                break 'outer;
            }
        }
    }
    items.join("\n")
}

/// First candidate containing any cue phrase, else the first candidate
/// verbatim.
fn prefer_cue(top: &[Candidate], cues: &[&str]) -> String {
    for c in top {
        let lower = c.text.to_lowercase();
        if cues.iter().any(|cue| lower.contains(cue)) {
            return c.text.trim().to_string();
        }
    }
    top[0].text.trim().to_string()
}

fn how_to(top: &[Candidate]) -> String {
    const STEP_CUES: &[&str] = &["first", "step", "then", "next", "to "];
    let mut steps = Vec::new();
    for c in top {
        for sentence in split_sentences(&c.text) {
            let lower = sentence.to_lowercase();
            if STEP_CUES.iter().any(|cue| lower.contains(cue)) {
                steps.push(sentence);
            }
        }
    }
    if steps.is_empty() {
        top[0].text.trim().to_string()
    } else {
        steps.join(" ")
    }
}

fn yes_no(top: &[Candidate]) -> String {
    const POSITIVE: &[&str] = &["yes", "there is", "there are", "available", "you can"];
    const NEGATIVE: &[&str] = &["no ", "not ", "cannot", "can't", "there is no", "unavailable"];
    let has_cue = |cues: &[&str]| {
        top.iter().any(|c| {
            let lower = c.text.to_lowercase();
            cues.iter().any(|cue| lower.contains(cue))
        })
    };
    let positive = has_cue(POSITIVE);
    let negative = has_cue(NEGATIVE);
    if positive && !negative {
        "Yes, based on your documents.".to_string()
    } else if negative && !positive {
        "No, based on your documents.".to_string()
    } else {
        // Conflicting or absent cues: surface the passage instead of
        // guessing a polarity.
        top[0].text.trim().to_string()
    }
}

fn count(top: &[Candidate]) -> String {
    static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();
    let re = DIGIT_RUNS.get_or_init(|| Regex::new(r"\d+").expect("static digit pattern"));

    let mut seen = HashSet::new();
    let mut numbers = Vec::new();
    for c in top {
        for m in re.find_iter(&c.text) {
            let run = m.as_str().to_string();
            if seen.insert(run.clone()) {
                numbers.push(run);
            }
        }
    }
    numbers.truncate(5);
    if numbers.is_empty() {
        format!("Found {} matching passages in your documents.", top.len())
    } else {
        format!("Numbers found in your documents: {}.", numbers.join(", "))
    }
}

/// First sentence of the best candidate that contains a non-trivial
/// query keyword, else the candidate verbatim.
fn informational(query: &str, top: &[Candidate]) -> String {
    let keywords = extract_keywords(query);
    let best = &top[0];
    for sentence in split_sentences(&best.text) {
        let lower = sentence.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k.as_str())) {
            return sentence;
        }
    }
    best.text.trim().to_string()
}
