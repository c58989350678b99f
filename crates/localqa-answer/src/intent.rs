//! Question intent classification.

use serde::{Deserialize, Serialize};

/// Coarse classification of what kind of answer a query expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionIntent {
    Summary,
    List,
    Definition,
    HowTo,
    Reason,
    YesNo,
    Count,
    Comparison,
    Informational,
}

/// Trigger phrases per intent, in priority order.
///
/// Order matters: the phrase sets overlap ("what is" vs "what are"), so
/// the first matching intent wins and the table must not be reordered.
const TRIGGERS: &[(QuestionIntent, &[&str])] = &[
    (QuestionIntent::Summary, &["summarize", "summary", "brief"]),
    (QuestionIntent::List, &["list", "name", "what are", "which"]),
    (QuestionIntent::Definition, &["what is", "what's", "define"]),
    (QuestionIntent::HowTo, &["how to", "how do", "steps"]),
    (QuestionIntent::Reason, &["why", "because", "reason"]),
    (QuestionIntent::YesNo, &["is there", "are there", "can i"]),
    (QuestionIntent::Count, &["how many", "count", "number of"]),
    (
        QuestionIntent::Comparison,
        &["compare", "difference", "versus", "vs "],
    ),
];

/// Classify a query by case-insensitive substring match against the
/// trigger table. Pure and deterministic; defaults to `Informational`.
pub fn classify(query: &str) -> QuestionIntent {
    let lower = query.to_lowercase();
    for (intent, phrases) in TRIGGERS {
        if phrases.iter().any(|p| lower.contains(p)) {
            return *intent;
        }
    }
    QuestionIntent::Informational
}
