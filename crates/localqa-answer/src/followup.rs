//! Deterministic follow-up question generation.

use std::collections::{HashSet, VecDeque};
use std::hash::Hasher;

use twox_hash::XxHash64;

use localqa_text::extract_keywords;

use crate::intent::{classify, QuestionIntent};

/// At most this many follow-ups are offered per answered turn.
pub const MAX_FOLLOW_UPS: usize = 3;

/// Caller-owned bounded memory of recently offered follow-ups.
///
/// Prevents the assistant from suggesting the same question turn after
/// turn. Oldest entries are evicted once `capacity` is reached, so the
/// memory never grows without bound.
pub struct RecentQuestions {
    capacity: usize,
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl RecentQuestions {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    pub fn contains(&self, question: &str) -> bool {
        self.seen.contains(&normalize(question))
    }

    pub fn insert(&mut self, question: &str) {
        let key = normalize(question);
        if self.seen.contains(&key) {
            return;
        }
        if self.order.len() == self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
        self.order.push_back(key.clone());
        self.seen.insert(key);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Generic prompts used when topic extraction runs dry. The starting
/// offset is chosen by a hash of the query so variety across queries
/// does not cost determinism within one.
const GENERIC_TEMPLATES: &[&str] = &[
    "What else do my documents say about this?",
    "Is there anything related I should know?",
    "Can you summarize the key points?",
    "Where does this information come from?",
];

/// Up to three follow-up questions derived from an answered turn.
///
/// Topics come from keyword extraction over the answer; the first topic
/// is phrased according to the query's intent. Identical
/// `(query, answer)` input against an identical cache state always
/// yields an identical list.
pub fn generate_follow_ups(
    query: &str,
    answer: &str,
    recent: &mut RecentQuestions,
) -> Vec<String> {
    if answer.trim().is_empty() {
        return Vec::new();
    }

    let topics: Vec<String> = extract_keywords(answer).into_iter().take(4).collect();
    let mut proposals: Vec<String> = Vec::new();

    if let Some(topic) = topics.first() {
        proposals.push(match classify(query) {
            QuestionIntent::Definition => format!("How is {topic} used in practice?"),
            QuestionIntent::HowTo => format!("What problems come up with {topic}?"),
            QuestionIntent::Count | QuestionIntent::List => {
                format!("Which of these relate to {topic}?")
            }
            _ => format!("Can you tell me more about {topic}?"),
        });
    }
    for topic in topics.iter().skip(1) {
        proposals.push(format!("What do my documents say about {topic}?"));
    }

    let mut hasher = XxHash64::with_seed(0);
    hasher.write(query.as_bytes());
    let start = (hasher.finish() as usize) % GENERIC_TEMPLATES.len();
    for i in 0..GENERIC_TEMPLATES.len() {
        proposals.push(GENERIC_TEMPLATES[(start + i) % GENERIC_TEMPLATES.len()].to_string());
    }

    let mut out = Vec::new();
    for question in proposals {
        if out.len() == MAX_FOLLOW_UPS {
            break;
        }
        if recent.contains(&question) {
            continue;
        }
        recent.insert(&question);
        out.push(question);
    }
    out
}
