use localqa_answer::{classify, generate_follow_ups, synthesize, QuestionIntent, RecentQuestions};
use localqa_core::types::{Candidate, CandidateOrigin, DocumentId};

fn cand(text: &str) -> Candidate {
    Candidate {
        text: text.to_string(),
        score: 0.5,
        origin: CandidateOrigin::Semantic,
        document_id: DocumentId::new("doc"),
        document_title: "doc".to_string(),
    }
}

#[test]
fn classify_covers_every_intent() {
    assert_eq!(classify("Summarize my notes"), QuestionIntent::Summary);
    assert_eq!(classify("What are my options?"), QuestionIntent::List);
    assert_eq!(classify("What is photosynthesis?"), QuestionIntent::Definition);
    assert_eq!(classify("How to prune tomatoes"), QuestionIntent::HowTo);
    assert_eq!(classify("Why is the sky blue?"), QuestionIntent::Reason);
    assert_eq!(classify("Is there a backup?"), QuestionIntent::YesNo);
    assert_eq!(classify("How many documents do I have?"), QuestionIntent::Count);
    assert_eq!(classify("Compare cats versus dogs"), QuestionIntent::Comparison);
    assert_eq!(classify("Tell me about my garden"), QuestionIntent::Informational);
}

#[test]
fn classify_priority_order_is_stable() {
    // "list" outranks "steps": earlier intents win overlapping phrases.
    assert_eq!(classify("List the steps"), QuestionIntent::List);
    // "what is" must not be swallowed by the List triggers.
    assert_eq!(classify("What is a heat pump?"), QuestionIntent::Definition);
}

#[test]
fn synthesize_empty_candidates_is_empty_for_every_intent() {
    let intents = [
        QuestionIntent::Summary,
        QuestionIntent::List,
        QuestionIntent::Definition,
        QuestionIntent::HowTo,
        QuestionIntent::Reason,
        QuestionIntent::YesNo,
        QuestionIntent::Count,
        QuestionIntent::Comparison,
        QuestionIntent::Informational,
    ];
    for intent in intents {
        assert_eq!(synthesize("any query", &[], intent), "");
    }
}

#[test]
fn summary_bullets_first_two_candidates() {
    let candidates = vec![cand("First passage."), cand("Second passage."), cand("Third.")];
    let answer = synthesize("summarize", &candidates, QuestionIntent::Summary);
    assert_eq!(answer, "• First passage.\n• Second passage.");
}

#[test]
fn list_splits_filters_and_caps_items() {
    let candidates = vec![cand(
        "apples, pears, ok; apples, bananas and cream, cherry trees, dried figs, extra plums",
    )];
    let answer = synthesize("list fruit", &candidates, QuestionIntent::List);
    let lines: Vec<&str> = answer.lines().collect();
    assert!(lines.len() <= 5);
    assert!(lines.iter().all(|l| l.starts_with("• ")));
    // "ok" is below the 5-char floor and the duplicate "apples" is dropped.
    assert_eq!(lines.iter().filter(|l| l.contains("apples")).count(), 1);
    assert!(!answer.contains("• ok"));
}

#[test]
fn definition_prefers_defining_candidate() {
    let candidates = vec![
        cand("Plenty of context without the phrase."),
        cand("Photosynthesis refers to how plants turn light into energy."),
    ];
    let answer = synthesize("what is photosynthesis", &candidates, QuestionIntent::Definition);
    assert!(answer.starts_with("Photosynthesis refers to"));
}

#[test]
fn definition_falls_back_to_first_candidate() {
    let candidates = vec![cand("The capital of France is Paris.")];
    let answer = synthesize(
        "What is the capital of France?",
        &candidates,
        QuestionIntent::Definition,
    );
    assert_eq!(answer, "The capital of France is Paris.");
}

#[test]
fn how_to_extracts_step_sentences() {
    let candidates = vec![cand(
        "First loosen the soil. Roses like morning light. Then water deeply.",
    )];
    let answer = synthesize("how to plant roses", &candidates, QuestionIntent::HowTo);
    assert!(answer.contains("First loosen the soil."));
    assert!(answer.contains("Then water deeply."));
}

#[test]
fn yes_no_polarity() {
    let yes = vec![cand("There are nightly backups available.")];
    assert_eq!(
        synthesize("is there a backup", &yes, QuestionIntent::YesNo),
        "Yes, based on your documents."
    );

    let no = vec![cand("Backups are not enabled on this system.")];
    assert_eq!(
        synthesize("is there a backup", &no, QuestionIntent::YesNo),
        "No, based on your documents."
    );

    let ambiguous = vec![cand("Some machines have them, others were skipped.")];
    assert_eq!(
        synthesize("is there a backup", &ambiguous, QuestionIntent::YesNo),
        "Some machines have them, others were skipped."
    );
}

#[test]
fn count_collects_deduplicated_digit_runs() {
    let candidates = vec![
        cand("We run 12 servers across 3 racks."),
        cand("All 12 servers were patched."),
    ];
    let answer = synthesize("how many servers", &candidates, QuestionIntent::Count);
    assert_eq!(answer, "Numbers found in your documents: 12, 3.");
}

#[test]
fn count_without_digits_reports_passage_count() {
    let candidates = vec![cand("Several servers."), cand("Quite a few racks.")];
    let answer = synthesize("how many servers", &candidates, QuestionIntent::Count);
    assert_eq!(answer, "Found 2 matching passages in your documents.");
}

#[test]
fn informational_picks_sentence_with_query_keyword() {
    let candidates = vec![cand(
        "The shed holds the tools. Tomatoes grow best in full sunlight. Water twice weekly.",
    )];
    let answer = synthesize("where do tomatoes grow", &candidates, QuestionIntent::Informational);
    assert_eq!(answer, "Tomatoes grow best in full sunlight.");
}

#[test]
fn follow_ups_are_deterministic_for_identical_input() {
    let query = "What is composting?";
    let answer = "Composting turns garden waste into rich soil.";

    let mut fresh_a = RecentQuestions::new(32);
    let mut fresh_b = RecentQuestions::new(32);
    let first = generate_follow_ups(query, answer, &mut fresh_a);
    let second = generate_follow_ups(query, answer, &mut fresh_b);

    assert_eq!(first, second);
    assert!(!first.is_empty());
    assert!(first.len() <= 3);
}

#[test]
fn follow_ups_skip_recently_asked_questions() {
    let query = "What is composting?";
    let answer = "Composting turns garden waste into rich soil.";

    let mut recent = RecentQuestions::new(32);
    let first = generate_follow_ups(query, answer, &mut recent);
    let second = generate_follow_ups(query, answer, &mut recent);

    for q in &first {
        assert!(!second.contains(q), "repeated follow-up: {q}");
    }
}

#[test]
fn follow_ups_empty_answer_yields_nothing() {
    let mut recent = RecentQuestions::new(8);
    assert!(generate_follow_ups("anything", "   ", &mut recent).is_empty());
}

#[test]
fn recent_questions_capacity_is_bounded() {
    let mut recent = RecentQuestions::new(2);
    recent.insert("one?");
    recent.insert("two?");
    recent.insert("three?");
    assert_eq!(recent.len(), 2);
    assert!(!recent.contains("one?"), "oldest entry evicted");
    assert!(recent.contains("three?"));
}
