use localqa_text::{
    extract_keywords, in_score_band, score_sentence, segment, split_fragments, split_sentences,
};

#[test]
fn split_sentences_on_terminal_punctuation_and_newlines() {
    let units = split_sentences("First one. Second one!\nThird line\nFourth?");
    assert_eq!(
        units,
        vec!["First one.", "Second one!", "Third line", "Fourth?"]
    );
}

#[test]
fn split_fragments_also_breaks_on_clause_punctuation() {
    let fragments = split_fragments("One, two; three: four.");
    assert_eq!(fragments, vec!["One,", "two;", "three:", "four."]);
}

#[test]
fn segment_empty_and_whitespace_input_yields_nothing() {
    assert!(segment("", 100, 20).is_empty());
    assert!(segment("   \n\t  ", 100, 20).is_empty());
}

#[test]
fn segment_preserves_every_sentence_unit() {
    let text = "Tomatoes need full sun. Water them deeply twice a week. \
                Mulch keeps the soil moist. Prune suckers for larger fruit. \
                Harvest when fully colored. Store at room temperature.";
    let chunks = segment(text, 80, 20);
    assert!(chunks.len() > 1, "text should span multiple chunks");

    let joined = chunks.join(" ");
    for unit in split_sentences(text) {
        assert!(joined.contains(&unit), "unit dropped: {unit}");
    }
}

#[test]
fn segment_seeds_next_chunk_with_character_overlap() {
    let text = "Alpha bravo charlie delta echo. Foxtrot golf hotel india juliett.";
    let chunks = segment(text, 40, 10);
    assert_eq!(chunks.len(), 2);

    let first = &chunks[0];
    let carry: String = {
        let chars: Vec<char> = first.chars().collect();
        chars[chars.len() - 10..].iter().collect()
    };
    assert!(
        chunks[1].starts_with(&carry),
        "second chunk should start with the overlap carry"
    );
}

#[test]
fn segment_never_truncates_an_oversized_sentence() {
    let long = "This single sentence is far longer than the configured chunk size \
                and must be emitted whole as one oversized chunk.";
    let chunks = segment(long, 30, 10);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], long);
}

#[test]
fn segment_is_deterministic() {
    let text = "One sentence here. Another sentence there. And a third one follows.";
    assert_eq!(segment(text, 50, 10), segment(text, 50, 10));
}

#[test]
fn extract_keywords_drops_stop_words_and_short_tokens() {
    let kw = extract_keywords("What is the capital of France?");
    assert_eq!(kw, vec!["capital", "france"]);
}

#[test]
fn extract_keywords_deduplicates_in_first_seen_order() {
    let kw = extract_keywords("Compost, compost and more compost for gardens");
    assert_eq!(kw, vec!["compost", "gardens"]);
}

#[test]
fn score_sentence_is_match_ratio() {
    let kw = extract_keywords("tomato watering schedule");
    let full = score_sentence("The tomato watering schedule is weekly.", &kw);
    assert!((full - 1.0).abs() < f32::EPSILON);

    let partial = score_sentence("The tomato patch looks healthy.", &kw);
    assert!((partial - 1.0 / 3.0).abs() < 1e-6);

    assert_eq!(score_sentence("Anything at all.", &[]), 0.0);
}

#[test]
fn score_band_excludes_fragments_and_walls_of_text() {
    assert!(!in_score_band("Too short."));
    assert!(in_score_band("This sentence is comfortably inside the band."));
    let wall = "x".repeat(500);
    assert!(!in_score_band(&wall));
}
