/// Split raw text into sentence-like units on terminal punctuation and
/// line breaks.
///
/// Units keep their terminal punctuation; surrounding whitespace is
/// trimmed and empty units are dropped. A trailing run without terminal
/// punctuation still becomes a unit.
pub fn split_sentences(text: &str) -> Vec<String> {
    split_on(text, |ch| matches!(ch, '.' | '!' | '?' | '\n'))
}

/// Split answer text into phrase-sized fragments for streamed delivery.
///
/// Fragments break on sentence and clause punctuation so each piece reads
/// as a natural unit when rendered incrementally.
pub fn split_fragments(text: &str) -> Vec<String> {
    split_on(text, |ch| {
        matches!(ch, '.' | '!' | '?' | ',' | ';' | ':' | '\n')
    })
}

fn split_on(text: &str, is_boundary: impl Fn(char) -> bool) -> Vec<String> {
    let mut units = Vec::new();
    let mut buf = String::new();
    for ch in text.chars() {
        buf.push(ch);
        if is_boundary(ch) {
            let unit = buf.trim();
            if !unit.is_empty() {
                units.push(unit.to_string());
            }
            buf.clear();
        }
    }
    let tail = buf.trim();
    if !tail.is_empty() {
        units.push(tail.to_string());
    }
    units
}
