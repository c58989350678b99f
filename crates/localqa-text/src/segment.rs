use crate::sentence::split_sentences;

/// Split `text` into ordered, overlapping chunks of roughly
/// `chunk_size` characters.
///
/// Sentence-like units are accumulated into a running buffer; when the
/// next unit would push the buffer past `chunk_size` the chunk is closed
/// and the next one is seeded with the trailing `overlap` characters of
/// the closed chunk. The carry is character-level, not sentence-aligned,
/// so context survives chunk boundaries.
///
/// The size bound is soft: a single unit longer than `chunk_size` becomes
/// its own oversized chunk rather than being truncated mid-unit.
/// Whitespace-only input yields an empty Vec. Same input and parameters
/// always produce the same chunk sequence.
pub fn segment(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let units = split_sentences(text);
    if units.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut buf = String::new();
    for unit in units {
        let unit_len = unit.chars().count();
        if !buf.is_empty() && buf.chars().count() + 1 + unit_len > chunk_size {
            let carry = tail_chars(&buf, overlap);
            chunks.push(buf);
            buf = carry;
        }
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(&unit);
    }
    if !buf.trim().is_empty() {
        chunks.push(buf);
    }
    chunks
}

fn tail_chars(s: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    let count = s.chars().count();
    if count <= n {
        return s.to_string();
    }
    s.chars().skip(count - n).collect()
}
