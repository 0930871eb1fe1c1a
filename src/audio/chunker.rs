//! Sentence-aligned text chunking for the length-limited synthesis backend.
//!
//! Greedy first-fit: sentences accumulate into the current chunk until the
//! next one would exceed the budget, then a new chunk starts. Order is
//! preserved and splits never land inside a sentence.

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Chunks break only at sentence boundaries (`.`, `!` or `?` followed by
/// whitespace). A single sentence longer than the budget passes through
/// unsplit; the backend decides what to do with it. Text that already fits
/// is returned as one chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();
        if !current.is_empty() && current_chars + sentence_chars + 1 > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current.is_empty() {
            current.push_str(sentence);
            current_chars = sentence_chars;
        } else {
            current.push(' ');
            current.push_str(sentence);
            current_chars += sentence_chars + 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split text after end-of-sentence punctuation followed by whitespace.
///
/// The whitespace run between sentences is consumed, so returned slices
/// carry no leading or trailing separator.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?')
            && let Some(&(_, next)) = iter.peek()
            && next.is_whitespace()
        {
            sentences.push(&text[start..i + c.len_utf8()]);
            while let Some(&(_, w)) = iter.peek() {
                if w.is_whitespace() {
                    iter.next();
                } else {
                    break;
                }
            }
            start = iter.peek().map(|&(j, _)| j).unwrap_or(text.len());
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}
