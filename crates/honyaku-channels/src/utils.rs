//! Shared utilities for channel implementations.

/// Split a long message into chunks of at most `max_chars` characters.
///
/// Counts Unicode scalar values, not bytes, so CJK text is never cut inside a
/// character. Prefers splitting right after a newline when one falls inside
/// the window.
pub fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let break_at = if end < rest.len() {
            rest[..end].rfind('\n').map(|i| i + 1).unwrap_or(end)
        } else {
            end
        };
        chunks.push(&rest[..break_at]);
        rest = &rest[break_at..];
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_message() {
        assert_eq!(split_message("hello", 5000), vec!["hello"]);
        assert_eq!(split_message("", 5000), vec![""]);
    }

    #[test]
    fn test_split_counts_chars_not_bytes() {
        let text = "あ".repeat(10);
        let chunks = split_message(&text, 4);
        assert_eq!(chunks, vec!["ああああ", "ああああ", "ああ"]);
    }

    #[test]
    fn test_split_prefers_newlines() {
        let chunks = split_message("ab\ncdef", 4);
        assert_eq!(chunks, vec!["ab\n", "cdef"]);
    }

    #[test]
    fn test_split_long_message() {
        let text = "a\n".repeat(3000);
        let chunks = split_message(&text, 5000);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 5000);
        }
        assert_eq!(chunks.concat(), text);
    }
}
