// ============================================================
// Layer 4 — Sentence Splitter
// ============================================================
// Turns source text into the sentences questions are built from.
//
//   1. Keep only the first `max_chars` characters of the text
//      (the generation model is slow; long inputs are cut).
//   2. Split on runs of sentence-terminal punctuation: . ! ?
//   3. Trim each piece and drop anything of 15 characters or
//      fewer; fragments that short rarely hold a question.
//
// Example:
//   "Hi. The Wolf waited by the old mill!! Why?"
//   → ["The Wolf waited by the old mill"]
//
// Lengths are counted in characters, not bytes, so multi-byte
// text never gets cut inside a code point.

use std::sync::LazyLock;

use regex::Regex;

/// Sentences must be longer than this many characters
pub const MIN_SENTENCE_CHARS: usize = 15;

static TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid terminator pattern"));

pub struct SentenceSplitter {
    max_chars: usize,
}

impl SentenceSplitter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let text = truncate_chars(text.trim(), self.max_chars);
        TERMINATORS
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .map(str::to_string)
            .collect()
    }
}

/// First `max` characters of `text`, as a borrowed slice.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_fragments_are_dropped() {
        let s = SentenceSplitter::new(1000);
        let out = s.split("Hi. The Wolf waited by the old mill!! Why?");
        assert_eq!(out, vec!["The Wolf waited by the old mill"]);
    }

    #[test]
    fn test_repeated_terminators_split_once() {
        let s = SentenceSplitter::new(1000);
        let out = s.split("Esperanza lived on Mango Street... The lantern shone brightly?!");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], "The lantern shone brightly");
    }

    #[test]
    fn test_exactly_sixteen_chars_is_kept() {
        let s = SentenceSplitter::new(1000);
        assert_eq!(s.split("abcdefghijklmnop.").len(), 1);
        assert!(s.split("abcdefghijklmno.").is_empty());
    }

    #[test]
    fn test_input_is_truncated_before_splitting() {
        let s    = SentenceSplitter::new(20);
        let text = "The first sentence is long enough. The second one is never seen.";
        let out  = s.split(text);
        assert_eq!(out, vec!["The first sentence i"]);
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
