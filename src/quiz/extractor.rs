// ============================================================
// Phrase Extractor
// ============================================================
// Picks up to two candidate answers from a sentence.
//
// Two tiers, first non-empty tier wins:
//   1. Proper nouns — tokens starting with an uppercase letter,
//      longer than 2 characters once edge punctuation is removed,
//      and not a capitalised article (The / A / An).
//   2. Content words — tokens longer than 4 characters that are
//      not function words.
//
// Proper nouns make the best quiz answers; long content words
// are the fallback when a sentence names nothing.

use serde::Serialize;

/// Maximum number of candidates kept per sentence
pub const MAX_CANDIDATES: usize = 2;

/// Characters stripped from both ends of a token
pub const EDGE_PUNCTUATION: &[char] = &[',', ';', ':', '"', '!', '?', '.'];

const ARTICLES: &[&str] = &["the", "a", "an"];

const STOP_WORDS: &[&str] = &[
    "is", "are", "was", "were", "the", "a", "an", "and", "or", "but",
    "in", "on", "at", "to", "for", "of", "with", "by", "from", "be",
    "been", "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "it", "that", "this", "which", "who",
    "what", "when", "where", "why", "how",
];

/// Which tier produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseOrigin {
    ProperNoun,
    ContentWord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePhrase {
    pub text:   String,
    pub origin: PhraseOrigin,
}

/// Remove edge punctuation from a whitespace token.
pub fn strip_token(token: &str) -> &str {
    token.trim_matches(EDGE_PUNCTUATION)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PhraseExtractor;

impl PhraseExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, sentence: &str) -> Vec<CandidatePhrase> {
        let proper: Vec<CandidatePhrase> = sentence
            .split_whitespace()
            .filter(|token| is_proper_noun(token))
            .take(MAX_CANDIDATES)
            .map(|token| candidate(token, PhraseOrigin::ProperNoun))
            .collect();

        if !proper.is_empty() {
            return proper;
        }

        sentence
            .split_whitespace()
            .filter(|token| is_content_word(token))
            .take(MAX_CANDIDATES)
            .map(|token| candidate(token, PhraseOrigin::ContentWord))
            .collect()
    }
}

fn candidate(token: &str, origin: PhraseOrigin) -> CandidatePhrase {
    CandidatePhrase {
        text: strip_token(token).to_string(),
        origin,
    }
}

fn is_proper_noun(token: &str) -> bool {
    let stripped = strip_token(token);
    let starts_upper = token.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && stripped.chars().count() > 2
        && !ARTICLES.contains(&stripped.to_lowercase().as_str())
}

fn is_content_word(token: &str) -> bool {
    let lowered = strip_token(token).to_lowercase();
    lowered.chars().count() > 4 && !STOP_WORDS.contains(&lowered.as_str())
}
