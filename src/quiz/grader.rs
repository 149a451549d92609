// ============================================================
// Answer Grader
// ============================================================
// Scores a free-text answer against a reference answer, in [0, 1].
//
// Policy, first rule that fires wins:
//   1. either side blank                      → 0.0
//   2. equal after trim + lowercase           → 1.0
//   3. keyword overlap: reference tokens longer than 3 chars;
//      fraction found (as substrings) in the user answer,
//      returned when above 0.5
//   4. character similarity ratio, returned when above 0.5
//   5. otherwise                              → 0.0
//
// Lenient towards paraphrase, strict about full marks: only an
// exact (normalised) match ever scores 1.0 through rule 2, and
// the grader is a pure function, so regrading is idempotent.

use crate::quiz::similarity::char_ratio;

/// Keyword-overlap fraction must exceed this to count
pub const KEYWORD_THRESHOLD: f64 = 0.5;

/// Similarity ratio must exceed this to count
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Reference tokens must be longer than this to be keywords
pub const MIN_KEYWORD_CHARS: usize = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct AnswerGrader;

impl AnswerGrader {
    pub fn new() -> Self {
        Self
    }

    pub fn grade(&self, user_answer: &str, reference_answer: &str) -> f64 {
        let user      = user_answer.trim().to_lowercase();
        let reference = reference_answer.trim().to_lowercase();

        if user.is_empty() || reference.is_empty() {
            return 0.0;
        }
        if user == reference {
            return 1.0;
        }

        let keywords: Vec<&str> = reference
            .split_whitespace()
            .filter(|kw| kw.chars().count() > MIN_KEYWORD_CHARS)
            .collect();
        if !keywords.is_empty() {
            let matched = keywords.iter().filter(|kw| user.contains(**kw)).count();
            let overlap = matched as f64 / keywords.len() as f64;
            if overlap > KEYWORD_THRESHOLD {
                return overlap;
            }
        }

        let ratio = char_ratio(&user, &reference);
        if ratio > SIMILARITY_THRESHOLD { ratio } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(user: &str, reference: &str) -> f64 {
        AnswerGrader::new().grade(user, reference)
    }

    #[test]
    fn test_blank_inputs_score_zero() {
        assert_eq!(grade("", "Paris"), 0.0);
        assert_eq!(grade("Paris", ""), 0.0);
        assert_eq!(grade("   ", "   "), 0.0);
    }

    #[test]
    fn test_exact_match_ignores_case_and_whitespace() {
        assert_eq!(grade("  the Big Bad Wolf ", "The big bad wolf"), 1.0);
    }

    #[test]
    fn test_keyword_overlap_gives_partial_credit() {
        // keywords: golden, lantern, window → 2 of 3 present
        let score = grade("a golden lantern", "the golden lantern in the window");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_keyword_overlap_falls_through_to_similarity() {
        // 1 of 3 keywords → not enough; strings too different → 0
        assert_eq!(grade("window", "golden lantern window"), 0.0);
    }

    #[test]
    fn test_similarity_fallback_catches_spelling_variants() {
        // "color" has no keyword hit in "colour" but is very similar
        let score = grade("colour", "color");
        assert!(score > 0.9 && score < 1.0);
    }

    #[test]
    fn test_unrelated_answer_scores_zero() {
        assert_eq!(grade("banana", "Red Riding Hood"), 0.0);
    }

    #[test]
    fn test_grading_is_idempotent() {
        let first  = grade("the wolf ate grandma", "The wolf swallowed grandmother");
        let second = grade("the wolf ate grandma", "The wolf swallowed grandmother");
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn test_similarity_score_is_exact() {
        // 1 of 3 keywords; 18 matched chars of 50
        assert_eq!(grade("the wolf ate grandma", "The wolf swallowed grandmother"), 0.72);
    }
}
