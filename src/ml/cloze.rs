// ============================================================
// Layer 5 — Cloze Model (offline backend)
// ============================================================
// A QuestionModel that needs no network and no weights. It reads
// the answer and sentence back out of the synthesizer's prompt
// and blanks the answer out of the sentence:
//
//   answer_token: Wolf context: The Wolf chased Red Riding Hood
//   → "Fill in the blank: The ____ chased Red Riding Hood?"
//
// If the answer can't be found in the sentence (e.g. the prompt
// was truncated) it asks about the answer directly instead.
// Output is deterministic, which also makes this backend useful
// for demos and end-to-end checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::traits::{GenerationError, GenerationParams, QuestionModel};

const BLANK: &str = "____";

static PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^answer_token:\s*(.*?)\s+context:\s*(.*)$").expect("valid prompt pattern")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct ClozeModel;

impl ClozeModel {
    pub fn new() -> Self {
        Self
    }
}

impl QuestionModel for ClozeModel {
    fn name(&self) -> &str {
        "cloze"
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        let caps = PROMPT.captures(prompt).ok_or_else(|| {
            GenerationError::Inference(format!("unrecognised prompt: {prompt:?}"))
        })?;
        let answer  = caps[1].trim();
        let context = caps[2].trim();

        let question = if !answer.is_empty() && context.contains(answer) {
            format!("Fill in the blank: {}?", context.replacen(answer, BLANK, 1))
        } else {
            format!("What does the passage say about {answer}?")
        };

        Ok(limit_words(&question, params.max_output_len))
    }
}

fn limit_words(text: &str, max_words: usize) -> String {
    if text.split_whitespace().count() <= max_words {
        return text.to_string();
    }
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prompt: &str) -> String {
        ClozeModel::new().generate(prompt, &GenerationParams::default()).unwrap()
    }

    #[test]
    fn test_answer_is_blanked_once() {
        let q = run("answer_token: Wolf context: The Wolf met another Wolf");
        assert_eq!(q, "Fill in the blank: The ____ met another Wolf?");
    }

    #[test]
    fn test_missing_answer_asks_directly() {
        let q = run("answer_token: lantern context: The light was warm");
        assert_eq!(q, "What does the passage say about lantern?");
    }

    #[test]
    fn test_malformed_prompt_is_an_inference_error() {
        let err = ClozeModel::new().generate("hello", &GenerationParams::default());
        assert!(matches!(err, Err(GenerationError::Inference(_))));
    }

    #[test]
    fn test_output_respects_word_limit() {
        let params = GenerationParams { max_output_len: 3, ..Default::default() };
        let q = ClozeModel::new()
            .generate("answer_token: x context: a b c d e", &params)
            .unwrap();
        assert_eq!(q.split_whitespace().count(), 3);
    }
}
