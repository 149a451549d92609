// ============================================================
// Layer 5 — Question Synthesizer
// ============================================================
// Turns one (sentence, answer) pair into question text using the
// generation model:
//
//   1. Prompt:   "answer_token: <answer> context: <sentence>"
//   2. Budget:   prompt cut to params.max_input_len tokens
//   3. Generate: model.generate(prompt, params)
//   4. Clean:    drop a leading "question:" label (any case), trim
//   5. Filter:   8 characters or fewer is a degenerate generation
//
// Outcomes:
//   Ok(Some(q)) → usable question
//   Ok(None)    → skip this candidate, try the next one
//                 (degenerate output or a timed-out call)
//   Err(_)      → model unavailable / inference failed
//
// Output is sampled, so the same pair can give different text on
// different calls. Tests must assert on shape, not wording.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::traits::{GenerationError, GenerationParams, QuestionModel};
use crate::infra::tokenizer_store::PromptBudget;

/// Questions must be longer than this many characters
pub const MIN_QUESTION_CHARS: usize = 8;

static QUESTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^question:\s*").expect("valid label pattern"));

/// Build the generation prompt for an answer span in its sentence.
pub fn build_prompt(sentence: &str, answer: &str) -> String {
    format!("answer_token: {answer} context: {sentence}")
}

/// Strip the label some models prepend and reject degenerate output.
pub fn clean_output(raw: &str) -> Option<String> {
    let trimmed  = raw.trim();
    let question = QUESTION_LABEL.replace(trimmed, "").trim().to_string();
    (question.chars().count() > MIN_QUESTION_CHARS).then_some(question)
}

pub struct QuestionSynthesizer<'m> {
    model:  &'m dyn QuestionModel,
    budget: PromptBudget,
    params: GenerationParams,
}

impl<'m> QuestionSynthesizer<'m> {
    pub fn new(model: &'m dyn QuestionModel, budget: PromptBudget, params: GenerationParams) -> Self {
        Self { model, budget, params }
    }

    pub fn synthesize(&self, sentence: &str, answer: &str) -> Result<Option<String>> {
        let prompt = self.budget.truncate(&build_prompt(sentence, answer), self.params.max_input_len);

        let raw = match self.model.generate(&prompt, &self.params) {
            Ok(raw) => raw,
            Err(GenerationError::Timeout(after)) => {
                tracing::warn!(
                    "Generation for answer '{}' timed out after {:?}, skipping",
                    answer,
                    after
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Model '{}' failed", self.model.name()));
            }
        };

        let question = clean_output(&raw);
        match &question {
            Some(q) => tracing::debug!("Generated question for '{}': {}", answer, q),
            None    => tracing::debug!("Discarding degenerate output for '{}': {:?}", answer, raw),
        }
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Returns canned outputs in order and records every prompt.
    struct Scripted {
        outputs: RefCell<Vec<Result<String, GenerationError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(outputs: Vec<Result<String, GenerationError>>) -> Self {
            Self { outputs: RefCell::new(outputs), prompts: RefCell::new(Vec::new()) }
        }
    }

    impl QuestionModel for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(&self, prompt: &str, _: &GenerationParams) -> Result<String, GenerationError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.outputs.borrow_mut().remove(0)
        }
    }

    fn synth(model: &Scripted) -> QuestionSynthesizer<'_> {
        QuestionSynthesizer::new(model, PromptBudget::Words, GenerationParams::default())
    }

    #[test]
    fn test_prompt_embeds_answer_then_sentence() {
        let model = Scripted::new(vec![Ok("Who chased Red Riding Hood?".into())]);
        synth(&model).synthesize("The Wolf chased Red Riding Hood", "Wolf").unwrap();
        assert_eq!(
            model.prompts.borrow()[0],
            "answer_token: Wolf context: The Wolf chased Red Riding Hood"
        );
    }

    #[test]
    fn test_question_label_is_stripped() {
        let model = Scripted::new(vec![Ok("QUESTION:  Who chased Red?".into())]);
        let q = synth(&model).synthesize("The Wolf chased Red", "Wolf").unwrap();
        assert_eq!(q.as_deref(), Some("Who chased Red?"));
    }

    #[test]
    fn test_short_output_is_discarded() {
        let model = Scripted::new(vec![Ok("question: Who?".into())]);
        assert_eq!(synth(&model).synthesize("The Wolf chased Red", "Wolf").unwrap(), None);
    }

    #[test]
    fn test_timeout_skips_instead_of_failing() {
        let model = Scripted::new(vec![Err(GenerationError::Timeout(Duration::from_secs(1)))]);
        assert_eq!(synth(&model).synthesize("The Wolf chased Red", "Wolf").unwrap(), None);
    }

    #[test]
    fn test_unavailable_model_is_an_error() {
        let model = Scripted::new(vec![Err(GenerationError::Unavailable("offline".into()))]);
        assert!(synth(&model).synthesize("The Wolf chased Red", "Wolf").is_err());
    }

    #[test]
    fn test_clean_output_boundary() {
        assert_eq!(clean_output("12345678"), None);
        assert_eq!(clean_output("123456789").as_deref(), Some("123456789"));
    }
}
