// ============================================================
// Quiz Text Formatter
// ============================================================
// Renders generated items into the numbered quiz document that
// QuizParser reads back. This text is the wire format between
// generation and parsing:
//
//   1. <question>
//   A) <correct answer>
//   B) <distractor or "Option 2">
//   C) <distractor or "Option 3">
//   D) <distractor or "Option 4">
//   Answer: A
//
//   2. <question>
//   Answer: <answer>
//
//   3. <question>
//
// Blocks are grouped by kind in the fixed order
//   multiple_choice → identification → essay
// and numbered continuously from 1. Items are consumed in order;
// when they run out, the remaining requested slots are skipped.
//
// Two known limitations are kept deliberately visible:
//   - the correct option is always A (no shuffling)
//   - true_or_false blocks are never emitted, although the parser
//     and grader understand them

use std::fmt::Write;

use crate::domain::question::{GeneratedItem, QuestionMix};
use crate::quiz::extractor::strip_token;

/// Distractors per multiple-choice question (options B, C, D)
pub const DISTRACTOR_COUNT: usize = 3;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

const DISTRACTOR_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "and",
    "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "it", "that", "this", "which", "who",
];

/// Wrong-but-plausible options taken from the answer's own sentence.
///
/// Tokens are stripped of edge punctuation and kept when they are
/// not stop words, not the correct answer (case-insensitive) and
/// longer than 2 characters. Duplicates are removed case-insensitively
/// keeping the first spelling. Missing slots are padded with
/// "Option 2", "Option 3", ... matching the option position.
pub fn distractors(sentence: &str, correct_answer: &str, count: usize) -> Vec<String> {
    let correct = correct_answer.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut out:  Vec<String> = Vec::new();

    for token in sentence.split_whitespace() {
        if out.len() == count {
            break;
        }
        let stripped = strip_token(token);
        let lowered  = stripped.to_lowercase();
        if DISTRACTOR_STOP_WORDS.contains(&lowered.as_str())
            || lowered == correct
            || stripped.chars().count() <= 2
            || seen.contains(&lowered)
        {
            continue;
        }
        seen.push(lowered);
        out.push(stripped.to_string());
    }

    if out.len() < count {
        tracing::debug!(
            "Only {} distractors found in sentence, padding with placeholders",
            out.len()
        );
    }
    for slot in out.len()..count {
        out.push(format!("Option {}", slot + 2));
    }
    out
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuizFormatter;

impl QuizFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, items: &[GeneratedItem], mix: &QuestionMix) -> String {
        if mix.true_or_false > 0 {
            tracing::warn!(
                "{} true_or_false questions requested, but the formatter does not emit that kind",
                mix.true_or_false
            );
        }

        let mut out     = String::new();
        let mut number  = 1usize;
        let mut pending = items.iter();

        for item in pending.by_ref().take(mix.multiple_choice) {
            let mut options = vec![item.answer.clone()];
            options.extend(distractors(&item.source_sentence, &item.answer, DISTRACTOR_COUNT));

            let _ = writeln!(out, "{number}. {}", item.question);
            for (letter, option) in OPTION_LETTERS.iter().zip(&options) {
                let _ = writeln!(out, "{letter}) {option}");
            }
            out.push_str("Answer: A\n\n");
            number += 1;
        }

        for item in pending.by_ref().take(mix.identification) {
            let _ = writeln!(out, "{number}. {}", item.question);
            let _ = writeln!(out, "Answer: {}\n", item.answer);
            number += 1;
        }

        for item in pending.by_ref().take(mix.essay) {
            let _ = writeln!(out, "{number}. {}\n", item.question);
            number += 1;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(q: &str, a: &str, s: &str) -> GeneratedItem {
        GeneratedItem::new(q, a, s)
    }

    #[test]
    fn test_distractors_skip_stop_words_and_answer() {
        let out = distractors("the quick brown fox jumps", "fox", 3);
        assert_eq!(out, vec!["quick", "brown", "jumps"]);
    }

    #[test]
    fn test_distractors_dedupe_case_insensitively() {
        let out = distractors("Wolf wolf WOLF howled", "moon", 3);
        assert_eq!(out, vec!["Wolf", "howled", "Option 4"]);
    }

    #[test]
    fn test_distractors_pad_with_positional_placeholders() {
        let out = distractors("the fox", "fox", 3);
        assert_eq!(out, vec!["Option 2", "Option 3", "Option 4"]);
    }

    #[test]
    fn test_multiple_choice_block_layout() {
        let items = vec![item("Who chased Red?", "Wolf", "The Wolf chased Red Riding Hood")];
        let mix   = QuestionMix { multiple_choice: 1, ..Default::default() };
        let text  = QuizFormatter::new().format(&items, &mix);

        assert_eq!(
            text,
            "1. Who chased Red?\nA) Wolf\nB) chased\nC) Red\nD) Riding\nAnswer: A\n\n"
        );
    }

    #[test]
    fn test_kinds_are_grouped_and_numbered_in_order() {
        let items = vec![
            item("Essay first in input?", "x", "sentence one here"),
            item("Where is Mango Street?", "Chicago", "sentence two here"),
            item("Describe the lantern.", "lantern", "sentence three here"),
        ];
        let mix  = QuestionMix { multiple_choice: 1, identification: 1, essay: 1, ..Default::default() };
        let text = QuizFormatter::new().format(&items, &mix);

        assert!(text.starts_with("1. Essay first in input?\nA) x\n"));
        assert!(text.contains("2. Where is Mango Street?\nAnswer: Chicago\n\n"));
        assert!(text.ends_with("3. Describe the lantern.\n\n"));
    }

    #[test]
    fn test_true_or_false_is_never_emitted() {
        let items = vec![item("Is the lantern golden?", "golden", "the golden lantern hung")];
        let mix   = QuestionMix { true_or_false: 1, ..Default::default() };
        assert!(QuizFormatter::new().format(&items, &mix).is_empty());
    }

    #[test]
    fn test_missing_items_leave_slots_empty() {
        let items = vec![item("Only one question?", "one", "only one sentence here")];
        let mix   = QuestionMix { multiple_choice: 0, identification: 3, ..Default::default() };
        let text  = QuizFormatter::new().format(&items, &mix);
        assert_eq!(text.matches("Answer:").count(), 1);
    }
}
