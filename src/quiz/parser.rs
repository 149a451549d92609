// ============================================================
// Quiz Parser
// ============================================================
// Recovers structured QuestionRecords from loosely formatted quiz
// text (see formatter.rs for the canonical layout).
//
// Step 1 — Segmentation
//   A block starts at a line of the form "<digits>. <text>" and runs
//   up to the next such line or the end of input. The number itself
//   is ignored: only order of appearance matters, so duplicate or
//   out-of-order numbers are fine. Text before the first numbered
//   line is discarded.
//
// Step 2 — Classification (ordered chain, first match wins)
//   multiple_choice  a line starting with "A)" .. "D)"
//   true_or_false    "Answer: True" / "Answer: False" (any case)
//   essay            the word "essay" anywhere (any case)
//   identification   everything else
//
// Step 3 — Extraction
//   Classification and validity are separate gates: a block can be
//   classified multiple_choice and still be dropped because it has
//   fewer than two options or no usable "Answer: <letter>" line.
//
// The parser is total: malformed blocks are dropped with a debug
// log, never an error. An empty result for non-empty input is the
// caller's signal that the whole generation attempt failed.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::question::{QuestionKind, QuestionRecord};

static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.(?:\s+(.*))?$").expect("valid block pattern"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[A-D]\)").expect("valid option pattern"));

static OPTION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])\)\s+(.+)").expect("valid option text pattern"));

static TRUE_FALSE_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Answer:\s*(true|false)").expect("valid true/false pattern"));

static LETTER_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Answer:\s*([A-D])").expect("valid letter pattern"));

static FREE_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Answer:\s*([^\n]+)").expect("valid answer pattern"));

/// Ordered classification chain. Identification is the fall-through.
const CLASSIFIERS: [(QuestionKind, fn(&str) -> bool); 3] = [
    (QuestionKind::MultipleChoice, has_option_lines),
    (QuestionKind::TrueOrFalse,    has_true_false_answer),
    (QuestionKind::Essay,          mentions_essay),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct QuizParser;

impl QuizParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Vec<QuestionRecord> {
        let blocks  = segment(content);
        let records: Vec<QuestionRecord> = blocks
            .iter()
            .filter_map(|block| {
                let parsed = parse_block(block);
                if parsed.is_none() {
                    tracing::debug!("Dropping malformed question block: {:?}", block);
                }
                parsed
            })
            .collect();

        tracing::debug!("Parsed {} of {} question blocks", records.len(), blocks.len());
        records
    }
}

/// Split content into question blocks, leading "<n>." removed.
pub fn segment(content: &str) -> Vec<String> {
    let mut blocks:  Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if let Some(caps) = BLOCK_START.captures(line) {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            let first = caps.get(1).map_or("", |m| m.as_str());
            current = Some(first.to_string());
        } else if let Some(block) = current.as_mut() {
            block.push('\n');
            block.push_str(line);
        }
    }
    blocks.extend(current);

    blocks
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

/// Decide what kind of question a block is.
pub fn classify(block: &str) -> QuestionKind {
    CLASSIFIERS
        .iter()
        .find(|(_, matches)| matches(block))
        .map_or(QuestionKind::Identification, |(kind, _)| *kind)
}

fn parse_block(block: &str) -> Option<QuestionRecord> {
    let question = block
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())?
        .to_string();

    match classify(block) {
        QuestionKind::MultipleChoice => parse_multiple_choice(question, block),
        QuestionKind::TrueOrFalse    => Some(parse_true_false(question, block)),
        kind                         => Some(parse_free_text(kind, question, block)),
    }
}

fn has_option_lines(block: &str) -> bool {
    OPTION_LINE.is_match(block)
}

fn has_true_false_answer(block: &str) -> bool {
    TRUE_FALSE_ANSWER.is_match(block)
}

fn mentions_essay(block: &str) -> bool {
    block.to_lowercase().contains("essay")
}

fn parse_multiple_choice(question: String, block: &str) -> Option<QuestionRecord> {
    let mut options: Vec<String> = Vec::new();
    let mut letter:  Option<char> = None;

    for line in block.lines().map(str::trim) {
        if let Some(caps) = OPTION_TEXT.captures(line) {
            options.push(caps[2].trim().to_string());
        }
        if let Some(caps) = LETTER_ANSWER.captures(line) {
            letter = caps[1].chars().next().map(|c| c.to_ascii_uppercase());
        }
    }

    let letter = letter?;
    let index  = (letter as u8 - b'A') as usize;
    if options.len() < 2 || index >= options.len() {
        return None;
    }
    Some(QuestionRecord::multiple_choice(question, options, letter))
}

fn parse_true_false(question: String, block: &str) -> QuestionRecord {
    let value = TRUE_FALSE_ANSWER
        .captures(block)
        .map(|caps| caps[1].eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    QuestionRecord::true_or_false(question, value)
}

fn parse_free_text(kind: QuestionKind, question: String, block: &str) -> QuestionRecord {
    let answer = FREE_ANSWER
        .captures(block)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();
    QuestionRecord::free_text(kind, question, answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<QuestionRecord> {
        QuizParser::new().parse(content)
    }

    #[test]
    fn test_mixed_document_parses_every_kind() {
        let content = "1. Q?\nA) x\nB) y\nAnswer: B\n\n2. True?\nAnswer: True\n\n3. Name?\nAnswer: Paris";
        let records = parse(content);

        assert_eq!(records.len(), 3);

        assert_eq!(records[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(records[0].question, "Q?");
        assert_eq!(records[0].options, vec!["x", "y"]);
        assert_eq!(records[0].answer, "B");

        assert_eq!(records[1].kind, QuestionKind::TrueOrFalse);
        assert_eq!(records[1].answer, "True");

        assert_eq!(records[2].kind, QuestionKind::Identification);
        assert_eq!(records[2].answer, "Paris");
    }

    #[test]
    fn test_numbers_are_ignored_for_ordering() {
        let content = "7. Seventh?\nAnswer: a\n3. Third?\nAnswer: b\n3. Third again?\nAnswer: c";
        let questions: Vec<String> = parse(content).into_iter().map(|r| r.question).collect();
        assert_eq!(questions, vec!["Seventh?", "Third?", "Third again?"]);
    }

    #[test]
    fn test_preamble_before_first_number_is_ignored() {
        let records = parse("Here is your quiz:\n\n1. Who?\nAnswer: Wolf");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Who?");
    }

    #[test]
    fn test_multiple_choice_without_answer_line_is_dropped() {
        let records = parse("1. Q?\nA) x\nB) y\n\n2. Next?\nAnswer: ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Next?");
    }

    #[test]
    fn test_multiple_choice_with_single_option_is_dropped() {
        assert!(parse("1. Q?\nA) only\nAnswer: A").is_empty());
    }

    #[test]
    fn test_answer_letter_outside_options_is_dropped() {
        assert!(parse("1. Q?\nA) x\nB) y\nAnswer: D").is_empty());
    }

    #[test]
    fn test_lowercase_answers_are_normalised() {
        let records = parse("1. Q?\nA) x\nB) y\nanswer: b\n2. Sky is green?\nanswer: FALSE");
        assert_eq!(records[0].answer, "B");
        assert_eq!(records[1].kind, QuestionKind::TrueOrFalse);
        assert_eq!(records[1].answer, "False");
    }

    #[test]
    fn test_options_beat_true_false_answer() {
        let records = parse("1. Pick one\nA) True\nB) False\nAnswer: True");
        // classified multiple_choice, but no letter answer → dropped
        assert!(records.is_empty());
    }

    #[test]
    fn test_essay_tag_and_missing_answer() {
        let records = parse("1. Write a short essay about the lantern.\n\n2. Describe the wolf.");
        assert_eq!(records[0].kind, QuestionKind::Essay);
        assert_eq!(records[0].answer, "");
        assert_eq!(records[1].kind, QuestionKind::Identification);
        assert_eq!(records[1].answer, "");
    }

    #[test]
    fn test_essay_with_reference_answer() {
        let records = parse("1. Essay: why did the pig build with bricks?\nAnswer: To stay safe");
        assert_eq!(records[0].kind, QuestionKind::Essay);
        assert_eq!(records[0].answer, "To stay safe");
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify("Q\nA) a\nAnswer: True essay"), QuestionKind::MultipleChoice);
        assert_eq!(classify("Q essay\nAnswer: false"), QuestionKind::TrueOrFalse);
        assert_eq!(classify("Q essay"), QuestionKind::Essay);
        assert_eq!(classify("Q"), QuestionKind::Identification);
    }

    #[test]
    fn test_question_on_line_after_number() {
        let records = parse("1.\n   What did Esperanza see?\nAnswer: a lantern");
        assert_eq!(records[0].question, "What did Esperanza see?");
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("no numbered lines here\nAnswer: x").is_empty());
    }
}
