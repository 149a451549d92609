// ============================================================
// Layer 3 — Question Domain Types
// ============================================================
// Three types live here:
//
//   GeneratedItem  — one (question, answer, sentence) triple straight
//                    out of the generation model. Short-lived: it is
//                    consumed by the formatter as soon as it exists.
//
//   QuestionRecord — the durable unit recovered by the parser and
//                    handed to the presentation layer and the grader.
//
//   QuestionMix    — how many questions of each kind were requested.
//
// Invariants on QuestionRecord (enforced by the parser, the only
// producer of records):
//   multiple_choice → answer is one letter A–D indexing into options,
//                     options.len() >= 2
//   true_or_false   → answer is exactly "True" or "False"
//   identification  → free text
//   essay           → free text, usually empty
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four question kinds a quiz can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueOrFalse,
    Identification,
    Essay,
}

impl QuestionKind {
    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::TrueOrFalse    => "true_or_false",
            QuestionKind::Identification => "identification",
            QuestionKind::Essay          => "essay",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthesized question/answer unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedItem {
    pub question:        String,
    pub answer:          String,
    pub source_sentence: String,
}

impl GeneratedItem {
    pub fn new(
        question:        impl Into<String>,
        answer:          impl Into<String>,
        source_sentence: impl Into<String>,
    ) -> Self {
        Self {
            question:        question.into(),
            answer:          answer.into(),
            source_sentence: source_sentence.into(),
        }
    }
}

/// A parsed, structured quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// First non-empty line of the question block, number stripped
    pub question: String,

    /// Option texts in A, B, C, D order (multiple_choice only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Letter, "True"/"False" or free text depending on `kind`
    #[serde(default)]
    pub answer: String,
}

impl QuestionRecord {
    pub fn multiple_choice(
        question: impl Into<String>,
        options:  Vec<String>,
        letter:   char,
    ) -> Self {
        Self {
            kind:     QuestionKind::MultipleChoice,
            question: question.into(),
            options,
            answer:   letter.to_string(),
        }
    }

    pub fn true_or_false(question: impl Into<String>, value: bool) -> Self {
        Self {
            kind:     QuestionKind::TrueOrFalse,
            question: question.into(),
            options:  Vec::new(),
            answer:   if value { "True" } else { "False" }.to_string(),
        }
    }

    pub fn free_text(
        kind:     QuestionKind,
        question: impl Into<String>,
        answer:   impl Into<String>,
    ) -> Self {
        Self {
            kind,
            question: question.into(),
            options:  Vec::new(),
            answer:   answer.into(),
        }
    }

    /// For multiple_choice: the zero-based option index the answer
    /// letter points at, if it is in range.
    pub fn answer_index(&self) -> Option<usize> {
        if self.kind != QuestionKind::MultipleChoice {
            return None;
        }
        let mut chars = self.answer.chars();
        let letter = chars.next()?;
        if chars.next().is_some() || !('A'..='D').contains(&letter) {
            return None;
        }
        let idx = (letter as u8 - b'A') as usize;
        (idx < self.options.len()).then_some(idx)
    }

    /// The text of the correct option (multiple_choice) or the answer itself.
    pub fn answer_text(&self) -> &str {
        match self.answer_index() {
            Some(idx) => &self.options[idx],
            None      => &self.answer,
        }
    }
}

/// Requested number of questions per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMix {
    #[serde(default)]
    pub multiple_choice: usize,
    #[serde(default)]
    pub true_or_false:   usize,
    #[serde(default)]
    pub identification:  usize,
    #[serde(default)]
    pub essay:           usize,
}

impl QuestionMix {
    /// Total number of generated items the driver should aim for.
    /// Counts every requested kind, true_or_false included.
    pub fn total(&self) -> usize {
        self.multiple_choice + self.true_or_false + self.identification + self.essay
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
