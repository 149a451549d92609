// ============================================================
// Layer 3 — Story Domain Types
// ============================================================
// A Story is one gold-standard text from a reference dataset
// (FairytaleQA-style) together with its own question/answer pairs.
// Stories are loaded once and never mutated afterwards.
//
// Datasets in the wild disagree on shape, so a story record is
// accepted in either of these forms:
//
//   { "story" | "text": "...",
//     "questions": { "q1": {question, answer, type}, ... } }
//
//   { "story" | "text": "...",
//     "questions": [ {question, answer, type}, ... ] }
//
// ReferenceAnswer is a derived view built on demand from a story's
// questions; nothing caches it.
//
// Reference: Rust Book §6 (Enums), serde_json::Value documentation

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag attached to every reference answer derived from a story
pub const REFERENCE_SOURCE: &str = "fairytale_qa";

/// Question type assumed when a dataset entry doesn't name one
pub const DEFAULT_REFERENCE_TYPE: &str = "factual";

/// Number of leading answer tokens kept as reference keywords
const KEYWORD_COUNT: usize = 5;

/// One gold question/answer pair as stored in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryQuestion {
    pub question: String,
    pub answer:   String,
    pub kind:     String,
}

impl StoryQuestion {
    /// Read a question entry leniently: missing fields become empty
    /// strings, a missing type becomes "factual", and list-valued
    /// answers contribute their first string.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).map(value_text).unwrap_or_default();
        let kind  = field("type");
        Self {
            question: field("question"),
            answer:   field("answer"),
            kind:     if kind.is_empty() { DEFAULT_REFERENCE_TYPE.to_string() } else { kind },
        }
    }
}

/// The two shapes a story's question collection can take.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSet {
    /// question-id → question, in file order
    Keyed(Vec<(String, StoryQuestion)>),
    /// positional questions; ids are synthesised as "<story>_<index>"
    Listed(Vec<StoryQuestion>),
    /// record had no usable "questions" field
    Missing,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        match self {
            QuestionSet::Keyed(items)  => items.len(),
            QuestionSet::Listed(items) => items.len(),
            QuestionSet::Missing       => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A reference story, owned by the ReferenceCorpus.
#[derive(Debug, Clone)]
pub struct Story {
    pub id:        String,
    pub text:      Option<String>,
    pub questions: QuestionSet,

    /// Compact JSON of the whole record; stands in for the story
    /// text when the record has neither "story" nor "text".
    record_repr: String,
}

impl Story {
    /// Build a story from one dataset record.
    /// Fails only when the record is not a JSON object.
    pub fn from_record(id: impl Into<String>, record: &Value) -> Result<Self> {
        let id = id.into();
        let Some(obj) = record.as_object() else {
            bail!("story '{id}' is not an object");
        };

        let text = ["story", "text"]
            .iter()
            .filter_map(|key| obj.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string);

        let questions = match obj.get("questions") {
            Some(Value::Object(map))  => QuestionSet::Keyed(keyed_questions(map)),
            Some(Value::Array(items)) => {
                QuestionSet::Listed(items.iter().map(StoryQuestion::from_value).collect())
            }
            _ => QuestionSet::Missing,
        };

        Ok(Self {
            id,
            text,
            questions,
            record_repr: record.to_string(),
        })
    }

    /// Text used for similarity matching
    pub fn match_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.record_repr)
    }

    /// Derive the reference answers for this story.
    pub fn reference_answers(&self) -> Vec<ReferenceAnswer> {
        match &self.questions {
            QuestionSet::Keyed(items) => items
                .iter()
                .map(|(qid, q)| ReferenceAnswer::from_question(qid.clone(), q))
                .collect(),
            QuestionSet::Listed(items) => items
                .iter()
                .enumerate()
                .map(|(i, q)| ReferenceAnswer::from_question(format!("{}_{}", self.id, i), q))
                .collect(),
            QuestionSet::Missing => Vec::new(),
        }
    }
}

/// A gold answer with the handful of tokens used as grading keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAnswer {
    pub id:       String,
    pub question: String,
    pub answer:   String,
    #[serde(rename = "type")]
    pub kind:     String,
    pub keywords: Vec<String>,
    pub source:   String,
}

impl ReferenceAnswer {
    fn from_question(id: String, q: &StoryQuestion) -> Self {
        Self {
            id,
            question: q.question.clone(),
            answer:   q.answer.clone(),
            kind:     q.kind.clone(),
            keywords: q.answer
                .split_whitespace()
                .take(KEYWORD_COUNT)
                .map(str::to_string)
                .collect(),
            source:   REFERENCE_SOURCE.to_string(),
        }
    }
}

fn keyed_questions(map: &Map<String, Value>) -> Vec<(String, StoryQuestion)> {
    map.iter()
        .map(|(qid, v)| (qid.clone(), StoryQuestion::from_value(v)))
        .collect()
}

/// Best-effort string view of a JSON value.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .find_map(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_questions_keep_their_ids() {
        let record = json!({
            "story": "A fox met a crow.",
            "questions": {
                "q1": {"question": "Who met the crow?", "answer": "The clever fox", "type": "character"},
                "q2": {"question": "Where?", "answer": "In the woods"}
            }
        });
        let story   = Story::from_record("fox", &record).unwrap();
        let answers = story.reference_answers();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].id, "q1");
        assert_eq!(answers[0].kind, "character");
        assert_eq!(answers[1].kind, DEFAULT_REFERENCE_TYPE);
        assert_eq!(answers[0].source, REFERENCE_SOURCE);
    }

    #[test]
    fn test_listed_questions_get_synthesised_ids() {
        let record = json!({
            "text": "The hare raced the tortoise.",
            "questions": [{"question": "Who won?", "answer": "the slow and steady tortoise of the tale"}]
        });
        let answers = Story::from_record("race", &record).unwrap().reference_answers();
        assert_eq!(answers[0].id, "race_0");
        // only the first five answer tokens are keywords
        assert_eq!(answers[0].keywords, vec!["the", "slow", "and", "steady", "tortoise"]);
    }

    #[test]
    fn test_story_key_wins_over_text_and_falls_back_to_record() {
        let both = Story::from_record("a", &json!({"story": "S", "text": "T"})).unwrap();
        assert_eq!(both.match_text(), "S");

        let neither = Story::from_record("b", &json!({"title": "Untitled"})).unwrap();
        assert!(neither.match_text().contains("Untitled"));
        assert!(neither.reference_answers().is_empty());
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        assert!(Story::from_record("x", &json!("just a string")).is_err());
    }
}
