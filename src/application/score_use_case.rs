// ============================================================
// Layer 2 — Score Use Case
// ============================================================
// Grades one submission: a list of parsed questions plus one user
// answer per question (missing answers count as blank).
//
//   multiple_choice → the letter, or the text of an option
//   true_or_false   → "true" / "false", any case
//   identification  → AnswerGrader against the record's answer,
//                     or against a reference answer when the
//                     question resembles one from a matched story
//   essay           → AnswerGrader against a matched reference;
//                     without one the item is left ungraded
//
// An item is correct when its score reaches PASS_MARK.

use serde::Serialize;

use crate::domain::question::{QuestionKind, QuestionRecord};
use crate::domain::story::ReferenceAnswer;
use crate::quiz::{grader::AnswerGrader, similarity::char_ratio};

/// Minimum score for an item to count as correct
pub const PASS_MARK: f64 = 0.5;

/// A reference question must be at least this similar to be used
pub const REFERENCE_QUESTION_THRESHOLD: f64 = 0.4;

/// What an item's score was measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum GradeBasis {
    /// The record's own answer key
    AnswerKey,
    /// A gold answer from the reference corpus
    Reference(String),
    Ungraded,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemScore {
    pub number:      usize,
    #[serde(rename = "type")]
    pub kind:        QuestionKind,
    pub question:    String,
    pub user_answer: String,
    pub expected:    String,
    pub score:       Option<f64>,
    pub correct:     bool,
    pub basis:       GradeBasis,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub items:      Vec<ItemScore>,
    pub correct:    usize,
    pub total:      usize,
    pub percentage: f64,
}

pub struct ScoreUseCase {
    grader:     AnswerGrader,
    references: Vec<ReferenceAnswer>,
}

impl ScoreUseCase {
    /// `references` are the gold answers of the matched story, or empty.
    pub fn new(references: Vec<ReferenceAnswer>) -> Self {
        Self { grader: AnswerGrader::new(), references }
    }

    pub fn score(&self, questions: &[QuestionRecord], answers: &[String]) -> ScoreReport {
        if answers.len() != questions.len() {
            tracing::warn!(
                "{} answers for {} questions; missing answers count as blank",
                answers.len(),
                questions.len()
            );
        }

        let items: Vec<ItemScore> = questions
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let answer = answers.get(i).map_or("", String::as_str);
                self.score_item(i + 1, record, answer)
            })
            .collect();

        let correct    = items.iter().filter(|item| item.correct).count();
        let total      = items.len();
        let percentage = if total == 0 { 0.0 } else { correct as f64 * 100.0 / total as f64 };

        tracing::info!("Scored {}/{} ({:.1}%)", correct, total, percentage);
        ScoreReport { items, correct, total, percentage }
    }

    fn score_item(&self, number: usize, record: &QuestionRecord, user_answer: &str) -> ItemScore {
        let (expected, score, basis) = match record.kind {
            QuestionKind::MultipleChoice => {
                let hit = choice_letter(record, user_answer).is_some_and(|l| l == record.answer);
                (record.answer_text().to_string(), Some(points(hit)), GradeBasis::AnswerKey)
            }
            QuestionKind::TrueOrFalse => {
                let hit = user_answer.trim().eq_ignore_ascii_case(&record.answer);
                (record.answer.clone(), Some(points(hit)), GradeBasis::AnswerKey)
            }
            QuestionKind::Identification => match self.reference_for(&record.question) {
                Some(reference) => self.against_reference(reference, user_answer),
                None => (
                    record.answer.clone(),
                    Some(self.grader.grade(user_answer, &record.answer)),
                    GradeBasis::AnswerKey,
                ),
            },
            QuestionKind::Essay => match self.reference_for(&record.question) {
                Some(reference) => self.against_reference(reference, user_answer),
                None => (String::new(), None, GradeBasis::Ungraded),
            },
        };

        ItemScore {
            number,
            kind:        record.kind,
            question:    record.question.clone(),
            user_answer: user_answer.to_string(),
            expected,
            correct:     score.is_some_and(|s| s >= PASS_MARK),
            score,
            basis,
        }
    }

    fn against_reference(&self, reference: &ReferenceAnswer, user_answer: &str) -> (String, Option<f64>, GradeBasis) {
        (
            reference.answer.clone(),
            Some(self.grader.grade(user_answer, &reference.answer)),
            GradeBasis::Reference(reference.id.clone()),
        )
    }

    /// The reference whose question is most similar to `question`.
    fn reference_for(&self, question: &str) -> Option<&ReferenceAnswer> {
        let wanted = question.trim().to_lowercase();
        self.references
            .iter()
            .map(|r| (r, char_ratio(&wanted, &r.question.trim().to_lowercase())))
            .filter(|(_, ratio)| *ratio > REFERENCE_QUESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }
}

fn points(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}

/// The option letter a multiple-choice answer designates: either the
/// letter itself or the text of one of the options.
fn choice_letter(record: &QuestionRecord, user_answer: &str) -> Option<String> {
    let answer = user_answer.trim();
    let upper  = answer.to_uppercase();
    if upper.len() == 1 && ('A'..='D').any(|l| upper.starts_with(l)) {
        return Some(upper);
    }
    record
        .options
        .iter()
        .position(|opt| opt.trim().eq_ignore_ascii_case(answer))
        .and_then(|idx| ['A', 'B', 'C', 'D'].get(idx))
        .map(char::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc() -> QuestionRecord {
        QuestionRecord::multiple_choice(
            "Who chased Red?",
            vec!["Wolf".into(), "chased".into(), "Riding".into(), "Hood".into()],
            'A',
        )
    }

    fn reference(id: &str, question: &str, answer: &str) -> ReferenceAnswer {
        ReferenceAnswer {
            id:       id.into(),
            question: question.into(),
            answer:   answer.into(),
            kind:     "factual".into(),
            keywords: Vec::new(),
            source:   "fairytale_qa".into(),
        }
    }

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multiple_choice_accepts_letter_or_option_text() {
        let uc = ScoreUseCase::new(Vec::new());
        let qs = vec![mc(), mc(), mc()];
        let report = uc.score(&qs, &answers(&["a", "wolf", "B"]));
        assert_eq!(report.items[0].score, Some(1.0));
        assert_eq!(report.items[1].score, Some(1.0));
        assert_eq!(report.items[2].score, Some(0.0));
        assert_eq!(report.correct, 2);
    }

    #[test]
    fn test_true_false_is_case_insensitive() {
        let uc = ScoreUseCase::new(Vec::new());
        let qs = vec![QuestionRecord::true_or_false("The sky is green.", false)];
        let report = uc.score(&qs, &answers(&["FALSE"]));
        assert!(report.items[0].correct);
    }

    #[test]
    fn test_identification_uses_answer_key_without_references() {
        let uc = ScoreUseCase::new(Vec::new());
        let qs = vec![QuestionRecord::free_text(QuestionKind::Identification, "Capital of France?", "Paris")];
        let report = uc.score(&qs, &answers(&["paris"]));
        assert_eq!(report.items[0].score, Some(1.0));
        assert_eq!(report.items[0].basis, GradeBasis::AnswerKey);
    }

    #[test]
    fn test_identification_prefers_similar_reference_question() {
        let uc = ScoreUseCase::new(vec![
            reference("s_0", "Where did grandmother live?", "in a small cottage"),
            reference("s_1", "zzzz", "nothing"),
        ]);
        let qs = vec![QuestionRecord::free_text(QuestionKind::Identification, "Where did the grandmother live?", "cottage")];
        let report = uc.score(&qs, &answers(&["in a small cottage"]));
        assert_eq!(report.items[0].basis, GradeBasis::Reference("s_0".into()));
        assert_eq!(report.items[0].expected, "in a small cottage");
        assert_eq!(report.items[0].score, Some(1.0));
    }

    #[test]
    fn test_essay_without_reference_is_ungraded() {
        let uc = ScoreUseCase::new(Vec::new());
        let qs = vec![QuestionRecord::free_text(QuestionKind::Essay, "Discuss the ending.", "")];
        let report = uc.score(&qs, &answers(&["It was happy."]));
        assert_eq!(report.items[0].score, None);
        assert_eq!(report.items[0].basis, GradeBasis::Ungraded);
        assert!(!report.items[0].correct);
    }

    #[test]
    fn test_missing_answers_count_as_blank() {
        let uc = ScoreUseCase::new(Vec::new());
        let report = uc.score(&[mc(), mc()], &answers(&["A"]));
        assert_eq!(report.total, 2);
        assert_eq!(report.correct, 1);
        assert!((report.percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_submission() {
        let report = ScoreUseCase::new(Vec::new()).score(&[], &[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.percentage, 0.0);
    }
}
