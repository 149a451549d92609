// ============================================================
// Layer 2 — Generate Use Case
// ============================================================
// Source text → quiz document → structured questions:
//   1. Cut the text to the first max_input_chars characters
//   2. Split into sentences, extract candidate answers per sentence
//   3. Synthesize one question per (sentence, candidate) pair,
//      stopping as soon as the requested total is reached
//   4. Format the items as a numbered quiz document
//   5. Parse the document back into QuestionRecords
//   6. Look the text up in the reference corpus
//
// Zero synthesized items is an error whose message starts with
// "Could not generate questions from the text." so callers never
// try to parse an empty document.

use anyhow::{bail, Result};

use crate::data::sentences::SentenceSplitter;
use crate::domain::document::Document;
use crate::domain::question::{GeneratedItem, QuestionMix, QuestionRecord};
use crate::domain::story::ReferenceAnswer;
use crate::domain::traits::QuestionModel;
use crate::infra::tokenizer_store::PromptBudget;
use crate::ml::synthesizer::QuestionSynthesizer;
use crate::quiz::{
    corpus::ReferenceCorpus, extractor::PhraseExtractor, formatter::QuizFormatter,
    parser::QuizParser,
};

use super::config::QuizConfig;

/// Message prefix for a run that produced no questions
pub const NO_QUESTIONS: &str = "Could not generate questions from the text.";

/// Everything one generation run produces.
#[derive(Debug)]
pub struct QuizOutcome {
    /// The formatted quiz document
    pub document:      String,
    pub questions:     Vec<QuestionRecord>,
    /// Id of the known story the text matched, if any
    pub matched_story: Option<String>,
    pub references:    Vec<ReferenceAnswer>,
}

pub struct GenerateUseCase<'m> {
    synthesizer: QuestionSynthesizer<'m>,
    splitter:    SentenceSplitter,
    extractor:   PhraseExtractor,
    formatter:   QuizFormatter,
    parser:      QuizParser,
}

impl<'m> GenerateUseCase<'m> {
    pub fn new(model: &'m dyn QuestionModel, budget: PromptBudget, config: &QuizConfig) -> Self {
        Self {
            synthesizer: QuestionSynthesizer::new(model, budget, config.generation.clone()),
            splitter:    SentenceSplitter::new(config.max_input_chars),
            extractor:   PhraseExtractor::new(),
            formatter:   QuizFormatter::new(),
            parser:      QuizParser::new(),
        }
    }

    /// Synthesize up to `mix.total()` items, sentence by sentence.
    pub fn generate_items(&self, text: &str, mix: &QuestionMix) -> Result<Vec<GeneratedItem>> {
        let wanted = mix.total();
        let mut items: Vec<GeneratedItem> = Vec::with_capacity(wanted);
        if wanted == 0 {
            return Ok(items);
        }

        let sentences = self.splitter.split(text);
        tracing::info!("Split text into {} usable sentences", sentences.len());

        'sentences: for sentence in &sentences {
            for candidate in self.extractor.extract(sentence) {
                if let Some(question) = self.synthesizer.synthesize(sentence, &candidate.text)? {
                    items.push(GeneratedItem::new(question, candidate.text, sentence.as_str()));
                    if items.len() == wanted {
                        break 'sentences;
                    }
                }
            }
        }

        tracing::info!("Synthesized {} of {} requested questions", items.len(), wanted);
        Ok(items)
    }

    /// The formatted quiz document for `text`.
    pub fn generate_questions(&self, text: &str, mix: &QuestionMix) -> Result<String> {
        let items = self.generate_items(text, mix)?;
        if items.is_empty() {
            bail!("{NO_QUESTIONS} Please make sure the text contains complete sentences.");
        }
        Ok(self.formatter.format(&items, mix))
    }

    /// Full pipeline for one document.
    pub fn run(&self, document: &Document, mix: &QuestionMix, corpus: &ReferenceCorpus) -> Result<QuizOutcome> {
        if document.is_blank() {
            bail!("Please enter some text to generate questions from");
        }
        if mix.is_empty() {
            bail!("Please request at least one question");
        }

        tracing::info!("Generating {} questions from '{}'", mix.total(), document.source);

        let matched_story = corpus.find_similar_story(&document.text).map(str::to_string);
        match &matched_story {
            Some(id) => tracing::info!("Text matches known story '{}'", id),
            None     => tracing::info!("No matching story found, grading will use similarity only"),
        }

        let quiz      = self.generate_questions(&document.text, mix)?;
        let questions = self.parser.parse(&quiz);
        if questions.is_empty() {
            bail!("Could not parse any questions from the generated text");
        }

        let references = matched_story
            .as_deref()
            .map(|id| corpus.reference_answers(id))
            .unwrap_or_default();

        Ok(QuizOutcome { document: quiz, questions, matched_story, references })
    }
}
