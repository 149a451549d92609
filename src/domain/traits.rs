// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams of the system. Each trait has one production
// implementation and is trivially faked in tests:
//
//   QuestionModel  — the question-generation capability.
//                    ClozeModel (offline) and RemoteModel (HTTP)
//                    implement it; tests use a scripted stand-in.
//   DocumentSource — where quiz source text comes from.
//   StorySource    — where reference stories come from.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::document::Document;
use crate::domain::story::Story;

// ─── GenerationParams ────────────────────────────────────────────────────────
/// Decoding parameters handed to the generation model on every call.
/// Sampling is on, so two calls with the same prompt may differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Prompt budget in model input units (tokens)
    pub max_input_len:  usize,
    /// Upper bound on generated units
    pub max_output_len: usize,
    pub num_beams:      usize,
    pub temperature:    f32,
    pub top_p:          f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_input_len:  256,
            max_output_len: 100,
            num_beams:      4,
            temperature:    0.7,
            top_p:          0.9,
        }
    }
}

// ─── GenerationError ─────────────────────────────────────────────────────────
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The call did not finish in time; callers skip the candidate
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("generation model unavailable: {0}")]
    Unavailable(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

// ─── QuestionModel ───────────────────────────────────────────────────────────
/// Anything that can turn a prompt into raw question text.
pub trait QuestionModel {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one generation. The returned text is raw model output;
    /// cleaning it up is the synthesizer's job.
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, GenerationError>;
}

// ─── DocumentSource ──────────────────────────────────────────────────────────
/// Anything that can provide the text a quiz is generated from.
pub trait DocumentSource {
    fn load_document(&self) -> Result<Document>;
}

// ─── StorySource ─────────────────────────────────────────────────────────────
/// Anything that can provide reference stories.
///
/// Implementations fail soft: unreadable entries are skipped and a
/// missing source yields an empty list rather than an error.
pub trait StorySource {
    fn load_stories(&self) -> Result<Vec<Story>>;
}
