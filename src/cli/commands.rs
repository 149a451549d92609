// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the five subcommands and all their flags:
//   generate  text or file → quiz document (+ parsed JSON)
//   parse     quiz document → question records as JSON
//   grade     one answer against one reference
//   score     a whole submission against its questions
//   match     which known story does this text come from?
//
// Generation settings layer in this order, last wins:
//   built-in defaults → --config file → individual flags
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::config::{BackendKind, QuizConfig};
use crate::domain::question::QuestionMix;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a quiz from text or a .txt/.docx file
    Generate(GenerateArgs),

    /// Parse a quiz document into structured questions
    Parse(ParseArgs),

    /// Grade a single answer against a reference answer
    Grade(GradeArgs),

    /// Score a full set of answers
    Score(ScoreArgs),

    /// Find the known story a text matches
    Match(MatchArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source text given directly
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    pub text: Option<String>,

    /// Source file (.docx or plain text)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of multiple-choice questions
    #[arg(long, default_value_t = 2)]
    pub mc: usize,

    /// Number of true/false questions
    #[arg(long, default_value_t = 0)]
    pub tf: usize,

    /// Number of identification questions
    #[arg(long, default_value_t = 2)]
    pub identification: usize,

    /// Number of essay questions
    #[arg(long, default_value_t = 0)]
    pub essay: usize,

    /// Load settings from a saved config file first
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the effective settings to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// URL of a text2text-generation endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Environment variable holding the endpoint's bearer token
    #[arg(long)]
    pub api_token_env: Option<String>,

    /// Per-request timeout for the remote backend, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory with the model's tokenizer.json, for exact prompt budgets
    #[arg(long)]
    pub tokenizer_dir: Option<PathBuf>,

    /// Reference story dataset
    #[arg(long)]
    pub dataset_dir: Option<PathBuf>,

    /// Only this many leading characters of the text are used
    #[arg(long)]
    pub max_input_chars: Option<usize>,

    #[arg(long)]
    pub language: Option<String>,

    /// Also print the parsed questions as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Apply every flag that was given on top of `cfg`.
    pub fn overlay(&self, mut cfg: QuizConfig) -> QuizConfig {
        if let Some(backend) = self.backend {
            cfg.backend = backend;
        }
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint = Some(endpoint.clone());
        }
        if let Some(var) = &self.api_token_env {
            cfg.api_token_env = Some(var.clone());
        }
        if let Some(secs) = self.timeout_secs {
            cfg.timeout_secs = secs;
        }
        if let Some(dir) = &self.tokenizer_dir {
            cfg.tokenizer_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.dataset_dir {
            cfg.dataset_dir = dir.clone();
        }
        if let Some(max) = self.max_input_chars {
            cfg.max_input_chars = max;
        }
        if let Some(language) = &self.language {
            cfg.language = language.clone();
        }
        cfg
    }
}

/// The requested question counts.
impl From<&GenerateArgs> for QuestionMix {
    fn from(a: &GenerateArgs) -> Self {
        QuestionMix {
            multiple_choice: a.mc,
            true_or_false:   a.tf,
            identification:  a.identification,
            essay:           a.essay,
        }
    }
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Quiz document to parse
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct GradeArgs {
    #[arg(long)]
    pub answer: String,

    #[arg(long)]
    pub reference: String,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON list of question records (as printed by `parse`)
    #[arg(long)]
    pub questions: PathBuf,

    /// JSON list of answer strings, one per question
    #[arg(long)]
    pub answers: PathBuf,

    /// The source text the quiz was generated from; enables
    /// grading against reference answers when it matches a story
    #[arg(long)]
    pub source: Option<PathBuf>,

    #[arg(long, default_value = "fairytale_qa_data")]
    pub dataset_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Text file (.docx or plain text) to look up
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "fairytale_qa_data")]
    pub dataset_dir: PathBuf,
}
