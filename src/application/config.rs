// ============================================================
// Layer 2 — Quiz Configuration
// ============================================================
// All settings for a quiz run. Serialisable so it can be saved
// with --save-config and reloaded with --config; every field has
// a default, so a config file only needs the fields it changes.
//
// The config is also where the generation capability gets built:
// `build_model()` constructs the one QuestionModel a run uses and
// the caller owns it for the lifetime of the run.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::traits::{GenerationParams, QuestionModel};
use crate::infra::tokenizer_store::{PromptBudget, TokenizerStore};
use crate::ml::{cloze::ClozeModel, remote::RemoteModel};

/// Which QuestionModel implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Offline fill-in-the-blank generator
    #[default]
    Cloze,
    /// HTTP text2text-generation endpoint
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Root directory of the reference story dataset
    pub dataset_dir:     PathBuf,
    pub backend:         BackendKind,
    /// Generation endpoint URL (remote backend only)
    pub endpoint:        Option<String>,
    /// Environment variable holding a bearer token for the endpoint
    pub api_token_env:   Option<String>,
    pub timeout_secs:    u64,
    /// Directory containing the model's tokenizer.json
    pub tokenizer_dir:   Option<PathBuf>,
    /// Passed through for display; generation is language-agnostic
    pub language:        String,
    /// Source text beyond this many characters is ignored
    pub max_input_chars: usize,
    pub generation:      GenerationParams,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            dataset_dir:     PathBuf::from("fairytale_qa_data"),
            backend:         BackendKind::Cloze,
            endpoint:        None,
            api_token_env:   None,
            timeout_secs:    30,
            tokenizer_dir:   None,
            language:        "English".to_string(),
            max_input_chars: 1000,
            generation:      GenerationParams::default(),
        }
    }
}

impl QuizConfig {
    /// Construct the generation capability described by this config.
    pub fn build_model(&self) -> Result<Box<dyn QuestionModel>> {
        match self.backend {
            BackendKind::Cloze => {
                tracing::info!("Using offline cloze question generator");
                Ok(Box::new(ClozeModel::new()))
            }
            BackendKind::Remote => {
                let endpoint = self.endpoint
                    .clone()
                    .context("The remote backend needs an --endpoint URL")?;

                let token = match &self.api_token_env {
                    Some(var) => Some(
                        std::env::var(var)
                            .with_context(|| format!("Environment variable '{var}' is not set"))?,
                    ),
                    None => None,
                };

                tracing::info!("Using remote question generator at {}", endpoint);
                let model = RemoteModel::new(endpoint, token, Duration::from_secs(self.timeout_secs))?;
                Ok(Box::new(model))
            }
        }
    }

    /// Prompt budget: tokenizer-based when a tokenizer directory is set.
    pub fn prompt_budget(&self) -> PromptBudget {
        match &self.tokenizer_dir {
            Some(dir) => TokenizerStore::new(dir).budget(),
            None => PromptBudget::Words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generation_contract() {
        let cfg = QuizConfig::default();
        assert_eq!(cfg.max_input_chars, 1000);
        assert_eq!(cfg.generation.max_input_len, 256);
        assert_eq!(cfg.generation.max_output_len, 100);
        assert_eq!(cfg.generation.num_beams, 4);
    }

    #[test]
    fn test_remote_backend_requires_endpoint() {
        let cfg = QuizConfig { backend: BackendKind::Remote, ..Default::default() };
        assert!(cfg.build_model().is_err());
    }

    #[test]
    fn test_cloze_backend_builds() {
        let model = QuizConfig::default().build_model().unwrap();
        assert_eq!(model.name(), "cloze");
    }
}
