// ============================================================
// Layer 6 — Tokenizer Store and Prompt Budget
// ============================================================
// The generation model accepts a bounded number of input tokens
// (256 by default). Anything past that is cut before the prompt
// leaves the process, so the answer and the start of the sentence
// always survive.
//
// Two ways of counting:
//   - with a HuggingFace `tokenizer.json` (the same one the model
//     uses) → exact token counts, cut at the token's byte offset
//   - without one → whitespace-separated words as an approximation
//
// A tokenizer directory that exists but holds a broken file is a
// warning, not an error: we fall back to word counting.
//
// Reference: tokenizers crate documentation (Encoding offsets)

use anyhow::Result;
use std::path::PathBuf;
use tokenizers::Tokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load `<dir>/tokenizer.json`.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }

    /// Token budget backed by this store's tokenizer, or by word
    /// counting when the tokenizer can't be loaded.
    pub fn budget(&self) -> PromptBudget {
        match self.load() {
            Ok(tokenizer) => {
                tracing::info!("Using tokenizer from '{}' for prompt budget", self.dir.display());
                PromptBudget::Tokenizer(tokenizer)
            }
            Err(e) => {
                tracing::warn!("{e}; counting prompt length in words instead");
                PromptBudget::Words
            }
        }
    }
}

/// How prompt length is measured and cut.
#[derive(Default)]
pub enum PromptBudget {
    Tokenizer(Tokenizer),
    #[default]
    Words,
}

impl PromptBudget {
    /// Cut `prompt` to at most `max_tokens` units.
    pub fn truncate(&self, prompt: &str, max_tokens: usize) -> String {
        match self {
            PromptBudget::Tokenizer(tokenizer) => match tokenizer.encode(prompt, false) {
                Ok(enc) if enc.len() <= max_tokens => prompt.to_string(),
                Ok(_) if max_tokens == 0 => String::new(),
                Ok(enc) => {
                    let end = enc.get_offsets()[max_tokens - 1].1.min(prompt.len());
                    prompt.get(..end).unwrap_or(prompt).to_string()
                }
                Err(e) => {
                    tracing::warn!("Tokenisation failed ({e}); truncating by words");
                    truncate_words(prompt, max_tokens)
                }
            },
            PromptBudget::Words => truncate_words(prompt, max_tokens),
        }
    }
}

fn truncate_words(prompt: &str, max_words: usize) -> String {
    if prompt.split_whitespace().count() <= max_words {
        return prompt.to_string();
    }
    prompt
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
