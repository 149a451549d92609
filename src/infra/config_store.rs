// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and restores a QuizConfig as pretty-printed JSON so a run
// can be repeated with the same backend, dataset and decoding
// parameters:
//
//   story-quiz generate ... --save-config quiz.json
//   story-quiz generate --config quiz.json --text "..."
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::config::QuizConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, cfg: &QuizConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved quiz config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<QuizConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::BackendKind;

    #[test]
    fn test_save_then_load_keeps_settings() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("quiz.json"));

        let mut cfg = QuizConfig::default();
        cfg.backend = BackendKind::Remote;
        cfg.endpoint = Some("http://localhost:8080/generate".into());
        cfg.generation.num_beams = 2;

        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        fs::write(&path, r#"{"dataset_dir": "stories"}"#).unwrap();

        let cfg = ConfigStore::new(&path).load().unwrap();
        assert_eq!(cfg.dataset_dir, PathBuf::from("stories"));
        assert_eq!(cfg.max_input_chars, 1000);
        assert_eq!(cfg.backend, BackendKind::Cloze);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ConfigStore::new("does/not/exist.json").load().is_err());
    }
}
