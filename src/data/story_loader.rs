// ============================================================
// Layer 4 — Reference Story Loader
// ============================================================
// Loads FairytaleQA-style stories from every .json file found
// (recursively) under a dataset directory.
//
// Each file may hold either:
//   - an object mapping story-id → story record, or
//   - an array of story records carrying their own "story_id"
//     (or "id") field.
//
// Failure policy is "fail soft":
//   - missing directory      → warning, empty list
//   - unreadable / bad JSON  → warning, file skipped
//   - bad individual record  → warning, record skipped
// The load never aborts because of a single bad file.
//
// Files are visited in sorted path order so repeated loads of
// the same directory always produce the same story order.
//
// Reference: walkdir crate documentation
//            Rust Book §9 (Recoverable Errors)

use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::{Path, PathBuf}};
use walkdir::WalkDir;

use crate::domain::story::Story;
use crate::domain::traits::StorySource;

/// File extension recognised as a dataset file
const DATASET_EXTENSION: &str = "json";

/// Loads stories from a directory tree of JSON files.
pub struct JsonStoryLoader {
    dir: PathBuf,
}

impl JsonStoryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn dataset_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    tracing::warn!("Skipping unreadable dataset entry: {e}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(DATASET_EXTENSION))
            })
            .collect()
    }
}

impl StorySource for JsonStoryLoader {
    fn load_stories(&self) -> Result<Vec<Story>> {
        if !self.dir.exists() {
            tracing::warn!(
                "Reference dataset not found at '{}', continuing without reference answers",
                self.dir.display()
            );
            return Ok(Vec::new());
        }

        let files = self.dataset_files();
        tracing::info!("Found {} dataset files under '{}'", files.len(), self.dir.display());

        let mut stories = Vec::new();
        for path in &files {
            match load_file(path) {
                Ok(mut found) => {
                    tracing::debug!("Loaded {} stories from '{}'", found.len(), path.display());
                    stories.append(&mut found);
                }
                Err(e) => tracing::warn!("Skipping '{}': {e:#}", path.display()),
            }
        }

        Ok(stories)
    }
}

/// Parse one dataset file into stories.
fn load_file(path: &Path) -> Result<Vec<Story>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    let data: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in '{}'", path.display()))?;

    Ok(stories_from_value(&data))
}

/// Accepts both the mapping and the list layout. Anything else
/// (a bare string, a number) holds no stories.
pub fn stories_from_value(data: &Value) -> Vec<Story> {
    let mut stories = Vec::new();

    match data {
        Value::Object(map) => {
            for (id, record) in map {
                push_story(&mut stories, id.clone(), record);
            }
        }
        Value::Array(items) => {
            for item in items {
                let id = ["story_id", "id"]
                    .iter()
                    .find_map(|key| item.get(*key))
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));

                match id {
                    Some(id) => push_story(&mut stories, id, item),
                    None => tracing::debug!("Skipping story record without an id field"),
                }
            }
        }
        _ => tracing::warn!("Dataset file holds neither a story mapping nor a story list"),
    }

    stories
}

fn push_story(stories: &mut Vec<Story>, id: String, record: &Value) {
    match Story::from_record(id, record) {
        Ok(story) => stories.push(story),
        Err(e) => tracing::warn!("Skipping story: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_directory_gives_empty_corpus() {
        let loader = JsonStoryLoader::new("no/such/dataset/dir");
        assert!(loader.load_stories().unwrap().is_empty());
    }

    #[test]
    fn test_loads_nested_files_and_skips_malformed_ones() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("train");
        fs::create_dir_all(&nested).unwrap();

        fs::write(
            nested.join("a.json"),
            json!({"red": {"story": "Red walked to grandmother's house.", "questions": {}}}).to_string(),
        ).unwrap();
        fs::write(
            dir.path().join("b.json"),
            json!([{"story_id": "pigs", "text": "Three pigs built houses."}]).to_string(),
        ).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let stories = JsonStoryLoader::new(dir.path()).load_stories().unwrap();
        let mut ids: Vec<&str> = stories.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["pigs", "red"]);
    }

    #[test]
    fn test_list_records_without_id_are_skipped() {
        let stories = stories_from_value(&json!([{"text": "no id here"}, {"id": 7, "text": "numbered"}]));
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "7");
    }

    #[test]
    fn test_non_object_record_in_mapping_is_skipped() {
        let stories = stories_from_value(&json!({"good": {"text": "fine"}, "bad": 42}));
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "good");
    }
}
