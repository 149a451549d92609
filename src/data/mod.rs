// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything that turns bytes on disk (or a CLI string) into
// domain values:
//
//   input text / .docx file
//       │
//       ▼
//   loader            → Document
//       │
//       ▼
//   sentences         → Vec<String> sentences worth quizzing on
//
//   dataset directory (*.json, recursive)
//       │
//       ▼
//   story_loader      → Vec<Story> for the ReferenceCorpus
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads quiz source text from the command line or a file
pub mod loader;

/// Splits source text into candidate sentences
pub mod sentences;

/// Loads reference stories from JSON dataset files
pub mod story_loader;
