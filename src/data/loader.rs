// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Produces the source Document a quiz is generated from.
//
//   InlineText  → text given directly on the command line
//   FileSource  → a file on disk:
//                   .docx  parsed with docx-rs
//                   other  read as UTF-8 text
//
// How .docx files work:
//   A .docx file is a ZIP archive of XML parts. docx-rs gives a
//   typed tree over the main part:
//     Document → Paragraph → Run → Text
//   We collect the Text leaves per paragraph and join paragraphs
//   with newlines so sentence splitting sees natural breaks.
//
// Reference: docx-rs crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Source label used for text passed on the command line
pub const INLINE_SOURCE: &str = "<inline>";

/// Text supplied directly by the caller.
pub struct InlineText {
    text: String,
}

impl InlineText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentSource for InlineText {
    fn load_document(&self) -> Result<Document> {
        Ok(Document::new(INLINE_SOURCE, self.text.clone()))
    }
}

/// A single input file (.docx or plain text).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn load_document(&self) -> Result<Document> {
        let is_docx = self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"));

        let text = if is_docx {
            read_docx_text(&self.path)?
        } else {
            fs::read_to_string(&self.path)
                .with_context(|| format!("Cannot read '{}'", self.path.display()))?
        };

        let source = self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!("Loaded input '{}' ({} chars)", source, text.chars().count());
        Ok(Document::new(source, text))
    }
}

/// Extract paragraph text from a .docx file, one paragraph per line.
fn read_docx_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| anyhow::anyhow!("docx-rs parse error in '{}': {:?}", path.display(), e))?;

    let paragraphs: Vec<String> = docx.document.children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Paragraph → Run → Text. Runs belong to the same sentence,
/// so they are concatenated without a separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let docx_rs::RunChild::Text(t) = rc {
                    out.push_str(&t.text);
                }
            }
        }
    }
    out
}
