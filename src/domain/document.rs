// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// The raw source material a quiz is generated from: a name for
// traceability and the extracted text. A Document can come from
// the command line (--text) or a file (.txt / .docx).
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A source document, already reduced to plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from ("<inline>" or a file name)
    pub source: String,

    /// The full extracted text content
    pub text: String,
}

impl Document {
    /// Create a new Document with a source label and text content.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// True when the document carries no usable text at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_document_is_blank() {
        assert!(Document::new("<inline>", "  \n\t ").is_blank());
        assert!(!Document::new("<inline>", "Once upon a time").is_blank());
    }
}
