//! @acp:module "Documents"
//! @acp:summary "Generated text, line classification and block formatting"
//! @acp:domain documents
//! @acp:layer model
//!
//! The pipeline is: raw text → lines → [`classify`] → [`format_lines`] →
//! blocks, which the export sinks then render. Every stage is recomputed
//! from the raw text and holds no state between calls.

pub mod classify;
pub mod format;
pub mod html;

use serde::{Deserialize, Serialize};

pub use classify::{classify, LineKind};
pub use format::{format_lines, Block, END_MARKER};

/// Text returned by the content service for one generation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub text: String,
}

impl GeneratedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// A document with no visible content counts as "not generated"
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn lines(&self) -> Vec<ClassifiedLine> {
        classify_text(&self.text)
    }

    pub fn blocks(&self) -> Vec<Block> {
        format_lines(&self.lines())
    }
}

/// A line of generated text with its structural role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub kind: LineKind,
}

impl ClassifiedLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }
}

/// Split text on line breaks and classify every line
pub fn classify_text(text: &str) -> Vec<ClassifiedLine> {
    text.split('\n')
        .map(|line| ClassifiedLine::new(line.trim_end_matches('\r')))
        .collect()
}
