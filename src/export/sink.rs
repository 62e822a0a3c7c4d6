//! @acp:module "Document Sink Trait"
//! @acp:summary "Trait definition for export sinks"
//! @acp:domain export
//! @acp:layer service

use chrono::{DateTime, Local};
use serde::Serialize;

use super::kind::SinkKind;
use crate::document::{html, Block, GeneratedDocument};
use crate::error::{DeskError, Result};
use crate::paper::PaperConfig;

/// Everything a sink needs to render one export
#[derive(Debug)]
pub struct ExportContext<'a> {
    pub document: &'a GeneratedDocument,
    pub paper: &'a PaperConfig,
    pub generated_at: DateTime<Local>,
}

impl<'a> ExportContext<'a> {
    pub fn new(document: &'a GeneratedDocument, paper: &'a PaperConfig) -> Self {
        Self {
            document,
            paper,
            generated_at: Local::now(),
        }
    }

    /// Formatted blocks, or `NoDocument` when nothing was generated
    pub fn blocks(&self) -> Result<Vec<Block>> {
        if self.document.is_empty() {
            return Err(DeskError::NoDocument);
        }
        Ok(self.document.blocks())
    }

    /// Preview markup shared by the Word and print wrappers
    pub fn body_html(&self) -> Result<String> {
        Ok(html::render_blocks(&self.blocks()?))
    }

    /// Values for the letterhead templates
    pub fn letterhead(&self, body: String) -> Letterhead<'_> {
        Letterhead {
            version: crate::VERSION,
            institution: &self.paper.institution,
            logo: self.paper.logo.as_deref(),
            title: &self.paper.title,
            grade: &self.paper.grade,
            subject: &self.paper.subject,
            total_marks: self.paper.total_marks(),
            generated_at: self.generated_at.format("%Y-%m-%d %H:%M").to_string(),
            body,
        }
    }
}

/// Template data for document wrappers
#[derive(Debug, Serialize)]
pub struct Letterhead<'a> {
    pub version: &'static str,
    pub institution: &'a str,
    pub logo: Option<&'a str>,
    pub title: &'a str,
    pub grade: &'a str,
    pub subject: &'a str,
    pub total_marks: u64,
    pub generated_at: String,
    pub body: String,
}

/// Document sink trait - implement for each export target
pub trait DocumentSink: Send + Sync {
    /// Get the sink identifier
    fn kind(&self) -> SinkKind;

    /// Render the export as markup
    fn render(&self, context: &ExportContext) -> Result<String>;

    /// Render for a terminal; defaults to the markup itself
    fn render_terminal(&self, context: &ExportContext) -> Result<String> {
        self.render(context)
    }

    /// File name used when exporting into a directory
    fn file_name(&self, context: &ExportContext) -> String;

    /// Validate rendered content before it is written
    fn validate(&self, content: &str) -> Result<()> {
        let _ = content;
        Ok(())
    }
}
