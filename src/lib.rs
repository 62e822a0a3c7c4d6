#![forbid(unsafe_code)]

//! @acp:module "SchoolDesk Library"
//! @acp:summary "Question paper generation, export and record summaries"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability experimental
//!
//! # SchoolDesk
//!
//! Tools behind the school dashboards: generated question papers and the
//! figures shown on summary cards.
//!
//! ## Features
//!
//! - **Line Classification**: section headers, numbered questions, blanks, body text
//! - **Formatting**: dividers between sections and an end-of-document marker
//! - **Export**: terminal preview, Word-compatible `.doc`, print-ready HTML
//! - **Content Service**: papers, quizzes, answer-sheet grading and video
//! - **Records**: case-insensitive filters with counts, percentages and sums
//!
//! ## Example
//!
//! ```rust,no_run
//! use schooldesk::{ExportContext, ExportExecutor, ExportTarget, GeneratedDocument, PaperConfig, SinkKind};
//!
//! fn main() -> schooldesk::Result<()> {
//!     let paper = PaperConfig::default();
//!     let doc = GeneratedDocument::new("SECTION A\n1. What is inertia?");
//!
//!     let context = ExportContext::new(&doc, &paper);
//!     ExportExecutor::new().export(SinkKind::Print, &context, &ExportTarget::Stdout)?;
//!
//!     Ok(())
//! }
//! ```

pub mod collab;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod paper;
pub mod records;

// Re-exports
pub use collab::{
    AspectRatio, Collaborator, HttpCollaborator, ImagePayload, KeySelection, MediaLocator, Quiz,
    QuizQuestion,
};
pub use config::Config;
pub use document::{
    classify, classify_text, format_lines, Block, ClassifiedLine, GeneratedDocument, LineKind,
};
pub use error::{DeskError, Result};
pub use export::{
    DocumentSink, ExportContext, ExportExecutor, ExportResult, ExportTarget, SinkKind,
};
pub use paper::{Difficulty, GenerationState, PaperConfig, PaperGenerator, QuestionTypeSpec};
pub use records::{filter_records, Filter, MatchMode, RecordQuery, Summary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
