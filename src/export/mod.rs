//! @acp:module "Document Export"
//! @acp:summary "Routes formatted papers to preview, Word and print sinks"
//! @acp:domain export
//! @acp:layer service
//!
//! ## Overview
//!
//! Every sink consumes the same classified and formatted blocks; they only
//! differ in how the blocks are wrapped and where the result goes:
//!
//! - Preview: styled terminal text, or an HTML fragment when saved
//! - Word: `{subject}_{grade}_paper.doc`, HTML declared as `vnd.ms-word`
//! - Print: standalone page that opens the print dialog on load
//!
//! Exporting before a document exists fails with [`DeskError::NoDocument`],
//! and an unwritable destination fails with [`DeskError::SinkUnavailable`].

pub mod kind;
pub mod sink;
pub mod sinks;
pub mod templates;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use kind::SinkKind;
pub use sink::{DocumentSink, ExportContext, Letterhead};

use crate::error::{DeskError, Result};
use sinks::*;

/// Where an export is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Terminal rendering on standard output
    Stdout,
    /// Exact file path
    File(PathBuf),
    /// Directory; the sink picks the file name
    Directory(PathBuf),
}

impl ExportTarget {
    /// Default target per sink: Word goes to disk, the others to stdout
    pub fn default_for(kind: SinkKind, output_dir: &Path) -> Self {
        match kind {
            SinkKind::Word => ExportTarget::Directory(output_dir.to_path_buf()),
            SinkKind::Preview | SinkKind::Print => ExportTarget::Stdout,
        }
    }
}

/// Main export executor - one sink per kind
pub struct ExportExecutor {
    sinks: HashMap<SinkKind, Box<dyn DocumentSink>>,
}

impl ExportExecutor {
    /// Create a new executor with all built-in sinks
    pub fn new() -> Self {
        Self::with_sinks(vec![
            Box::new(PreviewSink),
            Box::new(WordSink),
            Box::new(PrintSink),
        ])
    }

    /// Executor over the given sinks, keyed by their own kind
    pub fn with_sinks(sinks: Vec<Box<dyn DocumentSink>>) -> Self {
        let mut executor = Self {
            sinks: HashMap::new(),
        };
        for sink in sinks {
            executor.register(sink);
        }
        executor
    }

    /// Add a sink, replacing any registered for the same kind
    pub fn register(&mut self, sink: Box<dyn DocumentSink>) {
        self.sinks.insert(sink.kind(), sink);
    }

    fn sink(&self, kind: SinkKind) -> Result<&dyn DocumentSink> {
        self.sinks
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or_else(|| DeskError::Other(format!("No sink for: {}", kind)))
    }

    /// Render without writing anywhere
    pub fn render(&self, kind: SinkKind, context: &ExportContext) -> Result<String> {
        let sink = self.sink(kind)?;
        let content = sink.render(context)?;
        sink.validate(&content)?;
        Ok(content)
    }

    /// Render and write a single export
    pub fn export(
        &self,
        kind: SinkKind,
        context: &ExportContext,
        target: &ExportTarget,
    ) -> Result<ExportResult> {
        let sink = self.sink(kind)?;

        let content = match target {
            ExportTarget::Stdout => sink.render_terminal(context)?,
            _ => sink.render(context)?,
        };
        sink.validate(&content)?;

        let destination = match target {
            ExportTarget::Stdout => {
                write_stdout(&content)?;
                None
            }
            ExportTarget::File(path) => {
                write_file(path, &content)?;
                Some(path.clone())
            }
            ExportTarget::Directory(dir) => {
                let path = dir.join(sink.file_name(context));
                write_file(&path, &content)?;
                Some(path)
            }
        };

        match &destination {
            Some(path) => info!("Exported {} to {}", kind, path.display()),
            None => debug!("Exported {} to stdout", kind),
        }

        Ok(ExportResult {
            kind,
            destination,
            bytes: content.len(),
        })
    }

    /// Export to several sinks, each to its own target
    pub fn export_all(
        &self,
        requests: &[(SinkKind, ExportTarget)],
        context: &ExportContext,
    ) -> Vec<Result<ExportResult>> {
        requests
            .iter()
            .map(|(kind, target)| self.export(*kind, context, target))
            .collect()
    }
}

impl Default for ExportExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable(destination: impl Into<String>, err: std::io::Error) -> DeskError {
    DeskError::SinkUnavailable {
        destination: destination.into(),
        reason: err.to_string(),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| unavailable(parent.display().to_string(), e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| unavailable(path.display().to_string(), e))
}

fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| unavailable("stdout", e))
}

/// Result of a single export
#[derive(Debug)]
pub struct ExportResult {
    pub kind: SinkKind,
    /// `None` when written to stdout
    pub destination: Option<PathBuf>,
    pub bytes: usize,
}
