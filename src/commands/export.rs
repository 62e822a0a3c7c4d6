//! @acp:module "Export Command"
//! @acp:summary "Format an existing text file and send it to a sink"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::output::print_export_result;
use crate::config::Config;
use crate::document::GeneratedDocument;
use crate::export::{ExportContext, ExportExecutor, ExportTarget, SinkKind};
use crate::paper::PaperConfig;

/// Options for the export command
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Plain-text paper to export
    pub input: PathBuf,
    /// Sinks to export to
    pub sinks: Vec<SinkKind>,
    /// Exact output path (single sink only)
    pub output: Option<PathBuf>,
    /// Directory for sinks that write files
    pub output_dir: Option<PathBuf>,
    /// Letterhead and metadata
    pub paper: PaperConfig,
}

/// Execute the export command
pub fn execute_export(options: ExportOptions, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read {}", options.input.display()))?;
    let document = GeneratedDocument::new(text);

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    let requests = targets(&options.sinks, options.output.as_ref(), &output_dir)?;

    let context = ExportContext::new(&document, &options.paper);
    let executor = ExportExecutor::new();

    for result in executor.export_all(&requests, &context) {
        let result = result?;
        print_export_result(&result);
    }

    Ok(())
}

/// Pair each sink with its target
pub(crate) fn targets(
    sinks: &[SinkKind],
    output: Option<&PathBuf>,
    output_dir: &std::path::Path,
) -> Result<Vec<(SinkKind, ExportTarget)>> {
    if output.is_some() && sinks.len() > 1 {
        anyhow::bail!("--output can only be used with a single sink");
    }

    Ok(sinks
        .iter()
        .map(|kind| {
            let target = match output {
                Some(path) if path.as_os_str() == "-" => ExportTarget::Stdout,
                Some(path) => ExportTarget::File(path.clone()),
                None => ExportTarget::default_for(*kind, output_dir),
            };
            (*kind, target)
        })
        .collect())
}
