//! @acp:module "Classify Command"
//! @acp:summary "Show how each line of a paper is tagged"
//! @acp:domain cli
//! @acp:layer handler

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::document::{classify_text, LineKind};

/// Options for the classify command
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub input: PathBuf,
    pub json: bool,
}

/// Execute the classify command
pub fn execute_classify(options: ClassifyOptions) -> Result<()> {
    let text = std::fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read {}", options.input.display()))?;
    let lines = classify_text(&text);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    let mut counts: HashMap<LineKind, usize> = HashMap::new();
    for (i, line) in lines.iter().enumerate() {
        *counts.entry(line.kind).or_default() += 1;
        let tag = match line.kind {
            LineKind::SectionHeader => style(format!("{:<14}", line.kind)).magenta().bold(),
            LineKind::Question => style(format!("{:<14}", line.kind)).cyan(),
            LineKind::Blank => style(format!("{:<14}", line.kind)).dim(),
            LineKind::BodyText => style(format!("{:<14}", line.kind)),
        };
        println!("{:>4}  {}  {}", i + 1, tag, line.text);
    }

    println!();
    println!(
        "{} lines: {} headers, {} questions, {} body, {} blank",
        lines.len(),
        counts.get(&LineKind::SectionHeader).copied().unwrap_or(0),
        counts.get(&LineKind::Question).copied().unwrap_or(0),
        counts.get(&LineKind::BodyText).copied().unwrap_or(0),
        counts.get(&LineKind::Blank).copied().unwrap_or(0),
    );

    Ok(())
}
