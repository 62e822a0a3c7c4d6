//! @acp:module "Evaluate Command"
//! @acp:summary "Grade a photographed answer sheet"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use super::output::spinner;
use crate::collab::{Collaborator, HttpCollaborator, ImagePayload};
use crate::config::Config;

/// Options for the evaluate command
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Answer-sheet image
    pub image: PathBuf,
    /// Marking instructions
    pub instructions: String,
    /// Save the feedback here
    pub output: Option<PathBuf>,
}

/// Execute the evaluate command
pub fn execute_evaluate(options: EvaluateOptions, config: &Config) -> Result<()> {
    let image = ImagePayload::from_path(&options.image)
        .with_context(|| format!("Failed to load {}", options.image.display()))?;
    let service = HttpCollaborator::from_config(&config.collaborator)?;

    let pb = spinner("Evaluating answer sheet...");
    let result = service.evaluate_paper(&image, &options.instructions);
    pb.finish_and_clear();
    let feedback = result?;

    match options.output {
        Some(path) => {
            std::fs::write(&path, &feedback)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Feedback saved to {}", style("✓").green(), style(path.display()).cyan());
        }
        None => println!("{}", feedback.trim()),
    }

    Ok(())
}
