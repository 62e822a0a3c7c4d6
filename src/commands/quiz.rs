//! @acp:module "Quiz Command"
//! @acp:summary "Generate a multiple-choice quiz from lesson notes"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;

use super::output::spinner;
use crate::collab::{Collaborator, HttpCollaborator, Quiz};
use crate::config::Config;

/// Options for the quiz command
#[derive(Debug, Clone)]
pub struct QuizOptions {
    /// Notes file
    pub notes: PathBuf,
    /// Number of questions
    pub count: u32,
    /// Write JSON here instead of printing
    pub output: Option<PathBuf>,
    /// Print JSON instead of a readable listing
    pub json: bool,
}

/// Execute the quiz command
pub fn execute_quiz(options: QuizOptions, config: &Config) -> Result<()> {
    let service = HttpCollaborator::from_config(&config.collaborator)?;
    quiz_with(&service, options)
}

pub fn quiz_with<C: Collaborator + ?Sized>(service: &C, options: QuizOptions) -> Result<()> {
    let notes = std::fs::read_to_string(&options.notes)
        .with_context(|| format!("Failed to read {}", options.notes.display()))?;
    if notes.trim().is_empty() {
        bail!("Notes file {} is empty", options.notes.display());
    }
    if options.count == 0 {
        bail!("Question count must be at least 1");
    }

    let pb = spinner("Generating quiz...");
    let result = service.generate_quiz(&notes, options.count);
    pb.finish_and_clear();
    let quiz = result?;

    for index in quiz.inconsistent_questions() {
        eprintln!(
            "{} Question {} has an answer that is not among its options",
            style("⚠").yellow(),
            index + 1
        );
    }

    if let Some(path) = options.output {
        std::fs::write(&path, serde_json::to_string_pretty(&quiz)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Quiz saved to {}", style("✓").green(), style(path.display()).cyan());
    } else if options.json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
    } else {
        print_quiz(&quiz);
    }

    Ok(())
}

fn print_quiz(quiz: &Quiz) {
    println!("{}", style(&quiz.title).bold());
    println!("{}", "=".repeat(60));
    for (i, q) in quiz.questions.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, q.question);
        for (j, option) in q.options.iter().enumerate() {
            let letter = (b'a' + (j as u8 % 26)) as char;
            if option == &q.correct_answer {
                println!("   {}) {} {}", letter, option, style("✓").green());
            } else {
                println!("   {}) {}", letter, option);
            }
        }
    }
}
