//! @acp:module "Generate Command"
//! @acp:summary "Generate a question paper and export it"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `schooldesk generate`: validate the form, ask the content
//! service for the paper, keep the raw text next to the exports, then hand
//! the document to the requested sinks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use tracing::info;

use super::export::targets;
use super::output::{print_export_result, spinner};
use crate::collab::{Collaborator, HttpCollaborator};
use crate::config::Config;
use crate::export::{ExportExecutor, SinkKind};
use crate::paper::{PaperConfig, PaperGenerator};

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Form contents
    pub paper: PaperConfig,
    /// Sinks to export to; config defaults when empty
    pub sinks: Vec<SinkKind>,
    /// Exact output path (single sink only)
    pub output: Option<PathBuf>,
    /// Skip saving the raw text
    pub no_save: bool,
}

/// Execute the generate command against the HTTP service
pub fn execute_generate(options: GenerateOptions, config: &Config) -> Result<()> {
    let service = HttpCollaborator::from_config(&config.collaborator)?;
    generate_with(&service, options, config)
}

/// Run the generate flow against any collaborator
pub fn generate_with<C: Collaborator + ?Sized>(
    service: &C,
    options: GenerateOptions,
    config: &Config,
) -> Result<()> {
    let sinks = if options.sinks.is_empty() {
        config.export.default_sinks.clone()
    } else {
        options.sinks.clone()
    };
    let output_dir = config.export.output_dir.clone();
    let requests = targets(&sinks, options.output.as_ref(), &output_dir)?;

    let mut generator = PaperGenerator::new(options.paper);
    println!(
        "{} {} paper, grade {}, {} marks",
        style("→").cyan(),
        generator.config().subject,
        generator.config().grade,
        generator.config().total_marks()
    );

    let pb = spinner("Generating question paper...");
    let outcome = generator.generate(service).map(|doc| doc.text.clone());
    pb.finish_and_clear();
    let text = outcome?;

    if !options.no_save {
        let path = output_dir.join(raw_file_name(generator.config()));
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        std::fs::write(&path, &text)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!("Saved raw paper to {}", path.display());
        println!("{} Raw text saved to {}", style("✓").green(), style(path.display()).cyan());
    }

    let executor = ExportExecutor::new();
    for (kind, target) in &requests {
        let result = generator.export(&executor, *kind, target)?;
        print_export_result(&result);
    }

    Ok(())
}

/// `{subject}_{grade}_{timestamp}.txt`
fn raw_file_name(paper: &PaperConfig) -> String {
    let stem = paper.word_file_name();
    let stem = stem.trim_end_matches("_paper.doc");
    format!("{}_{}.txt", stem, Local::now().format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{AspectRatio, ImagePayload, MediaLocator, Quiz};
    use crate::document::GeneratedDocument;
    use crate::error::{DeskError, Result as DeskResult};
    use crate::paper::QuestionTypeSpec;
    use tempfile::TempDir;

    struct CannedService;

    impl Collaborator for CannedService {
        fn generate_paper(&self, _paper: &PaperConfig) -> DeskResult<GeneratedDocument> {
            Ok(GeneratedDocument::new("SECTION A\n1. Define velocity."))
        }

        fn generate_quiz(&self, _notes: &str, _count: u32) -> DeskResult<Quiz> {
            Err(DeskError::EmptyResponse)
        }

        fn evaluate_paper(&self, _image: &ImagePayload, _instructions: &str) -> DeskResult<String> {
            Err(DeskError::EmptyResponse)
        }

        fn generate_video(&self, _prompt: &str, _aspect: AspectRatio) -> DeskResult<MediaLocator> {
            Err(DeskError::EmptyResponse)
        }
    }

    fn paper() -> PaperConfig {
        PaperConfig::new("Springfield High", "10th", "Physics", "Motion")
            .with_question_type(QuestionTypeSpec::new("Short", 2, 5))
    }

    #[test]
    fn test_generate_saves_raw_text_and_word_file() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.export.output_dir = temp.path().to_path_buf();

        let options = GenerateOptions {
            paper: paper(),
            sinks: vec![SinkKind::Word],
            output: None,
            no_save: false,
        };
        generate_with(&CannedService, options, &config).unwrap();

        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.contains(&"Physics_10th_paper.doc".to_string()));
        assert!(names.iter().any(|n| n.starts_with("Physics_10th_") && n.ends_with(".txt")));
    }

    #[test]
    fn test_generate_rejects_incomplete_form() {
        let options = GenerateOptions {
            paper: PaperConfig::default(),
            sinks: vec![SinkKind::Preview],
            output: None,
            no_save: true,
        };
        let err = generate_with(&CannedService, options, &Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeskError>(),
            Some(DeskError::Validation(_))
        ));
    }
}
