//! Export pipeline integration tests
//!
//! Generated text through classification, formatting and every sink.

use std::cell::Cell;

use schooldesk::collab::{AspectRatio, ImagePayload, MediaLocator, Quiz};
use schooldesk::document::END_MARKER;
use schooldesk::{
    Block, Collaborator, DeskError, ExportContext, ExportExecutor, ExportTarget,
    GeneratedDocument, GenerationState, LineKind, PaperConfig, PaperGenerator, QuestionTypeSpec,
    SinkKind,
};
use tempfile::TempDir;

const PHYSICS: &str = "SECTION A\n1. What is inertia?\n\nExplain briefly.";

fn physics_paper() -> PaperConfig {
    PaperConfig::new("Springfield High", "10th", "Physics", "Motion, Force")
        .with_title("Unit Test")
        .with_question_type(QuestionTypeSpec::new("MCQ", 10, 1))
        .with_question_type(QuestionTypeSpec::new("Short Answer", 5, 3))
}

/// Collaborator returning canned text and counting paper requests
struct Scripted {
    reply: Result<&'static str, &'static str>,
    calls: Cell<u32>,
}

impl Scripted {
    fn ok(text: &'static str) -> Self {
        Self { reply: Ok(text), calls: Cell::new(0) }
    }

    fn failing(message: &'static str) -> Self {
        Self { reply: Err(message), calls: Cell::new(0) }
    }
}

impl Collaborator for Scripted {
    fn generate_paper(&self, _paper: &PaperConfig) -> schooldesk::Result<GeneratedDocument> {
        self.calls.set(self.calls.get() + 1);
        match self.reply {
            Ok(text) => Ok(GeneratedDocument::new(text)),
            Err(message) => Err(schooldesk::collab::classify_failure(message)),
        }
    }

    fn generate_quiz(&self, _notes: &str, _count: u32) -> schooldesk::Result<Quiz> {
        Err(DeskError::Collaborator("not scripted".into()))
    }

    fn evaluate_paper(&self, _image: &ImagePayload, _instructions: &str) -> schooldesk::Result<String> {
        Err(DeskError::Collaborator("not scripted".into()))
    }

    fn generate_video(&self, _prompt: &str, _aspect: AspectRatio) -> schooldesk::Result<MediaLocator> {
        Err(DeskError::Collaborator("not scripted".into()))
    }
}

// =============================================================================
// Formatting
// =============================================================================

mod formatting_tests {
    use super::*;

    #[test]
    fn test_physics_blocks() {
        let doc = GeneratedDocument::new(PHYSICS);
        let blocks = doc.blocks();

        assert_eq!(blocks.len(), 5);
        assert_eq!(
            blocks[0],
            Block::Header { text: "SECTION A".into(), divider: false }
        );
        assert_eq!(blocks[1], Block::Question { text: "1. What is inertia?".into() });
        assert_eq!(blocks[2], Block::Spacer);
        assert_eq!(blocks[3], Block::Body { text: "Explain briefly.".into() });
        assert_eq!(blocks[4], Block::EndMarker);
    }

    #[test]
    fn test_divider_only_between_sections() {
        let doc = GeneratedDocument::new("SECTION A\n1. One\nSECTION B\n2. Two\nSECTION C");
        let dividers: Vec<bool> = doc
            .blocks()
            .iter()
            .filter(|b| matches!(b, Block::Header { .. }))
            .map(Block::has_divider)
            .collect();

        assert_eq!(dividers, vec![false, true, true]);
    }

    #[test]
    fn test_line_kinds() {
        let kinds: Vec<LineKind> = GeneratedDocument::new("PART I\n12. Define work.\n   \nNote well")
            .lines()
            .into_iter()
            .map(|l| l.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                LineKind::SectionHeader,
                LineKind::Question,
                LineKind::Blank,
                LineKind::BodyText
            ]
        );
    }
}

// =============================================================================
// Sinks
// =============================================================================

mod sink_tests {
    use super::*;

    #[test]
    fn test_word_export_to_directory() {
        let temp = TempDir::new().unwrap();
        let paper = physics_paper();
        let doc = GeneratedDocument::new(PHYSICS);
        let context = ExportContext::new(&doc, &paper);

        let result = ExportExecutor::new()
            .export(
                SinkKind::Word,
                &context,
                &ExportTarget::Directory(temp.path().to_path_buf()),
            )
            .unwrap();

        let path = result.destination.unwrap();
        assert_eq!(path.file_name().unwrap(), "Physics_10th_paper.doc");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("application/vnd.ms-word"));
        assert!(content.contains("Springfield High"));
        assert!(content.contains("Total Marks: 25"));
        assert!(content.contains(END_MARKER));
        assert!(!content.contains("<hr"));
    }

    #[test]
    fn test_print_page_contents() {
        let paper = physics_paper();
        let doc = GeneratedDocument::new("SECTION A\n1. Q\nSECTION B\n2. Q");
        let context = ExportContext::new(&doc, &paper);

        let page = ExportExecutor::new().render(SinkKind::Print, &context).unwrap();
        assert!(page.contains("window.print()"));
        assert!(page.contains("Grade: 10th"));
        assert_eq!(page.matches("<hr").count(), 1);
        assert!(page.contains(END_MARKER));
    }

    #[test]
    fn test_preview_escapes_markup() {
        let paper = physics_paper();
        let doc = GeneratedDocument::new("1. Is 3 < 5 & 5 > 3?");
        let context = ExportContext::new(&doc, &paper);

        let html = ExportExecutor::new().render(SinkKind::Preview, &context).unwrap();
        assert!(html.contains("3 &lt; 5 &amp; 5 &gt; 3"));
    }

    #[test]
    fn test_empty_document_rejected_by_every_sink() {
        let paper = physics_paper();
        let doc = GeneratedDocument::new("  \n ");
        let context = ExportContext::new(&doc, &paper);
        let executor = ExportExecutor::new();

        for kind in SinkKind::all() {
            assert!(matches!(
                executor.render(*kind, &context),
                Err(DeskError::NoDocument)
            ));
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

mod generator_tests {
    use super::*;

    #[test]
    fn test_generate_then_export() {
        let temp = TempDir::new().unwrap();
        let service = Scripted::ok(PHYSICS);
        let mut generator = PaperGenerator::new(physics_paper());

        let doc = generator.generate(&service).unwrap();
        assert_eq!(doc.blocks().len(), 5);
        assert!(matches!(generator.state(), GenerationState::Ready(_)));

        let result = generator
            .export(
                &ExportExecutor::new(),
                SinkKind::Print,
                &ExportTarget::File(temp.path().join("out.html")),
            )
            .unwrap();
        assert_eq!(result.kind, SinkKind::Print);
        assert!(temp.path().join("out.html").exists());
    }

    #[test]
    fn test_invalid_form_never_calls_service() {
        let service = Scripted::ok(PHYSICS);
        let mut generator = PaperGenerator::new(PaperConfig::default());

        let err = generator.generate(&service).unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
        assert_eq!(service.calls.get(), 0);
    }

    #[test]
    fn test_reauthorization_resets_key() {
        let service = Scripted::failing("404 Requested entity was not found.");
        let mut generator = PaperGenerator::new(physics_paper());
        assert!(generator.is_authorized());

        let err = generator.generate(&service).unwrap_err();
        assert!(matches!(err, DeskError::ReauthorizationRequired(_)));
        assert!(!generator.is_authorized());
        assert!(matches!(generator.state(), GenerationState::Failed(_)));

        generator.select_key();
        assert!(generator.is_authorized());
    }

    #[test]
    fn test_export_before_generation() {
        let temp = TempDir::new().unwrap();
        let generator = PaperGenerator::new(physics_paper());

        let err = generator
            .export(
                &ExportExecutor::new(),
                SinkKind::Word,
                &ExportTarget::Directory(temp.path().to_path_buf()),
            )
            .unwrap_err();
        assert!(matches!(err, DeskError::NoDocument));
    }
}
