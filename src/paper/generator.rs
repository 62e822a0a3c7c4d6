//! @acp:module "Paper Generator"
//! @acp:summary "Per-view controller owning form state, generation state and key selection"
//! @acp:domain papers
//! @acp:layer service

use tracing::{debug, info, warn};

use super::PaperConfig;
use crate::collab::{Collaborator, KeySelection};
use crate::document::GeneratedDocument;
use crate::error::{DeskError, Result};
use crate::export::{ExportContext, ExportExecutor, ExportResult, ExportTarget, SinkKind};

/// Where the view is in the generate cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    InFlight,
    Ready(GeneratedDocument),
    Failed(String),
}

/// Controller for the question-paper view.
///
/// Owns its state exclusively; at most one request is outstanding, and
/// each successful generation replaces the previous document wholesale.
#[derive(Debug, Default)]
pub struct PaperGenerator {
    config: PaperConfig,
    state: GenerationState,
    keys: KeySelection,
}

impl PaperGenerator {
    pub fn new(config: PaperConfig) -> Self {
        Self {
            config,
            state: GenerationState::Idle,
            keys: KeySelection::default(),
        }
    }

    pub fn config(&self) -> &PaperConfig {
        &self.config
    }

    /// Form handlers mutate the config through this
    pub fn config_mut(&mut self) -> &mut PaperConfig {
        &mut self.config
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.keys.is_authorized()
    }

    pub fn select_key(&mut self) {
        self.keys.select();
    }

    pub fn document(&self) -> Option<&GeneratedDocument> {
        match &self.state {
            GenerationState::Ready(doc) => Some(doc),
            _ => None,
        }
    }

    /// Validate the form, call the service and store the result.
    ///
    /// Validation failures leave the state untouched. Service failures are
    /// recorded as `Failed` and returned.
    pub fn generate<C: Collaborator + ?Sized>(
        &mut self,
        collaborator: &C,
    ) -> Result<&GeneratedDocument> {
        if self.state == GenerationState::InFlight {
            return Err(DeskError::Busy);
        }
        self.config.validate()?;

        self.state = GenerationState::InFlight;
        debug!("Paper request in flight");

        let result = collaborator.generate_paper(&self.config).and_then(|doc| {
            if doc.is_empty() {
                Err(DeskError::EmptyResponse)
            } else {
                Ok(doc)
            }
        });
        self.keys.observe(&result);

        match result {
            Ok(doc) => {
                info!("Generated paper with {} lines", doc.text.lines().count());
                self.state = GenerationState::Ready(doc);
                self.document().ok_or(DeskError::EmptyResponse)
            }
            Err(err) => {
                warn!("Paper generation failed: {}", err);
                self.state = GenerationState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Export the current document; `NoDocument` if nothing was generated
    pub fn export(
        &self,
        executor: &ExportExecutor,
        kind: SinkKind,
        target: &ExportTarget,
    ) -> Result<ExportResult> {
        let doc = self.document().ok_or(DeskError::NoDocument)?;
        let context = ExportContext::new(doc, &self.config);
        executor.export(kind, &context, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{classify_failure, AspectRatio, ImagePayload, MediaLocator, Quiz};
    use crate::paper::QuestionTypeSpec;
    use std::cell::Cell;

    struct FakeService {
        reply: std::result::Result<&'static str, &'static str>,
        calls: Cell<u32>,
    }

    impl FakeService {
        fn replying(text: &'static str) -> Self {
            Self {
                reply: Ok(text),
                calls: Cell::new(0),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                reply: Err(message),
                calls: Cell::new(0),
            }
        }
    }

    impl Collaborator for FakeService {
        fn generate_paper(&self, _paper: &PaperConfig) -> Result<GeneratedDocument> {
            self.calls.set(self.calls.get() + 1);
            self.reply
                .map(GeneratedDocument::new)
                .map_err(classify_failure)
        }

        fn generate_quiz(&self, _notes: &str, _count: u32) -> Result<Quiz> {
            Err(DeskError::EmptyResponse)
        }

        fn evaluate_paper(&self, _image: &ImagePayload, _instructions: &str) -> Result<String> {
            Err(DeskError::EmptyResponse)
        }

        fn generate_video(&self, _prompt: &str, _aspect: AspectRatio) -> Result<MediaLocator> {
            Err(DeskError::EmptyResponse)
        }
    }

    fn ready_form() -> PaperGenerator {
        let mut generator = PaperGenerator::default();
        let config = generator.config_mut();
        config.institution = "Springfield High".into();
        config.grade = "10th".into();
        config.subject = "Physics".into();
        config.topics = "Motion".into();
        config.add_question_type(QuestionTypeSpec::new("MCQ", 5, 2));
        generator
    }

    #[test]
    fn test_generate_stores_document() {
        let mut generator = ready_form();
        let service = FakeService::replying("PHYSICS\n1. What is inertia?");
        generator.generate(&service).unwrap();
        assert_eq!(service.calls.get(), 1);
        assert!(generator.document().is_some());
    }

    #[test]
    fn test_invalid_form_does_not_call_service() {
        let mut generator = PaperGenerator::default();
        let service = FakeService::replying("x");
        assert!(matches!(
            generator.generate(&service),
            Err(DeskError::Validation(_))
        ));
        assert_eq!(service.calls.get(), 0);
        assert_eq!(generator.state(), &GenerationState::Idle);
    }

    #[test]
    fn test_second_request_while_in_flight_is_busy() {
        let mut generator = ready_form();
        generator.state = GenerationState::InFlight;
        let service = FakeService::replying("x");
        assert!(matches!(generator.generate(&service), Err(DeskError::Busy)));
        assert_eq!(service.calls.get(), 0);
    }

    #[test]
    fn test_reauthorization_resets_key_selection() {
        let mut generator = ready_form();
        let service = FakeService::failing("Requested entity was not found.");
        assert!(generator.generate(&service).is_err());
        assert!(!generator.is_authorized());
        assert!(matches!(generator.state(), GenerationState::Failed(_)));

        generator.select_key();
        assert!(generator.is_authorized());
    }

    #[test]
    fn test_blank_reply_is_empty_response() {
        let mut generator = ready_form();
        let service = FakeService::replying("  \n ");
        assert!(matches!(
            generator.generate(&service),
            Err(DeskError::EmptyResponse)
        ));
        assert!(generator.document().is_none());
    }

    #[test]
    fn test_export_without_document() {
        let generator = ready_form();
        let err = generator
            .export(&ExportExecutor::new(), SinkKind::Preview, &ExportTarget::Stdout)
            .unwrap_err();
        assert!(matches!(err, DeskError::NoDocument));
    }
}
