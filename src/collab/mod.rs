//! @acp:module "Content Collaborator"
//! @acp:summary "External generative service for papers, quizzes, grading and video"
//! @acp:domain collaborator
//! @acp:layer service
//!
//! The service is reached through the [`Collaborator`] trait so views and
//! tests never depend on the HTTP client directly. Failures come back as
//! error strings; [`classify_failure`] turns them into typed errors and
//! spots the "re-select your API key" condition.

pub mod http;
pub mod types;

pub use http::HttpCollaborator;
pub use types::{AspectRatio, ImagePayload, MediaLocator, Quiz, QuizQuestion};

use tracing::warn;

use crate::document::GeneratedDocument;
use crate::error::{DeskError, Result};
use crate::paper::PaperConfig;

/// Message the service returns when the selected key or billing project
/// is no longer usable and must be picked again
pub const REAUTHORIZE_MARKER: &str = "Requested entity was not found";

/// Content-generation service
pub trait Collaborator {
    /// Generate a question paper as plain text
    fn generate_paper(&self, paper: &PaperConfig) -> Result<GeneratedDocument>;

    /// Generate a multiple-choice quiz from lesson notes
    fn generate_quiz(&self, notes: &str, question_count: u32) -> Result<Quiz>;

    /// Grade an answer-sheet image
    fn evaluate_paper(&self, image: &ImagePayload, instructions: &str) -> Result<String>;

    /// Generate a short video and return where it can be fetched
    fn generate_video(&self, prompt: &str, aspect: AspectRatio) -> Result<MediaLocator>;
}

/// Map a failure message from the service to an error
pub fn classify_failure(message: impl Into<String>) -> DeskError {
    let message = message.into();
    if message.contains(REAUTHORIZE_MARKER) {
        DeskError::ReauthorizationRequired(message)
    } else {
        DeskError::Collaborator(message)
    }
}

/// Whether the user currently has a usable API key selected.
///
/// Any result carrying [`DeskError::ReauthorizationRequired`] flips it back
/// to unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySelection {
    authorized: bool,
}

impl KeySelection {
    pub fn new(authorized: bool) -> Self {
        Self { authorized }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn select(&mut self) {
        self.authorized = true;
    }

    /// Inspect a service result and reset on a reauthorization failure
    pub fn observe<T>(&mut self, result: &Result<T>) {
        if let Err(DeskError::ReauthorizationRequired(message)) = result {
            warn!("API key needs to be selected again: {}", message);
            self.authorized = false;
        }
    }
}

impl Default for KeySelection {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            classify_failure("404: Requested entity was not found."),
            DeskError::ReauthorizationRequired(_)
        ));
        assert!(matches!(
            classify_failure("quota exceeded"),
            DeskError::Collaborator(_)
        ));
    }

    #[test]
    fn test_key_selection_resets_on_reauthorization() {
        let mut keys = KeySelection::default();

        let ok: Result<()> = Ok(());
        keys.observe(&ok);
        assert!(keys.is_authorized());

        let other: Result<()> = Err(classify_failure("timeout"));
        keys.observe(&other);
        assert!(keys.is_authorized());

        let reauth: Result<()> = Err(classify_failure(REAUTHORIZE_MARKER));
        keys.observe(&reauth);
        assert!(!keys.is_authorized());

        keys.select();
        assert!(keys.is_authorized());
    }
}
