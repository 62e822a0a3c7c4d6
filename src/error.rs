//! @acp:module "Errors"
//! @acp:summary "Library error type and result alias"
//! @acp:domain cli
//! @acp:layer model

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the SchoolDesk library
#[derive(Error, Debug)]
pub enum DeskError {
    /// Required form fields are missing or out of range
    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The content service reported a failure
    #[error("Content service failed: {0}")]
    Collaborator(String),

    /// The content service answered without usable content
    #[error("Content service returned no usable content")]
    EmptyResponse,

    /// The service asked for the API key / billing project to be selected again
    #[error("API key must be re-selected: {0}")]
    ReauthorizationRequired(String),

    /// No credential found in the configured environment variable
    #[error("Missing API key: set the {0} environment variable")]
    MissingCredential(String),

    /// A generation request is already in flight for this view
    #[error("A generation request is already in progress")]
    Busy,

    /// Export was requested before any document was generated
    #[error("No document has been generated yet")]
    NoDocument,

    /// The export destination could not be opened
    #[error("Cannot open {destination}: {reason}")]
    SinkUnavailable { destination: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Template syntax error: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unsupported records file: {}", .0.display())]
    UnsupportedRecords(PathBuf),

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for DeskError {
    fn from(err: ureq::Error) -> Self {
        DeskError::Http(Box::new(err))
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, DeskError>;
