//! @acp:module "Sink Types"
//! @acp:summary "Supported export sinks and their metadata"
//! @acp:domain export
//! @acp:layer model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported export sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    /// On-screen review
    Preview,
    /// Word-compatible `.doc` download
    Word,
    /// Standalone print-ready page
    Print,
}

impl SinkKind {
    /// Get all built-in sinks
    pub fn all() -> &'static [SinkKind] {
        &[SinkKind::Preview, SinkKind::Word, SinkKind::Print]
    }

    /// Get the human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SinkKind::Preview => "Preview",
            SinkKind::Word => "Word document",
            SinkKind::Print => "Print page",
        }
    }

    /// MIME type of the rendered output
    pub fn media_type(&self) -> &'static str {
        match self {
            SinkKind::Preview => "text/html",
            SinkKind::Word => "application/vnd.ms-word",
            SinkKind::Print => "text/html",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SinkKind::Preview => "preview",
            SinkKind::Word => "word",
            SinkKind::Print => "print",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preview" | "screen" => Ok(SinkKind::Preview),
            "word" | "doc" => Ok(SinkKind::Word),
            "print" | "pdf" => Ok(SinkKind::Print),
            _ => Err(format!("Unknown sink: {}. Use preview, word or print", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_parse() {
        assert_eq!("word".parse::<SinkKind>().unwrap(), SinkKind::Word);
        assert_eq!("PDF".parse::<SinkKind>().unwrap(), SinkKind::Print);
        assert_eq!("screen".parse::<SinkKind>().unwrap(), SinkKind::Preview);
        assert!("fax".parse::<SinkKind>().is_err());
    }

    #[test]
    fn test_sink_serialization() {
        assert_eq!(serde_json::to_string(&SinkKind::Word).unwrap(), "\"word\"");
        assert_eq!(SinkKind::Print.to_string(), "print");
    }
}
