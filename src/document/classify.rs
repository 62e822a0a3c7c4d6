//! @acp:module "Content Classifier"
//! @acp:summary "Tags each line of generated text with its structural role"
//! @acp:domain documents
//! @acp:layer logic
//!
//! Classification runs an ordered rule table; the first rule that matches
//! wins. The question check runs before the upper-case check, so `"12."`
//! is a question even though it equals its own upper-case form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structural role of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    SectionHeader,
    Question,
    Blank,
    BodyText,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::SectionHeader => "SECTION_HEADER",
            LineKind::Question => "QUESTION",
            LineKind::Blank => "BLANK",
            LineKind::BodyText => "BODY_TEXT",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of the rule table: a tag and the predicate over the trimmed line
struct Rule {
    kind: LineKind,
    matches: fn(&str) -> bool,
}

/// Rules in precedence order. `BodyText` is the fallback and has no rule.
const RULES: &[Rule] = &[
    Rule {
        kind: LineKind::Blank,
        matches: is_blank,
    },
    Rule {
        kind: LineKind::Question,
        matches: is_question,
    },
    Rule {
        kind: LineKind::SectionHeader,
        matches: is_section_header,
    },
];

fn question_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.").expect("static regex"))
}

fn is_blank(trimmed: &str) -> bool {
    trimmed.is_empty()
}

fn is_question(trimmed: &str) -> bool {
    question_pattern().is_match(trimmed)
}

// Any non-empty line that survives upper-casing unchanged counts, including
// acronyms, lone letters and symbol-only lines like "***".
fn is_section_header(trimmed: &str) -> bool {
    !trimmed.is_empty() && !is_question(trimmed) && trimmed == trimmed.to_uppercase()
}

/// Classify one line of text. Never fails.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    RULES
        .iter()
        .find(|rule| (rule.matches)(trimmed))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::BodyText)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines_are_questions() {
        assert_eq!(classify("1. What is inertia?"), LineKind::Question);
        assert_eq!(classify("12. DEFINE FORCE"), LineKind::Question);
        assert_eq!(classify("   3.   indented"), LineKind::Question);
        assert_eq!(classify("7."), LineKind::Question);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("    "), LineKind::Blank);
        assert_eq!(classify("\t \t"), LineKind::Blank);
    }

    #[test]
    fn test_upper_case_lines_are_headers() {
        assert_eq!(classify("SECTION A"), LineKind::SectionHeader);
        assert_eq!(classify("PHYSICS"), LineKind::SectionHeader);
        // Documented quirk: acronyms, single letters and symbols count too
        assert_eq!(classify("NASA"), LineKind::SectionHeader);
        assert_eq!(classify("B"), LineKind::SectionHeader);
        assert_eq!(classify("---"), LineKind::SectionHeader);
        assert_eq!(classify("(a)"), LineKind::BodyText);
    }

    #[test]
    fn test_number_without_dot_is_header() {
        assert_eq!(classify("2024"), LineKind::SectionHeader);
        assert_eq!(classify("1) Explain"), LineKind::BodyText);
    }

    #[test]
    fn test_mixed_case_is_body() {
        assert_eq!(classify("Explain."), LineKind::BodyText);
        assert_eq!(classify("a) Newton"), LineKind::BodyText);
        assert_eq!(classify("Q1. Define"), LineKind::BodyText);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&LineKind::SectionHeader).unwrap();
        assert_eq!(json, "\"SECTION_HEADER\"");
        assert_eq!(LineKind::BodyText.to_string(), "BODY_TEXT");
    }
}
