//! @acp:module "Paper Configuration"
//! @acp:summary "Question paper form state with derived total marks"
//! @acp:domain papers
//! @acp:layer model

pub mod generator;
pub mod prompt;

pub use generator::{GenerationState, PaperGenerator};

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// Difficulty requested from the content service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty: {}. Use easy, medium or hard", s)),
        }
    }
}

/// Largest total a paper may carry
pub const MAX_TOTAL_MARKS: u64 = u32::MAX as u64;

/// One row of the question breakdown: kind, how many, marks each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypeSpec {
    pub kind: String,
    pub count: u32,
    pub marks: u32,
}

impl QuestionTypeSpec {
    pub fn new(kind: impl Into<String>, count: u32, marks: u32) -> Self {
        Self {
            kind: kind.into(),
            count,
            marks,
        }
    }

    /// Marks for the whole row; widened so no `u32` inputs can overflow
    pub fn total(&self) -> u64 {
        u64::from(self.count) * u64::from(self.marks)
    }
}

/// Parses `KIND:COUNT:MARKS`, e.g. `MCQ:10:1`
impl std::str::FromStr for QuestionTypeSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.rsplitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(format!("Expected KIND:COUNT:MARKS, got '{}'", s));
        }
        let marks = parts[0]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid marks in '{}'", s))?;
        let count = parts[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid count in '{}'", s))?;
        let kind = parts[2].trim();
        if kind.is_empty() {
            return Err(format!("Missing question type in '{}'", s));
        }
        if count.checked_mul(marks).is_none() {
            return Err(format!("'{}' exceeds the marks a paper can carry", s));
        }
        Ok(QuestionTypeSpec::new(kind, count, marks))
    }
}

/// Question paper form state.
///
/// `total_marks` is derived from `question_types` and recomputed by every
/// method that touches the list, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PaperConfigRepr")]
pub struct PaperConfig {
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub title: String,
    pub grade: String,
    pub medium: String,
    pub subject: String,
    pub topics: String,
    pub difficulty: Difficulty,
    question_types: Vec<QuestionTypeSpec>,
    total_marks: u64,
}

/// Wire shape; `total_marks` in the input is ignored and recomputed
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperConfigRepr {
    #[serde(default)]
    institution: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    medium: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    topics: String,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    question_types: Vec<QuestionTypeSpec>,
}

impl From<PaperConfigRepr> for PaperConfig {
    fn from(repr: PaperConfigRepr) -> Self {
        let mut config = PaperConfig {
            institution: repr.institution,
            logo: repr.logo,
            title: repr.title,
            grade: repr.grade,
            medium: repr.medium,
            subject: repr.subject,
            topics: repr.topics,
            difficulty: repr.difficulty,
            question_types: Vec::new(),
            total_marks: 0,
        };
        config.set_question_types(repr.question_types);
        config
    }
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            institution: String::new(),
            logo: None,
            title: "Question Paper".to_string(),
            grade: String::new(),
            medium: "English".to_string(),
            subject: String::new(),
            topics: String::new(),
            difficulty: Difficulty::default(),
            question_types: Vec::new(),
            total_marks: 0,
        }
    }
}

impl PaperConfig {
    /// Form with the required fields filled; everything else at its default
    pub fn new(
        institution: impl Into<String>,
        grade: impl Into<String>,
        subject: impl Into<String>,
        topics: impl Into<String>,
    ) -> Self {
        Self {
            institution: institution.into(),
            grade: grade.into(),
            subject: subject.into(),
            topics: topics.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_question_type(mut self, spec: QuestionTypeSpec) -> Self {
        self.add_question_type(spec);
        self
    }

    pub fn question_types(&self) -> &[QuestionTypeSpec] {
        &self.question_types
    }

    pub fn total_marks(&self) -> u64 {
        self.total_marks
    }

    pub fn add_question_type(&mut self, spec: QuestionTypeSpec) {
        self.question_types.push(spec);
        self.recompute_total();
    }

    /// Remove the row at `index`; returns it if it existed
    pub fn remove_question_type(&mut self, index: usize) -> Option<QuestionTypeSpec> {
        if index >= self.question_types.len() {
            return None;
        }
        let removed = self.question_types.remove(index);
        self.recompute_total();
        Some(removed)
    }

    /// Replace the row at `index`; returns false when out of range
    pub fn update_question_type(&mut self, index: usize, spec: QuestionTypeSpec) -> bool {
        match self.question_types.get_mut(index) {
            Some(slot) => {
                *slot = spec;
                self.recompute_total();
                true
            }
            None => false,
        }
    }

    pub fn set_question_types(&mut self, specs: Vec<QuestionTypeSpec>) {
        self.question_types = specs;
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_marks = self
            .question_types
            .iter()
            .map(QuestionTypeSpec::total)
            .fold(0u64, u64::saturating_add);
    }

    /// Check required form fields, collecting every problem
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.institution.trim().is_empty() {
            problems.push("institution name is required".to_string());
        }
        if self.grade.trim().is_empty() {
            problems.push("grade is required".to_string());
        }
        if self.subject.trim().is_empty() {
            problems.push("subject is required".to_string());
        }
        if self.topics.trim().is_empty() {
            problems.push("at least one topic is required".to_string());
        }
        if self.question_types.is_empty() {
            problems.push("add at least one question type".to_string());
        }
        for spec in &self.question_types {
            if spec.count == 0 {
                problems.push(format!("'{}' needs a question count above zero", spec.kind));
            }
        }
        if self.total_marks > MAX_TOTAL_MARKS {
            problems.push(format!(
                "total marks {} exceed the limit of {}",
                self.total_marks, MAX_TOTAL_MARKS
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DeskError::Validation(problems))
        }
    }

    /// Download name for the Word export: `{subject}_{grade}_paper.doc`
    pub fn word_file_name(&self) -> String {
        let clean = |s: &str| s.trim().replace(['/', '\\'], "-");
        format!("{}_{}_paper.doc", clean(&self.subject), clean(&self.grade))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PaperConfig {
        let mut config = PaperConfig {
            institution: "Springfield High".into(),
            grade: "10th".into(),
            subject: "Physics".into(),
            topics: "Motion, Force".into(),
            ..Default::default()
        };
        config.add_question_type(QuestionTypeSpec::new("MCQ", 10, 1));
        config.add_question_type(QuestionTypeSpec::new("Short Answer", 5, 3));
        config
    }

    #[test]
    fn test_total_marks_follows_mutations() {
        let mut config = physics();
        assert_eq!(config.total_marks(), 25);

        config.add_question_type(QuestionTypeSpec::new("Long Answer", 2, 5));
        assert_eq!(config.total_marks(), 35);

        assert!(config.update_question_type(0, QuestionTypeSpec::new("MCQ", 20, 1)));
        assert_eq!(config.total_marks(), 45);

        config.remove_question_type(1);
        assert_eq!(config.total_marks(), 30);

        assert!(config.remove_question_type(9).is_none());
        assert!(!config.update_question_type(9, QuestionTypeSpec::new("X", 1, 1)));
        assert_eq!(config.total_marks(), 30);

        config.set_question_types(vec![]);
        assert_eq!(config.total_marks(), 0);
    }

    #[test]
    fn test_word_file_name() {
        assert_eq!(physics().word_file_name(), "Physics_10th_paper.doc");
    }

    #[test]
    fn test_validation_lists_every_problem() {
        let config = PaperConfig::default();
        match config.validate() {
            Err(DeskError::Validation(problems)) => assert_eq!(problems.len(), 5),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(physics().validate().is_ok());
    }

    #[test]
    fn test_question_type_parse() {
        let spec: QuestionTypeSpec = "MCQ:10:1".parse().unwrap();
        assert_eq!(spec, QuestionTypeSpec::new("MCQ", 10, 1));

        let spec: QuestionTypeSpec = "Fill: the blank:4:2".parse().unwrap();
        assert_eq!(spec.kind, "Fill: the blank");

        assert!("MCQ:ten:1".parse::<QuestionTypeSpec>().is_err());
        assert!("MCQ".parse::<QuestionTypeSpec>().is_err());
        assert!(":1:1".parse::<QuestionTypeSpec>().is_err());
    }

    #[test]
    fn test_deserialized_total_is_recomputed() {
        let json = r#"{
            "institution": "A",
            "grade": "9th",
            "subject": "Maths",
            "topics": "Algebra",
            "questionTypes": [{"kind": "MCQ", "count": 4, "marks": 2}],
            "totalMarks": 999
        }"#;
        let config: PaperConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.total_marks(), 8);
    }

    #[test]
    fn test_oversized_row_is_rejected_when_parsed() {
        let err = "MCQ:100000:100000".parse::<QuestionTypeSpec>().unwrap_err();
        assert!(err.contains("exceeds"));
        assert!("MCQ:65536:65535".parse::<QuestionTypeSpec>().is_ok());
    }

    #[test]
    fn test_oversized_total_fails_validation() {
        let mut config = physics();
        config.add_question_type(QuestionTypeSpec::new("Essay", 100_000, 100_000));
        assert_eq!(config.total_marks(), 10_000_000_025);

        match config.validate() {
            Err(DeskError::Validation(problems)) => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("exceed the limit"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        config.remove_question_type(2);
        assert_eq!(config.total_marks(), 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_fills_required_fields() {
        let config = PaperConfig::new("Springfield High", "10th", "Physics", "Motion")
            .with_title("Unit Test")
            .with_question_type(QuestionTypeSpec::new("MCQ", 10, 1));

        assert_eq!(config.title, "Unit Test");
        assert_eq!(config.medium, "English");
        assert_eq!(config.total_marks(), 10);
        assert!(config.validate().is_ok());
    }
}
