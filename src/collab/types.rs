//! @acp:module "Collaborator Types"
//! @acp:summary "Request and response shapes for the content service"
//! @acp:domain collaborator
//! @acp:layer model

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// A generated multiple-choice quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Quiz {
    /// Parse the service's JSON answer, tolerating a markdown code fence
    pub fn from_response(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .and_then(|rest| rest.trim_end().strip_suffix("```"))
            .unwrap_or(trimmed);

        let quiz: Quiz = serde_json::from_str(body.trim())?;
        if quiz.questions.is_empty() {
            return Err(DeskError::EmptyResponse);
        }
        Ok(quiz)
    }

    /// Questions whose answer is not one of their options
    pub fn inconsistent_questions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.options.iter().any(|o| o == &q.correct_answer))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Answer-sheet image sent for grading
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Infer the MIME type from a file extension
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let mime_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            _ => {
                return Err(DeskError::Validation(vec![format!(
                    "unsupported image type: {}",
                    path.display()
                )]))
            }
        };
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: std::fs::read(path)?,
        })
    }
}

/// Video frame shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "16:9" | "landscape" => Ok(AspectRatio::Landscape),
            "9:16" | "portrait" => Ok(AspectRatio::Portrait),
            _ => Err(format!("Unknown aspect ratio: {}. Use 16:9 or 9:16", s)),
        }
    }
}

/// Location of a generated media resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaLocator {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = r#"{
        "title": "Plants",
        "questions": [
            {"question": "What do leaves make?", "options": ["Sugar", "Salt"], "correctAnswer": "Sugar"},
            {"question": "Roots absorb?", "options": ["Water", "Light"], "correctAnswer": "Air"}
        ]
    }"#;

    #[test]
    fn test_quiz_parse() {
        let quiz = Quiz::from_response(QUIZ).unwrap();
        assert_eq!(quiz.title, "Plants");
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.inconsistent_questions(), vec![1]);
    }

    #[test]
    fn test_quiz_parse_fenced() {
        let fenced = format!("```json\n{}\n```", QUIZ);
        assert_eq!(Quiz::from_response(&fenced).unwrap().questions.len(), 2);
    }

    #[test]
    fn test_quiz_without_questions_is_empty() {
        let err = Quiz::from_response(r#"{"title": "x", "questions": []}"#).unwrap_err();
        assert!(matches!(err, DeskError::EmptyResponse));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!("9:16".parse::<AspectRatio>().unwrap(), AspectRatio::Portrait);
        assert_eq!(AspectRatio::default().as_str(), "16:9");
        assert!("4:3".parse::<AspectRatio>().is_err());
    }
}
