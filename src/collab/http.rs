//! @acp:module "HTTP Collaborator"
//! @acp:summary "Blocking client for the generative language REST API"
//! @acp:domain collaborator
//! @acp:layer integration

use std::time::Duration;

use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::types::{AspectRatio, ImagePayload, MediaLocator, Quiz};
use super::{classify_failure, Collaborator};
use crate::config::CollaboratorConfig;
use crate::document::GeneratedDocument;
use crate::error::{DeskError, Result};
use crate::paper::{prompt, PaperConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";
const VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(10);
const VIDEO_MAX_POLLS: u32 = 60;

/// Content service over HTTP
pub struct HttpCollaborator {
    agent: ureq::Agent,
    endpoint: String,
    text_model: String,
    video_model: String,
    api_key: String,
    poll_interval: Duration,
}

impl HttpCollaborator {
    /// Build a client, reading the API key from the configured variable
    pub fn from_config(config: &CollaboratorConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| DeskError::MissingCredential(config.api_key_env.clone()))?;

        Ok(Self::new(config, api_key))
    }

    pub fn new(config: &CollaboratorConfig, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("schooldesk/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            video_model: config.video_model.clone(),
            api_key,
            poll_interval: VIDEO_POLL_INTERVAL,
        }
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.endpoint, model, method)
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value> {
        debug!("POST {}", url);
        let response = self
            .agent
            .post(url)
            .set(API_KEY_HEADER, &self.api_key)
            .send_json(body.clone())
            .map_err(failure_from_http)?;
        Ok(response.into_json()?)
    }

    fn get(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .set(API_KEY_HEADER, &self.api_key)
            .call()
            .map_err(failure_from_http)?;
        Ok(response.into_json()?)
    }

    fn generate_text(&self, parts: Vec<Value>, json_output: bool) -> Result<String> {
        let mut body = json!({ "contents": [{ "parts": parts }] });
        if json_output {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        let url = self.model_url(&self.text_model, "generateContent");
        let response: GenerateResponse = serde_json::from_value(self.post(&url, &body)?)?;
        response.text()
    }
}

impl Collaborator for HttpCollaborator {
    fn generate_paper(&self, paper: &PaperConfig) -> Result<GeneratedDocument> {
        info!("Generating {} paper for grade {}", paper.subject, paper.grade);
        let text = self.generate_text(vec![json!({ "text": prompt::paper_prompt(paper) })], false)?;
        Ok(GeneratedDocument::new(text))
    }

    fn generate_quiz(&self, notes: &str, question_count: u32) -> Result<Quiz> {
        info!("Generating {}-question quiz", question_count);
        let text = self.generate_text(
            vec![json!({ "text": prompt::quiz_prompt(notes, question_count) })],
            true,
        )?;
        Quiz::from_response(&text)
    }

    fn evaluate_paper(&self, image: &ImagePayload, instructions: &str) -> Result<String> {
        info!("Evaluating answer sheet ({} bytes)", image.bytes.len());
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        self.generate_text(
            vec![
                json!({ "inlineData": { "mimeType": image.mime_type, "data": data } }),
                json!({ "text": prompt::evaluation_prompt(instructions) }),
            ],
            false,
        )
    }

    fn generate_video(&self, prompt: &str, aspect: AspectRatio) -> Result<MediaLocator> {
        info!("Generating {} video", aspect.as_str());
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "aspectRatio": aspect.as_str() }
        });
        let url = self.model_url(&self.video_model, "predictLongRunning");
        let mut operation: Operation = serde_json::from_value(self.post(&url, &body)?)?;

        let mut polls = 0;
        while !operation.done {
            if polls >= VIDEO_MAX_POLLS {
                return Err(DeskError::Collaborator(format!(
                    "video operation {} did not finish",
                    operation.name
                )));
            }
            std::thread::sleep(self.poll_interval);
            polls += 1;
            let url = format!("{}/{}", self.endpoint, operation.name);
            operation = serde_json::from_value(self.get(&url)?)?;
            debug!("Video operation {} poll {}: done={}", operation.name, polls, operation.done);
        }

        operation.media()
    }
}

/// Turn an HTTP failure into a service failure, keeping the API's message
fn failure_from_http(err: ureq::Error) -> DeskError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            classify_failure(format!("HTTP {}: {}", code, api_error_message(&body)))
        }
        transport => DeskError::from(transport),
    }
}

/// Pull `error.message` out of an API error body, falling back to the body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Result<String> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(DeskError::EmptyResponse);
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct Operation {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<Value>,
    error: Option<Value>,
}

impl Operation {
    fn media(&self) -> Result<MediaLocator> {
        if let Some(ref error) = self.error {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("video generation failed");
            return Err(classify_failure(message));
        }

        self.response
            .as_ref()
            .and_then(|r| r.pointer("/generateVideoResponse/generatedSamples/0/video/uri"))
            .and_then(Value::as_str)
            .map(|uri| MediaLocator {
                uri: uri.to_string(),
            })
            .ok_or(DeskError::EmptyResponse)
    }
}
