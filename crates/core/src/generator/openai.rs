//! OpenAI chat-completions generator implementation.

use async_trait::async_trait;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::GeneratorConfig;
use super::error::GenerationError;
use super::traits::SlideGenerator;
use super::types::{GenerationRequest, Slide, SlideBody};

/// Generator backed by an OpenAI-compatible chat-completions API.
///
/// Requests JSON mode and still parses defensively: responses wrapped in
/// code fences or prose are salvaged by extracting the outermost JSON
/// object.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Extract a JSON object from model output, tolerating surrounding text.
    fn extract_json(text: &str) -> Result<serde_json::Value, GenerationError> {
        if let Ok(value) = serde_json::from_str(text) {
            return Ok(value);
        }
        // Fall back to the outermost brace-delimited block
        let re = Regex::new(r"(?s)(\{.*\})").map_err(|e| GenerationError::Json(e.to_string()))?;
        if let Some(caps) = re.captures(text) {
            if let Some(block) = caps.get(1) {
                if let Ok(value) = serde_json::from_str(block.as_str()) {
                    return Ok(value);
                }
            }
        }
        Err(GenerationError::Json(
            "response could not be parsed as JSON".to_string(),
        ))
    }

    /// Turn the parsed payload into validated slides.
    fn normalize_slides(
        payload: serde_json::Value,
        request: &GenerationRequest,
    ) -> Result<Vec<Slide>, GenerationError> {
        let raw = payload
            .get("slides")
            .and_then(|v| v.as_array())
            .cloned()
            .ok_or_else(|| {
                GenerationError::InvalidSlides("missing 'slides' array".to_string())
            })?;

        let mut slides = Vec::new();
        for entry in raw {
            let heading = entry
                .get("heading")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_string();

            let body = match entry.get("body") {
                Some(serde_json::Value::String(s)) => SlideBody::PlainText(s.trim().to_string()),
                Some(serde_json::Value::Object(map)) => {
                    let mut sections = BTreeMap::new();
                    for (k, v) in map {
                        let text = match v {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        sections.insert(k.clone(), text);
                    }
                    SlideBody::Structured(sections)
                }
                Some(other) => SlideBody::PlainText(other.to_string()),
                None => SlideBody::PlainText(String::new()),
            };

            if heading.is_empty() || body.is_empty() {
                debug!("Skipping incomplete slide: {:?}", entry);
                continue;
            }
            slides.push(Slide { heading, body });
        }

        let expected = request.kind.expected_slides();
        if request.kind.strict_count() && slides.len() != expected {
            return Err(GenerationError::InvalidSlides(format!(
                "expected {} slides, got {}",
                expected,
                slides.len()
            )));
        }
        if slides.is_empty() {
            return Err(GenerationError::InvalidSlides(
                "no usable slides in response".to_string(),
            ));
        }
        if slides.len() != expected {
            warn!(
                "Expected {} slides for {:?}, got {}",
                expected,
                request.kind,
                slides.len()
            );
        }

        Ok(slides)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl SlideGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Slide>, GenerationError> {
        let topic = request.topic_name.trim();
        info!("Generating {:?} slides for topic: {}", request.kind, topic);

        let chat_request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.kind.system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.kind.user_prompt(topic),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            temperature: request.kind.temperature(),
            max_tokens: request.kind.max_tokens(),
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(GenerationError::Api { status, message });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Json(e.to_string()))?;

        let text = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| GenerationError::Json("empty choices".to_string()))?;

        let payload = Self::extract_json(&text)?;
        let slides = Self::normalize_slides(payload, request)?;

        info!(
            "Generated {} slides for topic: {}",
            slides.len(),
            topic
        );
        Ok(slides)
    }
}
