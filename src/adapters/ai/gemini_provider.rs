//! Gemini Provider - CompletionProvider implementation for Google's
//! Gemini API.
//!
//! Talks to the `generateContent` endpoint. Authentication uses the
//! `x-goog-api-key` header. Conversation roles map to Gemini's `user` and
//! `model`; the reply is the joined text parts of the first candidate.
//!
//! One attempt per call: the relay has no retry policy, so neither does
//! this adapter. The only timeout is the HTTP client's own.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AiConfig::new(api_key).with_model("gemini-1.5-flash");
//! let provider = GeminiProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::domain::conversation::{ConversationHistory, TurnRole};
use crate::ports::{Completion, CompletionProvider, ProviderError};

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: AiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Sends a request, mapping transport failures.
    async fn send_request(&self, body: &GenerateContentRequest) -> Result<Response, ProviderError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_secs: self.config.timeout_secs as u32,
                    }
                } else if e.is_connect() {
                    ProviderError::network(format!("Connection failed: {}", e))
                } else {
                    ProviderError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ProviderError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &error_body))
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(
        &self,
        history: &ConversationHistory,
        message: &str,
    ) -> Result<Completion, ProviderError> {
        let body = GenerateContentRequest::from_conversation(history, message);

        let response = self.send_request(&body).await?;
        let response = self.handle_response_status(response).await?;

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("Failed to parse response: {}", e)))?;

        let reply_text = extract_reply(&api_response)?;

        Ok(Completion::from_exchange(
            history.clone(),
            message,
            reply_text,
        ))
    }
}

/// Maps an error status and body to a ProviderError.
fn map_error_status(status: StatusCode, error_body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationFailed,
        429 => ProviderError::RateLimited(error_description(error_body)),
        400 => ProviderError::InvalidRequest(error_description(error_body)),
        500..=599 => ProviderError::unavailable(format!(
            "Server error {}: {}",
            status,
            error_description(error_body)
        )),
        _ => ProviderError::network(format!(
            "Unexpected status {}: {}",
            status,
            error_description(error_body)
        )),
    }
}

/// Pulls the human-readable message out of a Gemini error body, falling
/// back to the raw body.
fn error_description(error_body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_body.to_string())
}

/// Extracts the reply text from a generateContent response.
fn extract_reply(response: &GenerateContentResponse) -> Result<String, ProviderError> {
    let parts = response
        .candidates
        .as_deref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .ok_or_else(|| ProviderError::parse("No candidate content in response"))?;

    let reply = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    if reply.trim().is_empty() {
        return Err(ProviderError::EmptyReply);
    }

    Ok(reply)
}

/// Gemini's name for a turn role.
fn gemini_role(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "user",
        TurnRole::Assistant => "model",
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize, PartialEq)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Builds the request body: the accumulated history followed by the new
    /// user message, in chronological order.
    fn from_conversation(history: &ConversationHistory, message: &str) -> Self {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::new(gemini_role(turn.role), &turn.text))
            .collect();
        contents.push(Content::new("user", message));

        Self { contents }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}
