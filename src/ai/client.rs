//! LLM (`OpenAI`) API client module
//!
//! Encapsulates all LLM API interactions for generating key points.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::DigestError;
use crate::prompt::SYSTEM_PROMPT;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const MAX_OUTPUT_TOKENS: usize = 500;
const TEMPERATURE: f64 = 0.2;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// One generation call: credential, model and the user prompt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

/// Anything that can turn a prompt into text.
///
/// An empty `Ok` string is a valid outcome distinct from failure; transport
/// and status errors come back as `Err`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DigestError>;
}

/// LLM API client backed by the `OpenAI` Responses API
pub struct LlmClient {
    http: Client,
    base_url: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DigestError> {
        Self::with_base_url(DEFAULT_OPENAI_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, DigestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                DigestError::HttpError(format!("Failed to build OpenAI HTTP client: {e}"))
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn build_prompt(&self, prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(SYSTEM_PROMPT.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(prompt.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DigestError> {
        #[cfg(feature = "debug-logs")]
        info!("Using OpenAI prompt:\n{}", request.prompt);

        let prompt = self.build_prompt(&request.prompt);
        let estimated_input_tokens = prompt
            .iter()
            .map(|msg| estimate_tokens(&format!("{:?}", msg.content)))
            .sum::<usize>();

        info!(
            "Requesting {} with {} prompt chars (~{} tokens)",
            request.model,
            request.prompt.chars().count(),
            estimated_input_tokens
        );

        let request_body = json!({
            "model": request.model,
            "input": build_responses_input_from_prompt(&prompt),
            "max_output_tokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        });

        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", request.api_key)
            .parse()
            .map_err(|e| DigestError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json"
            .parse()
            .map_err(|e| DigestError::HttpError(format!("Invalid Content-Type header: {e}")))?;
        headers.insert("Content-Type", content_type_value);

        let response = self
            .http
            .post(format!("{}/v1/responses", self.base_url))
            .headers(headers)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(DigestError::OpenAIError(format!(
                "OpenAI error {}: {error_text}",
                status.as_u16()
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            DigestError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        let text = extract_output_text(&response_json).unwrap_or_default();
        debug!("OpenAI returned {} chars", text.chars().count());
        Ok(text.trim().to_string())
    }
}

/// Converts chat messages into the Responses API `input` array with typed parts.
pub(crate) fn build_responses_input_from_prompt(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter(|m| !matches!(m.role, MessageRole::assistant))
        .filter_map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                _ => "user",
            };
            let Content::Text(t) = &m.content else {
                return None;
            };
            Some(json!({
                "role": role_str,
                "content": [{ "type": "input_text", "text": t }]
            }))
        })
        .collect()
}

/// Pulls generated text out of a Responses API payload: the `output_text`
/// convenience field if present, otherwise every `output_text` content part.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    response_json
        .get("output_text")
        .and_then(|v| v.as_str())
        .map(std::string::ToString::to_string)
        .or_else(|| {
            let mut collected: Vec<String> = Vec::new();
            if let Some(items) = response_json.get("output").and_then(|o| o.as_array()) {
                for item in items {
                    if let Some(parts) = item.get("content").and_then(|c| c.as_array()) {
                        for p in parts {
                            let is_output_text = p
                                .get("type")
                                .and_then(|t| t.as_str())
                                .is_some_and(|t| t == "output_text");
                            if !is_output_text {
                                continue;
                            }
                            if let Some(s) = p.get("text").and_then(|t| t.as_str()) {
                                collected.push(s.to_string());
                            } else if let Some(s) = p
                                .get("text")
                                .and_then(|t| t.get("value"))
                                .and_then(|v| v.as_str())
                            {
                                collected.push(s.to_string());
                            }
                        }
                    }
                }
            }
            if collected.is_empty() {
                None
            } else {
                Some(collected.join("\n"))
            }
        })
}
