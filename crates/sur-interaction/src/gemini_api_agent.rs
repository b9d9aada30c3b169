//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `generateContent` with the sampling parameters of each request.
//! Credentials come from `secret.json` (or the environment) and the model and
//! timeout from `config.toml`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sur_core::config::{GenerationConfig, SecretConfig};
use sur_core::error::{Result, SurError};
use sur_core::generation::{EndpointError, SamplingConfig, TextGenerator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// [`TextGenerator`] that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiApiAgent {
    /// Creates an agent with the provided API key and model.
    ///
    /// # Errors
    ///
    /// Returns `SurError::Config` if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SurError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Builds an agent from loaded secrets and the `[generation]` config.
    ///
    /// The model name in `secret.json` wins over the configured one. A
    /// missing API key does not fail construction: every request then fails
    /// with a permission error, so history and editing stay usable.
    ///
    /// # Errors
    ///
    /// Returns `SurError::Config` if the HTTP client cannot be built.
    pub fn from_config(secrets: &SecretConfig, config: &GenerationConfig) -> Result<Self> {
        let api_key = secrets.gemini_api_key().unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("Gemini API key not set; generation will be refused");
        }
        let model = secrets.gemini_model_name(&config.model_name);

        Self::new(api_key, model, Duration::from_secs(config.timeout_secs))
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> std::result::Result<String, EndpointError> {
        let url = format!("{BASE_URL}/{model}:generateContent", model = self.model);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            // The URL carries the API key; keep it out of the message.
            .map_err(|err| {
                EndpointError::transport(format!(
                    "Gemini API request failed: {}",
                    err.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            EndpointError::service(
                None,
                format!("Failed to parse Gemini response: {}", err.without_url()),
            )
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    async fn generate(
        &self,
        prompt: &str,
        config: &SamplingConfig,
    ) -> std::result::Result<String, EndpointError> {
        if !self.has_api_key() {
            return Err(EndpointError::permission(
                None,
                "Gemini API key not set. Set GEMINI_API_KEY or fill in secret.json",
            ));
        }
        let request = GenerateContentRequest::new(prompt, config);
        self.send_request(&request).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationParameters,
}

impl GenerateContentRequest {
    fn new(prompt: &str, config: &SamplingConfig) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationParameters {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParameters {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate. Empty when there are none
/// (e.g. a blocked prompt).
fn extract_text_response(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: &str) -> EndpointError {
    let (status_text, message) = match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(wrapper) => (
            wrapper.error.status.unwrap_or_default(),
            wrapper.error.message.unwrap_or_else(|| body.to_string()),
        ),
        Err(_) => (String::new(), body.to_string()),
    };

    let message = if status_text.is_empty() {
        message
    } else {
        format!("{status_text}: {message}")
    };

    let denied = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || status_text == "PERMISSION_DENIED"
        || status_text == "UNAUTHENTICATED";

    if denied {
        EndpointError::permission(Some(status.as_u16()), message)
    } else {
        EndpointError::service(Some(status.as_u16()), message)
    }
}
