//! Generation Orchestrator.
//!
//! One outbound completion call per request: validate the two text
//! bodies, render the mode's prompt template, submit it as a single user
//! turn, and map the response (or failure) into a typed result. Every
//! upstream failure is surfaced immediately; there is no retry loop.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use handoff_core::prompt::{compose, GenerationMode};

use crate::error::Error;

/// Sampling parameters sent with every completion request.
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 1.0;

/// Upper bound on one outbound call; the completion service is
/// long-latency, so this sits at the top of the recommended band.
const REQUEST_TIMEOUT_SECS: u64 = 60;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Completion service configuration, loaded once at process start and
/// immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GenerateConfig {
    /// Load configuration from environment variables.
    ///
    /// Only the credential is required; its absence is a deployment
    /// error, logged here with the variable name while the returned
    /// category stays generic.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            log::error!("OPENAI_API_KEY environment variable not set");
            Error::ConfigMissing
        })?;

        Ok(Self {
            api_key,
            base_url: std::env::var("HANDOFF_OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("HANDOFF_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    /// Apply CLI overrides to the configuration.
    pub fn with_overrides(mut self, base_url: Option<String>, model: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

/// Create an HTTP client with Bearer auth headers and a fixed timeout.
pub fn create_completion_client(config: &GenerateConfig) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
        log::error!("Credential is not a valid header value: {e}");
        Error::ConfigMissing
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| {
            log::error!("Failed to build HTTP client: {e}");
            Error::Internal
        })
}

/// One validated generation request. Request-scoped; discarded when the
/// exchange completes.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub chat_text: String,
    pub code_text: String,
    pub mode: GenerationMode,
}

/// Result of a successful generation: exactly one field is populated,
/// matching the request's mode.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<String>,
}

impl GenerationResult {
    fn for_mode(mode: GenerationMode, text: String) -> Self {
        let mut result = Self::default();
        match mode {
            GenerationMode::Summary => result.summary = Some(text),
            GenerationMode::ContinuationContext => result.continuation_context = Some(text),
            GenerationMode::Readme => result.readme = Some(text),
            GenerationMode::Combined => result.combined = Some(text),
        }
        result
    }
}

// Completion service wire types (OpenAI-style chat completions).

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Public data function - run one generation request against the
/// completion service and map the outcome into a [`GenerationResult`].
pub async fn generate_data(
    client: &reqwest::Client,
    config: &GenerateConfig,
    request: &GenerationRequest,
) -> Result<GenerationResult, Error> {
    if request.chat_text.trim().is_empty() {
        return Err(Error::BadInput("chatText must be non-empty".to_string()));
    }
    if request.code_text.trim().is_empty() {
        return Err(Error::BadInput("codeText must be non-empty".to_string()));
    }

    let prompt = compose(request.mode, &request.chat_text, &request.code_text);

    let body = CompletionRequest {
        model: &config.model,
        messages: vec![CompletionMessage {
            role: "user",
            content: &prompt,
        }],
        temperature: TEMPERATURE,
        top_p: TOP_P,
        max_tokens: request.mode.response_token_limit(),
        stream: false,
    };

    let url = format!("{}/chat/completions", config.base_url);

    let response = client.post(&url).json(&body).send().await.map_err(|e| {
        log::error!("Completion request failed in transit: {e}");
        Error::UpstreamUnavailable
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("Completion service returned {status}: {body}");
        return Err(classify_upstream_status(status.as_u16()));
    }

    let completion: CompletionResponse = response.json().await.map_err(|e| {
        log::error!("Failed to parse completion response: {e}");
        Error::Internal
    })?;

    match first_completion_text(completion) {
        Some(text) => Ok(GenerationResult::for_mode(request.mode, text)),
        None => {
            log::error!("Completion service returned a 2xx response with no usable text");
            Err(Error::UpstreamEmpty)
        }
    }
}

/// Map a non-2xx upstream status onto the error taxonomy.
fn classify_upstream_status(status: u16) -> Error {
    match status {
        401 => Error::Unauthorized,
        429 => Error::RateLimited,
        s if s >= 500 => Error::UpstreamUnavailable,
        _ => Error::Internal,
    }
}

/// First choice's text, if it holds anything beyond whitespace.
fn first_completion_text(response: CompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
}
