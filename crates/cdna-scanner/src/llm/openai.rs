//! HTTP client for OpenAI-compatible chat-completion APIs.

use std::time::Duration;

use cdna_core::{AppConfig, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Url};

use super::types::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};
use super::{ChatCompletion, ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE};
use crate::error::LlmError;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Use [`OpenAiClient::new`] for the public API or
/// [`OpenAiClient::with_base_url`] to point at a proxy or a mock server.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client for the public OpenAI API using the default model.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, DEFAULT_LLM_MODEL, timeout_secs, DEFAULT_LLM_BASE_URL)
    }

    /// Creates a client against a custom base URL such as `http://host/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`LlmError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creator-dna/0.1")
            .build()?;

        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| LlmError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when `OPENAI_API_KEY` is unset,
    /// otherwise the same errors as [`OpenAiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &config.llm_model,
            config.llm_timeout_secs,
            &config.llm_base_url,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one chat request and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Api`] on a non-2xx status, carrying the provider's
    ///   error message when the body has one.
    /// - [`LlmError::Http`] on network failure or an undecodable body.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: ANALYSIS_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.into_first_content())
    }
}

impl ChatCompletion for OpenAiClient {
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> BoxFuture<'a, Result<String, LlmError>> {
        self.chat(system, user).boxed()
    }
}
