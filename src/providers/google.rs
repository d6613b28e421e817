/*!
 * Google Translate client.
 *
 * Talks to the public `translate_a/single` web endpoint that browser
 * extensions use. No API key is needed but the endpoint is rate limited,
 * so callers are expected to pace their requests.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Default public endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Longest text the endpoint accepts in one request
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Google Translate client bound to a language pair
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, without the `translate_a/single` path
    endpoint: String,
    source_language: String,
    target_language: String,
    max_chars: usize,
}

impl GoogleTranslator {
    /// Create a translator for the public endpoint
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self::with_options(
            source_language,
            target_language,
            DEFAULT_ENDPOINT,
            Duration::from_secs(30),
            DEFAULT_MAX_CHARS,
        )
    }

    /// Create a translator with a custom endpoint, timeout and length limit
    pub fn with_options(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
        max_chars: usize,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            max_chars,
        }
    }

    /// Build the request URL for one text
    pub fn request_url(&self, text: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(
            &base,
            &[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", base, e)))
    }

    /// Extract the translated text from a raw response body
    ///
    /// The body is a nested array; its first element lists segments and the
    /// first string of each segment is a piece of the translation.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Response has no segment list".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Response contained no translated text".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn source_language(&self) -> &str {
        &self.source_language
    }

    fn target_language(&self) -> &str {
        &self.target_language
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let length = text.chars().count();
        if length > self.max_chars {
            return Err(ProviderError::InvalidInput(format!(
                "Text has {} characters, limit is {}",
                length, self.max_chars
            )));
        }
        if text.trim().is_empty() {
            return Err(ProviderError::InvalidInput("Text is empty".to_string()));
        }

        let url = self.request_url(text)?;
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!(
                "{} -> {}",
                self.source_language, self.target_language
            )));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        debug!(
            "Google translate {} -> {}: {} chars in, {} bytes back",
            self.source_language,
            self.target_language,
            length,
            body.len()
        );

        Self::parse_response(&body)
    }
}
