use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::CaptionSource;
use crate::source_utils::AUTO_LANGUAGE;
use crate::transcript::payload::decode_provider_content;
use crate::transcript::CaptionFragment;

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.supadata.ai/v1";

/// Client for the Supadata transcript API
#[derive(Debug)]
pub struct Supadata {
    /// HTTP client for API requests
    client: Client,
    /// API key sent in the `x-api-key` header
    api_key: String,
    /// API base URL
    endpoint: String,
}

impl Supadata {
    /// Create a new Supadata client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the transcript request URL for a video
    pub fn transcript_url(&self, video_id: &str, language: &str) -> Result<Url, ProviderError> {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };

        let mut url = Url::parse(&format!("{}/transcript", base))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", base, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("mode", "auto");
            query.append_pair("url", &format!("https://youtu.be/{}", video_id));
            if !language.is_empty() && language != AUTO_LANGUAGE {
                query.append_pair("lang", language);
            }
        }

        Ok(url)
    }

    /// Decode a transcript response body into fragments in seconds
    pub fn parse_response(body: &str) -> Result<Vec<CaptionFragment>, ProviderError> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let has_content = json
            .get("content")
            .and_then(|c| c.as_array())
            .is_some_and(|items| !items.is_empty());
        if !has_content {
            return Err(ProviderError::NoTranscript(
                "no transcript in the selected language".to_string(),
            ));
        }

        decode_provider_content(json.get("content"))
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Map a failed response to a provider error
    fn error_for_status(status: StatusCode, body: &str) -> ProviderError {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| format!("Transcript request failed ({})", status.as_u16()));

        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
            StatusCode::NOT_FOUND => ProviderError::NoTranscript(message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl CaptionSource for Supadata {
    async fn fetch_captions(&self, video_id: &str, language: &str) -> Result<Vec<CaptionFragment>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "transcript API key is not set".to_string(),
            ));
        }

        let url = self.transcript_url(video_id, language)?;
        debug!("Fetching transcript for {} in language: {}", video_id, language);

        let response = self.client.get(url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let err = Self::error_for_status(status, &body);
            error!("Transcript fetch failed: {}", err);
            return Err(err);
        }

        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "supadata"
    }
}
