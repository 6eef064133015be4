use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::ai::error::PipelineError;

// ============================================================================
// Outbound HTTP — one bounded round-trip per resolution request
// ============================================================================

/// Stored AI service settings (config file `ai:` section, CLI overrides).
#[derive(Debug, Clone, Default)]
pub struct AiSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Every outbound call is bounded by this timeout and never retried.
pub const REQUEST_TIMEOUT_SECS: u64 = 25;

/// Blocking HTTP client for the AI suggestion/review service.
pub struct AiClient {
    http: reqwest::blocking::Client,
    settings: AiSettings,
}

impl AiClient {
    pub fn new(settings: AiSettings) -> Result<Self, PipelineError> {
        if settings.endpoint.trim().is_empty() {
            return Err(PipelineError::MissingEndpoint);
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(PipelineError::Network)?;

        Ok(AiClient { http, settings })
    }

    /// POST a JSON body and return the raw response text. Non-2xx statuses
    /// become an error carrying a best-effort message from the body.
    pub fn post<T: Serialize>(&self, body: &T) -> Result<String, PipelineError> {
        let mut request = self
            .http
            .post(self.settings.endpoint.trim())
            .header("Accept", "application/json")
            .json(body);

        if let Some(key) = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            request = request
                .header("Authorization", format!("Bearer {}", key))
                .header("x-api-key", key);
        }

        let response = request.send().map_err(classify_transport_error)?;
        let status = response.status();
        let text = response.text().map_err(classify_transport_error)?;

        if !status.is_success() {
            return Err(PipelineError::Http {
                status: status.as_u16(),
                message: extract_error_message(&text, status.as_u16()),
            });
        }

        Ok(text)
    }
}

fn classify_transport_error(error: reqwest::Error) -> PipelineError {
    if error.is_timeout() {
        PipelineError::Timeout {
            seconds: REQUEST_TIMEOUT_SECS,
        }
    } else {
        PipelineError::Network(error)
    }
}

/// Best-effort human-readable message from an error response body: the
/// JSON `message` or `error` field, else the trimmed raw text, else a
/// generic status line.
pub fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                let message = message.trim();
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(300).collect();
    }

    format!("HTTP {}", status)
}
