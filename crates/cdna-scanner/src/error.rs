use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failures of a single model call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid model API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("model API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

/// Why a model response could not be decoded into an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("malformed JSON in model output: {0}")]
    InvalidJson(String),
}

/// Scan-level error codes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScannerErrorCode {
    ValidationError,
    InsufficientData,
    LlmError,
}

impl ScannerErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScannerErrorCode::ValidationError => "VALIDATION_ERROR",
            ScannerErrorCode::InsufficientData => "INSUFFICIENT_DATA",
            ScannerErrorCode::LlmError => "LLM_ERROR",
        }
    }
}

impl std::fmt::Display for ScannerErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal error of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{code}: {message}")]
pub struct ScannerError {
    pub code: ScannerErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ScannerError {
    pub fn new(code: ScannerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_error_serializes_code_in_screaming_case() {
        let err = ScannerError::new(ScannerErrorCode::InsufficientData, "no posts");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["code"], "INSUFFICIENT_DATA");
        assert_eq!(json["message"], "no posts");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn scanner_error_display_includes_code() {
        let err = ScannerError::new(ScannerErrorCode::LlmError, "boom")
            .with_details(Value::String("task panicked".to_string()));
        assert_eq!(err.to_string(), "LLM_ERROR: boom");
        assert_eq!(err.details, Some(Value::String("task panicked".to_string())));
    }

    #[test]
    fn serde_code_matches_as_str() {
        for code in [
            ScannerErrorCode::ValidationError,
            ScannerErrorCode::InsufficientData,
            ScannerErrorCode::LlmError,
        ] {
            let json = serde_json::to_value(code).expect("serialize");
            assert_eq!(json.as_str(), Some(code.as_str()));
        }
    }
}
