//! Scan orchestration.

use std::sync::Arc;

use cdna_core::{
    parse_creator_data, validate_creator_data, validate_profile, ConfidenceScores, CreatorData,
    CreatorDna, CreatorDnaProfile, ValidationIssue,
};
use chrono::Utc;
use serde_json::Value;

use crate::aggregator::aggregate_content;
use crate::analyzers::{analyze_audience, analyze_humor, analyze_risk, analyze_tone};
use crate::error::{ScannerError, ScannerErrorCode};
use crate::llm::ChatCompletion;
use crate::types::ScannerConfig;

/// Turns a creator's posts into a [`CreatorDnaProfile`].
///
/// Stages: validate → aggregate → analyze (four concurrent model calls) →
/// assemble. The scanner never persists anything; saving a profile is the
/// caller's job.
#[derive(Clone)]
pub struct CreatorDnaScanner {
    llm: Arc<dyn ChatCompletion>,
    config: ScannerConfig,
}

impl std::fmt::Debug for CreatorDnaScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatorDnaScanner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CreatorDnaScanner {
    #[must_use]
    pub fn new(llm: Arc<dyn ChatCompletion>, config: ScannerConfig) -> Self {
        Self { llm, config }
    }

    #[must_use]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Decode an untrusted JSON document and scan it.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` when the document does not describe valid creator
    /// data, otherwise the same errors as [`CreatorDnaScanner::scan`].
    pub async fn scan_json(&self, body: Value) -> Result<CreatorDnaProfile, ScannerError> {
        let data = parse_creator_data(body).map_err(|issues| validation_error(&issues))?;
        self.scan(&data).await
    }

    /// Scan already-decoded creator data.
    ///
    /// Model failures never fail the scan; each affected attribute falls back
    /// to a low-confidence default instead.
    ///
    /// # Errors
    ///
    /// - `VALIDATION_ERROR` if a field-level rule is violated.
    /// - `INSUFFICIENT_DATA` if there are no posts.
    /// - `LLM_ERROR` if an analysis task panics or the assembled profile is
    ///   out of range.
    pub async fn scan(&self, data: &CreatorData) -> Result<CreatorDnaProfile, ScannerError> {
        validate_creator_data(data).map_err(|issues| validation_error(&issues))?;

        if data.posts.is_empty() {
            return Err(ScannerError::new(
                ScannerErrorCode::InsufficientData,
                "No posts provided for analysis",
            ));
        }

        let content = Arc::new(aggregate_content(data, self.config.max_content_length));
        tracing::info!(
            creator_id = %data.creator_id,
            total_posts = content.total_posts,
            combined_chars = content.combined_text.chars().count(),
            "scanning creator"
        );

        let timeout = self.config.llm_timeout;
        let tone = {
            let (llm, content) = (Arc::clone(&self.llm), Arc::clone(&content));
            tokio::spawn(async move { analyze_tone(llm.as_ref(), &content, timeout).await })
        };
        let humor = {
            let (llm, content) = (Arc::clone(&self.llm), Arc::clone(&content));
            tokio::spawn(async move { analyze_humor(llm.as_ref(), &content, timeout).await })
        };
        let risk = {
            let (llm, content) = (Arc::clone(&self.llm), Arc::clone(&content));
            tokio::spawn(async move { analyze_risk(llm.as_ref(), &content, timeout).await })
        };
        let audience = {
            let (llm, content) = (Arc::clone(&self.llm), Arc::clone(&content));
            tokio::spawn(async move { analyze_audience(llm.as_ref(), &content, timeout).await })
        };

        let (tone, humor, risk, audience) = tokio::try_join!(tone, humor, risk, audience)
            .map_err(|e| {
                tracing::error!(creator_id = %data.creator_id, error = %e, "analysis task failed");
                ScannerError::new(
                    ScannerErrorCode::LlmError,
                    "Failed to analyze creator content",
                )
                .with_details(Value::String(e.to_string()))
            })?;

        let profile = CreatorDnaProfile {
            creator_id: data.creator_id.clone(),
            generated_at: Utc::now(),
            creator_dna: CreatorDna {
                primary_tone: tone.value,
                humor_level: humor.value.level,
                dark_humor_present: humor.value.dark_humor,
                risk_tolerance: risk.value,
                audience_type: audience.value,
                confidence: ConfidenceScores {
                    tone: tone.confidence,
                    humor: humor.confidence,
                    risk: risk.confidence,
                    audience: audience.confidence,
                },
            },
        };

        validate_profile(&profile).map_err(|issues| {
            tracing::error!(creator_id = %data.creator_id, ?issues, "assembled profile out of range");
            ScannerError::new(
                ScannerErrorCode::LlmError,
                "Failed to analyze creator content",
            )
            .with_details(issues_json(&issues))
        })?;

        tracing::info!(
            creator_id = %profile.creator_id,
            tone = %profile.creator_dna.primary_tone,
            risk = %profile.creator_dna.risk_tolerance,
            audience = %profile.creator_dna.audience_type,
            "scan complete"
        );

        Ok(profile)
    }
}

fn validation_error(issues: &[ValidationIssue]) -> ScannerError {
    ScannerError::new(ScannerErrorCode::ValidationError, "Invalid input data")
        .with_details(issues_json(issues))
}

fn issues_json(issues: &[ValidationIssue]) -> Value {
    serde_json::to_value(issues).unwrap_or(Value::Null)
}
