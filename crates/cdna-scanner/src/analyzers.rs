//! Per-attribute analyzers.
//!
//! Each analyzer is total: a gateway error, a timeout or unparseable output
//! is logged and replaced by a fixed low-confidence fallback, so callers
//! always receive a valid value.

use std::time::Duration;

use cdna_core::{AttributeAnalysis, AudienceType, ContentTone, HumorAssessment, RiskTolerance};

use crate::confidence::apply_data_confidence_penalty;
use crate::error::{LlmError, ParseError};
use crate::llm::ChatCompletion;
use crate::parser::{
    parse_audience_response, parse_humor_response, parse_risk_response, parse_tone_response,
};
use crate::prompts::{
    build_audience_prompt, build_engagement_context, build_humor_prompt, build_risk_prompt,
    build_tone_prompt, SYSTEM_PROMPT,
};
use crate::types::AggregatedContent;

/// Confidence reported for every fallback value.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Raw comments shown to the risk prompt.
const RISK_COMMENT_LIMIT: usize = 30;

/// Humor level used when humor cannot be determined.
const FALLBACK_HUMOR_LEVEL: u8 = 3;

pub async fn analyze_tone(
    llm: &dyn ChatCompletion,
    content: &AggregatedContent,
    timeout: Duration,
) -> AttributeAnalysis<ContentTone> {
    let prompt = build_tone_prompt(&content.combined_text);
    run_analysis(llm, "tone", &prompt, timeout, content.total_posts, parse_tone_response)
        .await
        .unwrap_or_else(|| AttributeAnalysis {
            value: ContentTone::Casual,
            confidence: FALLBACK_CONFIDENCE,
            reasoning: "Unable to determine tone, defaulting to casual".to_string(),
        })
}

pub async fn analyze_humor(
    llm: &dyn ChatCompletion,
    content: &AggregatedContent,
    timeout: Duration,
) -> AttributeAnalysis<HumorAssessment> {
    let prompt = build_humor_prompt(&content.combined_text);
    run_analysis(llm, "humor", &prompt, timeout, content.total_posts, parse_humor_response)
        .await
        .unwrap_or_else(|| AttributeAnalysis {
            value: HumorAssessment {
                level: FALLBACK_HUMOR_LEVEL,
                dark_humor: false,
            },
            confidence: FALLBACK_CONFIDENCE,
            reasoning: "Unable to determine humor level, defaulting to moderate".to_string(),
        })
}

pub async fn analyze_risk(
    llm: &dyn ChatCompletion,
    content: &AggregatedContent,
    timeout: Duration,
) -> AttributeAnalysis<RiskTolerance> {
    let comments = content
        .all_comments
        .iter()
        .take(RISK_COMMENT_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = build_risk_prompt(&content.combined_text, &comments);
    run_analysis(llm, "risk", &prompt, timeout, content.total_posts, parse_risk_response)
        .await
        .unwrap_or_else(|| AttributeAnalysis {
            value: RiskTolerance::Medium,
            confidence: FALLBACK_CONFIDENCE,
            reasoning: "Unable to determine risk tolerance, defaulting to medium".to_string(),
        })
}

pub async fn analyze_audience(
    llm: &dyn ChatCompletion,
    content: &AggregatedContent,
    timeout: Duration,
) -> AttributeAnalysis<AudienceType> {
    let engagement = build_engagement_context(&content.avg_engagement, content.total_posts);
    let prompt = build_audience_prompt(&content.combined_text, &engagement);
    run_analysis(
        llm,
        "audience",
        &prompt,
        timeout,
        content.total_posts,
        parse_audience_response,
    )
    .await
    .unwrap_or_else(|| AttributeAnalysis {
        value: AudienceType::MassEntertainment,
        confidence: FALLBACK_CONFIDENCE,
        reasoning: "Unable to determine audience type, defaulting to mass entertainment"
            .to_string(),
    })
}

/// Call the model, parse its answer and apply the sample-size penalty.
///
/// Returns `None` (after logging) on any failure so the caller can
/// substitute its fallback.
async fn run_analysis<T>(
    llm: &dyn ChatCompletion,
    attribute: &'static str,
    prompt: &str,
    timeout: Duration,
    total_posts: usize,
    parse: fn(&str) -> Result<AttributeAnalysis<T>, ParseError>,
) -> Option<AttributeAnalysis<T>> {
    let raw = match complete_with_timeout(llm, prompt, timeout).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(attribute, error = %e, "model call failed; using fallback");
            return None;
        }
    };

    match parse(&raw) {
        Ok(mut analysis) => {
            analysis.confidence = apply_data_confidence_penalty(analysis.confidence, total_posts);
            Some(analysis)
        }
        Err(e) => {
            tracing::warn!(attribute, error = %e, "unparseable model output; using fallback");
            None
        }
    }
}

async fn complete_with_timeout(
    llm: &dyn ChatCompletion,
    prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    tokio::time::timeout(timeout, llm.complete(SYSTEM_PROMPT, prompt))
        .await
        .map_err(|_| LlmError::Timeout(timeout))?
}
