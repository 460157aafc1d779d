//! Decoding of untrusted model output into typed attribute analyses.
//!
//! Every parser either returns a fully-valid [`AttributeAnalysis`] or a
//! [`ParseError`]; it never panics. Out-of-range or unrecognized field values
//! are coerced (clamped, keyword-matched, defaulted) rather than rejected, so
//! the only failures are "no JSON object in the text" and "malformed JSON".

use cdna_core::{AttributeAnalysis, AudienceType, ContentTone, HumorAssessment, RiskTolerance};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::keywords::{match_keywords, AUDIENCE_KEYWORDS, RISK_KEYWORDS, TONE_KEYWORDS};

type JsonObject = Map<String, Value>;

const DEFAULT_CONFIDENCE: f64 = 0.5;
const NO_REASONING: &str = "No reasoning provided";
const MAX_HUMOR_LEVEL: f64 = 10.0;

/// Decode the JSON object embedded in `text`.
///
/// The object spans from the first `{` to the last `}`, which tolerates prose
/// before and after it.
///
/// # Errors
///
/// [`ParseError::NoJsonObject`] when there is no `{...}` span,
/// [`ParseError::InvalidJson`] when the span is not a valid JSON object.
pub fn extract_json_object(text: &str) -> Result<JsonObject, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end < start {
        return Err(ParseError::NoJsonObject);
    }
    serde_json::from_str(&text[start..=end]).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// # Errors
///
/// See [`extract_json_object`].
pub fn parse_tone_response(text: &str) -> Result<AttributeAnalysis<ContentTone>, ParseError> {
    let data = extract_json_object(text)?;
    let label = label_field(&data, "primary_tone");
    let tone = ContentTone::from_wire(&label.to_lowercase())
        .or_else(|| match_keywords(TONE_KEYWORDS, &label))
        .unwrap_or(ContentTone::Casual);
    Ok(analysis(&data, tone))
}

/// # Errors
///
/// See [`extract_json_object`].
pub fn parse_humor_response(
    text: &str,
) -> Result<AttributeAnalysis<HumorAssessment>, ParseError> {
    let data = extract_json_object(text)?;
    let level = data
        .get("humor_level")
        .and_then(Value::as_f64)
        .map_or(0, humor_level);
    let dark_humor = data.get("dark_humor_present").is_some_and(is_truthy);
    Ok(analysis(&data, HumorAssessment { level, dark_humor }))
}

/// # Errors
///
/// See [`extract_json_object`].
pub fn parse_risk_response(text: &str) -> Result<AttributeAnalysis<RiskTolerance>, ParseError> {
    let data = extract_json_object(text)?;
    let label = label_field(&data, "risk_tolerance");
    let risk = RiskTolerance::from_wire(&label.to_lowercase())
        .or_else(|| match_keywords(RISK_KEYWORDS, &label))
        .unwrap_or(RiskTolerance::Medium);
    Ok(analysis(&data, risk))
}

/// # Errors
///
/// See [`extract_json_object`].
pub fn parse_audience_response(
    text: &str,
) -> Result<AttributeAnalysis<AudienceType>, ParseError> {
    let data = extract_json_object(text)?;
    let label = label_field(&data, "audience_type");
    let audience = AudienceType::from_wire(&label.to_lowercase())
        .or_else(|| match_keywords(AUDIENCE_KEYWORDS, &label))
        .unwrap_or(AudienceType::MassEntertainment);
    Ok(analysis(&data, audience))
}

fn analysis<T>(data: &JsonObject, value: T) -> AttributeAnalysis<T> {
    AttributeAnalysis {
        value,
        confidence: confidence_field(data),
        reasoning: reasoning_field(data),
    }
}

/// Round half away from zero, then clamp to `0..=10`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn humor_level(raw: f64) -> u8 {
    raw.round().clamp(0.0, MAX_HUMOR_LEVEL) as u8
}

fn confidence_field(data: &JsonObject) -> f64 {
    data.get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0)
}

fn reasoning_field(data: &JsonObject) -> String {
    data.get("reasoning")
        .and_then(text_of_truthy)
        .unwrap_or_else(|| NO_REASONING.to_string())
}

/// String form of a label field, or `""` when absent or falsy.
fn label_field(data: &JsonObject, key: &str) -> String {
    data.get(key).and_then(text_of_truthy).unwrap_or_default()
}

/// Text rendering of a truthy value; `None` for falsy values.
fn text_of_truthy(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Loose truthiness: `null`, `false`, `0` and `""` are false, everything else
/// (including empty arrays and objects) is true.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
