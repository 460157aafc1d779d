//! Schema validation for scan input and assembled profiles.
//!
//! Structural checks (field presence, types, enum membership, non-negative
//! integer counters, RFC 3339 timestamps) are enforced by deserialization;
//! the functions here add the value-level rules serde cannot express.
//! An empty `posts` list is deliberately *not* a validation issue: the
//! scanner reports it as insufficient data instead.

use serde::Serialize;
use serde_json::Value;

use crate::creator::CreatorData;
use crate::dna::CreatorDnaProfile;

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field (`posts[2].content`), or `body`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Decode an untrusted JSON document into [`CreatorData`] and validate it.
///
/// # Errors
///
/// Returns every issue found. A document that does not deserialize yields a
/// single issue at path `body` carrying the decoder's message.
pub fn parse_creator_data(value: Value) -> Result<CreatorData, Vec<ValidationIssue>> {
    let data: CreatorData = serde_json::from_value(value)
        .map_err(|e| vec![ValidationIssue::new("body", e.to_string())])?;
    validate_creator_data(&data)?;
    Ok(data)
}

/// Value-level rules for already-decoded scan input.
///
/// # Errors
///
/// Returns all issues found, in field order.
pub fn validate_creator_data(data: &CreatorData) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if data.creator_id.trim().is_empty() {
        issues.push(ValidationIssue::new("creator_id", "must not be empty"));
    }

    for (i, post) in data.posts.iter().enumerate() {
        if post.content.is_empty() {
            issues.push(ValidationIssue::new(
                format!("posts[{i}].content"),
                "must not be empty",
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Check the numeric invariants of an assembled profile.
///
/// # Errors
///
/// Returns all out-of-range fields.
pub fn validate_profile(profile: &CreatorDnaProfile) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let dna = &profile.creator_dna;

    if profile.creator_id.trim().is_empty() {
        issues.push(ValidationIssue::new("creator_id", "must not be empty"));
    }
    if dna.humor_level > 10 {
        issues.push(ValidationIssue::new(
            "creator_dna.humor_level",
            format!("must be in 0..=10, got {}", dna.humor_level),
        ));
    }

    let scores = [
        ("tone", dna.confidence.tone),
        ("humor", dna.confidence.humor),
        ("risk", dna.confidence.risk),
        ("audience", dna.confidence.audience),
    ];
    for (name, score) in scores {
        if !(0.0..=1.0).contains(&score) {
            issues.push(ValidationIssue::new(
                format!("creator_dna.confidence.{name}"),
                format!("must be in [0, 1], got {score}"),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
