//! Keyword tables for mapping free-form model labels onto closed categories.

use cdna_core::{AudienceType, ContentTone, RiskTolerance};

/// Keywords per tone. Table order is match priority.
pub(crate) const TONE_KEYWORDS: &[(ContentTone, &[&str])] = &[
    (
        ContentTone::Casual,
        &["casual", "relaxed", "friendly", "informal", "chill"],
    ),
    (
        ContentTone::Professional,
        &["professional", "formal", "business", "corporate"],
    ),
    (
        ContentTone::Educational,
        &["educational", "teaching", "tutorial", "informative", "learning"],
    ),
    (
        ContentTone::Satirical,
        &["satirical", "satire", "parody", "mock"],
    ),
    (
        ContentTone::Emotional,
        &["emotional", "personal", "vulnerable", "heartfelt"],
    ),
    (
        ContentTone::Political,
        &["political", "politics", "advocacy", "activist"],
    ),
    (
        ContentTone::Inspirational,
        &["inspirational", "motivational", "uplifting", "empowering"],
    ),
    (
        ContentTone::Entertainment,
        &["entertainment", "fun", "viral", "meme", "comedy"],
    ),
];

/// Keywords per risk level. Table order is match priority.
pub(crate) const RISK_KEYWORDS: &[(RiskTolerance, &[&str])] = &[
    (
        RiskTolerance::Low,
        &["low", "safe", "conservative", "cautious", "brand-friendly", "minimal"],
    ),
    (RiskTolerance::Medium, &["medium", "moderate", "balanced"]),
    (
        RiskTolerance::High,
        &["high", "edgy", "controversial", "provocative", "polarizing", "bold"],
    ),
];

/// Keywords per audience type. Table order is match priority.
pub(crate) const AUDIENCE_KEYWORDS: &[(AudienceType, &[&str])] = &[
    (
        AudienceType::MassEntertainment,
        &["mass", "entertainment", "general", "broad", "viral"],
    ),
    (
        AudienceType::NicheTechnical,
        &["niche", "technical", "expert", "specialized", "tech"],
    ),
    (
        AudienceType::OpinionDriven,
        &["opinion", "commentary", "reaction", "debate"],
    ),
    (
        AudienceType::ActivistPolitical,
        &["activist", "political", "cause", "advocacy"],
    ),
    (
        AudienceType::EducationalLearner,
        &["educational", "learner", "student", "learning"],
    ),
    (
        AudienceType::LifestyleAspirational,
        &["lifestyle", "aspirational", "aesthetic"],
    ),
    (
        AudienceType::CommunityFocused,
        &["community", "loyal", "fanbase", "tight-knit"],
    ),
];

/// Return the first category whose keyword list has a substring hit in `input`.
///
/// Matching is case-insensitive. Categories are tried in table order and the
/// first hit wins, so `"educational comedy"` resolves to whichever of the two
/// categories appears earlier in the table.
pub(crate) fn match_keywords<T: Copy>(table: &[(T, &[&str])], input: &str) -> Option<T> {
    let lower = input.to_lowercase();
    table
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|&(category, _)| category)
}
