//! Creator DNA output types.
//!
//! Every categorical field is a closed enum, so a [`CreatorDna`] value can
//! only ever hold one of the declared categories. The string forms match the
//! wire format exactly (e.g. `"activist / political"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary content tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTone {
    Casual,
    Professional,
    Educational,
    Satirical,
    Emotional,
    Political,
    Inspirational,
    Entertainment,
}

impl ContentTone {
    pub const ALL: [ContentTone; 8] = [
        ContentTone::Casual,
        ContentTone::Professional,
        ContentTone::Educational,
        ContentTone::Satirical,
        ContentTone::Emotional,
        ContentTone::Political,
        ContentTone::Inspirational,
        ContentTone::Entertainment,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentTone::Casual => "casual",
            ContentTone::Professional => "professional",
            ContentTone::Educational => "educational",
            ContentTone::Satirical => "satirical",
            ContentTone::Emotional => "emotional",
            ContentTone::Political => "political",
            ContentTone::Inspirational => "inspirational",
            ContentTone::Entertainment => "entertainment",
        }
    }

    /// Exact, case-sensitive lookup of the wire form.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// How willing a creator is to publish edgy or controversial material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] =
        [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        }
    }

    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Dominant audience category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceType {
    #[serde(rename = "mass entertainment")]
    MassEntertainment,
    #[serde(rename = "niche technical")]
    NicheTechnical,
    #[serde(rename = "opinion-driven")]
    OpinionDriven,
    #[serde(rename = "activist / political")]
    ActivistPolitical,
    #[serde(rename = "educational / learner-focused")]
    EducationalLearner,
    #[serde(rename = "lifestyle / aspirational")]
    LifestyleAspirational,
    #[serde(rename = "community-focused")]
    CommunityFocused,
}

impl AudienceType {
    pub const ALL: [AudienceType; 7] = [
        AudienceType::MassEntertainment,
        AudienceType::NicheTechnical,
        AudienceType::OpinionDriven,
        AudienceType::ActivistPolitical,
        AudienceType::EducationalLearner,
        AudienceType::LifestyleAspirational,
        AudienceType::CommunityFocused,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AudienceType::MassEntertainment => "mass entertainment",
            AudienceType::NicheTechnical => "niche technical",
            AudienceType::OpinionDriven => "opinion-driven",
            AudienceType::ActivistPolitical => "activist / political",
            AudienceType::EducationalLearner => "educational / learner-focused",
            AudienceType::LifestyleAspirational => "lifestyle / aspirational",
            AudienceType::CommunityFocused => "community-focused",
        }
    }

    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.pad(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(ContentTone, RiskTolerance, AudienceType);

/// Humor attribute value: a 0-10 level plus a dark-humor flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumorAssessment {
    pub level: u8,
    pub dark_humor: bool,
}

/// Result of analyzing one attribute.
///
/// `reasoning` is informational only; nothing downstream depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeAnalysis<T> {
    pub value: T,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    pub reasoning: String,
}

/// Per-attribute confidence, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub tone: f64,
    pub humor: f64,
    pub risk: f64,
    pub audience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorDna {
    pub primary_tone: ContentTone,
    /// Integer in `0..=10`.
    pub humor_level: u8,
    pub dark_humor_present: bool,
    pub risk_tolerance: RiskTolerance,
    pub audience_type: AudienceType,
    pub confidence: ConfidenceScores,
}

/// A completed scan, keyed by creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorDnaProfile {
    pub creator_id: String,
    pub generated_at: DateTime<Utc>,
    pub creator_dna: CreatorDna,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_type_serializes_to_wire_form() {
        let json = serde_json::to_string(&AudienceType::ActivistPolitical).expect("serialize");
        assert_eq!(json, "\"activist / political\"");
    }

    #[test]
    fn wire_forms_round_trip_through_from_wire() {
        for tone in ContentTone::ALL {
            assert_eq!(ContentTone::from_wire(tone.as_str()), Some(tone));
        }
        for risk in RiskTolerance::ALL {
            assert_eq!(RiskTolerance::from_wire(risk.as_str()), Some(risk));
        }
        for audience in AudienceType::ALL {
            assert_eq!(AudienceType::from_wire(audience.as_str()), Some(audience));
        }
    }

    #[test]
    fn from_wire_is_case_sensitive() {
        assert_eq!(ContentTone::from_wire("Casual"), None);
        assert_eq!(RiskTolerance::from_wire("HIGH"), None);
    }

    #[test]
    fn serde_and_as_str_agree() {
        for tone in ContentTone::ALL {
            let json = serde_json::to_value(tone).expect("serialize tone");
            assert_eq!(json.as_str(), Some(tone.as_str()));
        }
        for audience in AudienceType::ALL {
            let json = serde_json::to_value(audience).expect("serialize audience");
            assert_eq!(json.as_str(), Some(audience.as_str()));
        }
    }

    #[test]
    fn profile_serializes_with_nested_confidence() {
        let profile = CreatorDnaProfile {
            creator_id: "c1".to_string(),
            generated_at: Utc::now(),
            creator_dna: CreatorDna {
                primary_tone: ContentTone::Educational,
                humor_level: 4,
                dark_humor_present: false,
                risk_tolerance: RiskTolerance::Low,
                audience_type: AudienceType::NicheTechnical,
                confidence: ConfidenceScores {
                    tone: 0.4,
                    humor: 0.35,
                    risk: 0.3,
                    audience: 0.45,
                },
            },
        };
        let json = serde_json::to_value(&profile).expect("serialize profile");
        assert_eq!(json["creator_dna"]["primary_tone"], "educational");
        assert_eq!(json["creator_dna"]["audience_type"], "niche technical");
        assert_eq!(json["creator_dna"]["confidence"]["humor"], 0.35);
    }

    #[test]
    fn display_honors_width() {
        assert_eq!(format!("{:<8}|", RiskTolerance::Low), "low     |");
        assert_eq!(ContentTone::Satirical.to_string(), "satirical");
    }
}
