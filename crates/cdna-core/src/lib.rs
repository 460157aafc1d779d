//! Shared domain types and configuration for the Creator DNA workspace.

mod app_config;
mod config;
pub mod creator;
pub mod dna;
pub mod validation;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL,
};
pub use creator::{CreatorData, CreatorPost, PostEngagement, PostType};
pub use dna::{
    AttributeAnalysis, AudienceType, ConfidenceScores, ContentTone, CreatorDna, CreatorDnaProfile,
    HumorAssessment, RiskTolerance,
};
pub use validation::{parse_creator_data, validate_creator_data, validate_profile, ValidationIssue};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
