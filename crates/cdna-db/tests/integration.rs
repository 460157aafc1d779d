//! Offline unit tests for cdna-db pool configuration and row types.
//! These tests do not require a live database connection.

use cdna_core::{AppConfig, ConfigError, Environment};
use cdna_db::{DbError, PoolConfig, ProfileHistoryRow, ProfileRow};
use chrono::Utc;
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use uuid::Uuid;

fn profile_json(creator_id: &str) -> serde_json::Value {
    serde_json::json!({
        "creator_id": creator_id,
        "generated_at": "2025-01-15T10:00:00Z",
        "creator_dna": {
            "primary_tone": "educational",
            "humor_level": 4,
            "dark_humor_present": false,
            "risk_tolerance": "low",
            "audience_type": "educational / learner-focused",
            "confidence": { "tone": 0.8, "humor": 0.6, "risk": 0.7, "audience": 0.5 }
        }
    })
}

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        openai_api_key: None,
        llm_base_url: "https://api.openai.com/v1".to_string(),
        llm_model: "gpt-4-turbo-preview".to_string(),
        llm_timeout_secs: 60,
        persist_scans: true,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = app_config(Some("postgres://example"));

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_without_database_url_is_a_config_error() {
    let err = cdna_db::connect_pool_from_config(&app_config(None))
        .await
        .expect_err("no DATABASE_URL configured");
    assert!(matches!(
        err,
        DbError::Config(ConfigError::MissingEnvVar(ref var)) if var == "DATABASE_URL"
    ));
}

/// Compile-time smoke test: confirm that [`ProfileRow`] has all expected
/// fields with the correct types, and that its JSONB payload decodes.
#[test]
fn profile_row_decodes_raw_profile() {
    let row = ProfileRow {
        id: Uuid::new_v4(),
        creator_id: "creator_1".to_string(),
        generated_at: Utc::now(),
        primary_tone: "educational".to_string(),
        humor_level: 4_i16,
        dark_humor_present: false,
        risk_tolerance: "low".to_string(),
        audience_type: "educational / learner-focused".to_string(),
        confidence_tone: Decimal::new(80, 2),
        confidence_humor: Decimal::new(60, 2),
        confidence_risk: Decimal::new(70, 2),
        confidence_audience: Decimal::new(50, 2),
        raw_profile: profile_json("creator_1"),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let profile = row.into_profile().expect("raw_profile should decode");
    assert_eq!(profile.creator_id, "creator_1");
    assert_eq!(profile.creator_dna.humor_level, 4);
    assert_eq!(
        profile.creator_dna.audience_type,
        cdna_core::AudienceType::EducationalLearner
    );
}

#[test]
fn history_row_with_corrupt_snapshot_is_an_error() {
    let row = ProfileHistoryRow {
        id: Uuid::new_v4(),
        creator_id: "creator_1".to_string(),
        profile_snapshot: serde_json::json!({ "creator_id": "creator_1" }),
        analyzed_at: Utc::now(),
    };

    let err = row.into_profile().expect_err("snapshot is missing creator_dna");
    assert!(err.to_string().contains("creator_1"));
}
