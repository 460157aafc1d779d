//! Database operations for `creator_dna_profiles` and `creator_dna_history`.

use cdna_core::CreatorDnaProfile;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `creator_dna_profiles` table.
///
/// The scalar columns are a denormalized copy of `raw_profile`, kept for
/// filtering and reporting; `raw_profile` is the source of truth.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub creator_id: String,
    pub generated_at: DateTime<Utc>,
    pub primary_tone: String,
    pub humor_level: i16,
    pub dark_humor_present: bool,
    pub risk_tolerance: String,
    pub audience_type: String,
    pub confidence_tone: Decimal,
    pub confidence_humor: Decimal,
    pub confidence_risk: Decimal,
    pub confidence_audience: Decimal,
    pub raw_profile: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Decode the stored JSONB profile.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidStoredProfile`] if `raw_profile` does not
    /// match the current [`CreatorDnaProfile`] shape.
    pub fn into_profile(self) -> Result<CreatorDnaProfile, DbError> {
        decode_profile(&self.creator_id, self.raw_profile)
    }
}

/// A row from the `creator_dna_history` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileHistoryRow {
    pub id: Uuid,
    pub creator_id: String,
    pub profile_snapshot: Value,
    pub analyzed_at: DateTime<Utc>,
}

impl ProfileHistoryRow {
    /// # Errors
    ///
    /// Returns [`DbError::InvalidStoredProfile`] if the snapshot does not
    /// decode.
    pub fn into_profile(self) -> Result<CreatorDnaProfile, DbError> {
        decode_profile(&self.creator_id, self.profile_snapshot)
    }
}

/// One page of profiles, most recently updated first.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub profiles: Vec<CreatorDnaProfile>,
    pub total: i64,
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert or replace the stored profile for `profile.creator_id`.
///
/// A rescan overwrites every denormalized column and `raw_profile`, and
/// bumps `updated_at`. `created_at` keeps the first-seen time.
///
/// # Errors
///
/// Returns [`DbError::Encode`] if the profile cannot be serialized, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn save_profile(pool: &PgPool, profile: &CreatorDnaProfile) -> Result<(), DbError> {
    let raw = serde_json::to_value(profile).map_err(DbError::Encode)?;
    let dna = &profile.creator_dna;

    sqlx::query(
        "INSERT INTO creator_dna_profiles \
           (creator_id, generated_at, primary_tone, humor_level, dark_humor_present, \
            risk_tolerance, audience_type, confidence_tone, confidence_humor, \
            confidence_risk, confidence_audience, raw_profile) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (creator_id) DO UPDATE SET \
           generated_at        = EXCLUDED.generated_at, \
           primary_tone        = EXCLUDED.primary_tone, \
           humor_level         = EXCLUDED.humor_level, \
           dark_humor_present  = EXCLUDED.dark_humor_present, \
           risk_tolerance      = EXCLUDED.risk_tolerance, \
           audience_type       = EXCLUDED.audience_type, \
           confidence_tone     = EXCLUDED.confidence_tone, \
           confidence_humor    = EXCLUDED.confidence_humor, \
           confidence_risk     = EXCLUDED.confidence_risk, \
           confidence_audience = EXCLUDED.confidence_audience, \
           raw_profile         = EXCLUDED.raw_profile, \
           updated_at          = NOW()",
    )
    .bind(&profile.creator_id)
    .bind(profile.generated_at)
    .bind(dna.primary_tone.as_str())
    .bind(i16::from(dna.humor_level))
    .bind(dna.dark_humor_present)
    .bind(dna.risk_tolerance.as_str())
    .bind(dna.audience_type.as_str())
    .bind(confidence_decimal(dna.confidence.tone))
    .bind(confidence_decimal(dna.confidence.humor))
    .bind(confidence_decimal(dna.confidence.risk))
    .bind(confidence_decimal(dna.confidence.audience))
    .bind(raw)
    .execute(pool)
    .await?;

    tracing::debug!(creator_id = %profile.creator_id, "saved creator DNA profile");
    Ok(())
}

/// Append a snapshot of `profile` to `creator_dna_history`.
///
/// `analyzed_at` is the profile's `generated_at`.
///
/// # Errors
///
/// Returns [`DbError::Encode`] or [`DbError::Sqlx`].
pub async fn record_profile_history(
    pool: &PgPool,
    profile: &CreatorDnaProfile,
) -> Result<Uuid, DbError> {
    let snapshot = serde_json::to_value(profile).map_err(DbError::Encode)?;
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO creator_dna_history (creator_id, profile_snapshot, analyzed_at) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(&profile.creator_id)
    .bind(snapshot)
    .bind(profile.generated_at)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Remove the stored profile for `creator_id`.
///
/// Returns `true` if a row was deleted. History snapshots are kept.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_profile(pool: &PgPool, creator_id: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM creator_dna_profiles WHERE creator_id = $1")
        .bind(creator_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetch the stored profile for `creator_id`, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidStoredProfile`] if the stored JSON does not decode.
pub async fn get_profile(
    pool: &PgPool,
    creator_id: &str,
) -> Result<Option<CreatorDnaProfile>, DbError> {
    let raw: Option<Value> = sqlx::query_scalar(
        "SELECT raw_profile FROM creator_dna_profiles WHERE creator_id = $1",
    )
    .bind(creator_id)
    .fetch_optional(pool)
    .await?;

    raw.map(|v| decode_profile(creator_id, v)).transpose()
}

/// Fetch the full row (including denormalized columns) for `creator_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_profile_row(
    pool: &PgPool,
    creator_id: &str,
) -> Result<Option<ProfileRow>, DbError> {
    Ok(sqlx::query_as::<_, ProfileRow>(
        "SELECT id, creator_id, generated_at, primary_tone, humor_level, dark_humor_present, \
                risk_tolerance, audience_type, confidence_tone, confidence_humor, \
                confidence_risk, confidence_audience, raw_profile, created_at, updated_at \
         FROM creator_dna_profiles WHERE creator_id = $1",
    )
    .bind(creator_id)
    .fetch_optional(pool)
    .await?)
}

/// List stored profiles, most recently updated first.
///
/// `page` is 1-based (values below 1 are treated as 1); `page_size` is
/// clamped to `1..=MAX_PAGE_SIZE`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidStoredProfile`] if any stored profile does not decode.
pub async fn list_profiles(
    pool: &PgPool,
    page: i64,
    page_size: i64,
) -> Result<ProfilePage, DbError> {
    let (limit, offset) = page_bounds(page, page_size);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM creator_dna_profiles")
        .fetch_one(pool)
        .await?;

    let rows: Vec<(String, Value)> = sqlx::query_as(
        "SELECT creator_id, raw_profile FROM creator_dna_profiles \
         ORDER BY updated_at DESC, creator_id \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let profiles = rows
        .into_iter()
        .map(|(creator_id, raw)| decode_profile(&creator_id, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProfilePage {
        profiles,
        total,
        has_more: total > offset + limit,
    })
}

/// Most recent history snapshots for `creator_id`, newest first.
///
/// `limit` is clamped to `1..=MAX_PAGE_SIZE`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_profile_history(
    pool: &PgPool,
    creator_id: &str,
    limit: i64,
) -> Result<Vec<ProfileHistoryRow>, DbError> {
    Ok(sqlx::query_as::<_, ProfileHistoryRow>(
        "SELECT id, creator_id, profile_snapshot, analyzed_at \
         FROM creator_dna_history \
         WHERE creator_id = $1 \
         ORDER BY analyzed_at DESC, id \
         LIMIT $2",
    )
    .bind(creator_id)
    .bind(limit.clamp(1, MAX_PAGE_SIZE))
    .fetch_all(pool)
    .await?)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `(limit, offset)` for a 1-based page.
pub(crate) fn page_bounds(page: i64, page_size: i64) -> (i64, i64) {
    let limit = page_size.clamp(1, MAX_PAGE_SIZE);
    let page = page.max(1);
    (limit, (page - 1).saturating_mul(limit))
}

/// Confidence as a `NUMERIC(3,2)` value.
fn confidence_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(2)
}

fn decode_profile(creator_id: &str, raw: Value) -> Result<CreatorDnaProfile, DbError> {
    serde_json::from_value(raw).map_err(|source| DbError::InvalidStoredProfile {
        creator_id: creator_id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_first_page() {
        assert_eq!(page_bounds(1, 20), (20, 0));
    }

    #[test]
    fn page_bounds_later_page() {
        assert_eq!(page_bounds(3, 10), (10, 20));
    }

    #[test]
    fn page_bounds_clamps_inputs() {
        assert_eq!(page_bounds(0, 20), (20, 0));
        assert_eq!(page_bounds(-5, 0), (1, 0));
        assert_eq!(page_bounds(2, 10_000), (MAX_PAGE_SIZE, MAX_PAGE_SIZE));
    }

    #[test]
    fn confidence_decimal_rounds_to_two_places() {
        assert_eq!(confidence_decimal(0.3), Decimal::new(30, 2));
        assert_eq!(confidence_decimal(0.456), Decimal::new(46, 2));
        assert_eq!(confidence_decimal(1.0), Decimal::new(100, 2));
    }

    #[test]
    fn decode_profile_reports_creator_on_failure() {
        let err = decode_profile("c-9", serde_json::json!({"nope": true})).unwrap_err();
        assert!(
            matches!(err, DbError::InvalidStoredProfile { ref creator_id, .. } if creator_id == "c-9")
        );
    }
}
