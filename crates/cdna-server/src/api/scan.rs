use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use cdna_core::CreatorDnaProfile;
use cdna_scanner::{ScannerError, ScannerErrorCode};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ScanData {
    profile: CreatorDnaProfile,
}

/// `POST /api/creator-dna/scan`
pub(super) async fn scan_creator(
    State(state): State<AppState>,
    req_id: RequestId,
    body: Bytes,
) -> Result<Json<ApiResponse<ScanData>>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting unparseable scan body");
        ApiError::new(req_id.0.clone(), "VALIDATION_ERROR", "Invalid input data").with_details(
            Some(json!([{ "path": "body", "message": format!("invalid JSON: {e}") }])),
        )
    })?;

    let profile = state
        .scanner
        .scan_json(value)
        .await
        .map_err(|e| map_scanner_error(req_id.0.clone(), e))?;

    if state.persist_scans {
        persist_scan(&state.pool, &profile).await;
    }

    Ok(Json(ApiResponse::ok(req_id.0, ScanData { profile })))
}

/// `GET /api/creator-dna/scan`
pub(super) async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed. Use POST." })),
    )
}

fn map_scanner_error(request_id: String, error: ScannerError) -> ApiError {
    match error.code {
        ScannerErrorCode::LlmError => {
            tracing::error!(error = %error, details = ?error.details, "scan failed");
        }
        ScannerErrorCode::ValidationError | ScannerErrorCode::InsufficientData => {
            tracing::debug!(error = %error, "scan rejected");
        }
    }
    ApiError::new(request_id, error.code.as_str(), error.message).with_details(error.details)
}

/// Store failures are logged; the caller still gets the profile.
async fn persist_scan(pool: &PgPool, profile: &CreatorDnaProfile) {
    if let Err(e) = cdna_db::save_profile(pool, profile).await {
        tracing::error!(creator_id = %profile.creator_id, error = %e, "failed to save profile");
    }
    if let Err(e) = cdna_db::record_profile_history(pool, profile).await {
        tracing::error!(
            creator_id = %profile.creator_id,
            error = %e,
            "failed to record profile history"
        );
    }
}
