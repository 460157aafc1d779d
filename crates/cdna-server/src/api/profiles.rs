use axum::{
    extract::{Path, Query, State},
    Json,
};
use cdna_core::CreatorDnaProfile;
use cdna_db::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, not_found, ApiError, ApiResponse, AppState};

const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileListData {
    profiles: Vec<CreatorDnaProfile>,
    total: i64,
    has_more: bool,
    page: i64,
    page_size: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileData {
    profile: CreatorDnaProfile,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedData {
    creator_id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryEntry {
    id: Uuid,
    analyzed_at: DateTime<Utc>,
    profile: CreatorDnaProfile,
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryData {
    creator_id: String,
    history: Vec<HistoryEntry>,
}

pub(super) fn normalize_page(query: &ListQuery) -> (i64, i64) {
    (
        query.page.unwrap_or(1).max(1),
        query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    )
}

/// `GET /api/creator-dna/profiles`
pub(super) async fn list_profiles(
    State(state): State<AppState>,
    req_id: RequestId,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ProfileListData>>, ApiError> {
    let (page, page_size) = normalize_page(&query);
    let result = cdna_db::list_profiles(&state.pool, page, page_size)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::ok(
        req_id.0,
        ProfileListData {
            profiles: result.profiles,
            total: result.total,
            has_more: result.has_more,
            page,
            page_size,
        },
    )))
}

/// `GET /api/creator-dna/profiles/{creator_id}`
pub(super) async fn get_profile(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(creator_id): Path<String>,
) -> Result<Json<ApiResponse<ProfileData>>, ApiError> {
    let profile = cdna_db::get_profile(&state.pool, &creator_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| not_found(req_id.0.clone(), &creator_id))?;

    Ok(Json(ApiResponse::ok(req_id.0, ProfileData { profile })))
}

/// `DELETE /api/creator-dna/profiles/{creator_id}`
pub(super) async fn delete_profile(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(creator_id): Path<String>,
) -> Result<Json<ApiResponse<DeletedData>>, ApiError> {
    let deleted = cdna_db::delete_profile(&state.pool, &creator_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if !deleted {
        return Err(not_found(req_id.0, &creator_id));
    }

    tracing::info!(creator_id = %creator_id, "deleted creator DNA profile");
    Ok(Json(ApiResponse::ok(req_id.0, DeletedData { creator_id })))
}

/// `GET /api/creator-dna/profiles/{creator_id}/history`
pub(super) async fn list_history(
    State(state): State<AppState>,
    req_id: RequestId,
    Path(creator_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryData>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let rows = cdna_db::list_profile_history(&state.pool, &creator_id, limit)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let history = rows
        .into_iter()
        .map(|row| {
            let (id, analyzed_at) = (row.id, row.analyzed_at);
            row.into_profile().map(|profile| HistoryEntry {
                id,
                analyzed_at,
                profile,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::ok(
        req_id.0,
        HistoryData {
            creator_id,
            history,
        },
    )))
}
