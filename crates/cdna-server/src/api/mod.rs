mod profiles;
mod scan;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use cdna_scanner::CreatorDnaScanner;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id_layers, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub scanner: Arc<CreatorDnaScanner>,
    /// Save each successful scan (profile upsert plus a history snapshot).
    pub persist_scans: bool,
}

/// Success envelope. `data`'s fields are inlined next to `success`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn ok(request_id: String, data: T) -> Self {
        Self {
            success: true,
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.error.details = details;
        self
    }

    fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "VALIDATION_ERROR" | "INSUFFICIENT_DATA" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &cdna_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "INTERNAL_ERROR", "database query failed")
}

pub(super) fn not_found(request_id: String, creator_id: &str) -> ApiError {
    ApiError::new(
        request_id,
        "NOT_FOUND",
        format!("no profile stored for creator '{creator_id}'"),
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/creator-dna/scan",
            post(scan::scan_creator).get(scan::method_not_allowed),
        )
        .route("/api/creator-dna/profiles", get(profiles::list_profiles))
        .route(
            "/api/creator-dna/profiles/{creator_id}",
            get(profiles::get_profile).delete(profiles::delete_profile),
        )
        .route(
            "/api/creator-dna/profiles/{creator_id}/history",
            get(profiles::list_history),
        )
        .fallback(unknown_route)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layers())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn unknown_route(req_id: RequestId) -> ApiError {
    ApiError::new(req_id.0, "NOT_FOUND", "no such endpoint")
}

async fn health(State(state): State<AppState>, req_id: RequestId) -> impl IntoResponse {
    match cdna_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                req_id.0,
                HealthData {
                    status: "ok",
                    database: "ok",
                },
            )),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::ok(
                    req_id.0,
                    HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                )),
            )
        }
    }
}
