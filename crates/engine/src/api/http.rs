//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDateTime, NaiveTime, Weekday};
use gashapon_domain::{ResetSchedule, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::App;
use crate::use_cases::{
    CatalogError, CollectionPage, CollectionViewError, DrawError, DrawOutcome, ReloadSummary,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/draws", post(draw))
        .route("/api/users/{user_id}/collection", get(collection_page))
        .route("/api/admin/quota/{user_id}/reset", post(reset_quota))
        .route("/api/admin/quota/reset-all", post(reset_all_quotas))
        .route("/api/admin/schedule", get(get_schedule).put(put_schedule))
        .route("/api/admin/catalog/reload", post(reload_catalog))
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct DrawRequest {
    user_id: u64,
}

async fn draw(
    State(app): State<Arc<App>>,
    Json(request): Json<DrawRequest>,
) -> Result<Json<DrawOutcome>, ApiError> {
    let outcome = app
        .use_cases
        .draw
        .execute(UserId::new(request.user_id))
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: usize,
}

async fn collection_page(
    State(app): State<Arc<App>>,
    Path(user_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CollectionPage>, ApiError> {
    let page = app
        .use_cases
        .collection
        .execute(UserId::new(user_id), query.page)
        .await?;
    Ok(Json(page))
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Debug, Serialize)]
struct QuotaResetResponse {
    user_id: u64,
    remaining: u32,
}

async fn reset_quota(
    State(app): State<Arc<App>>,
    Path(user_id): Path<u64>,
) -> Result<Json<QuotaResetResponse>, ApiError> {
    let remaining = app
        .use_cases
        .admin
        .reset_user(UserId::new(user_id))
        .await?;
    Ok(Json(QuotaResetResponse { user_id, remaining }))
}

#[derive(Debug, Serialize)]
struct ResetAllResponse {
    users_reset: usize,
}

async fn reset_all_quotas(
    State(app): State<Arc<App>>,
) -> Result<Json<ResetAllResponse>, ApiError> {
    let users_reset = app.use_cases.admin.reset_all().await?;
    Ok(Json(ResetAllResponse { users_reset }))
}

#[derive(Debug, Deserialize)]
struct ScheduleRequest {
    weekday: String,
    time: String,
}

#[derive(Debug, Serialize)]
struct ScheduleResponse {
    weekday: String,
    time: String,
    next_fire: NaiveDateTime,
}

impl ScheduleResponse {
    fn from_status(schedule: ResetSchedule, next_fire: NaiveDateTime) -> Self {
        Self {
            weekday: schedule.weekday.to_string(),
            time: schedule.time.format("%H:%M").to_string(),
            next_fire,
        }
    }
}

async fn put_schedule(
    State(app): State<Arc<App>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule = ResetSchedule::new(
        parse_weekday(&request.weekday)?,
        parse_time(&request.time)?,
    );
    let next_fire = app.use_cases.admin.set_schedule(schedule).await;
    Ok(Json(ScheduleResponse::from_status(schedule, next_fire)))
}

async fn get_schedule(State(app): State<Arc<App>>) -> Result<Json<ScheduleResponse>, ApiError> {
    let (schedule, next_fire) = app
        .use_cases
        .admin
        .schedule_status()
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ScheduleResponse::from_status(schedule, next_fire)))
}

async fn reload_catalog(State(app): State<Arc<App>>) -> Result<Json<ReloadSummary>, ApiError> {
    let summary = app.use_cases.admin.reload_catalog().await.map_err(|e| {
        tracing::warn!(error = %e, "Catalog reload failed");
        ApiError::from(e)
    })?;
    Ok(Json(summary))
}

fn parse_weekday(raw: &str) -> Result<Weekday, ApiError> {
    raw.parse::<Weekday>()
        .map_err(|_| ApiError::BadRequest(format!("Unknown weekday: {raw}")))
}

fn parse_time(raw: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ApiError::BadRequest(format!("Bad time of day: {raw}")))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Unavailable,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Unavailable => (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Catalog unavailable",
            )
                .into_response(),
            ApiError::Internal(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            )
                .into_response(),
        }
    }
}

impl From<crate::infrastructure::ports::StoreError> for ApiError {
    fn from(e: crate::infrastructure::ports::StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<DrawError> for ApiError {
    fn from(e: DrawError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<CollectionViewError> for ApiError {
    fn from(e: CollectionViewError) -> Self {
        match e {
            CollectionViewError::CatalogUnavailable => ApiError::Unavailable,
            CollectionViewError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(_: CatalogError) -> Self {
        ApiError::Unavailable
    }
}
