use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CalendarEntry, PlanSession, UpdateSessionRequest, UpdateSessionStatusRequest,
};
use crate::services::SessionService;

#[derive(Clone)]
pub struct SessionsAppState {
    pub session_service: SessionService,
}

pub fn sessions_routes(db: PgPool) -> Router {
    let state = SessionsAppState {
        session_service: SessionService::new(db),
    };

    Router::new()
        .route("/", get(list_sessions))
        .route("/calendar", get(get_calendar))
        .route("/:session_id", get(get_session).put(update_session))
        .route("/:session_id/status", put(update_session_status))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SessionRangeQuery {
    pub client_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

async fn list_sessions(
    State(state): State<SessionsAppState>,
    Query(query): Query<SessionRangeQuery>,
) -> Result<Json<Vec<PlanSession>>, ApiError> {
    let sessions = state
        .session_service
        .get_sessions_by_date_range(query.client_id, query.start, query.end)
        .await?;
    Ok(Json(sessions))
}

/// Calendar read path: sessions joined with template metadata, defaults
/// applied where no template is attached
async fn get_calendar(
    State(state): State<SessionsAppState>,
    Query(query): Query<SessionRangeQuery>,
) -> Result<Json<Vec<CalendarEntry>>, ApiError> {
    let entries = state
        .session_service
        .get_calendar(query.client_id, query.start, query.end)
        .await?;
    Ok(Json(entries))
}

async fn get_session(
    State(state): State<SessionsAppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PlanSession>, ApiError> {
    let session = state
        .session_service
        .get_session_by_id(session_id)
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(session))
}

async fn update_session(
    State(state): State<SessionsAppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateSessionRequest>,
) -> Result<Json<PlanSession>, ApiError> {
    let session = state
        .session_service
        .update_session(session_id, request)
        .await?;
    Ok(Json(session))
}

/// Status changes are checked against the transition table; a disallowed
/// transition comes back as 409
async fn update_session_status(
    State(state): State<SessionsAppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateSessionStatusRequest>,
) -> Result<Json<PlanSession>, ApiError> {
    let session = state
        .session_service
        .update_session_status(session_id, request)
        .await?;
    Ok(Json(session))
}
