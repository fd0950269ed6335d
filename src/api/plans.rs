use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreatePlanRequest, PlanResponse, UpdatePlanRequest, WorkoutPlan};
use crate::schedule::PlanProgress;
use crate::services::{PlanService, SessionService};

#[derive(Clone)]
pub struct PlansAppState {
    pub plan_service: PlanService,
    pub session_service: SessionService,
}

pub fn plans_routes(db: PgPool) -> Router {
    let state = PlansAppState {
        plan_service: PlanService::new(db.clone()),
        session_service: SessionService::new(db),
    };

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", get(get_plan).put(update_plan).delete(delete_plan))
        .route("/:plan_id/progress", get(get_plan_progress))
        .route("/:plan_id/sessions", get(get_plan_sessions))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct PlanListQuery {
    pub client_id: Uuid,
}

/// List a client's plans, most recent first
async fn list_plans(
    State(state): State<PlansAppState>,
    Query(query): Query<PlanListQuery>,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    let plans = state.plan_service.get_plans_by_client(query.client_id).await?;
    Ok(Json(plans))
}

/// Create a plan and generate its derived sessions
async fn create_plan(
    State(state): State<PlansAppState>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = state.plan_service.create_plan(request).await?;
    let sessions = state.session_service.get_sessions_by_plan(plan.id).await?;

    Ok(Json(PlanResponse {
        plan,
        session_count: sessions.len(),
    }))
}

async fn get_plan(
    State(state): State<PlansAppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = state
        .plan_service
        .get_plan_by_id(plan_id)
        .await?
        .ok_or(ApiError::PlanNotFound)?;
    Ok(Json(plan))
}

/// Update a plan; schedule or range changes regenerate the derived sessions
async fn update_plan(
    State(state): State<PlansAppState>,
    Path(plan_id): Path<Uuid>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = state.plan_service.update_plan(plan_id, request).await?;
    let sessions = state.session_service.get_sessions_by_plan(plan.id).await?;

    Ok(Json(PlanResponse {
        plan,
        session_count: sessions.len(),
    }))
}

async fn delete_plan(
    State(state): State<PlansAppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.plan_service.delete_plan(plan_id).await?;
    if !deleted {
        return Err(ApiError::PlanNotFound);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn get_plan_progress(
    State(state): State<PlansAppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanProgress>, ApiError> {
    let progress = state.plan_service.get_plan_progress(plan_id).await?;
    Ok(Json(progress))
}

async fn get_plan_sessions(
    State(state): State<PlansAppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<crate::models::PlanSession>>, ApiError> {
    let sessions = state.session_service.get_sessions_by_plan(plan_id).await?;
    Ok(Json(sessions))
}
