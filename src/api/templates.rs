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
use crate::models::{CreateTemplateRequest, UpdateTemplateRequest, WorkoutTemplate};
use crate::services::TemplateService;

#[derive(Clone)]
pub struct TemplatesAppState {
    pub template_service: TemplateService,
}

pub fn templates_routes(db: PgPool) -> Router {
    let state = TemplatesAppState {
        template_service: TemplateService::new(db),
    };

    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route(
            "/:template_id",
            get(get_template).put(update_template).delete(delete_template),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct TemplateListQuery {
    pub trainer_id: Uuid,
}

async fn list_templates(
    State(state): State<TemplatesAppState>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<Vec<WorkoutTemplate>>, ApiError> {
    let templates = state
        .template_service
        .get_templates_by_trainer(query.trainer_id)
        .await?;
    Ok(Json(templates))
}

async fn create_template(
    State(state): State<TemplatesAppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let template = state.template_service.create_template(request).await?;
    Ok(Json(template))
}

async fn get_template(
    State(state): State<TemplatesAppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let template = state
        .template_service
        .get_template_by_id(template_id)
        .await?
        .ok_or(ApiError::TemplateNotFound)?;
    Ok(Json(template))
}

async fn update_template(
    State(state): State<TemplatesAppState>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let template = state
        .template_service
        .update_template(template_id, request)
        .await?;
    Ok(Json(template))
}

async fn delete_template(
    State(state): State<TemplatesAppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.template_service.delete_template(template_id).await?;
    if !deleted {
        return Err(ApiError::TemplateNotFound);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
