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
use crate::models::{
    CreateMetricEntryRequest, MetricEntry, MetricGranularity, MetricSummary,
    UpdateMetricEntryRequest,
};
use crate::services::MetricService;

#[derive(Clone)]
pub struct MetricsAppState {
    pub metric_service: MetricService,
}

pub fn metrics_routes(db: PgPool) -> Router {
    let state = MetricsAppState {
        metric_service: MetricService::new(db),
    };

    Router::new()
        .route("/", get(list_entries).post(log_entry))
        .route("/summary", get(get_summary))
        .route("/:entry_id", axum::routing::put(update_entry).delete(delete_entry))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct MetricListQuery {
    pub user_id: Uuid,
    pub metric_type: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MetricSummaryQuery {
    pub user_id: Uuid,
    pub metric_type: String,
    pub granularity: MetricGranularity,
}

async fn list_entries(
    State(state): State<MetricsAppState>,
    Query(query): Query<MetricListQuery>,
) -> Result<Json<Vec<MetricEntry>>, ApiError> {
    let entries = state
        .metric_service
        .get_entries(query.user_id, &query.metric_type, query.limit)
        .await?;
    Ok(Json(entries))
}

async fn log_entry(
    State(state): State<MetricsAppState>,
    Json(request): Json<CreateMetricEntryRequest>,
) -> Result<Json<MetricEntry>, ApiError> {
    let entry = state.metric_service.log_entry(request).await?;
    Ok(Json(entry))
}

/// Entries grouped into ISO-week or calendar-month buckets
async fn get_summary(
    State(state): State<MetricsAppState>,
    Query(query): Query<MetricSummaryQuery>,
) -> Result<Json<MetricSummary>, ApiError> {
    let summary = state
        .metric_service
        .get_summary(query.user_id, &query.metric_type, query.granularity)
        .await?;
    Ok(Json(summary))
}

async fn update_entry(
    State(state): State<MetricsAppState>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateMetricEntryRequest>,
) -> Result<Json<MetricEntry>, ApiError> {
    let entry = state.metric_service.update_entry(entry_id, request).await?;
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<MetricsAppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.metric_service.delete_entry(entry_id).await?;
    if !deleted {
        return Err(ApiError::MetricEntryNotFound);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
