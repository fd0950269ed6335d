use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Hard failures surfaced to the client. Soft failures (notification
/// dispatch) are logged in the services and never reach this type.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Plan name cannot be empty")]
    EmptyPlanName,
    #[error("Plan start date is after end date")]
    InvalidDateRange,
    #[error("Unknown workout template ids: {}", format_ids(.0))]
    UnknownTemplates(Vec<Uuid>),
    #[error("Custom schedule dates outside the plan range: {}", format_dates(.0))]
    EntriesOutsideRange(Vec<NaiveDate>),
    #[error("Invalid schedule declaration: {0}")]
    InvalidSchedule(String),
    #[error("Session status cannot change from {from} to {to}")]
    InvalidStatusTransition { from: &'static str, to: &'static str },
    #[error("Plan not found")]
    PlanNotFound,
    #[error("Session not found")]
    SessionNotFound,
    #[error("Template not found")]
    TemplateNotFound,
    #[error("Metric entry not found")]
    MetricEntryNotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

fn format_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(NaiveDate::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyPlanName
            | ApiError::InvalidDateRange
            | ApiError::UnknownTemplates(_)
            | ApiError::EntriesOutsideRange(_)
            | ApiError::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            ApiError::PlanNotFound
            | ApiError::SessionNotFound
            | ApiError::TemplateNotFound
            | ApiError::MetricEntryNotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::EmptyPlanName => "EMPTY_PLAN_NAME",
            ApiError::InvalidDateRange => "INVALID_DATE_RANGE",
            ApiError::UnknownTemplates(_) => "UNKNOWN_TEMPLATES",
            ApiError::EntriesOutsideRange(_) => "ENTRIES_OUTSIDE_RANGE",
            ApiError::InvalidSchedule(_) => "INVALID_SCHEDULE",
            ApiError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            ApiError::PlanNotFound => "PLAN_NOT_FOUND",
            ApiError::SessionNotFound => "SESSION_NOT_FOUND",
            ApiError::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ApiError::MetricEntryNotFound => "METRIC_ENTRY_NOT_FOUND",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {:#}", self);
        }

        let body = Json(json!({
            "error_code": self.error_code(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
