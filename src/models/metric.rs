use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetricEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMetricEntryRequest {
    pub user_id: Uuid,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMetricEntryRequest {
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

/// Bucket granularity for metric summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGranularity {
    Week,
    Month,
}

/// One aggregated bucket of metric entries. `bucket` is "2024-W03" for weekly
/// grouping and "2024-01" for monthly grouping.
#[derive(Debug, Clone, Serialize)]
pub struct MetricBucket {
    pub bucket: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub latest: f64,
}

#[derive(Debug, Serialize)]
pub struct MetricSummary {
    pub metric_type: String,
    pub unit: Option<String>,
    pub granularity: MetricGranularity,
    pub buckets: Vec<MetricBucket>,
}
