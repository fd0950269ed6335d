use chrono::{Datelike, Local, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreateMetricEntryRequest, MetricBucket, MetricEntry, MetricGranularity, MetricSummary,
    UpdateMetricEntryRequest,
};

#[derive(Clone)]
pub struct MetricService {
    db: PgPool,
}

impl MetricService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn log_entry(
        &self,
        request: CreateMetricEntryRequest,
    ) -> Result<MetricEntry, ApiError> {
        let date = request.date.unwrap_or_else(|| Local::now().date_naive());

        let entry = sqlx::query_as::<_, MetricEntry>(
            r#"
            INSERT INTO metric_entries (user_id, metric_type, value, unit, date, time, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.metric_type)
        .bind(request.value)
        .bind(&request.unit)
        .bind(date)
        .bind(&request.time)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    pub async fn get_entries(
        &self,
        user_id: Uuid,
        metric_type: &str,
        limit: Option<i64>,
    ) -> Result<Vec<MetricEntry>, ApiError> {
        let limit = limit.unwrap_or(100).min(500);

        let entries = sqlx::query_as::<_, MetricEntry>(
            "SELECT * FROM metric_entries WHERE user_id = $1 AND metric_type = $2 ORDER BY date DESC, created_at DESC LIMIT $3",
        )
        .bind(user_id)
        .bind(metric_type)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        request: UpdateMetricEntryRequest,
    ) -> Result<MetricEntry, ApiError> {
        let entry = sqlx::query_as::<_, MetricEntry>(
            r#"
            UPDATE metric_entries
            SET value = COALESCE($2, value),
                unit = COALESCE($3, unit),
                date = COALESCE($4, date),
                time = COALESCE($5, time),
                notes = COALESCE($6, notes),
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(entry_id)
        .bind(request.value)
        .bind(&request.unit)
        .bind(request.date)
        .bind(&request.time)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        entry.ok_or(ApiError::MetricEntryNotFound)
    }

    pub async fn delete_entry(&self, entry_id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM metric_entries WHERE id = $1")
            .bind(entry_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Week/month grouped aggregation over a user's entries for one metric.
    pub async fn get_summary(
        &self,
        user_id: Uuid,
        metric_type: &str,
        granularity: MetricGranularity,
    ) -> Result<MetricSummary, ApiError> {
        let entries = sqlx::query_as::<_, MetricEntry>(
            "SELECT * FROM metric_entries WHERE user_id = $1 AND metric_type = $2 ORDER BY date ASC, created_at ASC",
        )
        .bind(user_id)
        .bind(metric_type)
        .fetch_all(&self.db)
        .await?;

        let unit = entries.last().map(|e| e.unit.clone());
        Ok(MetricSummary {
            metric_type: metric_type.to_string(),
            unit,
            granularity,
            buckets: group_entries(&entries, granularity),
        })
    }
}

/// Groups date-ascending entries into ISO-week or calendar-month buckets.
/// `latest` is the last value logged inside the bucket.
fn group_entries(entries: &[MetricEntry], granularity: MetricGranularity) -> Vec<MetricBucket> {
    let mut buckets: Vec<MetricBucket> = Vec::new();

    for entry in entries {
        let key = bucket_key(entry, granularity);
        match buckets.last_mut() {
            Some(bucket) if bucket.bucket == key => {
                bucket.count += 1;
                bucket.min = bucket.min.min(entry.value);
                bucket.max = bucket.max.max(entry.value);
                // average holds the running sum until the bucket closes
                bucket.average += entry.value;
                bucket.latest = entry.value;
            }
            _ => buckets.push(MetricBucket {
                bucket: key,
                count: 1,
                min: entry.value,
                max: entry.value,
                average: entry.value,
                latest: entry.value,
            }),
        }
    }

    for bucket in &mut buckets {
        bucket.average /= bucket.count as f64;
    }
    buckets
}

fn bucket_key(entry: &MetricEntry, granularity: MetricGranularity) -> String {
    match granularity {
        MetricGranularity::Week => {
            let week = entry.date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        MetricGranularity::Month => format!("{}-{:02}", entry.date.year(), entry.date.month()),
    }
}
