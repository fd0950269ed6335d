use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Best-effort notification writer. Callers decide whether a failure here is
/// worth more than a log line; the plan save path logs and moves on.
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

impl NotificationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn send_workout_reminder(&self, user_id: Uuid, plan_name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, notification_type, title, body, created_at)
            VALUES ($1, 'workout_reminder', $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind("Today's workout")
        .bind(format!("You have a workout scheduled today in \"{}\"", plan_name))
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        tracing::info!(%user_id, "workout reminder queued");
        Ok(())
    }
}
