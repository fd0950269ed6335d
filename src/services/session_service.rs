use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CalendarEntry, PlanSession, SessionStatus, UpdateSessionRequest, UpdateSessionStatusRequest,
    DEFAULT_SESSION_DURATION_MINUTES, DEFAULT_SESSION_TYPE,
};

#[derive(Clone)]
pub struct SessionService {
    db: PgPool,
}

impl SessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_session_by_id(&self, session_id: Uuid) -> Result<Option<PlanSession>, ApiError> {
        let session = sqlx::query_as::<_, PlanSession>("SELECT * FROM plan_sessions WHERE id = $1")
            .bind(session_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(session)
    }

    pub async fn get_sessions_by_plan(&self, plan_id: Uuid) -> Result<Vec<PlanSession>, ApiError> {
        let sessions = sqlx::query_as::<_, PlanSession>(
            "SELECT * FROM plan_sessions WHERE plan_id = $1 ORDER BY date ASC",
        )
        .bind(plan_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    pub async fn get_sessions_by_date_range(
        &self,
        client_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PlanSession>, ApiError> {
        let sessions = sqlx::query_as::<_, PlanSession>(
            "SELECT * FROM plan_sessions WHERE client_id = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC",
        )
        .bind(client_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    pub async fn update_session(
        &self,
        session_id: Uuid,
        request: UpdateSessionRequest,
    ) -> Result<PlanSession, ApiError> {
        let session = sqlx::query_as::<_, PlanSession>(
            r#"
            UPDATE plan_sessions
            SET date = COALESCE($2, date),
                template_id = COALESCE($3, template_id),
                notes = COALESCE($4, notes),
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(request.date)
        .bind(request.template_id)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        session.ok_or(ApiError::SessionNotFound)
    }

    /// Status changes go through the transition table; anything else is a
    /// conflict, not a silent overwrite.
    pub async fn update_session_status(
        &self,
        session_id: Uuid,
        request: UpdateSessionStatusRequest,
    ) -> Result<PlanSession, ApiError> {
        let session = self
            .get_session_by_id(session_id)
            .await?
            .ok_or(ApiError::SessionNotFound)?;

        if !session.status.can_transition_to(request.status) {
            return Err(ApiError::InvalidStatusTransition {
                from: session.status.as_str(),
                to: request.status.as_str(),
            });
        }

        // Guarding on the observed status makes the write a compare-and-swap:
        // a concurrent transition leaves zero rows matched and this request
        // fails instead of overwriting the winner. Self-transitions are
        // rejected above, so the winner always changed the status.
        let updated = sqlx::query_as::<_, PlanSession>(
            r#"
            UPDATE plan_sessions
            SET status = $3,
                notes = COALESCE($4, notes),
                updated_at = $5
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(session.status)
        .bind(request.status)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        updated.ok_or(ApiError::InvalidStatusTransition {
            from: session.status.as_str(),
            to: request.status.as_str(),
        })
    }

    /// Derived calendar read: template metadata joined in, with a 60-minute
    /// / "personal_training" fallback when the session has no template
    /// attached. Sessions are the single source of truth; calendar rows are
    /// never stored.
    pub async fn get_calendar(
        &self,
        client_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<CalendarEntry>, ApiError> {
        let rows: Vec<CalendarRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.plan_id, s.client_id, s.date, s.status,
                   t.name AS template_name, t.category, t.duration_minutes
            FROM plan_sessions s
            LEFT JOIN workout_templates t ON t.id = s.template_id
            WHERE s.client_id = $1 AND s.date >= $2 AND s.date <= $3
            ORDER BY s.date ASC
            "#,
        )
        .bind(client_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CalendarRow::into_entry).collect())
    }
}

#[derive(sqlx::FromRow)]
struct CalendarRow {
    id: Uuid,
    plan_id: Uuid,
    client_id: Uuid,
    date: NaiveDate,
    status: SessionStatus,
    template_name: Option<String>,
    category: Option<String>,
    duration_minutes: Option<i32>,
}

impl CalendarRow {
    fn into_entry(self) -> CalendarEntry {
        CalendarEntry {
            session_id: self.id,
            plan_id: self.plan_id,
            client_id: self.client_id,
            date: self.date,
            title: self
                .template_name
                .unwrap_or_else(|| "Workout".to_string()),
            session_type: self
                .category
                .unwrap_or_else(|| DEFAULT_SESSION_TYPE.to_string()),
            duration_minutes: self
                .duration_minutes
                .unwrap_or(DEFAULT_SESSION_DURATION_MINUTES),
            status: self.status,
        }
    }
}
