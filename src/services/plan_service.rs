use chrono::{Local, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreatePlanRequest, ScheduleDeclaration, SessionStatus, UpdatePlanRequest, WorkoutPlan,
};
use crate::schedule::{self, SessionDraft};

use super::notification_service::NotificationService;

#[derive(Clone)]
pub struct PlanService {
    db: PgPool,
    notifications: NotificationService,
}

impl PlanService {
    pub fn new(db: PgPool) -> Self {
        let notifications = NotificationService::new(db.clone());
        Self { db, notifications }
    }

    /// Creates a plan and its derived sessions in one transaction. Validation
    /// failures abort the whole save; nothing is persisted on error.
    pub async fn create_plan(&self, request: CreatePlanRequest) -> Result<WorkoutPlan, ApiError> {
        validate_plan_shape(&request.name, request.start_date, request.end_date)?;
        self.validate_template_refs(&request.schedule).await?;
        validate_custom_entries(&request.schedule, request.start_date, request.end_date)?;

        let drafts =
            schedule::expand_schedule(&request.schedule, request.start_date, request.end_date);
        let schedule_json =
            serde_json::to_value(&request.schedule).map_err(anyhow::Error::from)?;

        let mut tx = self.db.begin().await?;

        let plan = sqlx::query_as::<_, WorkoutPlan>(
            r#"
            INSERT INTO workout_plans (client_id, trainer_id, name, schedule_type, schedule, start_date, end_date, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(request.client_id)
        .bind(request.trainer_id)
        .bind(&request.name)
        .bind(request.schedule.schedule_type())
        .bind(&schedule_json)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        insert_sessions(&mut tx, &plan, &drafts).await?;
        tx.commit().await?;

        self.notify_todays_sessions(&plan, &drafts).await;

        Ok(plan)
    }

    /// Edits a plan. A schedule or date-range change regenerates the derived
    /// sessions: the old rows are deleted and the new ones inserted inside
    /// the same transaction as the plan update.
    pub async fn update_plan(
        &self,
        plan_id: Uuid,
        request: UpdatePlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        let existing = self
            .get_plan_by_id(plan_id)
            .await?
            .ok_or(ApiError::PlanNotFound)?;

        let name = request.name.unwrap_or_else(|| existing.name.clone());
        let start_date = request.start_date.unwrap_or(existing.start_date);
        let end_date = request.end_date.unwrap_or(existing.end_date);
        let regenerate =
            request.schedule.is_some() || start_date != existing.start_date || end_date != existing.end_date;
        let declaration = match request.schedule {
            Some(declaration) => declaration,
            None => existing
                .declaration()
                .map_err(|e| ApiError::InvalidSchedule(e.to_string()))?,
        };

        validate_plan_shape(&name, start_date, end_date)?;
        self.validate_template_refs(&declaration).await?;
        validate_custom_entries(&declaration, start_date, end_date)?;

        let drafts = schedule::expand_schedule(&declaration, start_date, end_date);
        let schedule_json = serde_json::to_value(&declaration).map_err(anyhow::Error::from)?;

        let mut tx = self.db.begin().await?;

        let plan = sqlx::query_as::<_, WorkoutPlan>(
            r#"
            UPDATE workout_plans
            SET name = $2,
                schedule_type = $3,
                schedule = $4,
                start_date = $5,
                end_date = $6,
                notes = COALESCE($7, notes),
                updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(plan_id)
        .bind(&name)
        .bind(declaration.schedule_type())
        .bind(&schedule_json)
        .bind(start_date)
        .bind(end_date)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if regenerate {
            sqlx::query("DELETE FROM plan_sessions WHERE plan_id = $1")
                .bind(plan_id)
                .execute(&mut *tx)
                .await?;
            insert_sessions(&mut tx, &plan, &drafts).await?;
        }

        tx.commit().await?;

        if regenerate {
            self.notify_todays_sessions(&plan, &drafts).await;
        }

        Ok(plan)
    }

    pub async fn get_plan_by_id(&self, plan_id: Uuid) -> Result<Option<WorkoutPlan>, ApiError> {
        let plan = sqlx::query_as::<_, WorkoutPlan>("SELECT * FROM workout_plans WHERE id = $1")
            .bind(plan_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(plan)
    }

    pub async fn get_plans_by_client(&self, client_id: Uuid) -> Result<Vec<WorkoutPlan>, ApiError> {
        let plans = sqlx::query_as::<_, WorkoutPlan>(
            "SELECT * FROM workout_plans WHERE client_id = $1 ORDER BY start_date DESC",
        )
        .bind(client_id)
        .fetch_all(&self.db)
        .await?;

        Ok(plans)
    }

    /// Deleting a plan cascades to its derived sessions.
    pub async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM workout_plans WHERE id = $1")
            .bind(plan_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Progress over the plan's full range, computed from the fetched rows.
    pub async fn get_plan_progress(
        &self,
        plan_id: Uuid,
    ) -> Result<schedule::PlanProgress, ApiError> {
        let plan = self
            .get_plan_by_id(plan_id)
            .await?
            .ok_or(ApiError::PlanNotFound)?;
        let declaration = plan
            .declaration()
            .map_err(|e| ApiError::InvalidSchedule(e.to_string()))?;

        let sessions: Vec<(NaiveDate, SessionStatus)> = sqlx::query_as(
            "SELECT date, status FROM plan_sessions WHERE plan_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(plan_id)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .fetch_all(&self.db)
        .await?;

        let today = Local::now().date_naive();
        Ok(schedule::calculate_progress(
            &declaration,
            plan.start_date,
            plan.end_date,
            &sessions,
            today,
        ))
    }

    /// Every template reference must resolve; unknown ids abort the save
    /// with the full list enumerated.
    async fn validate_template_refs(
        &self,
        declaration: &ScheduleDeclaration,
    ) -> Result<(), ApiError> {
        let mut refs = declaration.template_refs();
        refs.sort_unstable();
        refs.dedup();
        if refs.is_empty() {
            return Ok(());
        }

        let known: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM workout_templates WHERE id = ANY($1)")
                .bind(&refs)
                .fetch_all(&self.db)
                .await?;
        let known: Vec<Uuid> = known.into_iter().map(|(id,)| id).collect();

        let unknown: Vec<Uuid> = refs
            .into_iter()
            .filter(|id| !known.contains(id))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ApiError::UnknownTemplates(unknown))
        }
    }

    /// Best-effort "today's workout" notification. Failures are logged and
    /// never turn a committed save into an error.
    async fn notify_todays_sessions(&self, plan: &WorkoutPlan, drafts: &[SessionDraft]) {
        let today = Local::now().date_naive();
        if !drafts.iter().any(|d| d.date == today) {
            return;
        }

        if let Err(e) = self
            .notifications
            .send_workout_reminder(plan.client_id, &plan.name)
            .await
        {
            tracing::warn!(plan_id = %plan.id, "failed to send today's workout notification: {:#}", e);
        }
    }
}

fn validate_plan_shape(name: &str, start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::EmptyPlanName);
    }
    if start > end {
        return Err(ApiError::InvalidDateRange);
    }
    Ok(())
}

/// Derived sessions must fall inside the plan range. Weekly/monthly expansion
/// guarantees that by construction; custom entries carry their own dates and
/// are checked here.
fn validate_custom_entries(
    declaration: &ScheduleDeclaration,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ApiError> {
    if let ScheduleDeclaration::Custom { entries } = declaration {
        let out_of_range: Vec<NaiveDate> = entries
            .iter()
            .filter(|e| e.template_id.is_some() && (e.date < start || e.date > end))
            .map(|e| e.date)
            .collect();
        if !out_of_range.is_empty() {
            return Err(ApiError::EntriesOutsideRange(out_of_range));
        }
    }
    Ok(())
}

async fn insert_sessions(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    plan: &WorkoutPlan,
    drafts: &[SessionDraft],
) -> Result<(), sqlx::Error> {
    for draft in drafts {
        sqlx::query(
            r#"
            INSERT INTO plan_sessions (plan_id, client_id, trainer_id, date, template_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'scheduled', $6, $6)
            "#,
        )
        .bind(plan.id)
        .bind(plan.client_id)
        .bind(plan.trainer_id)
        .bind(draft.date)
        .bind(draft.template_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
