use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateTemplateRequest, UpdateTemplateRequest, WorkoutTemplate};

#[derive(Clone)]
pub struct TemplateService {
    db: PgPool,
}

impl TemplateService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> Result<WorkoutTemplate, ApiError> {
        let template = sqlx::query_as::<_, WorkoutTemplate>(
            r#"
            INSERT INTO workout_templates (trainer_id, name, category, duration_minutes, description, exercises, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(request.trainer_id)
        .bind(&request.name)
        .bind(&request.category)
        .bind(request.duration_minutes)
        .bind(&request.description)
        .bind(request.exercises.unwrap_or_else(|| json!([])))
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(template)
    }

    pub async fn get_template_by_id(
        &self,
        template_id: Uuid,
    ) -> Result<Option<WorkoutTemplate>, ApiError> {
        let template =
            sqlx::query_as::<_, WorkoutTemplate>("SELECT * FROM workout_templates WHERE id = $1")
                .bind(template_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(template)
    }

    pub async fn get_templates_by_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<WorkoutTemplate>, ApiError> {
        let templates = sqlx::query_as::<_, WorkoutTemplate>(
            "SELECT * FROM workout_templates WHERE trainer_id = $1 ORDER BY name ASC",
        )
        .bind(trainer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(templates)
    }

    pub async fn update_template(
        &self,
        template_id: Uuid,
        request: UpdateTemplateRequest,
    ) -> Result<WorkoutTemplate, ApiError> {
        let template = sqlx::query_as::<_, WorkoutTemplate>(
            r#"
            UPDATE workout_templates
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                duration_minutes = COALESCE($4, duration_minutes),
                description = COALESCE($5, description),
                exercises = COALESCE($6, exercises),
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(template_id)
        .bind(&request.name)
        .bind(&request.category)
        .bind(request.duration_minutes)
        .bind(&request.description)
        .bind(&request.exercises)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        template.ok_or(ApiError::TemplateNotFound)
    }

    pub async fn delete_template(&self, template_id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM workout_templates WHERE id = $1")
            .bind(template_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
