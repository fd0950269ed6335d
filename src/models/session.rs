use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Session lifecycle status. Stored as lowercase text; every write path goes
/// through [`SessionStatus::can_transition_to`], so the store never sees a
/// transition this table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    /// Terminal statuses can only be re-opened back to `scheduled`.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        if *self == next {
            return false;
        }
        match self {
            SessionStatus::Scheduled => true,
            SessionStatus::Confirmed => true,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::NoShow => {
                next == SessionStatus::Scheduled
            }
        }
    }

    /// Whether the session is still upcoming (no outcome recorded yet).
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionStatus::Scheduled | SessionStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanSession {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub template_id: Option<Uuid>,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub date: Option<NaiveDate>,
    pub template_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: SessionStatus,
    pub notes: Option<String>,
}

/// Derived calendar row. Duration falls back to 60 minutes and the type to
/// "personal_training" when no template metadata is attached.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub session_id: Uuid,
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub session_type: String,
    pub duration_minutes: i32,
    pub status: SessionStatus,
}

pub const DEFAULT_SESSION_DURATION_MINUTES: i32 = 60;
pub const DEFAULT_SESSION_TYPE: &str = "personal_training";
