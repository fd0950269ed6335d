use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Canonical day-of-week key for schedule declarations. Serialized lowercase;
/// deserialization accepts any case and normalizes once, so lookups downstream
/// are always exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            other => Err(format!("unknown day of week: {}", other)),
        }
    }
}

impl From<DayOfWeek> for String {
    fn from(day: DayOfWeek) -> Self {
        day.as_str().to_string()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One explicitly dated entry of a custom schedule. A missing template marks
/// a rest day and generates no session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEntry {
    pub date: NaiveDate,
    pub template_id: Option<Uuid>,
}

/// Declarative schedule for a plan. A `None` template reference on any day
/// means "rest day" and emits nothing when the schedule is expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "schedule_type", rename_all = "snake_case")]
pub enum ScheduleDeclaration {
    Weekly {
        days: BTreeMap<DayOfWeek, Option<Uuid>>,
    },
    /// Keyed by week-of-month (1..=5), computed as `(day - 1) / 7 + 1`.
    Monthly {
        weeks: BTreeMap<u8, BTreeMap<DayOfWeek, Option<Uuid>>>,
    },
    Custom {
        entries: Vec<CustomEntry>,
    },
}

impl ScheduleDeclaration {
    pub fn schedule_type(&self) -> &'static str {
        match self {
            ScheduleDeclaration::Weekly { .. } => "weekly",
            ScheduleDeclaration::Monthly { .. } => "monthly",
            ScheduleDeclaration::Custom { .. } => "custom",
        }
    }

    /// Every template reference the declaration carries, rest days excluded.
    pub fn template_refs(&self) -> Vec<Uuid> {
        match self {
            ScheduleDeclaration::Weekly { days } => days.values().filter_map(|t| *t).collect(),
            ScheduleDeclaration::Monthly { weeks } => weeks
                .values()
                .flat_map(|days| days.values().filter_map(|t| *t))
                .collect(),
            ScheduleDeclaration::Custom { entries } => {
                entries.iter().filter_map(|e| e.template_id).collect()
            }
        }
    }

    /// Number of non-rest entries in the declaration.
    pub fn workout_count(&self) -> u32 {
        self.template_refs().len() as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub client_id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub schedule_type: String,
    pub schedule: Value,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutPlan {
    pub fn declaration(&self) -> Result<ScheduleDeclaration, serde_json::Error> {
        serde_json::from_value(self.schedule.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub client_id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub schedule: ScheduleDeclaration,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub schedule: Option<ScheduleDeclaration>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: WorkoutPlan,
    pub session_count: usize,
}
