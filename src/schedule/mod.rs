// Pure schedule logic: declaration expansion and progress math

pub mod generator;
pub mod progress;

pub use generator::{expand_schedule, week_of_month, SessionDraft};
pub use progress::{calculate_progress, PlanProgress};
