use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ScheduleDeclaration, SessionStatus};

/// Completion summary for one plan over its date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanProgress {
    pub completed: u32,
    pub missed: u32,
    pub remaining: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Computes plan progress from the declaration and the session rows fetched
/// for the plan's range.
///
/// `total` is an estimate: the declaration's non-rest entry count multiplied
/// by the whole weeks in the range (rounded up) for recurring schedules, or
/// the plain entry count for custom ones. It can disagree with the number of
/// rows the generator actually produced when month boundaries misalign; that
/// gap is accepted rather than papered over.
pub fn calculate_progress(
    declaration: &ScheduleDeclaration,
    start: NaiveDate,
    end: NaiveDate,
    sessions: &[(NaiveDate, SessionStatus)],
    today: NaiveDate,
) -> PlanProgress {
    let total = estimate_total(declaration, start, end);

    let mut completed = 0u32;
    let mut missed = 0u32;
    let mut remaining = 0u32;

    for (date, status) in sessions {
        if status.is_pending() {
            // past-due pending sessions count as missed
            if *date < today {
                missed += 1;
            } else {
                remaining += 1;
            }
        } else if *status == SessionStatus::Completed {
            completed += 1;
        } else {
            missed += 1;
        }
    }

    let percentage = if total == 0 {
        0
    } else {
        ((f64::from(completed) / f64::from(total)) * 100.0).round() as u32
    };

    PlanProgress {
        completed,
        missed,
        remaining,
        total,
        percentage,
    }
}

fn estimate_total(declaration: &ScheduleDeclaration, start: NaiveDate, end: NaiveDate) -> u32 {
    match declaration {
        ScheduleDeclaration::Custom { .. } => declaration.workout_count(),
        _ => declaration.workout_count() * whole_weeks(start, end),
    }
}

/// Whole weeks between start and end inclusive, rounded up. Inverted ranges
/// count as zero.
fn whole_weeks(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }
    let days = (end - start).num_days() + 1;
    ((days + 6) / 7) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn two_per_week() -> ScheduleDeclaration {
        let mut days = BTreeMap::new();
        days.insert(DayOfWeek::Monday, Some(Uuid::new_v4()));
        days.insert(DayOfWeek::Thursday, Some(Uuid::new_v4()));
        days.insert(DayOfWeek::Saturday, None);
        ScheduleDeclaration::Weekly { days }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zero_total_short_circuits_percentage() {
        let decl = ScheduleDeclaration::Weekly {
            days: BTreeMap::new(),
        };
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 14), &[], d(2024, 1, 7));

        assert_eq!(progress.total, 0);
        assert_eq!(progress.percentage, 0);
    }

    #[test]
    fn past_due_scheduled_counts_as_missed_today_as_remaining() {
        let decl = two_per_week();
        let today = d(2024, 1, 8);
        let sessions = vec![
            (d(2024, 1, 7), SessionStatus::Scheduled), // yesterday, past due
            (d(2024, 1, 8), SessionStatus::Scheduled), // today, still upcoming
        ];
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 14), &sessions, today);

        assert_eq!(progress.missed, 1);
        assert_eq!(progress.remaining, 1);
        assert_eq!(progress.completed, 0);
    }

    #[test]
    fn confirmed_counts_like_scheduled() {
        let decl = two_per_week();
        let today = d(2024, 1, 8);
        let sessions = vec![
            (d(2024, 1, 4), SessionStatus::Confirmed), // past due
            (d(2024, 1, 11), SessionStatus::Confirmed), // upcoming
        ];
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 14), &sessions, today);

        assert_eq!(progress.missed, 1);
        assert_eq!(progress.remaining, 1);
        assert_eq!(progress.completed, 0);
    }

    #[test]
    fn no_show_and_cancelled_count_as_missed() {
        let decl = two_per_week();
        let sessions = vec![
            (d(2024, 1, 2), SessionStatus::NoShow),
            (d(2024, 1, 4), SessionStatus::Cancelled),
            (d(2024, 1, 9), SessionStatus::Completed),
        ];
        let progress =
            calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 14), &sessions, d(2024, 1, 10));

        assert_eq!(progress.missed, 2);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.remaining, 0);
    }

    #[test]
    fn two_workouts_per_week_over_two_weeks() {
        let decl = two_per_week();
        let today = d(2024, 1, 15);
        let sessions = vec![
            (d(2024, 1, 1), SessionStatus::Completed),
            (d(2024, 1, 4), SessionStatus::Scheduled), // past due
        ];
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 14), &sessions, today);

        assert_eq!(
            progress,
            PlanProgress {
                completed: 1,
                missed: 1,
                remaining: 0,
                total: 4,
                percentage: 25,
            }
        );
    }

    #[test]
    fn partial_week_rounds_total_up() {
        let decl = two_per_week();
        // 15 days = 3 weeks rounded up
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 15), &[], d(2024, 1, 1));
        assert_eq!(progress.total, 6);
    }

    #[test]
    fn custom_total_is_entry_count() {
        let decl = ScheduleDeclaration::Custom {
            entries: vec![
                crate::models::CustomEntry {
                    date: d(2024, 1, 3),
                    template_id: Some(Uuid::new_v4()),
                },
                crate::models::CustomEntry {
                    date: d(2024, 1, 5),
                    template_id: None,
                },
            ],
        };
        let progress = calculate_progress(&decl, d(2024, 1, 1), d(2024, 1, 31), &[], d(2024, 1, 1));
        assert_eq!(progress.total, 1);
    }
}
