use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use uuid::Uuid;

use fitcoach::display::{format_date, format_time};
use fitcoach::models::{DayOfWeek, ScheduleDeclaration, SessionStatus};
use fitcoach::schedule::{calculate_progress, expand_schedule, PlanProgress};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Builds the weekly declaration from a trainer's point of view: two workout
/// days, one explicit rest day.
fn monday_friday_plan(template_a: Uuid, template_b: Uuid) -> ScheduleDeclaration {
    let mut days = BTreeMap::new();
    days.insert(DayOfWeek::Monday, Some(template_a));
    days.insert(DayOfWeek::Wednesday, None);
    days.insert(DayOfWeek::Friday, Some(template_b));
    ScheduleDeclaration::Weekly { days }
}

#[test]
fn two_week_weekly_plan_generates_four_sessions() {
    let template_a = Uuid::new_v4();
    let template_b = Uuid::new_v4();
    let decl = monday_friday_plan(template_a, template_b);

    // Jan 1 2024 is a Monday; Jan 14 a Sunday
    let drafts = expand_schedule(&decl, d(2024, 1, 1), d(2024, 1, 14));

    assert_eq!(drafts.len(), 4);
    assert_eq!(
        drafts.iter().filter(|s| s.template_id == template_a).count(),
        2
    );
    assert_eq!(
        drafts.iter().filter(|s| s.template_id == template_b).count(),
        2
    );
    assert!(drafts
        .iter()
        .all(|s| s.date >= d(2024, 1, 1) && s.date <= d(2024, 1, 14)));
    // Wednesdays are rest days
    assert!(!drafts.iter().any(|s| s.date == d(2024, 1, 3)));
    assert!(!drafts.iter().any(|s| s.date == d(2024, 1, 10)));
}

#[test]
fn generated_sessions_feed_progress_where_past_due_counts_as_missed() {
    let template_a = Uuid::new_v4();
    let template_b = Uuid::new_v4();
    let mut days = BTreeMap::new();
    days.insert(DayOfWeek::Monday, Some(template_a));
    days.insert(DayOfWeek::Thursday, Some(template_b));
    let decl = ScheduleDeclaration::Weekly { days };

    let start = d(2024, 1, 1);
    let end = d(2024, 1, 14);
    let drafts = expand_schedule(&decl, start, end);
    assert_eq!(drafts.len(), 4);

    // Client completed the first session, skipped the second, the rest of
    // the range hasn't happened yet but today is past the whole plan
    let statuses: Vec<(NaiveDate, SessionStatus)> = vec![
        (d(2024, 1, 1), SessionStatus::Completed),
        (d(2024, 1, 4), SessionStatus::Scheduled),
    ];
    let progress = calculate_progress(&decl, start, end, &statuses, d(2024, 1, 8));

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
fn declaration_survives_json_round_trip_with_mixed_case_input() {
    let template = Uuid::new_v4();
    let json = serde_json::json!({
        "schedule_type": "weekly",
        "days": {
            "MONDAY": template,
            "Wednesday": null,
            "friday": template
        }
    });

    let decl: ScheduleDeclaration = serde_json::from_value(json).unwrap();
    assert_eq!(decl.workout_count(), 2);

    let drafts = expand_schedule(&decl, d(2024, 1, 1), d(2024, 1, 7));
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].date, d(2024, 1, 1));
    assert_eq!(drafts[1].date, d(2024, 1, 5));
}

#[test]
fn formatter_sentinels_never_leak_garbage() {
    assert_eq!(format_date("2024-13-01"), "Invalid Date");
    assert_eq!(format_date("1899-01-01"), "Invalid Date");
    assert_eq!(format_date("2101-01-01"), "Invalid Date");
    assert_eq!(format_date(""), "Date not set");
    assert_eq!(format_time("10:00"), "10:00 AM");
    assert_eq!(format_time("25:70"), "Invalid Time");
}
