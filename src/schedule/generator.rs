use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::models::{DayOfWeek, ScheduleDeclaration};

/// One session to be created. Rest days never produce a draft, so every
/// draft carries a template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub date: NaiveDate,
    pub template_id: Uuid,
}

/// Week-of-month bucket: days 1-7 are week 1, 8-14 week 2, up to week 5 for
/// days 29-31. Not aligned to calendar weeks; partial weeks at month
/// boundaries land wherever the day-of-month puts them.
pub fn week_of_month(date: NaiveDate) -> u8 {
    week_bucket(date.day())
}

/// ceil(day / 7) for a 1-based day-of-month.
fn week_bucket(day_of_month: u32) -> u8 {
    ((day_of_month - 1) / 7 + 1) as u8
}

/// Expands a schedule declaration over [start, end] inclusive into concrete
/// session drafts. An inverted range or an all-rest declaration yields an
/// empty vec. Output order is unspecified; custom entries come out in
/// declaration order, not date order.
pub fn expand_schedule(
    declaration: &ScheduleDeclaration,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SessionDraft> {
    match declaration {
        ScheduleDeclaration::Weekly { days } => iter_days(start, end)
            .filter_map(|date| {
                let day = DayOfWeek::from(date.weekday());
                days.get(&day)
                    .and_then(|t| *t)
                    .map(|template_id| SessionDraft { date, template_id })
            })
            .collect(),
        ScheduleDeclaration::Monthly { weeks } => iter_days(start, end)
            .filter_map(|date| {
                let day = DayOfWeek::from(date.weekday());
                weeks
                    .get(&week_of_month(date))
                    .and_then(|days| days.get(&day))
                    .and_then(|t| *t)
                    .map(|template_id| SessionDraft { date, template_id })
            })
            .collect(),
        ScheduleDeclaration::Custom { entries } => entries
            .iter()
            .filter_map(|entry| {
                entry.template_id.map(|template_id| SessionDraft {
                    date: entry.date,
                    template_id,
                })
            })
            .collect(),
    }
}

fn iter_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let days = if start > end {
        0
    } else {
        (end - start).num_days() + 1
    };
    (0..days).map(move |offset| start + Duration::days(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomEntry;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn weekly(days: Vec<(DayOfWeek, Option<Uuid>)>) -> ScheduleDeclaration {
        ScheduleDeclaration::Weekly {
            days: days.into_iter().collect(),
        }
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let decl = weekly(vec![(DayOfWeek::Monday, Some(Uuid::new_v4()))]);
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(expand_schedule(&decl, start, end), vec![]);
    }

    #[test]
    fn all_rest_declaration_yields_nothing() {
        let decl = weekly(vec![
            (DayOfWeek::Monday, None),
            (DayOfWeek::Thursday, None),
        ]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        assert_eq!(expand_schedule(&decl, start, end), vec![]);
    }

    #[test]
    fn week_of_month_uses_day_buckets_not_calendar_weeks() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
        assert_eq!(week_of_month(d(1)), 1);
        assert_eq!(week_of_month(d(7)), 1);
        assert_eq!(week_of_month(d(8)), 2);
        assert_eq!(week_of_month(d(14)), 2);
        assert_eq!(week_of_month(d(29)), 5);
        assert_eq!(week_of_month(d(31)), 5);
        // the raw rule keeps counting past real month lengths
        assert_eq!(week_bucket(35), 5);
    }

    #[test]
    fn weekly_emits_one_session_per_matching_day() {
        let template_a = Uuid::new_v4();
        let template_b = Uuid::new_v4();
        let decl = weekly(vec![
            (DayOfWeek::Monday, Some(template_a)),
            (DayOfWeek::Wednesday, None),
            (DayOfWeek::Friday, Some(template_b)),
        ]);

        // Jan 1 2024 is a Monday, Jan 14 a Sunday: two full weeks
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let drafts = expand_schedule(&decl, start, end);

        assert_eq!(drafts.len(), 4);
        let mondays: Vec<_> = drafts.iter().filter(|d| d.template_id == template_a).collect();
        let fridays: Vec<_> = drafts.iter().filter(|d| d.template_id == template_b).collect();
        assert_eq!(mondays.len(), 2);
        assert_eq!(fridays.len(), 2);
        assert_eq!(mondays[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(mondays[1].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(fridays[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(fridays[1].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    }

    #[test]
    fn monthly_looks_up_week_bucket_then_day() {
        let template = Uuid::new_v4();
        let mut week2 = BTreeMap::new();
        week2.insert(DayOfWeek::Tuesday, Some(template));
        let mut weeks = BTreeMap::new();
        weeks.insert(2u8, week2);
        let decl = ScheduleDeclaration::Monthly { weeks };

        // March 2024: Tuesdays fall on 5, 12, 19, 26; only the 12th is in
        // the day-8..14 bucket
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let drafts = expand_schedule(&decl, start, end);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
    }

    #[test]
    fn custom_emits_only_templated_entries_without_reordering() {
        let template = Uuid::new_v4();
        let decl = ScheduleDeclaration::Custom {
            entries: vec![
                CustomEntry {
                    date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
                    template_id: Some(template),
                },
                CustomEntry {
                    date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                    template_id: None,
                },
                CustomEntry {
                    date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    template_id: Some(template),
                },
            ],
        };

        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let drafts = expand_schedule(&decl, start, end);

        assert_eq!(drafts.len(), 2);
        // declaration order preserved, callers must sort if they need dates ascending
        assert_eq!(drafts[0].date, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());
        assert_eq!(drafts[1].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
