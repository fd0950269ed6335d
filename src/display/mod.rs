//! Presentation helpers for clients that render sessions and metric logs.
//! Formatting never panics; malformed input comes back as a sentinel string.

use chrono::NaiveDate;

use crate::models::SessionStatus;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

pub fn status_color(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Scheduled => "#3b82f6",
        SessionStatus::Confirmed => "#8b5cf6",
        SessionStatus::Completed => "#22c55e",
        SessionStatus::Cancelled => "#9ca3af",
        SessionStatus::NoShow => "#ef4444",
    }
}

pub fn status_icon(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Scheduled => "calendar",
        SessionStatus::Confirmed => "calendar-check",
        SessionStatus::Completed => "check-circle",
        SessionStatus::Cancelled => "slash-circle",
        SessionStatus::NoShow => "x-circle",
    }
}

/// Formats a `YYYY-MM-DD` string as "Jan 15, 2024". Empty input yields
/// "Date not set"; malformed input or a year outside 1900..=2100 yields
/// "Invalid Date".
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "Date not set".to_string();
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => {
            let year = chrono::Datelike::year(&date);
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return "Invalid Date".to_string();
            }
            date.format("%b %-d, %Y").to_string()
        }
        Err(_) => "Invalid Date".to_string(),
    }
}

/// Formats an `HH:MM` string as 12-hour "10:00 AM". Malformed or
/// out-of-range input yields "Invalid Time".
pub fn format_time(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some((hours_part, minutes_part)) = trimmed.split_once(':') else {
        return "Invalid Time".to_string();
    };
    if hours_part.len() > 2 || minutes_part.len() != 2 {
        return "Invalid Time".to_string();
    }

    let (Ok(hours), Ok(minutes)) = (hours_part.parse::<u32>(), minutes_part.parse::<u32>()) else {
        return "Invalid Time".to_string();
    };
    if hours > 23 || minutes > 59 {
        return "Invalid Time".to_string();
    }

    let meridiem = if hours < 12 { "AM" } else { "PM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, minutes, meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_valid_date() {
        assert_eq!(format_date("2024-01-15"), "Jan 15, 2024");
        assert_eq!(format_date("2024-12-05"), "Dec 5, 2024");
    }

    #[test]
    fn rejects_malformed_and_out_of_range_dates() {
        assert_eq!(format_date("2024-13-01"), "Invalid Date");
        assert_eq!(format_date("1899-06-01"), "Invalid Date");
        assert_eq!(format_date("2101-06-01"), "Invalid Date");
        assert_eq!(format_date("not-a-date"), "Invalid Date");
        assert_eq!(format_date(""), "Date not set");
        assert_eq!(format_date("   "), "Date not set");
    }

    #[test]
    fn formats_valid_times() {
        assert_eq!(format_time("10:00"), "10:00 AM");
        assert_eq!(format_time("00:05"), "12:05 AM");
        assert_eq!(format_time("12:30"), "12:30 PM");
        assert_eq!(format_time("23:59"), "11:59 PM");
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(format_time("25:70"), "Invalid Time");
        assert_eq!(format_time("10"), "Invalid Time");
        assert_eq!(format_time("10:7"), "Invalid Time");
        assert_eq!(format_time("ab:cd"), "Invalid Time");
        assert_eq!(format_time(""), "Invalid Time");
    }

    #[test]
    fn every_status_has_color_and_icon() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Confirmed,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
            SessionStatus::NoShow,
        ] {
            assert!(status_color(status).starts_with('#'));
            assert!(!status_icon(status).is_empty());
        }
    }
}
