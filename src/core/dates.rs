//! Date helpers over local naive date-times.
//!
//! Every function that compares against "now" has an `_at` twin taking the
//! reference instant explicitly.

use std::fmt::Write;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::error::{Error, Result};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    NotStarted,
    Active,
    Expired,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::NotStarted => "not_started",
            ExpiryStatus::Active => "active",
            ExpiryStatus::Expired => "expired",
        }
    }
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse RFC 3339 (converted to local time), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` (midnight).
pub fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DEFAULT_DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(Error::validation_invalid_argument(
        "date",
        format!("Unrecognized date: {}", value),
        Some(value.to_string()),
        Some(vec![
            "RFC 3339".to_string(),
            "YYYY-MM-DD HH:MM:SS".to_string(),
            "YYYY-MM-DD".to_string(),
        ]),
    ))
}

fn parse_or_now(value: Option<&str>) -> Result<NaiveDateTime> {
    value.map(parse_date).transpose().map(|v| v.unwrap_or_else(now))
}

/// Where `check` (default: now) falls relative to `[start, end]`. Both
/// bounds are inclusive.
pub fn check_expiry(start: &str, end: &str, check: Option<&str>) -> Result<ExpiryStatus> {
    let at = parse_or_now(check)?;
    Ok(check_expiry_at(parse_date(start)?, parse_date(end)?, at))
}

pub fn check_expiry_at(start: NaiveDateTime, end: NaiveDateTime, at: NaiveDateTime) -> ExpiryStatus {
    if at < start {
        ExpiryStatus::NotStarted
    } else if at > end {
        ExpiryStatus::Expired
    } else {
        ExpiryStatus::Active
    }
}

/// Render with a strftime-style format. Specifiers that need data a naive
/// date-time does not have (time zones) are an invalid argument.
pub fn format_date(date: &str, format: &str) -> Result<String> {
    let parsed = parse_date(date)?;
    format_date_time(&parsed, format)
}

pub fn format_date_time(date: &NaiveDateTime, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| {
        Error::validation_invalid_argument(
            "format",
            format!("Cannot format date with '{}'", format),
            None,
            None,
        )
    })?;
    Ok(out)
}

/// True when `value` parses with `format` and formats back to the same text.
pub fn matches_format(value: &str, format: &str) -> bool {
    let reformatted = if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        format_date_time(&dt, format).ok()
    } else if let Ok(date) = NaiveDate::parse_from_str(value, format) {
        format_naive(date.format(format))
    } else if let Ok(time) = NaiveTime::parse_from_str(value, format) {
        format_naive(time.format(format))
    } else {
        None
    };

    reformatted.as_deref() == Some(value)
}

fn format_naive(display: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", display).ok()?;
    Some(out)
}

/// "3 days ago" / "2 hours from now" relative to now, or "5 minutes
/// before" / "1 week after" relative to `compare_to`.
pub fn diff_for_humans(date: &str, compare_to: Option<&str>) -> Result<String> {
    let date = parse_date(date)?;
    Ok(match compare_to {
        Some(other) => diff_between_for_humans(date, parse_date(other)?),
        None => diff_for_humans_at(date, now()),
    })
}

pub fn diff_for_humans_at(date: NaiveDateTime, now: NaiveDateTime) -> String {
    let (amount, unit) = largest_unit(date - now);
    let direction = if date <= now { "ago" } else { "from now" };
    format!("{} {} {}", amount, plural(unit, amount), direction)
}

pub fn diff_between_for_humans(date: NaiveDateTime, other: NaiveDateTime) -> String {
    let (amount, unit) = largest_unit(date - other);
    let direction = if date <= other { "before" } else { "after" };
    format!("{} {} {}", amount, plural(unit, amount), direction)
}

fn largest_unit(delta: TimeDelta) -> (i64, &'static str) {
    let seconds = delta.num_seconds().abs();
    let days = seconds / 86_400;

    if days >= 365 {
        (days / 365, "year")
    } else if days >= 30 {
        (days / 30, "month")
    } else if days >= 7 {
        (days / 7, "week")
    } else if days >= 1 {
        (days, "day")
    } else if seconds >= 3_600 {
        (seconds / 3_600, "hour")
    } else if seconds >= 60 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    }
}

fn plural(unit: &str, amount: i64) -> String {
    if amount == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

/// Whole years since `birthdate`.
pub fn age(birthdate: &str) -> Result<i32> {
    Ok(age_at(parse_date(birthdate)?.date(), now().date()))
}

pub fn age_at(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    years
}

pub fn is_past(date: &str) -> Result<bool> {
    Ok(is_past_at(parse_date(date)?, now()))
}

pub fn is_past_at(date: NaiveDateTime, now: NaiveDateTime) -> bool {
    date < now
}

pub fn is_future(date: &str) -> Result<bool> {
    Ok(is_future_at(parse_date(date)?, now()))
}

pub fn is_future_at(date: NaiveDateTime, now: NaiveDateTime) -> bool {
    date > now
}

pub fn is_today(date: &str) -> Result<bool> {
    Ok(is_same_day(parse_date(date)?, now()))
}

pub fn is_same_day(date: NaiveDateTime, other: NaiveDateTime) -> bool {
    date.date() == other.date()
}

/// Whole days between two dates, regardless of order.
pub fn days_between(start: &str, end: &str) -> Result<i64> {
    let delta = parse_date(end)? - parse_date(start)?;
    Ok(delta.num_days().abs())
}

pub fn add_days(date: &str, days: i64) -> Result<NaiveDateTime> {
    shift_days(parse_date(date)?, days)
}

pub fn sub_days(date: &str, days: i64) -> Result<NaiveDateTime> {
    shift_days(parse_date(date)?, days.saturating_neg())
}

fn shift_days(date: NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "days",
                format!("Shifting by {} days leaves the supported date range", days),
                None,
                None,
            )
        })
}

/// Midnight of `date` (default: today).
pub fn start_of_day(date: Option<&str>) -> Result<NaiveDateTime> {
    Ok(parse_or_now(date)?.date().and_time(NaiveTime::MIN))
}

/// Last microsecond of `date` (default: today).
pub fn end_of_day(date: Option<&str>) -> Result<NaiveDateTime> {
    let day = parse_or_now(date)?.date();
    day.and_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| Error::internal_unexpected(format!("No end of day for {}", day)))
}

/// Every instant from `start` to `end` inclusive, one day apart. Empty when
/// `end` is before `start`.
pub fn date_range(start: &str, end: &str) -> Result<Vec<NaiveDateTime>> {
    Ok(date_range_between(parse_date(start)?, parse_date(end)?))
}

pub fn date_range_between(start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.checked_add_signed(TimeDelta::days(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        parse_date(value).unwrap()
    }

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(at("2024-12-25"), at("2024-12-25 00:00:00"));
        assert_eq!(at("2024-12-25T10:30:00"), at("2024-12-25 10:30:00"));
        assert!(parse_date("2024-12-25T10:30:00+02:00").is_ok());
        assert!(parse_date("yesterday-ish").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn format_date_default_format() {
        assert_eq!(format_date("2024-12-25", DEFAULT_DATE_FORMAT).unwrap(), "2024-12-25");
        assert_eq!(format_date("2024-12-25 08:05:09", "%d/%m/%Y %H:%M").unwrap(), "25/12/2024 08:05");
    }

    #[test]
    fn format_date_rejects_zone_specifier() {
        assert!(format_date("2024-12-25", "%Z %z").is_err());
    }

    #[test]
    fn past_and_future_relative_to_reference() {
        let reference = at("2024-06-15 12:00:00");
        assert!(is_past_at(at("2024-06-15 11:59:59"), reference));
        assert!(!is_past_at(reference, reference));
        assert!(is_future_at(at("2024-06-16"), reference));
        assert!(!is_future_at(reference, reference));
        assert!(!is_future_at(at("2023-01-01"), reference));
        assert!(is_same_day(at("2024-06-15"), reference));
        assert!(!is_same_day(at("2024-06-14 23:59:59"), reference));
    }

    #[test]
    fn expiry_status_bounds_are_inclusive() {
        let start = at("2024-01-01");
        let end = at("2024-01-31");
        assert_eq!(check_expiry_at(start, end, at("2023-12-31")), ExpiryStatus::NotStarted);
        assert_eq!(check_expiry_at(start, end, start), ExpiryStatus::Active);
        assert_eq!(check_expiry_at(start, end, end), ExpiryStatus::Active);
        assert_eq!(check_expiry_at(start, end, at("2024-02-01")), ExpiryStatus::Expired);
    }

    #[test]
    fn expiry_with_explicit_check_date() {
        let status = check_expiry("2024-01-01", "2024-01-31", Some("2024-01-15")).unwrap();
        assert_eq!(status.as_str(), "active");
    }

    #[test]
    fn expiry_against_now() {
        let today = now().format(DEFAULT_DATE_FORMAT).to_string();
        let later = (now() + TimeDelta::days(30)).format(DEFAULT_DATE_FORMAT).to_string();
        assert_eq!(check_expiry(&today, &later, None).unwrap(), ExpiryStatus::Active);
    }

    #[test]
    fn days_between_is_absolute() {
        assert_eq!(days_between("2024-01-01", "2024-01-31").unwrap(), 30);
        assert_eq!(days_between("2024-01-31", "2024-01-01").unwrap(), 30);
    }

    #[test]
    fn past_and_future_relative_to_now() {
        let last_year = (now() - TimeDelta::days(365)).format(DEFAULT_DATE_FORMAT).to_string();
        let next_year = (now() + TimeDelta::days(365)).format(DEFAULT_DATE_FORMAT).to_string();
        assert!(is_past(&last_year).unwrap());
        assert!(is_future(&next_year).unwrap());
        assert!(!is_today(&next_year).unwrap());
    }

    #[test]
    fn human_differences() {
        let now = at("2024-06-15 12:00:00");
        assert_eq!(diff_for_humans_at(at("2024-06-12 12:00:00"), now), "3 days ago");
        assert_eq!(diff_for_humans_at(at("2024-06-15 14:30:00"), now), "2 hours from now");
        assert_eq!(diff_for_humans_at(at("2023-06-01"), now), "1 year ago");
        assert_eq!(diff_for_humans_at(now, now), "0 seconds ago");
        assert_eq!(diff_between_for_humans(at("2024-06-15 12:01:00"), now), "1 minute after");
        assert_eq!(diff_between_for_humans(at("2024-06-01 12:00:00"), now), "2 weeks before");
    }

    #[test]
    fn age_counts_completed_years() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(age_at(birth, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 33);
        assert_eq!(age_at(birth, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 34);
    }

    #[test]
    fn shifting_days() {
        assert_eq!(add_days("2024-02-28", 2).unwrap(), at("2024-03-01"));
        assert_eq!(sub_days("2024-03-01", 1).unwrap(), at("2024-02-29"));
        assert!(add_days("2024-01-01", i64::MAX).is_err());
    }

    #[test]
    fn day_bounds() {
        assert_eq!(start_of_day(Some("2024-05-05 17:45:00")).unwrap(), at("2024-05-05"));
        let end = end_of_day(Some("2024-05-05 01:00:00")).unwrap();
        assert_eq!(end.format("%H:%M:%S%.6f").to_string(), "23:59:59.999999");
    }

    #[test]
    fn range_is_inclusive() {
        let range = date_range("2024-01-30", "2024-02-02").unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range[3], at("2024-02-02"));
        assert!(date_range("2024-02-02", "2024-01-30").unwrap().is_empty());
    }

    #[test]
    fn format_matching() {
        assert!(matches_format("2024-12-25", "%Y-%m-%d"));
        assert!(!matches_format("2024-13-25", "%Y-%m-%d"));
        assert!(!matches_format("2024-1-5", "%Y-%m-%d"));
        assert!(matches_format("25/12/2024 10:30", "%d/%m/%Y %H:%M"));
        assert!(matches_format("10:30", "%H:%M"));
        assert!(!matches_format("not a date", "%Y-%m-%d"));
    }
}
