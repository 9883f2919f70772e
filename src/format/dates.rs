//! Calendar formatting and renewal countdowns

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date, which is how the
/// database serializes `DATE` columns over JSON (`2024-05-01T04:00:00.000Z`).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    parse_timestamp(text).map(|ts| ts.date_naive())
}

/// Parse an instant from RFC 3339, or from a naive `YYYY-MM-DD HH:MM:SS` taken as UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a date as `YYYY-MM-DD`; no date yields an empty string
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Re-format date text as `YYYY-MM-DD`.
/// Empty or unparseable text yields an empty string.
pub fn format_date_str(text: &str) -> String {
    format_date(parse_date(text))
}

/// Whole days left until a policy renews, counted up from `now`.
///
/// The expiration instant is midnight UTC of the expiration date, and a
/// partial day counts as a full one. Past or missing expirations give 0.
pub fn days_until_renewal(expiration: Option<NaiveDate>, now: DateTime<Utc>) -> i64 {
    let Some(expiration) = expiration else {
        return 0;
    };
    let expires_at = expiration.and_time(NaiveTime::MIN).and_utc();
    let millis = (expires_at - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Expiration date for a term starting on `effective`
pub fn term_end(effective: NaiveDate, months: u32) -> NaiveDate {
    effective
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
