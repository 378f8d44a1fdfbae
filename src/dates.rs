//! Date normalization for listing and detail pages.
//!
//! Listing dates are loose (`2024-05-20`, `05-20`) and carry no zone, so they
//! are read as UTC. Detail pages print a full local timestamp, sometimes with
//! a label in front (`发布时间：2024-05-20 10:30`), which is always UTC+8.

use crate::error::{FeedError, FeedResult};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const UTC_PLUS_8_SECS: i32 = 8 * 3600;

static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{4})\s*[-/.年]\s*(\d{1,2})\s*[-/.月]\s*(\d{1,2})\s*日?(?:\s*(\d{1,2})\s*[:：时]\s*(\d{1,2})(?:\s*[:：分]\s*(\d{1,2}))?)?",
    )
    .unwrap()
});

static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s*[-/.月]\s*(\d{1,2})\s*日?$").unwrap());

/// Parse a listing-page date.
///
/// `today` supplies the year for month-day strings. Naive values are UTC.
pub fn parse_listing_date(raw: &str, today: NaiveDate) -> FeedResult<DateTime<FixedOffset>> {
    let s = raw.trim();
    if let Some(dt) = with_explicit_offset(s) {
        return Ok(dt);
    }
    find_naive(s)
        .or_else(|| month_day(s, today.year()))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| FeedError::DateParse(s.to_string()))
}

/// Parse a detail-page date, applying UTC+8 unless the string has its own offset.
pub fn parse_detail_date(raw: &str) -> FeedResult<DateTime<FixedOffset>> {
    let s = raw.trim();
    if let Some(dt) = with_explicit_offset(s) {
        return Ok(dt);
    }
    find_naive(s)
        .and_then(|naive| {
            FixedOffset::east_opt(UTC_PLUS_8_SECS)?
                .from_local_datetime(&naive)
                .single()
        })
        .ok_or_else(|| FeedError::DateParse(s.to_string()))
}

fn with_explicit_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
}

fn find_naive(s: &str) -> Option<NaiveDateTime> {
    let caps = FULL_DATE.captures(s)?;
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number(&caps, 2)?, number(&caps, 3)?)?;
    let time = NaiveTime::from_hms_opt(
        number(&caps, 4).unwrap_or(0),
        number(&caps, 5).unwrap_or(0),
        number(&caps, 6).unwrap_or(0),
    )?;
    Some(date.and_time(time))
}

fn month_day(s: &str, year: i32) -> Option<NaiveDateTime> {
    let caps = MONTH_DAY.captures(s)?;
    let date = NaiveDate::from_ymd_opt(year, number(&caps, 1)?, number(&caps, 2)?)?;
    Some(date.and_time(NaiveTime::MIN))
}

fn number(caps: &Captures, i: usize) -> Option<u32> {
    caps.get(i).and_then(|m| m.as_str().parse().ok())
}
