//! Monday-aligned week arithmetic for the access-gap series.
//!
//! Weeks run Monday 00:00:00 through Sunday 23:59:59 in the report timezone.
//! Once the first week-end is anchored, stepping uses fixed 7-day increments
//! on Unix timestamps; labels are formatted back in the report timezone.

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

/// Seconds in one calendar day.
pub const DAY_SECS: i64 = 86_400;
/// Seconds in one 7-day week.
pub const WEEK_SECS: i64 = 7 * DAY_SECS;

// ── Timezone resolution ───────────────────────────────────────────────────────

/// Resolve a timezone setting into a [`Tz`].
///
/// `"auto"` detects the system IANA timezone. Unrecognised names fall back
/// to UTC with a warning.
pub fn resolve_timezone(name: &str) -> Tz {
    let resolved = if name.eq_ignore_ascii_case("auto") {
        iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
    } else {
        name.to_string()
    };

    resolved.parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "unrecognised timezone \"{}\", falling back to UTC",
            resolved
        );
        Tz::UTC
    })
}

// ── Day boundaries ────────────────────────────────────────────────────────────

/// Unix timestamp of local midnight at the start of `date`.
pub fn day_start(date: NaiveDate, tz: &Tz) -> i64 {
    local_ts(date.and_time(NaiveTime::MIN), tz)
}

/// Unix timestamp of the last second of `date` (midnight plus 86399 seconds).
pub fn day_end(date: NaiveDate, tz: &Tz) -> i64 {
    day_start(date, tz) + DAY_SECS - 1
}

/// Resolve a local wall-clock time to a Unix timestamp.
///
/// Ambiguous times (clocks falling back) take the earlier instant; times in
/// a spring-forward gap are shifted one hour ahead.
fn local_ts(naive: NaiveDateTime, tz: &Tz) -> i64 {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) => dt.timestamp(),
            LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
            LocalResult::None => naive.and_utc().timestamp(),
        },
    }
}

// ── Week alignment ────────────────────────────────────────────────────────────

/// The Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Unix timestamp of the first week-end (Sunday 23:59:59) of the week
/// containing `from`.
///
/// If the aligned Monday lands after `from`, step back one week first.
pub fn first_week_end(from: NaiveDate, tz: &Tz) -> i64 {
    let mut monday_ts = day_start(monday_of(from), tz);
    if monday_ts > day_start(from, tz) {
        monday_ts -= WEEK_SECS;
    }
    monday_ts + WEEK_SECS - 1
}

/// All week-end timestamps from the first aligned week through the end of
/// `to`, in fixed 7-day increments.
pub fn week_ends(from: NaiveDate, to: NaiveDate, tz: &Tz) -> Vec<i64> {
    let to_ts = day_end(to, tz);
    let mut ends = Vec::new();
    let mut end = first_week_end(from, tz);
    while end <= to_ts {
        ends.push(end);
        end += WEEK_SECS;
    }
    ends
}

// ── Labels ────────────────────────────────────────────────────────────────────

/// Format a week-end timestamp as `"<week start date> → <week end date>"`.
pub fn week_label(week_end: i64, tz: &Tz) -> String {
    format!(
        "{} → {}",
        date_str(week_end - 6 * DAY_SECS, tz),
        date_str(week_end, tz)
    )
}

fn date_str(ts: i64, tz: &Tz) -> String {
    match tz.timestamp_opt(ts, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc_ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap().timestamp()
    }

    // ── monday_of ─────────────────────────────────────────────────────────────

    #[test]
    fn test_monday_of_midweek() {
        // 2025-06-11 is a Wednesday; its Monday is 2025-06-09.
        assert_eq!(monday_of(date(2025, 6, 11)), date(2025, 6, 9));
    }

    #[test]
    fn test_monday_of_monday_is_identity() {
        assert_eq!(monday_of(date(2025, 6, 9)), date(2025, 6, 9));
    }

    #[test]
    fn test_monday_of_sunday_goes_back_six_days() {
        // 2025-06-15 is a Sunday.
        assert_eq!(monday_of(date(2025, 6, 15)), date(2025, 6, 9));
    }

    // ── first_week_end ────────────────────────────────────────────────────────

    #[test]
    fn test_first_week_end_from_wednesday() {
        // Week of Wed 2025-06-11 closes Sunday 2025-06-15 23:59:59.
        let end = first_week_end(date(2025, 6, 11), &Tz::UTC);
        assert_eq!(end, utc_ts(2025, 6, 15, 23, 59, 59));
    }

    #[test]
    fn test_first_week_end_from_monday() {
        let end = first_week_end(date(2025, 6, 9), &Tz::UTC);
        assert_eq!(end, utc_ts(2025, 6, 15, 23, 59, 59));
    }

    #[test]
    fn test_first_week_end_respects_timezone() {
        let tz: Tz = "America/Argentina/Cordoba".parse().unwrap();
        let end = first_week_end(date(2025, 6, 11), &tz);
        // Cordoba is UTC-3, so local Sunday 23:59:59 is 02:59:59 UTC Monday.
        assert_eq!(end, utc_ts(2025, 6, 16, 2, 59, 59));
    }

    // ── week_ends ─────────────────────────────────────────────────────────────

    #[test]
    fn test_week_ends_wednesday_plus_seven_days_gives_two_entries() {
        // Monday-aligned weeks straddle a Wednesday-to-Wednesday range.
        let ends = week_ends(date(2025, 6, 11), date(2025, 6, 18), &Tz::UTC);
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[0], utc_ts(2025, 6, 15, 23, 59, 59));
        assert_eq!(ends[1], utc_ts(2025, 6, 22, 23, 59, 59));
    }

    #[test]
    fn test_week_ends_single_sunday_gives_one_entry() {
        let ends = week_ends(date(2025, 6, 15), date(2025, 6, 15), &Tz::UTC);
        assert_eq!(ends.len(), 1);
    }

    #[test]
    fn test_week_ends_single_tuesday_gives_no_entry() {
        // The week closes after the range does, so nothing is emitted.
        let ends = week_ends(date(2025, 6, 10), date(2025, 6, 10), &Tz::UTC);
        assert!(ends.is_empty());
    }

    #[test]
    fn test_week_ends_fixed_increment() {
        let ends = week_ends(date(2025, 1, 1), date(2025, 3, 1), &Tz::UTC);
        assert!(ends.len() > 2);
        for pair in ends.windows(2) {
            assert_eq!(pair[1] - pair[0], WEEK_SECS);
        }
    }

    // ── week_label ────────────────────────────────────────────────────────────

    #[test]
    fn test_week_label_spans_monday_to_sunday() {
        let end = utc_ts(2025, 6, 15, 23, 59, 59);
        assert_eq!(week_label(end, &Tz::UTC), "2025-06-09 → 2025-06-15");
    }

    // ── day boundaries ────────────────────────────────────────────────────────

    #[test]
    fn test_day_start_and_end() {
        let start = day_start(date(2025, 6, 11), &Tz::UTC);
        let end = day_end(date(2025, 6, 11), &Tz::UTC);
        assert_eq!(start, utc_ts(2025, 6, 11, 0, 0, 0));
        assert_eq!(end - start, DAY_SECS - 1);
    }

    // ── resolve_timezone ──────────────────────────────────────────────────────

    #[test]
    fn test_resolve_timezone_named() {
        assert_eq!(resolve_timezone("UTC"), Tz::UTC);
        assert_eq!(
            resolve_timezone("America/Argentina/Cordoba").name(),
            "America/Argentina/Cordoba"
        );
    }

    #[test]
    fn test_resolve_timezone_invalid_falls_back_to_utc() {
        assert_eq!(resolve_timezone("Mars/Olympus"), Tz::UTC);
    }

    #[test]
    fn test_resolve_timezone_auto_yields_valid_zone() {
        // Whatever the host system reports must parse into a Tz.
        let tz = resolve_timezone("auto");
        assert!(!tz.name().is_empty());
    }
}
