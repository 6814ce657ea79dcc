use chrono::NaiveDate;

use crate::error::{ReportError, Result};

// ── DateRange ─────────────────────────────────────────────────────────────────

/// An inclusive calendar-day range, `from` 00:00:00 through `to` 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Return the range with the bounds swapped when `from > to`.
    ///
    /// Reversed ranges are accepted rather than rejected.
    pub fn normalized(self) -> Self {
        if self.from > self.to {
            Self {
                from: self.to,
                to: self.from,
            }
        } else {
            self
        }
    }
}

// ── SeriesRequest ─────────────────────────────────────────────────────────────

/// Validated parameters for the weekly never-accessed series.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub course_id: i64,
    pub group_id: i64,
    pub range: DateRange,
}

impl SeriesRequest {
    /// Validate identifiers and normalize the range.
    ///
    /// Fails with [`ReportError::InvalidParameters`] before any computation
    /// when either identifier is non-positive.
    pub fn new(course_id: i64, group_id: i64, range: DateRange) -> Result<Self> {
        require_positive(course_id, "courseid")?;
        require_positive(group_id, "groupid")?;
        Ok(Self {
            course_id,
            group_id,
            range: range.normalized(),
        })
    }
}

// ── MissingRequest ────────────────────────────────────────────────────────────

/// Validated parameters for the point-in-time missing-users listing.
#[derive(Debug, Clone)]
pub struct MissingRequest {
    pub course_id: i64,
    pub group_id: i64,
    /// Unix timestamp of the week's closing instant.
    pub week_end: i64,
}

impl MissingRequest {
    pub fn new(course_id: i64, group_id: i64, week_end: i64) -> Result<Self> {
        require_positive(course_id, "courseid")?;
        require_positive(group_id, "groupid")?;
        require_positive(week_end, "end")?;
        Ok(Self {
            course_id,
            group_id,
            week_end,
        })
    }
}

fn require_positive(value: i64, name: &str) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(ReportError::InvalidParameters(format!(
            "{name} must be a positive integer, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── DateRange ─────────────────────────────────────────────────────────────

    #[test]
    fn test_range_normalized_swaps_reversed_bounds() {
        let range = DateRange::new(date(2025, 6, 30), date(2025, 6, 1)).normalized();
        assert_eq!(range.from, date(2025, 6, 1));
        assert_eq!(range.to, date(2025, 6, 30));
    }

    #[test]
    fn test_range_normalized_keeps_ordered_bounds() {
        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30));
        assert_eq!(range.normalized(), range);
    }

    #[test]
    fn test_range_single_day_is_valid() {
        let range = DateRange::new(date(2025, 6, 15), date(2025, 6, 15));
        assert_eq!(range.normalized(), range);
    }

    // ── SeriesRequest ─────────────────────────────────────────────────────────

    #[test]
    fn test_series_request_valid() {
        let req = SeriesRequest::new(42, 7, DateRange::new(date(2025, 6, 1), date(2025, 6, 30)))
            .unwrap();
        assert_eq!(req.course_id, 42);
        assert_eq!(req.group_id, 7);
    }

    #[test]
    fn test_series_request_rejects_zero_course() {
        let err = SeriesRequest::new(0, 7, DateRange::new(date(2025, 6, 1), date(2025, 6, 30)))
            .unwrap_err();
        assert!(matches!(err, crate::ReportError::InvalidParameters(_)));
        assert!(err.to_string().contains("courseid"));
    }

    #[test]
    fn test_series_request_rejects_negative_group() {
        let err = SeriesRequest::new(42, -1, DateRange::new(date(2025, 6, 1), date(2025, 6, 30)))
            .unwrap_err();
        assert!(err.to_string().contains("groupid"));
    }

    #[test]
    fn test_series_request_normalizes_range() {
        let req = SeriesRequest::new(42, 7, DateRange::new(date(2025, 6, 30), date(2025, 6, 1)))
            .unwrap();
        assert!(req.range.from <= req.range.to);
    }

    // ── MissingRequest ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_request_valid() {
        let req = MissingRequest::new(42, 7, 1_750_000_000).unwrap();
        assert_eq!(req.week_end, 1_750_000_000);
    }

    #[test]
    fn test_missing_request_rejects_zero_week_end() {
        let err = MissingRequest::new(42, 7, 0).unwrap_err();
        assert!(err.to_string().contains("end"));
    }
}
