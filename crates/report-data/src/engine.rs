//! The access-gap report engine.
//!
//! Joins the target population (group ∩ enrolled) against per-user last
//! access timestamps and aggregates a Monday-aligned weekly series of
//! "still never accessed" counts, plus a point-in-time listing of who is
//! still missing at one chosen week-end.

use std::collections::{HashMap, HashSet};

use chrono_tz::Tz;
use report_core::error::{ReportError, Result};
use report_core::models::{Identity, User, WeekPoint, WeeklyReport};
use report_core::record::int_field;
use report_core::request::{MissingRequest, SeriesRequest};
use report_core::week;

use crate::builders;
use crate::reader::{Dataset, ExportReader};

// ── GapReportEngine ───────────────────────────────────────────────────────────

/// Computes never-accessed reports over one export snapshot.
///
/// Stateless apart from the snapshot handle and the report timezone; every
/// call is a pure function of the snapshot and the request.
pub struct GapReportEngine<'a> {
    reader: &'a ExportReader,
    tz: Tz,
}

impl<'a> GapReportEngine<'a> {
    pub fn new(reader: &'a ExportReader, tz: Tz) -> Self {
        Self { reader, tz }
    }

    /// The weekly never-accessed series over the request's date range.
    ///
    /// Rejects unauthenticated callers before reading any dataset, and a
    /// group that does not belong to the course before any join.
    pub fn weekly_series(
        &self,
        identity: &Identity,
        request: &SeriesRequest,
    ) -> Result<WeeklyReport> {
        identity.require()?;
        self.ensure_group_in_course(request.course_id, request.group_id)?;

        let target = builders::target_population(self.reader, request.course_id, request.group_id);
        let last = builders::last_access_by_user(self.reader, request.course_id, &target);

        let series = week::week_ends(request.range.from, request.range.to, &self.tz)
            .into_iter()
            .map(|end| WeekPoint {
                label: week::week_label(end, &self.tz),
                week_end: end,
                never_count: never_count(&target, &last, end),
            })
            .collect();

        Ok(WeeklyReport {
            series,
            total_group: target.len(),
        })
    }

    /// The users still never seen as of the request's week-end, resolved to
    /// full user records and sorted by (lastname, firstname).
    pub fn missing_users(
        &self,
        identity: &Identity,
        request: &MissingRequest,
    ) -> Result<Vec<User>> {
        identity.require()?;
        self.ensure_group_in_course(request.course_id, request.group_id)?;

        let target = builders::target_population(self.reader, request.course_id, request.group_id);
        let last = builders::last_access_by_user(self.reader, request.course_id, &target);
        let missing: HashSet<i64> = target
            .iter()
            .copied()
            .filter(|user_id| is_never(&last, *user_id, request.week_end))
            .collect();

        let mut users: Vec<User> = self
            .reader
            .open_or_empty(Dataset::Users)
            .filter(|record| missing.contains(&int_field(record, "id")))
            .map(|record| User::from_record(&record))
            .collect();

        users.sort_by(|a, b| {
            (a.lastname.as_str(), a.firstname.as_str())
                .cmp(&(b.lastname.as_str(), b.firstname.as_str()))
        });
        Ok(users)
    }

    /// Validate that `group_id` exists and belongs to `course_id`.
    fn ensure_group_in_course(&self, course_id: i64, group_id: i64) -> Result<()> {
        for record in self.reader.open_or_empty(Dataset::Groups) {
            if int_field(&record, "id") == group_id {
                return if int_field(&record, "courseid") == course_id {
                    Ok(())
                } else {
                    Err(ReportError::GroupCourseMismatch {
                        group_id,
                        course_id,
                    })
                };
            }
        }
        // An unknown group gets the same treatment as one of another course.
        Err(ReportError::GroupCourseMismatch {
            group_id,
            course_id,
        })
    }
}

/// A user is "never accessed as of `week_end`" when no access is recorded,
/// or when every recorded access lies strictly after the boundary.
fn is_never(last: &HashMap<i64, i64>, user_id: i64, week_end: i64) -> bool {
    last.get(&user_id).map_or(true, |&ts| ts > week_end)
}

fn never_count(target: &HashSet<i64>, last: &HashMap<i64, i64>, week_end: i64) -> usize {
    target
        .iter()
        .filter(|user_id| is_never(last, **user_id, week_end))
        .count()
}
