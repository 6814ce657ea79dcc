//! Membership and last-access mappings derived from record streams.
//!
//! Pure functions over one or two datasets. All of them consume best-effort
//! streams, so a missing dataset simply contributes an empty mapping.

use std::collections::{HashMap, HashSet};

use report_core::record::int_field;

use crate::reader::{Dataset, ExportReader};

/// User ids belonging to `group_id`, from the `groups_members` dataset.
pub fn group_members(reader: &ExportReader, group_id: i64) -> HashSet<i64> {
    let mut members = HashSet::new();
    for record in reader.open_or_empty(Dataset::GroupMembers) {
        if int_field(&record, "groupid") == group_id {
            members.insert(int_field(&record, "userid"));
        }
    }
    members
}

/// User ids enrolled in `course_id`.
///
/// Joins the `enrol` bridge (enrolment id → course id) against
/// `user_enrolments` (enrolment id → user id).
pub fn enrolled_users(reader: &ExportReader, course_id: i64) -> HashSet<i64> {
    let mut enrolment_course: HashMap<i64, i64> = HashMap::new();
    for record in reader.open_or_empty(Dataset::Enrolments) {
        enrolment_course.insert(int_field(&record, "id"), int_field(&record, "courseid"));
    }

    let mut users = HashSet::new();
    for record in reader.open_or_empty(Dataset::UserEnrolments) {
        let enrolment_id = int_field(&record, "enrolid");
        if enrolment_course.get(&enrolment_id) == Some(&course_id) {
            users.insert(int_field(&record, "userid"));
        }
    }
    users
}

/// Latest access timestamp per user for `course_id`, restricted to
/// `restrict_to`.
///
/// The export may carry several rows per (course, user); only the maximum
/// timestamp is kept.
pub fn last_access_by_user(
    reader: &ExportReader,
    course_id: i64,
    restrict_to: &HashSet<i64>,
) -> HashMap<i64, i64> {
    let mut last: HashMap<i64, i64> = HashMap::new();
    for record in reader.open_or_empty(Dataset::UserLastAccess) {
        if int_field(&record, "courseid") != course_id {
            continue;
        }
        let user_id = int_field(&record, "userid");
        if !restrict_to.contains(&user_id) {
            continue;
        }
        let ts = int_field(&record, "timeaccess");
        let entry = last.entry(user_id).or_insert(ts);
        if ts > *entry {
            *entry = ts;
        }
    }
    last
}

/// The target population: members of `group_id` who are enrolled in
/// `course_id`.
pub fn target_population(reader: &ExportReader, course_id: i64, group_id: i64) -> HashSet<i64> {
    let members = group_members(reader, group_id);
    let enrolled = enrolled_users(reader, course_id);
    members.intersection(&enrolled).copied().collect()
}
