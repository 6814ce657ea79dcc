//! The selectable course/group catalog.
//!
//! Courses are restricted to a named category subtree and a recency window.
//! The year heuristics are deliberately fuzzy; they encode how course names
//! are actually written in the institutional data and are preserved as-is.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use report_core::models::{Category, Course, Group};
use report_core::record::int_field;
use report_core::week::DAY_SECS;

use crate::reader::{Dataset, ExportReader};

// ── CatalogQuery ──────────────────────────────────────────────────────────────

/// Inputs of one catalog pass.
///
/// `now_ts` and `current_year` are supplied by the caller so the filter is a
/// pure function of the snapshot and its parameters.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    /// Name of the root categories whose subtree is allowed.
    pub category_label: String,
    /// Optional case-insensitive substring filter on the shortname.
    pub search: Option<String>,
    /// Wall-clock "now" as a Unix timestamp.
    pub now_ts: i64,
    /// Calendar year of "now" in the report timezone.
    pub current_year: i32,
}

// ── Categories ────────────────────────────────────────────────────────────────

/// All categories by id. Empty when the dataset is absent, in which case
/// category filtering is skipped entirely.
pub fn load_categories(reader: &ExportReader) -> HashMap<i64, Category> {
    reader
        .open_or_empty(Dataset::Categories)
        .map(|record| {
            let category = Category::from_record(&record);
            (category.id, category)
        })
        .collect()
}

/// The allowed category subtree: every root whose trimmed name equals
/// `label` case-insensitively, plus every category whose path contains
/// `/{root_id}/`.
pub fn allowed_category_ids(categories: &HashMap<i64, Category>, label: &str) -> HashSet<i64> {
    let roots: Vec<i64> = categories
        .values()
        .filter(|c| c.name.trim().eq_ignore_ascii_case(label))
        .map(|c| c.id)
        .collect();

    let mut allowed = HashSet::new();
    for category in categories.values() {
        for root in &roots {
            let marker = format!("/{root}/");
            if category.id == *root
                || (!category.path.is_empty() && category.path.contains(&marker))
            {
                allowed.insert(category.id);
                break;
            }
        }
    }
    allowed
}

// ── Year heuristics ───────────────────────────────────────────────────────────

/// The year a course name declares, if any.
///
/// Looks for `"2025 - ..."` (leading year followed by a dash) and
/// `"... (2025)"` (trailing parenthesised year), checking the full name
/// before the short name for each pattern.
pub fn declared_year(fullname: &str, shortname: &str) -> Option<i32> {
    let prefix = Regex::new(r"^\s*(20\d{2})\s*[-–—]").expect("regex is valid");
    let suffix = Regex::new(r"\(\s*(20\d{2})\s*\)\s*$").expect("regex is valid");

    for pattern in [&prefix, &suffix] {
        for text in [fullname, shortname] {
            if let Some(cap) = pattern.captures(text) {
                if let Ok(year) = cap[1].parse::<i32>() {
                    return Some(year);
                }
            }
        }
    }
    None
}

// ── Course visibility ─────────────────────────────────────────────────────────

/// The visible course catalog, sorted by shortname.
///
/// Visibility rules, in order:
/// 1. When categories are present, only the allowed subtree passes.
/// 2. A declared year must be the current year or the one before.
/// 3. Without a declared year, a known start date must fall within the
///    trailing 365 days.
/// 4. Courses with neither are always kept; ambiguous data defaults to
///    inclusion, not exclusion.
pub fn visible_courses(reader: &ExportReader, query: &CatalogQuery) -> Vec<Course> {
    let categories = load_categories(reader);
    let allowed = allowed_category_ids(&categories, &query.category_label);

    let min_year = query.current_year - 1;
    let min_start_ts = query.now_ts - 365 * DAY_SECS;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut courses = Vec::new();
    for record in reader.open_or_empty(Dataset::Courses) {
        let course = Course::from_record(&record);

        if !categories.is_empty() && !allowed.contains(&course.category_id) {
            continue;
        }

        if let Some(year) = declared_year(&course.fullname, &course.shortname) {
            if year < min_year || year > query.current_year {
                continue;
            }
        } else if course.start_ts > 0
            && (course.start_ts < min_start_ts || course.start_ts > query.now_ts)
        {
            continue;
        }

        if let Some(term) = &search {
            if !course.shortname.to_lowercase().contains(term) {
                continue;
            }
        }

        courses.push(course);
    }

    courses.sort_by(|a, b| a.shortname.cmp(&b.shortname));
    courses
}

// ── Groups ────────────────────────────────────────────────────────────────────

/// The groups of one course, sorted by name.
pub fn groups_for_course(reader: &ExportReader, course_id: i64) -> Vec<Group> {
    let mut groups: Vec<Group> = reader
        .open_or_empty(Dataset::Groups)
        .filter(|record| int_field(record, "courseid") == course_id)
        .map(|record| Group::from_record(&record))
        .collect();
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}
