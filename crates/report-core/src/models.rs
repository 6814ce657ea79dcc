use serde::Serialize;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::record::{int_field, text_field};

// ── Export entities ───────────────────────────────────────────────────────────

/// A course row from the `courses` export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: i64,
    pub shortname: String,
    pub fullname: String,
    /// Identifier of the category the course belongs to.
    pub category_id: i64,
    /// Course start as a Unix timestamp; `0` when the export carries none.
    pub start_ts: i64,
}

impl Course {
    /// Build a course from a raw export record, tolerating missing fields.
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: int_field(record, "id"),
            shortname: text_field(record, "shortname"),
            fullname: text_field(record, "fullname"),
            category_id: int_field(record, "category"),
            start_ts: int_field(record, "startdate"),
        }
    }
}

/// A category row from the `categories` export.
///
/// `path` encodes the ancestor chain as slash-delimited ids, e.g. `"/20/21"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub path: String,
}

impl Category {
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: int_field(record, "id"),
            name: text_field(record, "name"),
            path: text_field(record, "path"),
        }
    }
}

/// A group row from the `groups` export. A group belongs to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
}

impl Group {
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: int_field(record, "id"),
            course_id: int_field(record, "courseid"),
            name: text_field(record, "name"),
        }
    }
}

/// A user row from the `users` export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub lastname: String,
    pub firstname: String,
    pub email: String,
    pub username: String,
}

impl User {
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: int_field(record, "id"),
            lastname: text_field(record, "lastname"),
            firstname: text_field(record, "firstname"),
            email: text_field(record, "email"),
            username: text_field(record, "username"),
        }
    }
}

// ── Report output ─────────────────────────────────────────────────────────────

/// One entry of the weekly never-accessed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekPoint {
    /// Human-readable week span, `"<week start> → <week end>"`.
    pub label: String,
    /// Unix timestamp of the week's closing instant (Sunday 23:59:59).
    pub week_end: i64,
    /// Number of target users still never seen as of `week_end`.
    pub never_count: usize,
}

/// The weekly series plus the size of the target population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub series: Vec<WeekPoint>,
    /// Size of the target population (group ∩ enrolled).
    pub total_group: usize,
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// The authenticated principal on whose behalf a report runs.
///
/// Supplied by the hosting boundary and passed explicitly into every engine
/// entry point; the core never consults ambient session state.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub authenticated: bool,
}

impl Identity {
    /// An authenticated principal with the given username.
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authenticated: true,
        }
    }

    /// The unauthenticated principal. Engine entry points reject it.
    pub fn anonymous() -> Self {
        Self {
            username: String::new(),
            authenticated: false,
        }
    }

    /// Fail with [`ReportError::Unauthenticated`] unless authenticated.
    pub fn require(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(ReportError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── from_record ───────────────────────────────────────────────────────────

    #[test]
    fn test_course_from_record() {
        let rec = json!({
            "id": 42,
            "shortname": "300-DER",
            "fullname": "2025 - Derecho Procesal",
            "category": 21,
            "startdate": 1735700000,
        });
        let course = Course::from_record(&rec);
        assert_eq!(course.id, 42);
        assert_eq!(course.shortname, "300-DER");
        assert_eq!(course.fullname, "2025 - Derecho Procesal");
        assert_eq!(course.category_id, 21);
        assert_eq!(course.start_ts, 1_735_700_000);
    }

    #[test]
    fn test_course_from_sparse_record() {
        let course = Course::from_record(&json!({"id": 1}));
        assert_eq!(course.id, 1);
        assert_eq!(course.shortname, "");
        assert_eq!(course.category_id, 0);
        assert_eq!(course.start_ts, 0);
    }

    #[test]
    fn test_category_from_record() {
        let cat = Category::from_record(&json!({"id": 21, "name": "Grado", "path": "/20/21"}));
        assert_eq!(cat.id, 21);
        assert_eq!(cat.name, "Grado");
        assert_eq!(cat.path, "/20/21");
    }

    #[test]
    fn test_group_from_record() {
        let group = Group::from_record(&json!({"id": 7, "courseid": 42, "name": "Comisión A"}));
        assert_eq!(group.id, 7);
        assert_eq!(group.course_id, 42);
        assert_eq!(group.name, "Comisión A");
    }

    #[test]
    fn test_user_from_record() {
        let user = User::from_record(&json!({
            "id": 9,
            "lastname": "García",
            "firstname": "Ana",
            "email": "ana@example.edu",
            "username": "agarcia",
        }));
        assert_eq!(user.id, 9);
        assert_eq!(user.lastname, "García");
        assert_eq!(user.username, "agarcia");
    }

    // ── Identity ──────────────────────────────────────────────────────────────

    #[test]
    fn test_identity_authenticated_passes() {
        let identity = Identity::authenticated("gestor");
        assert!(identity.require().is_ok());
        assert_eq!(identity.username, "gestor");
    }

    #[test]
    fn test_identity_anonymous_rejected() {
        let err = Identity::anonymous().require().unwrap_err();
        assert!(matches!(err, ReportError::Unauthenticated));
    }
}
