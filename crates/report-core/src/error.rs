use thiserror::Error;

/// All errors produced by the access-gap reporting pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// An export dataset file could not be opened.
    ///
    /// Absorbed by the data layer: a missing dataset contributes an empty
    /// record stream and the report proceeds best-effort.
    #[error("Dataset \"{name}\" unavailable: {source}")]
    DatasetUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A required request parameter is missing or non-positive.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The selected group does not belong to the selected course.
    ///
    /// Distinct from [`ReportError::InvalidParameters`] so that callers can
    /// re-prompt for the group while keeping the course selection.
    #[error("Group {group_id} does not belong to course {course_id}")]
    GroupCourseMismatch { group_id: i64, course_id: i64 },

    /// The caller supplied no authenticated identity.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A delimited-text export could not be written.
    #[error("Export failed: {0}")]
    Export(String),

    /// Pass-through for raw I/O errors that do not carry a dataset name.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
