//! Lazy NDJSON record streams over an export snapshot directory.
//!
//! Each export dataset is one `<name>.ndjson` file; every line is one record.
//! Streams are re-opened on every call, so a report pass can consume the same
//! dataset as many times as its joins require in bounded memory.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use serde_json::Value;
use tracing::debug;

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The eight export datasets this system reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Categories,
    Courses,
    Groups,
    GroupMembers,
    Enrolments,
    UserEnrolments,
    UserLastAccess,
    Users,
}

impl Dataset {
    /// The export name, as produced by the external export job.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Categories => "categories",
            Dataset::Courses => "courses",
            Dataset::Groups => "groups",
            Dataset::GroupMembers => "groups_members",
            Dataset::Enrolments => "enrol",
            Dataset::UserEnrolments => "user_enrolments",
            Dataset::UserLastAccess => "user_lastaccess",
            Dataset::Users => "users",
        }
    }

    /// File name of the dataset inside the snapshot directory.
    pub fn file_name(self) -> String {
        format!("{}.ndjson", self.name())
    }
}

// ── ExportReader ──────────────────────────────────────────────────────────────

/// Opens datasets from one export snapshot directory.
pub struct ExportReader {
    dir: PathBuf,
}

impl ExportReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open a dataset as a lazy record stream.
    ///
    /// Fails with [`ReportError::DatasetUnavailable`] when the file cannot
    /// be opened; decoding problems inside the file never fail, malformed
    /// lines are simply skipped.
    pub fn open(&self, dataset: Dataset) -> Result<RecordLines> {
        let path = self.dir.join(dataset.file_name());
        let file = File::open(&path).map_err(|source| ReportError::DatasetUnavailable {
            name: dataset.name().to_string(),
            source,
        })?;
        Ok(RecordLines::from_file(file))
    }

    /// Open a dataset, absorbing an unavailable file into an empty stream.
    ///
    /// This is the best-effort degradation policy: a missing export must not
    /// abort the report, it just contributes nothing.
    pub fn open_or_empty(&self, dataset: Dataset) -> RecordLines {
        match self.open(dataset) {
            Ok(records) => records,
            Err(err) => {
                debug!("dataset {} contributes no records: {}", dataset.name(), err);
                RecordLines::empty()
            }
        }
    }
}

// ── RecordLines ───────────────────────────────────────────────────────────────

/// Lazy iterator over the decoded records of one dataset file.
///
/// Skips blank lines, lines that fail to decode, and values that are not
/// JSON objects. Stops at end of file or on a read error.
#[derive(Debug)]
pub struct RecordLines {
    lines: Option<Lines<BufReader<File>>>,
}

impl RecordLines {
    fn from_file(file: File) -> Self {
        Self {
            lines: Some(BufReader::new(file).lines()),
        }
    }

    /// A stream that yields nothing.
    pub fn empty() -> Self {
        Self { lines: None }
    }
}

impl Iterator for RecordLines {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let lines = self.lines.as_mut()?;
        loop {
            let line = match lines.next() {
                Some(Ok(line)) => line,
                // Treat a mid-file read error as a truncated dataset.
                Some(Err(_)) | None => return None,
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) if value.is_object() => return Some(value),
                _ => continue,
            }
        }
    }
}
