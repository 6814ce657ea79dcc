use chrono::{Duration, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

use crate::models::Identity;
use crate::request::DateRange;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Weekly never-accessed reporting over LMS export snapshots
#[derive(Parser, Debug, Clone)]
#[command(
    name = "access-report",
    about = "Weekly never-accessed reporting over LMS export snapshots",
    version
)]
pub struct Settings {
    /// Report view to run
    #[arg(long, default_value = "series", value_parser = ["courses", "groups", "series", "missing"])]
    pub view: String,

    /// Export snapshot directory (auto-discovered if not specified)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Course identifier
    #[arg(long)]
    pub course: Option<i64>,

    /// Group identifier
    #[arg(long)]
    pub group: Option<i64>,

    /// Range start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Range end date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Week-end Unix timestamp for the missing-users view
    #[arg(long)]
    pub end: Option<i64>,

    /// Case-insensitive course shortname filter
    #[arg(long)]
    pub search: Option<String>,

    /// Name of the root category subtree shown in the catalog
    #[arg(long, default_value = "Grado")]
    pub category_label: String,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "csv", "json"])]
    pub format: String,

    /// Report timezone (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Operator username recorded with each run
    #[arg(long)]
    pub user: Option<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

impl Settings {
    /// The requested date range, defaulting to the trailing 30 days ending
    /// today when no bounds were given.
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        let to = self.to.unwrap_or(today);
        let from = self.from.unwrap_or(to - Duration::days(30));
        DateRange::new(from, to)
    }

    /// Resolve the operator identity from `--user` or the `USER` environment
    /// variable. Without either, the run is unauthenticated and the engine
    /// will refuse it.
    pub fn identity(&self) -> Identity {
        match self
            .user
            .clone()
            .or_else(|| std::env::var("USER").ok())
        {
            Some(name) if !name.is_empty() => Identity::authenticated(name),
            _ => Identity::anonymous(),
        }
    }
}
