use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` uses the uppercase names accepted on the command line and is
/// mapped to a [`tracing_subscriber::EnvFilter`] directive. Falls back to
/// `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Export-snapshot discovery ──────────────────────────────────────────────────

/// Attempt to locate the export snapshot directory on the local system.
///
/// Checks the following paths in order and returns the first that is a
/// directory:
/// 1. `/var/lib/moodle-exports/`
/// 2. `~/.access-report/exports/`
///
/// Returns `None` when neither exists; callers should then require an
/// explicit `--export-dir`.
pub fn discover_export_dir() -> Option<PathBuf> {
    discover_in(PathBuf::from("/var/lib/moodle-exports"), dirs::home_dir())
}

fn discover_in(system_dir: PathBuf, home: Option<PathBuf>) -> Option<PathBuf> {
    let mut candidates = vec![system_dir];
    if let Some(home) = home {
        candidates.push(home.join(".access-report").join("exports"));
    }
    candidates.into_iter().find(|p| p.is_dir())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
