//! Delimited-text export of the computed reports.
//!
//! Output is UTF-8 with a leading byte-order mark so that spreadsheet
//! consumers display accented characters correctly.

use report_core::error::{ReportError, Result};
use report_core::models::{User, WeeklyReport};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Column order of the missing-users listing.
pub const MISSING_USERS_HEADER: [&str; 5] = ["Lastname", "Firstname", "Email", "Username", "ID"];

/// Column order of the weekly series export.
pub const WEEKLY_SERIES_HEADER: [&str; 2] = ["Week", "Still never accessed"];

/// Serialize a missing-users listing, one row per user.
pub fn missing_users_csv(users: &[User]) -> Result<Vec<u8>> {
    let mut buf = Vec::from(UTF8_BOM);
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(MISSING_USERS_HEADER).map_err(export_error)?;
        for user in users {
            let id = user.id.to_string();
            writer
                .write_record([
                    user.lastname.as_str(),
                    user.firstname.as_str(),
                    user.email.as_str(),
                    user.username.as_str(),
                    id.as_str(),
                ])
                .map_err(export_error)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Serialize the weekly series, one row per week.
pub fn weekly_series_csv(report: &WeeklyReport) -> Result<Vec<u8>> {
    let mut buf = Vec::from(UTF8_BOM);
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(WEEKLY_SERIES_HEADER).map_err(export_error)?;
        for point in &report.series {
            let count = point.never_count.to_string();
            writer
                .write_record([point.label.as_str(), count.as_str()])
                .map_err(export_error)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

fn export_error(err: csv::Error) -> ReportError {
    ReportError::Export(err.to_string())
}
