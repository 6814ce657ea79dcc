mod bootstrap;

use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use report_core::request::{MissingRequest, SeriesRequest};
use report_core::settings::Settings;
use report_core::week;
use report_data::catalog::{self, CatalogQuery};
use report_data::engine::GapReportEngine;
use report_data::export;
use report_data::reader::ExportReader;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("access-report v{} starting", env!("CARGO_PKG_VERSION"));

    let export_dir = settings
        .export_dir
        .clone()
        .or_else(bootstrap::discover_export_dir)
        .context("no export snapshot directory found; pass --export-dir")?;
    tracing::debug!("reading export snapshot from {}", export_dir.display());

    let reader = ExportReader::new(&export_dir);
    let tz = week::resolve_timezone(&settings.timezone);
    let identity = settings.identity();

    let now = Utc::now().with_timezone(&tz);
    let today = now.date_naive();

    match settings.view.as_str() {
        "courses" => {
            let query = CatalogQuery {
                category_label: settings.category_label.clone(),
                search: settings.search.clone(),
                now_ts: now.timestamp(),
                current_year: now.year(),
            };
            let courses = catalog::visible_courses(&reader, &query);
            match settings.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&courses)?),
                "table" => {
                    for course in &courses {
                        println!("{:>8}  {:<24}  {}", course.id, course.shortname, course.fullname);
                    }
                }
                other => bail!("format {other:?} is not available for the courses view"),
            }
        }

        "groups" => {
            let course = settings
                .course
                .context("--course is required for the groups view")?;
            let groups = catalog::groups_for_course(&reader, course);
            match settings.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&groups)?),
                "table" => {
                    for group in &groups {
                        println!("{:>8}  {}", group.id, group.name);
                    }
                }
                other => bail!("format {other:?} is not available for the groups view"),
            }
        }

        "series" => {
            let course = settings
                .course
                .context("--course is required for the series view")?;
            let group = settings
                .group
                .context("--group is required for the series view")?;
            let request = SeriesRequest::new(course, group, settings.date_range(today))?;

            let engine = GapReportEngine::new(&reader, tz);
            let report = engine.weekly_series(&identity, &request)?;

            match settings.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                "csv" => {
                    let bytes = export::weekly_series_csv(&report)?;
                    std::io::stdout().write_all(&bytes)?;
                }
                _ => {
                    println!("Group population: {}", report.total_group);
                    for point in &report.series {
                        println!("{:<26}  {:>5}", point.label, point.never_count);
                    }
                }
            }
        }

        "missing" => {
            let course = settings
                .course
                .context("--course is required for the missing view")?;
            let group = settings
                .group
                .context("--group is required for the missing view")?;
            let end = settings
                .end
                .context("--end (week-end timestamp) is required for the missing view")?;
            let request = MissingRequest::new(course, group, end)?;

            let engine = GapReportEngine::new(&reader, tz);
            let users = engine.missing_users(&identity, &request)?;

            match settings.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&users)?),
                "csv" => {
                    let bytes = export::missing_users_csv(&users)?;
                    std::io::stdout().write_all(&bytes)?;
                }
                _ => {
                    for user in &users {
                        println!(
                            "{:<20}  {:<16}  {:<28}  {}",
                            user.lastname, user.firstname, user.email, user.username
                        );
                    }
                    println!("{} user(s) still never accessed", users.len());
                }
            }
        }

        unknown => bail!("unknown view mode: {unknown}"),
    }

    Ok(())
}
