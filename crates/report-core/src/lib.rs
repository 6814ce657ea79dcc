//! Core types for the access-gap reporting pipeline.
//!
//! Holds the error taxonomy, the entity models read from export snapshots,
//! permissive record field extraction, request validation, week arithmetic
//! and the CLI settings.

pub mod error;
pub mod models;
pub mod record;
pub mod request;
pub mod settings;
pub mod week;

pub use error::{ReportError, Result};
