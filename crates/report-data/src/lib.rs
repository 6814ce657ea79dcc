//! Data layer for the access-gap report.
//!
//! Reads newline-delimited export snapshots, derives membership and
//! last-access mappings, filters the course/group catalog, and runs the
//! weekly never-accessed report engine.

pub mod builders;
pub mod catalog;
pub mod engine;
pub mod export;
pub mod reader;

pub use report_core as core;
