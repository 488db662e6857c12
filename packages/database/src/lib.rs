#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, schema, and queries for noise reports.
//!
//! Uses `switchy_database` so the same queries run against a local `SQLite`
//! file or a remote Postgres instance. Handlers depend on the
//! [`ReportStore`] trait rather than on a concrete connection.

pub mod db;
pub mod queries;

use async_trait::async_trait;
use noise_nab_database_models::{NewNoiseReport, NoiseReportRow};
use switchy_database::Database;

pub use queries::DatabaseReportStore;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The connection could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Append-only storage for noise reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Inserts one report and returns its generated ID.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the insert fails. Nothing is stored in that
    /// case.
    async fn insert_report(&self, report: &NewNoiseReport) -> Result<String, DbError>;

    /// Lists stored reports, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails or a row cannot be decoded.
    async fn list_reports(&self, limit: u32, offset: u32) -> Result<Vec<NoiseReportRow>, DbError>;

    /// Returns the number of stored reports.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    async fn count_reports(&self) -> Result<u64, DbError>;
}

/// Creates the `noise_reports` table if it doesn't already exist.
///
/// The DDL sticks to types understood by both `SQLite` and Postgres.
///
/// # Errors
///
/// Returns [`DbError`] if the DDL fails.
pub async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS noise_reports (
            id              TEXT PRIMARY KEY,
            city            TEXT NOT NULL,
            place           TEXT NOT NULL,
            noise_level_db  DOUBLE PRECISION NOT NULL,
            category        TEXT NOT NULL,
            created_at      TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_noise_reports_created
         ON noise_reports (created_at)",
    )
    .await?;

    log::debug!("noise_reports schema ready");
    Ok(())
}
