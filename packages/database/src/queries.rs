//! Noise report queries.
//!
//! All statements go through `query_raw_params()` / `exec_raw_params()`
//! with positional parameters, which both backends accept.

use std::sync::Arc;

use async_trait::async_trait;
use moosicbox_json_utils::database::ToValue as _;
use noise_nab_database_models::{NewNoiseReport, NoiseReportRow};
use switchy_database::{Database, DatabaseValue};

use crate::{DbError, ReportStore};

/// Inserts a single noise report.
///
/// Every call creates a new row with a fresh UUID, so identical reports
/// submitted twice are stored twice.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails.
pub async fn insert_report(db: &dyn Database, report: &NewNoiseReport) -> Result<String, DbError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    db.exec_raw_params(
        "INSERT INTO noise_reports (id, city, place, noise_level_db, category, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
        &[
            DatabaseValue::String(id.clone()),
            DatabaseValue::String(report.city.clone()),
            DatabaseValue::String(report.place.clone()),
            DatabaseValue::Real64(report.noise_level_db),
            DatabaseValue::String(report.category.clone()),
            DatabaseValue::String(now),
        ],
    )
    .await?;

    Ok(id)
}

/// Lists noise reports in insertion order.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row is missing a column.
pub async fn list_reports(
    db: &dyn Database,
    limit: u32,
    offset: u32,
) -> Result<Vec<NoiseReportRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, city, place, noise_level_db, category, created_at
             FROM noise_reports
             ORDER BY created_at, id
             LIMIT $1 OFFSET $2",
            &[
                DatabaseValue::Int32(i32::try_from(limit).unwrap_or(i32::MAX)),
                DatabaseValue::Int32(i32::try_from(offset).unwrap_or(0)),
            ],
        )
        .await?;

    let mut reports = Vec::with_capacity(rows.len());
    for row in &rows {
        reports.push(NoiseReportRow {
            id: row.to_value("id").map_err(decode_error)?,
            city: row.to_value("city").map_err(decode_error)?,
            place: row.to_value("place").map_err(decode_error)?,
            noise_level_db: row.to_value("noise_level_db").map_err(decode_error)?,
            category: row.to_value("category").map_err(decode_error)?,
            created_at: row.to_value("created_at").map_err(decode_error)?,
        });
    }

    Ok(reports)
}

fn decode_error(e: impl std::fmt::Display) -> DbError {
    DbError::Conversion {
        message: format!("Failed to decode noise report row: {e}"),
    }
}

/// Returns the total number of stored noise reports.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or the count cannot be decoded.
pub async fn count_reports(db: &dyn Database) -> Result<u64, DbError> {
    let rows = db
        .query_raw_params("SELECT COUNT(*) as cnt FROM noise_reports", &[])
        .await?;

    let Some(row) = rows.first() else {
        return Ok(0);
    };
    let count = row.to_value::<i64>("cnt").map_err(decode_error)?;

    u64::try_from(count).map_err(decode_error)
}

/// [`ReportStore`] backed by a `switchy_database` connection.
#[derive(Clone)]
pub struct DatabaseReportStore {
    db: Arc<dyn Database>,
}

impl DatabaseReportStore {
    /// Wraps an open connection.
    #[must_use]
    pub fn new(db: Box<dyn Database>) -> Self {
        Self { db: Arc::from(db) }
    }
}

#[async_trait]
impl ReportStore for DatabaseReportStore {
    async fn insert_report(&self, report: &NewNoiseReport) -> Result<String, DbError> {
        insert_report(self.db.as_ref(), report).await
    }

    async fn list_reports(&self, limit: u32, offset: u32) -> Result<Vec<NoiseReportRow>, DbError> {
        list_reports(self.db.as_ref(), limit, offset).await
    }

    async fn count_reports(&self) -> Result<u64, DbError> {
        count_reports(self.db.as_ref()).await
    }
}
