//! Database connection utilities.

use std::path::Path;

use switchy_database::Database;
use switchy_database_connection::{Credentials, init_sqlite_rusqlite};

use crate::{DbError, ensure_schema};

/// Default location of the `SQLite` store when no connection string is set.
pub const DEFAULT_DATABASE_URL: &str = "data/noise_nab.db";

/// Opens a database from a connection string and ensures the schema exists.
///
/// `postgres://` and `postgresql://` URLs open a Postgres connection. Any
/// other value is treated as a `SQLite` file path, optionally prefixed with
/// `sqlite://`.
///
/// # Errors
///
/// Returns [`DbError`] if the connection fails or the schema cannot be
/// created.
pub async fn connect(url: &str) -> Result<Box<dyn Database>, DbError> {
    let db = if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        connect_postgres(url).await?
    } else {
        open_sqlite(Path::new(url.strip_prefix("sqlite://").unwrap_or(url)))?
    };

    ensure_schema(db.as_ref()).await?;

    Ok(db)
}

/// Creates a new database connection from the `DATABASE_URL` environment
/// variable, falling back to [`DEFAULT_DATABASE_URL`].
///
/// # Errors
///
/// Returns [`DbError`] if the connection fails.
pub async fn connect_from_env() -> Result<Box<dyn Database>, DbError> {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    connect(&url).await
}

async fn connect_postgres(url: &str) -> Result<Box<dyn Database>, DbError> {
    // Strip query parameters (e.g., ?sslmode=require) that the Credentials
    // parser doesn't understand.
    let url_base = url.split('?').next().unwrap_or(url);

    let creds = Credentials::from_url(url_base).map_err(|e| DbError::Connection(e.to_string()))?;

    log::info!("Connecting to Postgres...");
    switchy_database_connection::init_postgres_raw_native_tls(creds)
        .await
        .map_err(|e| DbError::Connection(e.to_string()))
}

fn open_sqlite(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    log::info!("Opening SQLite database at {}", path.display());
    init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Connection(e.to_string()))
}
