//! Error types for the ingestion pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a run. None of these are retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Endpoint answered with anything but 200 OK
    #[error("GET {url} returned HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// Request never produced a usable response
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local source file could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {kind} record '{record}': {reason}")]
    Decode {
        kind: &'static str,
        record: String,
        reason: String,
    },

    #[error("no planets decoded from source")]
    EmptyDataset,

    #[error("tables missing after schema creation: {}", .missing.join(", "))]
    SchemaCreation { missing: Vec<String> },

    #[error("failed to create table {table}: {source}")]
    CreateTable {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Duplicate natural key or unresolved mandatory foreign key
    #[error("constraint violation in {table} for '{key}': {detail}")]
    ConstraintViolation {
        table: &'static str,
        key: String,
        detail: String,
    },

    #[error("database connection error for {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn decode(kind: &'static str, record: impl Into<String>, reason: impl ToString) -> Self {
        Error::Decode {
            kind,
            record: record.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unresolved(table: &'static str, key: impl ToString, detail: impl Into<String>) -> Self {
        Error::ConstraintViolation {
            table,
            key: key.to_string(),
            detail: detail.into(),
        }
    }
}

/// Map an insert failure, turning SQLite constraint failures into
/// `ConstraintViolation` for the given natural key.
pub(crate) fn insert_error(table: &'static str, key: impl ToString) -> impl FnOnce(rusqlite::Error) -> Error {
    move |err| match err {
        rusqlite::Error::SqliteFailure(code, msg)
            if code.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::ConstraintViolation {
                table,
                key: key.to_string(),
                detail: msg.unwrap_or_else(|| code.to_string()),
            }
        }
        other => Error::Sqlite(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation_lists_missing_tables() {
        let err = Error::SchemaCreation {
            missing: vec!["planets".into(), "campaigns".into()],
        };
        assert_eq!(
            err.to_string(),
            "tables missing after schema creation: planets, campaigns"
        );
    }

    #[test]
    fn test_insert_error_maps_unique_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .map_err(insert_error("t", "a"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ConstraintViolation { table: "t", ref key, .. } if key == "a"
        ));
    }
}
