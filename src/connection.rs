//! Optional live database connection
//!
//! A few linters (`table-empty`, `table-sql`, `catalog-sql`) run a query
//! and look at the first column of the first row. Everything else works on
//! the catalog alone.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlError {
    #[error("query failed: {0}")]
    Query(String),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Read-only query access to the crawled database.
pub trait Connection {
    /// First column of the first row as text. `Ok(None)` when the query
    /// returns no rows or a SQL NULL.
    fn query_scalar(&self, sql: &str) -> Result<Option<String>, SqlError>;
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnection;

#[cfg(feature = "sqlite")]
mod sqlite {
    use std::path::Path;

    use rusqlite::OptionalExtension;
    use rusqlite::types::ValueRef;
    use tracing::debug;

    use super::{Connection, SqlError};

    pub struct SqliteConnection {
        conn: rusqlite::Connection,
    }

    impl SqliteConnection {
        pub fn open(path: &Path) -> Result<Self, SqlError> {
            let conn = rusqlite::Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
            )?;
            Ok(Self { conn })
        }

        pub fn open_in_memory() -> Result<Self, SqlError> {
            Ok(Self {
                conn: rusqlite::Connection::open_in_memory()?,
            })
        }

        /// Run setup statements. Only meaningful on writable connections.
        pub fn execute_batch(&self, sql: &str) -> Result<(), SqlError> {
            self.conn.execute_batch(sql)?;
            Ok(())
        }
    }

    impl Connection for SqliteConnection {
        fn query_scalar(&self, sql: &str) -> Result<Option<String>, SqlError> {
            debug!(sql, "executing scalar query");
            let value = self
                .conn
                .query_row(sql, [], |row| Ok(value_text(row.get_ref(0)?)))
                .optional()?;
            Ok(value.flatten())
        }
    }

    fn value_text(value: ValueRef<'_>) -> Option<String> {
        match value {
            ValueRef::Null => None,
            ValueRef::Integer(n) => Some(n.to_string()),
            ValueRef::Real(f) => Some(f.to_string()),
            ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
        }
    }

}
