//! Gradebook repository contract and SQLite key/value implementation.
//!
//! # Responsibility
//! - Store the whole gradebook as one JSON document under a fixed key.
//! - Expose `get_item`/`set_item`/`remove_item` over the `local_storage`
//!   table for callers that need raw access.
//!
//! # Invariants
//! - Document shape is `{"subjects":[{"name","notes":[{"label","grade"}]}]}`.
//! - A missing key loads as an empty gradebook.
//! - Saving replaces the whole document.

use crate::db::DbError;
use crate::model::gradebook::{Gradebook, GradebookError};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the gradebook document is stored.
pub const STORAGE_KEY: &str = "notenplan-data";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for gradebook persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored value is not a well-formed gradebook document.
    Json {
        key: String,
        source: serde_json::Error,
    },
    /// Stored document parsed but violates gradebook invariants.
    InvalidData {
        key: String,
        source: GradebookError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json { key, source } => {
                write!(f, "malformed gradebook document under `{key}`: {source}")
            }
            Self::InvalidData { key, source } => write!(
                f,
                "invalid gradebook document under `{key}`: {}",
                source.code()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save contract for the gradebook state.
pub trait GradebookRepository {
    /// Loads the persisted gradebook, or an empty one when nothing is stored.
    fn load_gradebook(&self) -> RepoResult<Gradebook>;
    /// Persists the full gradebook, replacing any previous document.
    fn save_gradebook(&self, gradebook: &Gradebook) -> RepoResult<()>;
}

/// SQLite-backed repository storing JSON under one `local_storage` key.
pub struct SqliteGradebookRepository<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteGradebookRepository<'conn> {
    /// Uses the default `STORAGE_KEY`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the raw value stored under `key`.
    pub fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Inserts or replaces the raw value stored under `key`.
    pub fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    /// Removes `key`; returns whether a value was present.
    pub fn remove_item(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

impl GradebookRepository for SqliteGradebookRepository<'_> {
    fn load_gradebook(&self) -> RepoResult<Gradebook> {
        let Some(raw) = self.get_item(&self.key)? else {
            debug!("event=gradebook_load module=repo status=empty");
            return Ok(Gradebook::new());
        };

        let gradebook: Gradebook = serde_json::from_str(&raw).map_err(|source| {
            error!(
                "event=gradebook_load module=repo status=error error_code=malformed_json line={} column={}",
                source.line(),
                source.column()
            );
            RepoError::Json {
                key: self.key.clone(),
                source,
            }
        })?;

        gradebook.validate().map_err(|source| {
            error!(
                "event=gradebook_load module=repo status=error error_code={}",
                source.code()
            );
            RepoError::InvalidData {
                key: self.key.clone(),
                source,
            }
        })?;

        debug!(
            "event=gradebook_load module=repo status=ok subjects={} notes={}",
            gradebook.len(),
            gradebook.note_count()
        );
        Ok(gradebook)
    }

    fn save_gradebook(&self, gradebook: &Gradebook) -> RepoResult<()> {
        let raw = serde_json::to_string(gradebook).map_err(|source| RepoError::Json {
            key: self.key.clone(),
            source,
        })?;
        self.set_item(&self.key, &raw)?;
        debug!(
            "event=gradebook_save module=repo status=ok subjects={} bytes={}",
            gradebook.len(),
            raw.len()
        );
        Ok(())
    }
}
