//! SQLite persistence for bids, stage progress and stage form data.
//!
//! The database lives in a single file whose path comes from the
//! configuration. Each unit of work opens its own connection on a blocking
//! thread through [`Db::run`]; SQLite serializes concurrent writers and the
//! last write wins.
//!
//! Tables:
//! - `gem_bids`: one row per bid. List-valued columns hold JSON arrays.
//! - `stage_progress`: one row per (bid, stage) that has been touched.
//! - `stage_data`: the JSON form values saved for a (bid, stage).

pub mod bids;
pub mod stages;

use crate::error::ApiError;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS gem_bids (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    bid_no          TEXT    NOT NULL DEFAULT '',
    title           TEXT    NOT NULL,
    description     TEXT    NOT NULL,
    organization    TEXT    NOT NULL,
    category        TEXT    NOT NULL,
    estimated_value REAL    NOT NULL,
    deadline        TEXT    NOT NULL,
    status          TEXT    NOT NULL,
    location        TEXT    NOT NULL,
    requirements    TEXT    NOT NULL DEFAULT '[]',
    documents       TEXT    NOT NULL DEFAULT '[]',
    priority        TEXT    NOT NULL,
    tags            TEXT    NOT NULL DEFAULT '[]',
    current_stage   INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT    NOT NULL
);
CREATE TABLE IF NOT EXISTS stage_progress (
    bid_id       INTEGER NOT NULL,
    stage_number INTEGER NOT NULL,
    status       TEXT    NOT NULL,
    started_at   TEXT,
    completed_at TEXT,
    notes        TEXT,
    assigned_to  INTEGER,
    checklist    TEXT    NOT NULL DEFAULT '{}',
    PRIMARY KEY (bid_id, stage_number)
);
CREATE TABLE IF NOT EXISTS stage_data (
    bid_id       INTEGER NOT NULL,
    stage_number INTEGER NOT NULL,
    data         TEXT    NOT NULL,
    updated_at   TEXT    NOT NULL,
    PRIMARY KEY (bid_id, stage_number)
);
";

/// Handle on the database file. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Db {
    path: Arc<PathBuf>,
}

impl Db {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
        }
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(self.path.as_path())?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Creates missing tables.
    pub fn init(&self) -> Result<(), ApiError> {
        self.connect()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Runs `work` against a fresh connection on the blocking thread pool.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.connect()?;
            work(&mut conn)
        })
        .await?
    }
}

/// Text form of a unit-variant enum, as its serde name (`in_progress`).
pub(crate) fn enum_text<T: Serialize>(value: &T) -> Result<String, ApiError> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(text) => Ok(text),
        other => Err(ApiError::Internal(format!("not a unit enum: {}", other))),
    }
}

fn conversion_error(idx: usize, err: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Reads a column written by [`enum_text`].
pub(crate) fn enum_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_value(serde_json::Value::String(text)).map_err(|e| conversion_error(idx, e))
}

/// Reads a column holding a JSON document.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_error(idx, e))
}


#[cfg(test)]
mod tests {
    use super::*;
    use common::model::progress::StageStatus;

    #[test]
    fn enums_round_trip_through_text() {
        let text = enum_text(&StageStatus::InProgress).unwrap();
        assert_eq!(text, "in_progress");

        let (_dir, db) = test_db::fresh();
        let conn = db.connect().unwrap();
        let status: StageStatus = conn
            .query_row("SELECT ?1", [&text], |row| enum_column(row, 0))
            .unwrap();
        assert_eq!(status, StageStatus::InProgress);
    }

    #[test]
    fn init_is_idempotent() {
        let (_dir, db) = test_db::fresh();
        db.init().unwrap();
    }
}
