//! Shared application state.
//!
//! `AppState` is built once in `main.rs` and injected into every worker as
//! `web::Data<AppState>`. It holds nothing mutable itself: all bid data lives
//! in SQLite behind [`Db`], and uploaded documents live under `upload_dir`.

use crate::config::Config;
use crate::storage::Db;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Handle on the bid database.
    pub db: Db,

    /// Directory uploaded bid documents are written to. Each bid gets a
    /// subdirectory named after its id.
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(db: Db, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            upload_dir: upload_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Db::new(&config.db_path), config.upload_dir.clone())
    }

    pub fn bid_upload_dir(&self, bid_id: i64) -> PathBuf {
        self.upload_dir.join(bid_id.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_state {
    use super::AppState;
    use crate::storage::test_db;
    use tempfile::TempDir;

    /// State over a fresh database, with uploads going to the same temporary
    /// directory.
    pub fn fresh() -> (TempDir, AppState) {
        let (dir, db) = test_db::fresh();
        let upload_dir = dir.path().join("uploads");
        (dir, AppState::new(db, upload_dir))
    }
}
