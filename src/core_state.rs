//! Application state shared by every HTTP handler.
//!
//! Holds only paths and facility identity. Each request opens its own
//! SQLite connection, so the state itself needs no locking.

use std::path::{Path, PathBuf};

use crate::config::{self, Facility};
use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}

#[derive(Debug, Clone)]
pub struct CoreState {
    /// SQLite file holding residents and incident reports.
    pub db_path: PathBuf,
    /// Directory generated PDFs are written to and served from.
    pub reports_dir: PathBuf,
    /// Printed in the report header.
    pub facility: Facility,
}

impl CoreState {
    /// State resolved from the environment (see [`config`]).
    pub fn new() -> Self {
        Self::with_paths(config::database_path(), config::reports_dir(), config::facility())
    }

    pub fn with_paths(db_path: PathBuf, reports_dir: PathBuf, facility: Facility) -> Self {
        Self {
            db_path,
            reports_dir,
            facility,
        }
    }

    /// Open a migrated connection to the application database.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}
