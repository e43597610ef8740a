//! Persistence for residents and incident reports.
//!
//! `sqlite` opens and migrates the database; `repository` holds the
//! queries. Both report failures as [`DatabaseError`].

pub mod sqlite;
pub mod repository;

pub use sqlite::*;
pub use repository::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Any rusqlite failure not mapped to a more specific variant.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A catalog id (place, condition, aid, injury, first aid) not in the catalog.
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    /// Missing resident name, blank narrative.
    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Cannot prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}
