//! Repository Module
//!
//! Module-level CRUD functions over the SQLite pool, one module per table.
//! Occupancy and reservation statuses are read here but written only by the
//! booking lifecycle.

pub mod customer;
pub mod reservation;
pub mod room;
pub mod transaction;
pub mod user;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // SQLite constraint failures carry their kind in the message only
        let msg = err.to_string();
        let lowered = msg.to_lowercase();
        if lowered.contains("unique constraint") {
            RepoError::Duplicate(msg)
        } else if lowered.contains("foreign key constraint") {
            RepoError::Conflict(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
