//! Shared database types for the metadata stores
//!
//! Both the Postgres repositories and the in-memory stores report failures
//! through `RepositoryError`, so callers never see a backend-specific error.

use thiserror::Error;

/// Metadata store error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
