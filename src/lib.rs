//! # relmap - relational mapping demo over SQLite
//!
//! Two related record kinds, authors and their articles, stored in a single
//! SQLite file. The crate shows three ways of reading a one-to-many
//! relationship:
//! - explicit joins returning flat (author, article) pairs
//! - eager loading with one joined fetch
//! - lazy loading with one extra fetch per author on first access

pub mod model;
pub mod seed;
pub mod storage;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Article, Author, AuthorWithArticles};
pub use seed::{SeedArticle, SeedAuthor};
pub use storage::{LazyAuthor, RecordStore, Session, StoreStats};

use rusqlite::{ErrorCode, ffi};

/// Result type alias for relmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for relmap operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Storage error: {0}")]
    Storage(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        let codes = match &err {
            rusqlite::Error::SqliteFailure(failure, _) => Some((failure.code, failure.extended_code)),
            _ => None,
        };

        match codes {
            Some((ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_FOREIGNKEY)) => {
                Error::ReferentialIntegrity(err.to_string())
            }
            Some((ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_CHECK)) => {
                Error::InvalidRecord(err.to_string())
            }
            Some((
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure,
                _,
            )) => Error::StorageUnavailable(err.to_string()),
            _ => Error::Storage(err),
        }
    }
}
