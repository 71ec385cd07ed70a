//! # Error Types
//!
//! This module defines error types used throughout the memobird-bot library.
//!
//! Errors are split by layer so callers can branch on them without string
//! matching:
//!
//! - [`MemobirdError`]: the vendor call never produced a usable reply
//!   (bad input text, network failure, malformed JSON). A reply that *was*
//!   decoded but reports failure is not an error, see
//!   [`crate::memobird::PrintResult`].
//! - [`StoreError`]: storage failures, with [`StoreError::NotFound`] as a
//!   normal control-flow branch.
//! - [`BotError`]: process-level errors (bootstrap, server).

use thiserror::Error;

/// Errors raised by the Memobird protocol client.
#[derive(Debug, Error)]
pub enum MemobirdError {
    /// The text contains a character GBK cannot represent.
    ///
    /// Raised before any network I/O.
    #[error("Cannot encode character '{character}' for printing")]
    Encoding { character: char },

    /// Connection, timeout or HTTP-level failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The vendor replied with something that is not the expected JSON.
    #[error("Malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MemobirdError {
    /// True for the pre-flight encoding failure, which is the user's input
    /// rather than a delivery problem.
    pub fn is_encoding(&self) -> bool {
        matches!(self, MemobirdError::Encoding { .. })
    }
}

/// Errors raised by the SQLite-backed directories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched the lookup.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The device identifier belongs to a verified owner.
    #[error("Device {0} is already bound")]
    DeviceTaken(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Main error type for memobird-bot operations
#[derive(Debug, Error)]
pub enum BotError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Memobird(#[from] MemobirdError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
