//! Errors raised by the stats store.

use derive_more::{Display, Error};

/// Which part of the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Bad arguments, rejected before touching the database.
    #[display("invalid input")]
    InvalidInput,
    /// The database file could not be opened.
    #[display("connection")]
    Connection,
    /// Applying the embedded schema migrations failed.
    #[display("migration")]
    Migration,
    /// A query or insert failed, including constraint violations.
    #[display("query")]
    Query,
    /// A stored value could not be interpreted.
    #[display("invalid data")]
    InvalidData,
}

/// Stats store error with the kind of failure and the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// What failed.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error of `kind`, recording the caller's location.
    #[track_caller]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// A migration failure.
    #[track_caller]
    pub fn migration(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Migration, message)
    }

    /// A stored or submitted value the store cannot use.
    #[track_caller]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::InvalidData, message)
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}
