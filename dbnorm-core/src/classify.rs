//! Driver error classification
//!
//! sqlx hands back one opaque `sqlx::Error` for every failure. Application
//! code usually needs only one question answered: *why* did it fail, in
//! terms that survive swapping the database underneath. [`classify`] answers
//! that with an [`ErrorKind`], using the exact-match code table of the
//! [`Driver`] in use.

use serde::Serialize;
use thiserror::Error;

use crate::driver::Driver;

/// Universal, driver-agnostic cause of a failed database operation.
///
/// Implements `std::error::Error` so callers can return it directly
/// after classifying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// A uniqueness constraint was violated
    #[error("duplicate entry")]
    Duplicate,

    /// The transaction could not be serialized against concurrent ones;
    /// retrying it may succeed
    #[error("serialization conflict")]
    SerializationConflict,

    /// Recognized database error with no more specific mapping
    #[error("database error")]
    Other,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::SerializationConflict => "serialization_conflict",
            ErrorKind::Other => "other",
        }
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// There was no error to classify
    NoError,
    /// A database error, mapped to a universal kind
    Kind(ErrorKind),
    /// Not a database error (I/O, pool timeout, decode, ...). The original
    /// error is handed back untouched; treat it as opaque.
    Unclassified(&'a sqlx::Error),
}

impl<'a> Classification<'a> {
    /// The universal kind, if the error was recognized.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Classification::Kind(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == Some(ErrorKind::Duplicate)
    }

    pub fn is_serialization_conflict(&self) -> bool {
        self.kind() == Some(ErrorKind::SerializationConflict)
    }
}

/// Map a driver error to its universal kind.
///
/// - `None` gives [`Classification::NoError`].
/// - Anything other than `sqlx::Error::Database` is passed through as
///   [`Classification::Unclassified`].
/// - Database errors are looked up by code in `driver`'s table; unknown or
///   missing codes give [`ErrorKind::Other`].
pub fn classify(driver: Driver, err: Option<&sqlx::Error>) -> Classification<'_> {
    let Some(err) = err else {
        return Classification::NoError;
    };

    let Some(db_err) = err.as_database_error() else {
        return Classification::Unclassified(err);
    };

    let kind = db_err
        .code()
        .and_then(|code| driver.kind_for_code(&code))
        .unwrap_or(ErrorKind::Other);

    Classification::Kind(kind)
}
