//! Diagnostic detail from driver errors
//!
//! Classification says *whether* an insert hit a duplicate; these helpers say
//! *which* constraint and what the database said about it. They assume the
//! caller already knows it holds a database error. Handing them anything else
//! is a [`ContractViolation`], kept apart from operational errors so the two
//! never get mixed up.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::driver::Driver;

/// SQLite reports no constraint name, only the offending columns.
static SQLITE_UNIQUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:UNIQUE|PRIMARY KEY) constraint failed: (.+)$").expect("valid regex")
});

/// A detail helper was called on an error it cannot describe.
#[derive(Error, Debug)]
pub enum ContractViolation {
    #[error("not a database error: {0}")]
    Unrecognized(String),

    #[error("database error does not name a violated constraint: {message}")]
    NoConstraint { message: String },
}

/// The driver's human-readable message.
///
/// Returns `""` when there is no error and
/// [`ContractViolation::Unrecognized`] when `err` is not a database error.
pub fn message(err: Option<&sqlx::Error>) -> Result<&str, ContractViolation> {
    let Some(err) = err else {
        return Ok("");
    };

    err.as_database_error()
        .map(|db_err| db_err.message())
        .ok_or_else(|| ContractViolation::Unrecognized(err.to_string()))
}

/// Name of the uniqueness constraint a duplicate violated.
///
/// Only meaningful once [`crate::classify`] has returned
/// [`crate::ErrorKind::Duplicate`] for the same error.
pub fn duplicate_key_name(driver: Driver, err: &sqlx::Error) -> Result<String, ContractViolation> {
    let db_err = err
        .as_database_error()
        .ok_or_else(|| ContractViolation::Unrecognized(err.to_string()))?;

    let name = match driver {
        Driver::Postgres => db_err.constraint().map(str::to_owned),
        Driver::Sqlite => db_err.constraint().map(str::to_owned).or_else(|| {
            SQLITE_UNIQUE
                .captures(db_err.message())
                .map(|caps| caps[1].to_owned())
        }),
    };

    name.ok_or_else(|| ContractViolation::NoConstraint {
        message: db_err.message().to_owned(),
    })
}
