//! Hand-built driver errors for unit tests.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use sqlx::error::{DatabaseError, ErrorKind as SqlxErrorKind};

#[derive(Debug)]
pub(crate) struct FakeDbError {
    pub code: Option<&'static str>,
    pub message: &'static str,
    pub constraint: Option<&'static str>,
}

impl fmt::Display for FakeDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl StdError for FakeDbError {}

impl DatabaseError for FakeDbError {
    fn message(&self) -> &str {
        self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        self.code.map(Cow::Borrowed)
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        self.constraint
    }

    fn kind(&self) -> SqlxErrorKind {
        SqlxErrorKind::Other
    }
}

/// `sqlx::Error::Database` carrying the given fields.
pub(crate) fn db_error(
    code: Option<&'static str>,
    message: &'static str,
    constraint: Option<&'static str>,
) -> sqlx::Error {
    sqlx::Error::Database(Box::new(FakeDbError {
        code,
        message,
        constraint,
    }))
}
