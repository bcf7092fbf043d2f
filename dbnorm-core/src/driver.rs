//! Supported database drivers and their error vocabularies
//!
//! Each driver family reports the same semantic failure with its own codes.
//! Postgres uses SQLSTATE; SQLite reports extended result codes, which sqlx
//! exposes as decimal strings. Adding a driver means adding a variant here
//! and giving it a code table; nothing else in the crate changes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::classify::ErrorKind;
use crate::error::DbError;

/// A database driver family this crate can open and classify errors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Postgres,
    Sqlite,
}

/// Postgres SQLSTATE codes.
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
const POSTGRES_CODES: &[(&str, ErrorKind)] = &[
    ("23505", ErrorKind::Duplicate),             // unique_violation
    ("40001", ErrorKind::SerializationConflict), // serialization_failure
];

/// SQLite extended result codes.
/// <https://www.sqlite.org/rescode.html>
const SQLITE_CODES: &[(&str, ErrorKind)] = &[
    ("2067", ErrorKind::Duplicate),            // SQLITE_CONSTRAINT_UNIQUE
    ("1555", ErrorKind::Duplicate),            // SQLITE_CONSTRAINT_PRIMARYKEY
    ("5", ErrorKind::SerializationConflict),   // SQLITE_BUSY
    ("517", ErrorKind::SerializationConflict), // SQLITE_BUSY_SNAPSHOT
];

impl Driver {
    pub const ALL: [Driver; 2] = [Driver::Postgres, Driver::Sqlite];

    /// Canonical identifier, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
        }
    }

    /// URL schemes sqlx routes to this driver.
    pub fn url_schemes(self) -> &'static [&'static str] {
        match self {
            Driver::Postgres => &["postgres", "postgresql"],
            Driver::Sqlite => &["sqlite"],
        }
    }

    /// Exact-match table from driver error code to universal kind.
    /// Codes not listed here classify as [`ErrorKind::Other`].
    pub fn error_codes(self) -> &'static [(&'static str, ErrorKind)] {
        match self {
            Driver::Postgres => POSTGRES_CODES,
            Driver::Sqlite => SQLITE_CODES,
        }
    }

    /// Look up a code in this driver's table.
    pub fn kind_for_code(self, code: &str) -> Option<ErrorKind> {
        self.error_codes()
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    }

    /// The driver whose scheme `url` uses, if any.
    pub fn from_url(url: &str) -> Option<Driver> {
        let scheme = url_scheme(url);
        Driver::ALL.into_iter().find(|driver| driver.accepts_scheme(scheme))
    }

    /// Fail unless `url` uses one of this driver's schemes.
    pub fn check_url(self, url: &str) -> Result<(), DbError> {
        let scheme = url_scheme(url);
        if self.accepts_scheme(scheme) {
            Ok(())
        } else {
            Err(DbError::driver_mismatch(self.name(), scheme))
        }
    }

    fn accepts_scheme(self, scheme: &str) -> bool {
        self.url_schemes()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" | "pgsql" => Ok(Driver::Postgres),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            _ => Err(DbError::unsupported_driver(s)),
        }
    }
}

/// Everything before the first ':' ("sqlite::memory:" -> "sqlite").
fn url_scheme(url: &str) -> &str {
    url.split_once(':').map(|(scheme, _)| scheme).unwrap_or(url)
}
