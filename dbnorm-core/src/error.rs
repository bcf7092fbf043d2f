/// Startup and lifecycle errors for dbnorm-core.
///
/// Every variant here is fatal for the process that hits it: without a
/// database handle there is nothing useful left to do. Binary crates
/// (dbnorm-cli) wrap these in `anyhow` and exit non-zero.
///
/// Errors that come back from *queries* are not represented here; they stay
/// `sqlx::Error` and are interpreted with [`crate::classify`] and
/// [`crate::detail`].
use thiserror::Error;

/// Main error type for dbnorm-core operations
#[derive(Error, Debug)]
pub enum DbError {
    /// `Database::initialize` was called after the handle already exists
    #[error("database handle already initialized for this process")]
    AlreadyInitialized,

    /// Driver identifier is not one we know how to open or classify
    #[error("unsupported database driver '{name}'")]
    UnsupportedDriver { name: String },

    /// Connection URL does not belong to the configured driver
    #[error("connection URL scheme '{scheme}' does not match driver '{driver}'")]
    DriverMismatch { driver: String, scheme: String },

    /// Driver could not construct the handle
    #[error("failed to open database: {source}")]
    Connect {
        #[source]
        source: sqlx::Error,
    },

    /// Migration collaborator reported a failure
    #[error("migration failed: {reason}")]
    Migration { reason: String },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for dbnorm-core operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Create an unsupported driver error
    pub fn unsupported_driver(name: impl Into<String>) -> Self {
        Self::UnsupportedDriver { name: name.into() }
    }

    /// Create a driver/URL mismatch error
    pub fn driver_mismatch(driver: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self::DriverMismatch {
            driver: driver.into(),
            scheme: scheme.into(),
        }
    }

    /// Create a migration error
    pub fn migration(reason: impl Into<String>) -> Self {
        Self::Migration {
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::migration(err.to_string())
    }
}
