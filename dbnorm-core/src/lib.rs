//! dbnorm-core: one shared database handle, kept alive, with driver errors
//! translated into a small universal vocabulary.

pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod database;
pub mod detail;
pub mod driver;
pub mod error;
pub mod health;
pub mod migrate;

#[cfg(test)]
mod test_support;

pub use bootstrap::bootstrap;
pub use classify::{classify, Classification, ErrorKind};
pub use config::DbConfig;
pub use database::Database;
pub use detail::{duplicate_key_name, message, ContractViolation};
pub use driver::Driver;
pub use error::{DbError, Result};
pub use health::{HealthCheck, HealthReport, HealthSink, HealthStatus, Probe, TracingSink};
pub use migrate::{DirMigrations, Migrate, NoMigrations};
