//! Command implementations for the dbnorm CLI

pub mod check;
pub mod codes;
pub mod migrate;
pub mod watch;

// Re-export dispatcher functions for flat access from main.rs
pub use check::run_check;
pub use codes::run_codes;
pub use migrate::run_migrate;
pub use watch::run_watch;
