//! Logging for the dbnorm CLI
//!
//! `RUST_LOG` wins when set. Otherwise `--debug` opens up dbnorm's own
//! targets while keeping sqlx's per-statement logging quiet; health reports
//! ("DB ok" / "DB not ok") are at info and show either way.
//!
//! Output goes to stderr so `--json` on stdout stays parseable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
}

/// Filter used when `RUST_LOG` is not set.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,dbnorm=debug,dbnorm_core=debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    }
}

pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_targets_only_this_crate() {
        let quiet = default_directives(false);
        let debug = default_directives(true);

        assert!(!quiet.contains("debug"));
        assert!(debug.contains("dbnorm_core=debug"));
        assert!(debug.contains("sqlx=warn"));
        assert!(EnvFilter::try_new(debug).is_ok());
        assert!(EnvFilter::try_new(quiet).is_ok());
    }
}
