//! Tracing subscriber setup for the command line front end
//!
//! Events always go to stderr so JSON results on stdout stay parseable.

use std::io;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter directive for a configured level. `verbose` forces debug.
#[must_use]
pub fn directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        config.level.clone()
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = std::env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(directive(config, verbose)),
        |env_directive| EnvFilter::new(&env_directive),
    );

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.format == "json" {
        registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_uses_configured_level() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(directive(&config, false), "warn");
    }

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig::default();
        assert_eq!(directive(&config, true), "debug");
    }
}
