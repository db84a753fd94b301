//! Tracing subscriber configuration.

use crewkit_core::config::LoggingConfig;
use crewkit_core::{Error, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Configure stdout/stderr logging.
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn configure_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.filter))
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", config.filter, e)))?;

    // Logs go to stderr so the assembly report on stdout stays machine-readable
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(())
}
