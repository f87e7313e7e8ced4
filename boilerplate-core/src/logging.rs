use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::config::observability::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Console subscriber on stderr for use before configuration exists.
///
/// Meant for `tracing::subscriber::with_default`, so the global subscriber
/// can still be installed from the loaded config afterwards.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish()
}

/// Installs the global subscriber from the observability logging section.
/// `RUST_LOG` still takes precedence over the configured level.
pub fn init_from_config(config: &LoggingConfig) -> Result<()> {
    let level = config.tracing_level().ok_or_else(|| {
        Error::Config(format!("unsupported log level '{}'", config.level))
    })?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let installed = match config.log_format() {
        Some(LogFormat::Json) => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        Some(LogFormat::Console) | None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
    };

    installed.map_err(|err| Error::Config(format!("failed to install tracing subscriber: {err}")))
}
