// crates/aegis-dataset-cli/src/telemetry.rs
// ============================================================================
// Module: Telemetry
// Description: Global tracing subscriber initialization.
// Purpose: Route structured logs to stderr so stdout stays machine-readable.
// Dependencies: tracing, tracing-subscriber
// ============================================================================

//! Call [`init_tracing`] once at program start. `RUST_LOG` wins when set;
//! otherwise the level is `info`, or `debug` with `--verbose`.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

/// Returns the default level for the verbosity flag.
#[must_use]
pub const fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat, verbose: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose).as_str()));
    let layer = fmt::layer().with_target(false).with_writer(io::stderr);
    match format {
        LogFormat::Text => tracing_subscriber::registry().with(env_filter).with(layer).try_init(),
        LogFormat::Json => {
            tracing_subscriber::registry().with(env_filter).with(layer.json()).try_init()
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::default_level;

    #[test]
    fn verbose_lowers_the_default_level() {
        assert_eq!(default_level(false), Level::INFO);
        assert_eq!(default_level(true), Level::DEBUG);
    }
}
