//! Logging Module
//!
//! Installs the global tracing subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogLevel;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(level: LogLevel) -> String {
    format!("lru_cache_server={0},tower_http={0}", level)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when present.
pub fn init(level: LogLevel) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
