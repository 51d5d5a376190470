//! Logging setup for the `pxdb` binary.
//!
//! Log lines go to stderr in the compact format, and are also appended to a
//! file when one is configured. `RUST_LOG` wins over the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::PxError;

/// Install the global tracing subscriber.
///
/// `level` is an `EnvFilter` directive used when `RUST_LOG` is unset. When
/// `file` is given it is opened for appending (and created if missing)
/// before anything is installed, so a bad path is reported as an error.
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(level: &str, file: Option<&Path>) -> Result<(), PxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| PxError::Argument(format!("Invalid log level '{}': {}", level, e)))?;

    let file_layer = match file {
        Some(path) => {
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    PxError::Io(format!("Cannot open log file {}: {}", path.display(), e))
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(f))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
