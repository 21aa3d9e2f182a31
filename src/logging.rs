//! Tracing initialization.

use std::fs::File;
use std::path::Path;
use std::sync::{Mutex, Once};

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the default filter directives.
pub const LOG_ENV: &str = "CODEBROWSER_LOG";

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Build the event filter: an explicit level wins over `CODEBROWSER_LOG`,
/// which wins over `info`.
pub fn filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {:?}", level)),
        None => Ok(EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global subscriber. Events go to stderr, or to `log_file`
/// without colours when given.
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init(level: Option<&str>, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = filter(level)?;
    let file = match log_file {
        Some(path) => Some(
            File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?,
        ),
        None => None,
    };

    INIT.call_once(|| {
        let result = match file {
            Some(file) => tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init(),
            None => tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .with(filter)
                .try_init(),
        };
        if let Err(e) = result {
            eprintln!("Warning: logging already initialized: {}", e);
        }
    });

    Ok(())
}
