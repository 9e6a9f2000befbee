//! Subscriber setup for the `sortviz` binary.
//!
//! Events go to stderr so they never interleave with trace output on stdout
//! or with the interactive screen.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Filter variable, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "SORTVIZ_LOG";
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from [`LOG_ENV`], falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. `json` selects line-delimited JSON output.
pub fn init(json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|error| CliError::Logging {
        message: error.to_string(),
    })
}
