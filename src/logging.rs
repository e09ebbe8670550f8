//! Tracing subscriber setup.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use folio_config::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .or_raise(|| ErrorKind::Logging(format!("invalid log filter {:?}", config.filter)))?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    // The subscriber error is a boxed trait object, so only its message survives.
    installed.map_err(|err| exn::Exn::from(ErrorKind::Logging(err.to_string())))
}
