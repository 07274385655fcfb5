//! Global subscriber installation

use crate::level::LogLevel;
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceCell<LogLevel> = OnceCell::new();

/// Build the filter for `level`; `RUST_LOG` takes precedence when set
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install a formatting subscriber writing to stderr
///
/// Only the first call has an effect. Returns the level that is in force,
/// which differs from `level` when logging was already initialized.
pub fn init_logging(level: LogLevel) -> LogLevel {
    *INSTALLED.get_or_init(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(build_filter(level))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        // Another subscriber may already be global
        if installed.is_err() {
            tracing::debug!("A global subscriber was already set");
        }
        level
    })
}
