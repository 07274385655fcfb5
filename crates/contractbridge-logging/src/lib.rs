//! contractbridge-logging - Logging setup for contractbridge tools
//!
//! This crate provides:
//! - [`LogLevel`] for selecting verbosity from flags and config files
//! - [`init_logging`] to install a `tracing-subscriber` formatter once
//! - [`report_diagnostics`] to surface non-fatal findings as log events

mod level;
mod report;
mod subscriber;

pub use level::{LogLevel, ParseLogLevelError};
pub use report::report_diagnostics;
pub use subscriber::{build_filter, init_logging};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging, report_diagnostics};
}
