//! Diagnostic logging to stderr, sized by `-v` / `-q`.

use crate::Result;
use crate::error::MongoSchemaError;

/// Maps the CLI verbosity flags to a maximum log level.
///
/// `quiet` wins over any `-v` count.
pub const fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Installs the global stderr subscriber at [`level_for`]`(verbose, quiet)`.
///
/// stdout is left to the banner and the `Success.` line. Fails if a global
/// subscriber is already set.
///
/// # Example
/// ```rust,no_run
/// use mongoschema_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| MongoSchemaError::configuration(format!("cannot install logger: {}", e)))
}
