//! crates/logging/src/macros.rs
//! Level-named convenience macros over [`Logger::log`](crate::Logger::log).
//!
//! Each macro takes a logger expression followed by any number of
//! arguments, each convertible into [`LogValue`](crate::LogValue), and
//! expands to the corresponding [`Logger::log`](crate::Logger::log) call.
//! The expansion returns the call's `Result`, so misuse stays visible at
//! the call site.

/// Logs at `Fatal` severity.
///
/// # Example
/// ```
/// use logging::{log_fatal, Level, Logger};
///
/// let mut log = Logger::with_writers(Vec::new(), Vec::new());
/// log.enable_queue(Level::Trace);
/// log_fatal!(log, "giving up after", 3, "attempts")?;
/// assert!(log.pop_queue().contains("giving up after, 3, attempts"));
/// # Ok::<(), logging::LogError>(())
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Fatal, &[$($crate::LogValue::from($arg)),*])
    };
}

/// Logs at `Error` severity.
#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Error, &[$($crate::LogValue::from($arg)),*])
    };
}

/// Logs at `Warn` severity.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Warn, &[$($crate::LogValue::from($arg)),*])
    };
}

/// Logs at `Info` severity.
#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Info, &[$($crate::LogValue::from($arg)),*])
    };
}

/// Logs at `Debug` severity.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Debug, &[$($crate::LogValue::from($arg)),*])
    };
}

/// Logs at `Trace` severity.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($crate::Level::Trace, &[$($crate::LogValue::from($arg)),*])
    };
}
