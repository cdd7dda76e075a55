//! crates/logging/src/logger.rs
//! The level-named logging facade and its owned configuration state.

use std::io::{self, Write};

use levels::Level;
use logging_sink::{SinkKind, SinkManager, SinkState};

use crate::callsite;
use crate::error::LogError;
use crate::text;
use crate::value::{self, IntoArguments, LogValue};

/// Default minimum width of the `file function` prefix field.
const DEFAULT_FILE_FUNCTION_PAD: usize = 30;

/// Default minimum width of the line-number prefix field.
const DEFAULT_LINE_PAD: usize = 5;

/// A leveled logger owning its sinks, queue, and padding configuration.
///
/// There is no global instance: callers construct a `Logger`, own it, and
/// pass it where logging is needed. All methods take `&mut self`; sharing a
/// logger across threads requires an external mutex around it.
///
/// The logger is safe to use with zero configuration — the first log call
/// applies the baseline defaults (stderr at `Debug`, everything else off).
/// Once any sink has been configured explicitly, untouched sinks are
/// disabled instead; see [`SinkManager::resolve_defaults`].
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger};
///
/// let mut log = Logger::with_writers(Vec::new(), Vec::new());
/// log.enable_queue(Level::Debug);
///
/// log.info("ready")?;
///
/// let line = log.pop_queue();
/// assert!(line.starts_with("I/"));
/// assert!(line.ends_with("): ready"));
/// # Ok::<(), logging::LogError>(())
/// ```
#[derive(Debug)]
pub struct Logger<O = io::Stdout, E = io::Stderr> {
    sinks: SinkManager<O, E>,
    file_function_pad: usize,
    line_pad: usize,
}

impl Logger<io::Stdout, io::Stderr> {
    /// Creates a logger bound to the process standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }
}

impl Default for Logger<io::Stdout, io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, E> Logger<O, E> {
    /// Creates a logger over caller-supplied stdout and stderr writers.
    #[must_use]
    pub fn with_writers(stdout: O, stderr: E) -> Self {
        Self {
            sinks: SinkManager::with_writers(stdout, stderr),
            file_function_pad: DEFAULT_FILE_FUNCTION_PAD,
            line_pad: DEFAULT_LINE_PAD,
        }
    }

    /// Enables the stdout sink, optionally setting its threshold.
    pub fn enable_stdout<L: Into<Option<Level>>>(&mut self, level: L) {
        self.sinks.enable(SinkKind::Stdout, level);
    }

    /// Disables the stdout sink.
    pub fn disable_stdout(&mut self) {
        self.sinks.disable(SinkKind::Stdout);
    }

    /// Enables the stderr sink, optionally setting its threshold.
    pub fn enable_stderr<L: Into<Option<Level>>>(&mut self, level: L) {
        self.sinks.enable(SinkKind::Stderr, level);
    }

    /// Disables the stderr sink.
    pub fn disable_stderr(&mut self) {
        self.sinks.disable(SinkKind::Stderr);
    }

    /// Enables the queue sink, optionally setting its threshold.
    pub fn enable_queue<L: Into<Option<Level>>>(&mut self, level: L) {
        self.sinks.enable(SinkKind::Queue, level);
    }

    /// Disables the queue sink.
    pub fn disable_queue(&mut self) {
        self.sinks.disable(SinkKind::Queue);
    }

    /// Applies the one-time default policy now instead of at the first log
    /// call. Idempotent.
    pub fn resolve_defaults(&mut self) {
        self.sinks.resolve_defaults();
    }

    /// Returns a copy of a sink's filter state.
    #[must_use]
    pub fn sink_state(&self, sink: SinkKind) -> SinkState {
        self.sinks.state(sink)
    }

    /// Sets the minimum widths of the `file function` and line-number
    /// prefix fields. Affects only subsequent log lines; widths are
    /// minimums and never truncate.
    pub fn set_padding(&mut self, file_function: usize, line: usize) {
        self.file_function_pad = file_function;
        self.line_pad = line;
    }

    /// Current `(file function, line)` padding widths.
    #[must_use]
    pub const fn padding(&self) -> (usize, usize) {
        (self.file_function_pad, self.line_pad)
    }

    /// Returns the head of the queue without removing it, or `""` when
    /// empty.
    #[must_use]
    pub fn peek_queue(&self) -> &str {
        self.sinks.peek_queue()
    }

    /// Removes and returns the head of the queue, or `""` when empty.
    pub fn pop_queue(&mut self) -> String {
        self.sinks.pop_queue()
    }

    /// Discards every queued line.
    pub fn clear_queue(&mut self) {
        self.sinks.clear_queue()
    }

    /// Number of lines currently queued.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.sinks.queue_len()
    }

    /// Borrows the underlying sink manager.
    #[must_use]
    pub const fn sinks(&self) -> &SinkManager<O, E> {
        &self.sinks
    }

    /// Consumes the logger and returns the two stream writers.
    #[must_use]
    pub fn into_writers(self) -> (O, E) {
        self.sinks.into_writers()
    }
}

impl<O: Write, E: Write> Logger<O, E> {
    /// Logs at `Fatal` severity.
    pub fn fatal<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Fatal, &args.into_arguments())
    }

    /// Logs at `Error` severity.
    pub fn error<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Error, &args.into_arguments())
    }

    /// Logs at `Warn` severity.
    pub fn warn<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Warn, &args.into_arguments())
    }

    /// Logs at `Info` severity.
    pub fn info<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Info, &args.into_arguments())
    }

    /// Logs at `Debug` severity.
    pub fn debug<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Debug, &args.into_arguments())
    }

    /// Logs at `Trace` severity.
    pub fn trace<A: IntoArguments>(&mut self, args: A) -> Result<(), LogError> {
        self.log(Level::Trace, &args.into_arguments())
    }

    /// Shared implementation behind the six level entry points.
    ///
    /// Resolves defaults if this is the first call, renders and joins the
    /// arguments, resolves the caller's location, composes the line as
    /// `"<initial>/<file function>(<line>): <body>"`, and dispatches it to
    /// every sink whose threshold accepts `level`.
    pub fn log(&mut self, level: Level, args: &[LogValue]) -> Result<(), LogError> {
        self.sinks.resolve_defaults();

        let body = value::render_arguments(args)?;
        let site = match callsite::resolve() {
            Ok(site) => site,
            Err(error) => {
                // A resolver that cannot locate its own caller is a defect
                // in this library's environment assumptions; report it on
                // the emergency channel and propagate.
                let _ = writeln!(io::stderr(), "logging: {error}");
                return Err(error.into());
            }
        };

        let file_function =
            text::pad_right(&site.file_function(), ' ', self.file_function_pad);
        let line_field = text::pad_left(&site.line.to_string(), ' ', self.line_pad);
        let line = format!(
            "{}/{}({}): {}",
            level.initial(),
            file_function,
            line_field,
            body
        );

        self.sinks.dispatch(level, &line)?;
        Ok(())
    }

    /// Flushes both stream writers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sinks.flush()
    }
}
