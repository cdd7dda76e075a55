//! crates/logging-sink/src/sink.rs
//! Per-sink filter state, stream sink wrapper, and the sink manager.

use std::io::{self, Write};

use levels::Level;

use crate::line_mode::LineMode;
use crate::queue::MessageQueue;

/// Identifies one of the three delivery destinations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SinkKind {
    /// The process standard output stream.
    Stdout,
    /// The process standard error stream.
    Stderr,
    /// The in-memory FIFO queue.
    Queue,
}

impl SinkKind {
    /// Canonical lower-case name of the sink.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Queue => "queue",
        }
    }
}

/// Enable/threshold state of a single sink.
///
/// Both fields start as `None`, meaning "never explicitly touched"; the
/// distinction drives [`SinkManager::resolve_defaults`]. Once a threshold
/// has been recorded it is never silently altered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SinkState {
    enabled: Option<bool>,
    threshold: Option<Level>,
}

impl SinkState {
    /// Reports whether the sink was ever explicitly enabled or disabled.
    #[must_use]
    pub const fn touched(&self) -> bool {
        self.enabled.is_some()
    }

    /// Reports whether the sink is currently active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    /// The explicitly recorded threshold, if any.
    #[must_use]
    pub const fn threshold(&self) -> Option<Level> {
        self.threshold
    }

    /// Threshold used for filtering: the recorded one, or the permissive
    /// `Trace` default when none was ever set.
    #[must_use]
    pub fn effective_threshold(&self) -> Level {
        self.threshold.unwrap_or(Level::Trace)
    }

    /// Reports whether a message at `level` should be delivered to this
    /// sink.
    #[must_use]
    pub fn accepts(&self, level: Level) -> bool {
        self.is_enabled() && level.passes(self.effective_threshold())
    }

    fn enable(&mut self, level: Option<Level>) {
        self.enabled = Some(true);
        if let Some(level) = level {
            self.threshold = Some(level);
        }
    }

    fn disable(&mut self) {
        self.enabled = Some(false);
        // Record the most verbose level for a never-configured sink so a
        // later argument-free re-enable behaves permissively.
        if self.threshold.is_none() {
            self.threshold = Some(Level::Trace);
        }
    }
}

/// Stream-backed sink pairing an [`io::Write`] target with its filter state.
///
/// The wrapper owns the writer, mirroring the rest of the workspace's
/// ownership model: constructing a sink from a `Vec<u8>` and recovering it
/// with [`into_inner`](Self::into_inner) is the standard way to assert on
/// emitted output in tests.
#[derive(Clone, Debug)]
pub struct StreamSink<W> {
    writer: W,
    state: SinkState,
    line_mode: LineMode,
}

impl<W> StreamSink<W> {
    /// Creates a sink that appends a newline after each written line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer,
            state: SinkState::default(),
            line_mode,
        }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Borrows the sink's filter state.
    #[must_use]
    pub const fn state(&self) -> &SinkState {
        &self.state
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StreamSink<W> {
    /// Writes a single line, honoring the configured [`LineMode`].
    pub fn write(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Holds the three sinks and decides, per message, which of them receive
/// a formatted line.
///
/// The manager is generic over its stream writers; [`SinkManager::new`]
/// binds the real process streams while tests use
/// [`SinkManager::with_writers`] with in-memory buffers.
#[derive(Debug)]
pub struct SinkManager<O, E> {
    stdout: StreamSink<O>,
    stderr: StreamSink<E>,
    queue_state: SinkState,
    queue: MessageQueue,
    defaults_resolved: bool,
}

impl SinkManager<io::Stdout, io::Stderr> {
    /// Creates a manager bound to the process standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }
}

impl Default for SinkManager<io::Stdout, io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, E> SinkManager<O, E> {
    /// Creates a manager over caller-supplied stdout and stderr writers.
    #[must_use]
    pub fn with_writers(stdout: O, stderr: E) -> Self {
        Self {
            stdout: StreamSink::new(stdout),
            stderr: StreamSink::new(stderr),
            queue_state: SinkState::default(),
            queue: MessageQueue::new(),
            defaults_resolved: false,
        }
    }

    /// Marks a sink active. A supplied level becomes its threshold; with
    /// `None` the existing threshold is preserved (or the permissive
    /// `Trace` default applies if none was ever set).
    pub fn enable<L: Into<Option<Level>>>(&mut self, sink: SinkKind, level: L) {
        self.state_mut(sink).enable(level.into());
    }

    /// Marks a sink inactive, recording the permissive `Trace` threshold
    /// when the sink never had one.
    pub fn disable(&mut self, sink: SinkKind) {
        self.state_mut(sink).disable();
    }

    /// Applies the one-time default policy.
    ///
    /// Idempotent: only the first call has any effect. If no sink was ever
    /// explicitly touched the baseline applies (stderr enabled at `Debug`,
    /// stdout and queue disabled). Once a caller has shown intent by
    /// touching any sink, every untouched sink is explicitly disabled
    /// instead, so partial configuration never leaves surprising defaults
    /// active.
    pub fn resolve_defaults(&mut self) {
        if self.defaults_resolved {
            return;
        }
        self.defaults_resolved = true;

        let any_touched = self.stdout.state.touched()
            || self.stderr.state.touched()
            || self.queue_state.touched();

        if !any_touched {
            self.stderr.state.enable(Some(Level::Debug));
            self.stdout.state.disable();
            self.queue_state.disable();
            return;
        }

        if !self.stdout.state.touched() {
            self.stdout.state.disable();
        }
        if !self.stderr.state.touched() {
            self.stderr.state.disable();
        }
        if !self.queue_state.touched() {
            self.queue_state.disable();
        }
    }

    /// Reports whether the default policy has already been applied.
    #[must_use]
    pub const fn defaults_resolved(&self) -> bool {
        self.defaults_resolved
    }

    /// Returns a copy of a sink's filter state.
    #[must_use]
    pub fn state(&self, sink: SinkKind) -> SinkState {
        match sink {
            SinkKind::Stdout => self.stdout.state,
            SinkKind::Stderr => self.stderr.state,
            SinkKind::Queue => self.queue_state,
        }
    }

    /// Returns the head of the queue without removing it, or `""` when
    /// empty.
    #[must_use]
    pub fn peek_queue(&self) -> &str {
        self.queue.peek()
    }

    /// Removes and returns the head of the queue, or `""` when empty.
    pub fn pop_queue(&mut self) -> String {
        self.queue.pop()
    }

    /// Discards every queued line.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Number of lines currently queued.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Borrows the stdout stream sink.
    #[must_use]
    pub const fn stdout_sink(&self) -> &StreamSink<O> {
        &self.stdout
    }

    /// Mutably borrows the stdout stream sink.
    pub fn stdout_sink_mut(&mut self) -> &mut StreamSink<O> {
        &mut self.stdout
    }

    /// Borrows the stderr stream sink.
    #[must_use]
    pub const fn stderr_sink(&self) -> &StreamSink<E> {
        &self.stderr
    }

    /// Mutably borrows the stderr stream sink.
    pub fn stderr_sink_mut(&mut self) -> &mut StreamSink<E> {
        &mut self.stderr
    }

    /// Consumes the manager and returns the two stream writers.
    #[must_use]
    pub fn into_writers(self) -> (O, E) {
        (self.stdout.into_inner(), self.stderr.into_inner())
    }

    fn state_mut(&mut self, sink: SinkKind) -> &mut SinkState {
        match sink {
            SinkKind::Stdout => &mut self.stdout.state,
            SinkKind::Stderr => &mut self.stderr.state,
            SinkKind::Queue => &mut self.queue_state,
        }
    }
}

impl<O: Write, E: Write> SinkManager<O, E> {
    /// Delivers a formatted line to every sink that accepts `level`.
    ///
    /// Delivery order is queue, then stdout, then stderr. The queue stores
    /// the line as-is; stream sinks write it with their newline policy.
    pub fn dispatch(&mut self, level: Level, line: &str) -> io::Result<()> {
        if self.queue_state.accepts(level) {
            self.queue.push(line);
        }
        if self.stdout.state.accepts(level) {
            self.stdout.write(line)?;
        }
        if self.stderr.state.accepts(level) {
            self.stderr.write(line)?;
        }
        Ok(())
    }

    /// Flushes both stream writers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}
