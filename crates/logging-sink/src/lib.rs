#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` owns the delivery half of the logging workspace: the three
//! destinations a formatted log line can reach (standard output, standard
//! error, and an in-memory FIFO queue), the per-sink enable/threshold state,
//! and the one-time default-resolution policy that makes a logger safe to
//! use with zero configuration.
//!
//! # Design
//!
//! [`SinkManager`] is generic over its two stream writers so tests can
//! capture output in `Vec<u8>` buffers while production code binds the real
//! process streams via [`SinkManager::new`]. Each stream sink is a
//! [`StreamSink`], a lightweight wrapper pairing an [`std::io::Write`]
//! implementor with its filter state and a [`LineMode`] newline policy.
//! Queue entries are stored without a trailing newline so test assertions
//! compare exact message text.
//!
//! # Invariants
//!
//! - A sink receives a line iff it is enabled and the line's level passes
//!   the sink's threshold (rank comparison via [`levels::Level::passes`]).
//! - Default resolution runs at most once per manager. On the untouched
//!   path it enables stderr at `Debug` and disables the rest; once any sink
//!   has been explicitly configured, every untouched sink is disabled
//!   instead.
//! - An explicitly configured threshold is never silently altered.
//! - Dispatch order is queue, then stdout, then stderr.
//!
//! # Errors
//!
//! Stream writes surface [`std::io::Error`] from the underlying writer.
//! Queue operations cannot fail; an empty queue yields empty strings.
//!
//! # Examples
//!
//! Capture dispatched lines in memory and inspect them:
//!
//! ```
//! use levels::Level;
//! use logging_sink::{SinkKind, SinkManager};
//!
//! let mut sinks = SinkManager::with_writers(Vec::new(), Vec::new());
//! sinks.enable(SinkKind::Stdout, Level::Info);
//! sinks.resolve_defaults();
//!
//! sinks.dispatch(Level::Warn, "W/demo main(   12): ready")?;
//! sinks.dispatch(Level::Trace, "T/demo main(   13): dropped")?;
//!
//! let (out, err) = sinks.into_writers();
//! assert_eq!(String::from_utf8(out).unwrap(), "W/demo main(   12): ready\n");
//! assert!(err.is_empty());
//! # Ok::<(), std::io::Error>(())
//! ```

mod line_mode;
mod queue;
mod sink;

pub use line_mode::LineMode;
pub use queue::MessageQueue;
pub use sink::{SinkKind, SinkManager, SinkState, StreamSink};
