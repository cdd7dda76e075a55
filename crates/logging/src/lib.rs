#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the facade of the workspace: six level-named entry points
//! (`fatal` through `trace`) that format their arguments, decorate the line
//! with the caller's file, function and line number, and hand the result to
//! the sink layer in [`logging_sink`]. Everything is owned by an explicit
//! [`Logger`] value — there is no global state, so independent loggers
//! (and independent tests) never interfere.
//!
//! # Design
//!
//! - Arguments are converted into the closed [`LogValue`] enum at the call
//!   boundary, so the formatter never inspects runtime types. Scalars
//!   render inline; sequences, records and errors render as indented
//!   multi-line blocks hanging under the prefix.
//! - The caller's location is resolved from a captured stack by skipping
//!   the library's own frames ([`callsite`]). This is best-effort,
//!   environment-dependent behavior: it needs symbol names and debug info,
//!   and a stack that yields no usable caller frame is a loud error rather
//!   than a silent fallback.
//! - Delivery and default-resolution policy live in
//!   [`SinkManager`]; the facade composes the final
//!   `"<initial>/<file function>(<line>): <body>"` line and dispatches it.
//!
//! # Invariants
//!
//! - A message reaches a sink iff the sink is enabled and the message's
//!   rank is at or above the sink's threshold rank.
//! - Defaults are resolved exactly once per logger, at the first log call
//!   or on an explicit [`Logger::resolve_defaults`].
//! - Prefix padding widths are minimums; they never truncate.
//!
//! # Errors
//!
//! All failures surface as [`LogError`]: unknown level names, unrenderable
//! argument kinds, failed call-site resolution (also reported on the
//! emergency stderr channel), and sink write failures. Nothing is retried,
//! downgraded, or swallowed.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Logger};
//!
//! let mut log = Logger::with_writers(Vec::new(), Vec::new());
//! log.enable_queue(Level::Debug);
//!
//! log.warn(("disk nearly full", 93_u64))?;
//!
//! let line = log.pop_queue();
//! assert!(line.starts_with("W/"));
//! assert!(line.ends_with("): disk nearly full, 93"));
//! # Ok::<(), logging::LogError>(())
//! ```
//!
//! # See also
//!
//! - [`levels`] for the severity registry.
//! - [`logging_sink`] for sink state, dispatch, and the in-memory queue.

pub mod callsite;
mod error;
mod logger;
mod macros;
pub mod text;
#[cfg(feature = "tracing")]
pub mod tracing_bridge;
pub mod value;

pub use error::LogError;
pub use levels::{InvalidLevelError, Level};
pub use logger::Logger;
pub use logging_sink::{LineMode, MessageQueue, SinkKind, SinkManager, SinkState, StreamSink};

pub use callsite::{CallSite, StackResolutionError};
pub use value::{render_arguments, IntoArguments, LogValue, UnsupportedTypeError};
