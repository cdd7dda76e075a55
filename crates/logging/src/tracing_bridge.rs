//! crates/logging/src/tracing_bridge.rs
//! Bridge between the `tracing` ecosystem and a [`Logger`].
//!
//! This module lets code instrumented with the standard tracing macros
//! (`error!`, `warn!`, `info!`, `debug!`, `trace!`) land in the same sinks
//! as direct [`Logger`] calls. A [`LoggerLayer`] is installed as a
//! `tracing-subscriber` layer; each event's message field is extracted and
//! forwarded to a shared logger at the mapped severity.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use logging::{tracing_bridge, Level, Logger};
//!
//! let logger = Arc::new(Mutex::new(Logger::new()));
//! logger.lock().unwrap().enable_stderr(Level::Debug);
//! tracing_bridge::init(Arc::clone(&logger));
//!
//! tracing::info!("now routed through the logger");
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use levels::Level;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::logger::Logger;
use crate::value::LogValue;

/// Maps a tracing verbosity to the workspace [`Level`].
///
/// Tracing has no `Fatal` tier, so the mapping covers the five shared
/// severities; [`tracing_level`] maps `Fatal` down to `ERROR` in the other
/// direction.
#[must_use]
pub fn level_from_tracing(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::TRACE => Level::Trace,
    }
}

/// Maps a workspace [`Level`] to the closest tracing verbosity.
#[must_use]
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Fatal | Level::Error => tracing::Level::ERROR,
        Level::Warn => tracing::Level::WARN,
        Level::Info => tracing::Level::INFO,
        Level::Debug => tracing::Level::DEBUG,
        Level::Trace => tracing::Level::TRACE,
    }
}

/// A tracing-subscriber layer forwarding events into a shared [`Logger`].
pub struct LoggerLayer<O, E> {
    logger: Arc<Mutex<Logger<O, E>>>,
}

impl<O, E> LoggerLayer<O, E> {
    /// Creates a layer around a shared logger handle.
    #[must_use]
    pub fn new(logger: Arc<Mutex<Logger<O, E>>>) -> Self {
        Self { logger }
    }
}

impl<S, O, E> Layer<S> for LoggerLayer<O, E>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = level_from_tracing(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let Ok(mut logger) = self.logger.lock() else {
            return;
        };
        if let Err(error) = logger.log(level, &[LogValue::from(message)]) {
            // A subscriber callback cannot propagate; report on the
            // emergency channel instead of dropping the failure silently.
            let _ = writeln!(io::stderr(), "logging: tracing bridge: {error}");
        }
    }
}

/// Visitor extracting the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber forwarding tracing events into `logger`.
pub fn init<O, E>(logger: Arc<Mutex<Logger<O, E>>>)
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_mapping_round_trips_for_shared_tiers() {
        for level in [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            assert_eq!(level_from_tracing(&tracing_level(level)), level);
        }
    }

    #[test]
    fn fatal_maps_down_to_error() {
        assert_eq!(tracing_level(Level::Fatal), tracing::Level::ERROR);
    }

    #[test]
    fn events_reach_the_shared_logger_queue() {
        use tracing_subscriber::layer::SubscriberExt;

        let logger = Arc::new(Mutex::new(Logger::with_writers(
            Vec::<u8>::new(),
            Vec::<u8>::new(),
        )));
        logger.lock().unwrap().enable_queue(Level::Trace);

        let subscriber = tracing_subscriber::registry()
            .with(LoggerLayer::new(Arc::clone(&logger)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("bridged message");
        });

        let line = logger.lock().unwrap().pop_queue();
        assert!(line.starts_with("W/"), "line was: {line}");
        assert!(line.contains("bridged message"));
    }
}
