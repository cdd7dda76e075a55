//! Integration tests for log level filtering.
//!
//! These tests verify that a sink's threshold correctly decides which
//! messages are delivered, across every message-level/threshold pair, and
//! that each of the six level entry points tags its lines correctly.

use levels::Level;
use logging::Logger;

/// Logger with only the queue enabled, capturing the stream sinks so
/// nothing leaks to the real process streams.
fn queue_logger(threshold: Level) -> Logger<Vec<u8>, Vec<u8>> {
    let mut log = Logger::with_writers(Vec::new(), Vec::new());
    log.disable_stdout();
    log.disable_stderr();
    log.enable_queue(threshold);
    log
}

/// Issues one message at `level` through the matching facade entry point.
fn log_at(log: &mut Logger<Vec<u8>, Vec<u8>>, level: Level, message: &str) {
    let result = match level {
        Level::Fatal => log.fatal(message),
        Level::Error => log.error(message),
        Level::Warn => log.warn(message),
        Level::Info => log.info(message),
        Level::Debug => log.debug(message),
        Level::Trace => log.trace(message),
    };
    result.expect("log call succeeds");
}

fn body_of(line: &str) -> &str {
    line.split_once("): ").map_or("", |(_, body)| body)
}

// ============================================================================
// Exhaustive Delivery Matrix
// ============================================================================

/// Verifies the full 6x6 matrix: a message is queued iff its rank is at or
/// above the configured threshold's rank.
#[test]
fn message_reaches_queue_iff_rank_passes_threshold() {
    for threshold in Level::ALL {
        for message in Level::ALL {
            let mut log = queue_logger(threshold);
            log_at(&mut log, message, "probe");

            let expected = message.rank() <= threshold.rank();
            let delivered = !log.peek_queue().is_empty();
            assert_eq!(
                delivered, expected,
                "{message} against threshold {threshold}",
            );
        }
    }
}

/// Verifies delivered lines carry the message body unchanged.
#[test]
fn delivered_lines_carry_the_message_body() {
    for threshold in Level::ALL {
        for message in Level::ALL {
            if !message.passes(threshold) {
                continue;
            }
            let mut log = queue_logger(threshold);
            log_at(&mut log, message, "payload text");
            assert_eq!(body_of(log.peek_queue()), "payload text");
        }
    }
}

// ============================================================================
// Level Tagging
// ============================================================================

/// Verifies each entry point stamps its own level initial on the line.
#[test]
fn each_entry_point_tags_its_level_initial() {
    for level in Level::ALL {
        let mut log = queue_logger(Level::Trace);
        log_at(&mut log, level, "tagged");

        let line = log.pop_queue();
        let expected = format!("{}/", level.initial());
        assert!(
            line.starts_with(&expected),
            "expected {expected}… got {line}",
        );
    }
}

/// Verifies a threshold of Fatal admits only Fatal messages.
#[test]
fn fatal_threshold_admits_only_fatal() {
    let mut log = queue_logger(Level::Fatal);
    log.fatal("kept").unwrap();
    log.error("dropped").unwrap();
    log.trace("dropped").unwrap();

    assert_eq!(log.queue_len(), 1);
    assert_eq!(body_of(log.peek_queue()), "kept");
}

/// Verifies a Trace threshold admits everything.
#[test]
fn trace_threshold_admits_every_level() {
    let mut log = queue_logger(Level::Trace);
    for level in Level::ALL {
        log_at(&mut log, level, "admitted");
    }
    assert_eq!(log.queue_len(), Level::ALL.len());
}

/// Verifies the stream sinks apply the same predicate as the queue.
#[test]
fn stream_sinks_filter_by_the_same_rank_rule() {
    let mut log = Logger::with_writers(Vec::new(), Vec::new());
    log.enable_stdout(Level::Warn);
    log.disable_stderr();
    log.disable_queue();

    log.warn("passes").unwrap();
    log.info("filtered").unwrap();

    let (out, err) = log.into_writers();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("passes"));
    assert!(!out.contains("filtered"));
    assert!(err.is_empty());
}
