//! Integration tests for the in-memory queue surface of the facade.
//!
//! The queue is the primary sink for test assertions, so its FIFO
//! discipline and empty-queue conventions are pinned down here.

use levels::Level;
use logging::Logger;

fn queue_logger() -> Logger<Vec<u8>, Vec<u8>> {
    let mut log = Logger::with_writers(Vec::new(), Vec::new());
    log.disable_stdout();
    log.disable_stderr();
    log.enable_queue(Level::Debug);
    log
}

fn body_of(line: &str) -> &str {
    line.split_once("): ").map_or("", |(_, body)| body)
}

/// Verifies peek returns the line produced by a preceding log statement.
#[test]
fn peek_returns_a_line_after_a_log_statement() {
    let mut log = queue_logger();
    log.fatal("blue").unwrap();

    assert_eq!(body_of(log.peek_queue()), "blue");
}

/// Verifies peek is idempotent between mutations.
#[test]
fn peek_twice_yields_identical_results() {
    let mut log = queue_logger();
    log.fatal("blue").unwrap();
    log.fatal("test").unwrap();

    let first = log.peek_queue().to_owned();
    assert_eq!(log.peek_queue(), first);
}

/// Verifies peek on an empty queue yields an empty string.
#[test]
fn peek_on_empty_queue_is_empty_string() {
    let log = queue_logger();
    assert_eq!(log.peek_queue(), "");
}

/// Verifies pop returns exactly what the preceding peek reported, in FIFO
/// order, and drains to empty strings.
#[test]
fn pop_agrees_with_peek_and_drains_fifo() {
    let mut log = queue_logger();
    log.fatal("msg1").unwrap();
    log.fatal("msg2").unwrap();

    assert_eq!(body_of(log.peek_queue()), "msg1");
    let first = log.peek_queue().to_owned();
    assert_eq!(log.pop_queue(), first);

    assert_eq!(body_of(log.peek_queue()), "msg2");
    let second = log.peek_queue().to_owned();
    assert_eq!(log.pop_queue(), second);

    assert_eq!(log.peek_queue(), "");
    assert_eq!(log.pop_queue(), "");
}

/// Verifies clear_queue empties the queue regardless of prior contents.
#[test]
fn clear_queue_makes_peek_empty() {
    let mut log = queue_logger();
    assert_eq!(log.peek_queue(), "");

    log.fatal("msg1").unwrap();
    assert_eq!(body_of(log.peek_queue()), "msg1");
    log.fatal("msg2").unwrap();

    log.clear_queue();
    assert_eq!(log.peek_queue(), "");
    assert_eq!(log.queue_len(), 0);

    // Clearing an already-empty queue is a no-op.
    log.clear_queue();
    assert_eq!(log.peek_queue(), "");
}

/// Verifies the queue preserves insertion order across many entries.
#[test]
fn queue_preserves_insertion_order() {
    let mut log = queue_logger();
    for index in 0..10 {
        log.debug(format!("entry {index}")).unwrap();
    }

    for index in 0..10 {
        assert_eq!(body_of(&log.pop_queue()), format!("entry {index}"));
    }
}

/// Verifies a disabled queue stays empty.
#[test]
fn disabled_queue_collects_nothing() {
    let mut log = Logger::with_writers(Vec::new(), Vec::new());
    log.disable_stdout();
    log.disable_stderr();
    log.disable_queue();

    log.fatal("vanishes").unwrap();
    assert_eq!(log.peek_queue(), "");
    assert_eq!(log.queue_len(), 0);
}
