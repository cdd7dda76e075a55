//! Integration tests for call-site prefixes on rendered lines.
//!
//! These exercise the end-to-end resolution path: the caller of a facade
//! entry point — this test file — must appear in the prefix, padded to the
//! configured field widths. Resolution needs symbol names and debug info,
//! which the test profile provides.

use levels::Level;
use logging::Logger;

fn queue_logger() -> Logger<Vec<u8>, Vec<u8>> {
    let mut log = Logger::with_writers(Vec::new(), Vec::new());
    log.disable_stdout();
    log.disable_stderr();
    log.enable_queue(Level::Debug);
    log
}

/// Splits a rendered line into its prefix parts:
/// `<initial>/<file function>(<line field>): <body>`.
fn split_prefix(line: &str) -> (char, String, String) {
    let (prefix, _body) = line.split_once("): ").expect("prefix terminator");
    let (initial, rest) = prefix.split_at(2);
    let (file_function, line_field) = rest.split_once('(').expect("line field opener");
    (
        initial.chars().next().unwrap(),
        file_function.to_owned(),
        line_field.to_owned(),
    )
}

/// Verifies the prefix shape `<initial>/<file function>(<line>): `.
#[test]
fn prefix_has_the_expected_shape() {
    let mut log = queue_logger();
    log.info("shaped").unwrap();

    let line = log.pop_queue();
    let (initial, file_function, line_field) = split_prefix(&line);

    assert_eq!(initial, 'I');
    assert!(!file_function.trim().is_empty());
    let number: u32 = line_field.trim().parse().expect("numeric line field");
    assert!(number > 0);
}

/// Verifies the resolved call site points into this test file, not into
/// the logging library.
#[test]
fn prefix_names_the_calling_file() {
    let mut log = queue_logger();
    log.info("located").unwrap();

    let line = log.pop_queue();
    let (_, file_function, _) = split_prefix(&line);

    assert!(
        file_function.contains("callsite_resolution.rs"),
        "resolved field was {file_function:?}",
    );
    assert!(
        !file_function.contains("logger.rs"),
        "library frames must be skipped: {file_function:?}",
    );
}

/// Verifies consecutive calls resolve their own line numbers.
#[test]
fn consecutive_calls_resolve_distinct_lines() {
    let mut log = queue_logger();
    log.info("first").unwrap();
    log.info("second").unwrap();

    let (_, _, first_line) = split_prefix(&log.pop_queue());
    let (_, _, second_line) = split_prefix(&log.pop_queue());

    let first: u32 = first_line.trim().parse().unwrap();
    let second: u32 = second_line.trim().parse().unwrap();
    assert_ne!(first, second);
    assert!(second > first);
}

// ============================================================================
// Padding
// ============================================================================

/// Verifies default field widths: 30 for file+function, 5 for the line.
#[test]
fn default_padding_is_thirty_and_five() {
    let mut log = queue_logger();
    log.info("padded").unwrap();

    let line = log.pop_queue();
    let (_, file_function, line_field) = split_prefix(&line);

    assert!(
        file_function.chars().count() >= 30,
        "field {file_function:?} narrower than 30",
    );
    assert!(line_field.chars().count() >= 5);
}

/// Verifies the line field is right-aligned within its width.
#[test]
fn line_field_is_right_aligned() {
    let mut log = queue_logger();
    log.info("aligned").unwrap();

    let (_, _, line_field) = split_prefix(&log.pop_queue());
    assert!(line_field.starts_with(' ') || line_field.len() > 5);
    assert!(!line_field.ends_with(' '));
}

/// Verifies set_padding widens future prefixes.
#[test]
fn set_padding_widens_future_lines() {
    let mut log = queue_logger();
    log.set_padding(48, 9);
    log.info("wide").unwrap();

    let (_, file_function, line_field) = split_prefix(&log.pop_queue());
    assert!(file_function.chars().count() >= 48);
    assert!(line_field.chars().count() >= 9);
}

/// Verifies narrow padding never truncates the resolved call site.
#[test]
fn narrow_padding_does_not_truncate() {
    let mut log = queue_logger();
    log.set_padding(1, 1);
    log.info("untruncated").unwrap();

    let (_, file_function, _) = split_prefix(&log.pop_queue());
    assert!(file_function.contains("callsite_resolution.rs"));
}

/// Verifies padding changes affect only lines logged afterwards.
#[test]
fn padding_changes_affect_only_future_lines() {
    let mut log = queue_logger();
    log.info("before").unwrap();
    log.set_padding(60, 5);
    log.info("after").unwrap();

    let (_, before_field, _) = split_prefix(&log.pop_queue());
    let (_, after_field, _) = split_prefix(&log.pop_queue());

    assert!(before_field.chars().count() < 60);
    assert!(after_field.chars().count() >= 60);
}
