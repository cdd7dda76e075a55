//! crates/logging/src/callsite.rs
//! Best-effort caller location resolution from captured stack traces.
//!
//! The resolver captures the current stack, parses it into an ordered frame
//! list (innermost first), anchors on the innermost frame that belongs to
//! this library, and scans outward to the first foreign frame with source
//! information — the caller's true call site. Frames with unparsable
//! structure are skipped rather than treated as fatal; only a stack with no
//! usable caller frame at all is an error. The whole mechanism is
//! environment-dependent (it needs symbol names and debug info in the
//! binary) and is documented as best-effort, not a guaranteed contract.

use std::backtrace::Backtrace;
use std::path::Path;

use thiserror::Error;

/// Error returned when the caller's location cannot be determined.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("call-site resolution failed: {reason}")]
pub struct StackResolutionError {
    reason: String,
}

impl StackResolutionError {
    /// Human-readable description of what went wrong.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Resolved call site of a log statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallSite {
    /// Base name of the caller's source file.
    pub file: String,
    /// Name of the calling function, without module path, closure markers,
    /// or symbol hashes.
    pub function: String,
    /// 1-based source line of the call.
    pub line: u32,
}

impl CallSite {
    /// The combined `file function` field used in the rendered prefix.
    #[must_use]
    pub fn file_function(&self) -> String {
        format!("{} {}", self.file, self.function)
    }
}

/// One frame parsed out of a captured stack, innermost first.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Frame {
    function: String,
    file: Option<String>,
    line: Option<u32>,
}

/// Symbol prefix identifying frames that belong to this library.
const LIBRARY_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Same, for monomorphized and trait-impl symbols (`<logging::…>::method`).
const LIBRARY_QUALIFIED_PREFIX: &str = concat!("<", env!("CARGO_CRATE_NAME"), "::");

/// Resolves the first call site outside this library.
///
/// The capture is forced so resolution does not depend on the
/// `RUST_BACKTRACE` environment.
#[inline(never)]
pub fn resolve() -> Result<CallSite, StackResolutionError> {
    let backtrace = Backtrace::force_capture().to_string();
    let frames = parse_frames(&backtrace);
    if frames.is_empty() {
        return Err(StackResolutionError {
            reason: "captured stack contained no parsable frames".to_owned(),
        });
    }
    select_caller(&frames)
}

/// Parses the display form of a captured stack into frames.
///
/// Expected shape per frame: an index line (`N: symbol`) optionally
/// followed by a location line (`at path:line:column`). Lines matching
/// neither shape are ignored.
fn parse_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.file.is_none() {
                    let (file, line_number) = split_location(location);
                    frame.file = Some(file);
                    frame.line = line_number;
                }
            }
            continue;
        }
        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty()
                && index.chars().all(|c| c.is_ascii_digit())
                && !symbol.trim().is_empty()
            {
                frames.push(Frame {
                    function: symbol.trim().to_owned(),
                    file: None,
                    line: None,
                });
            }
        }
    }
    frames
}

/// Splits `path:line:column` into the path and the line number, tolerating
/// a missing column or line.
fn split_location(location: &str) -> (String, Option<u32>) {
    let mut path = location;
    let mut numbers: Vec<u32> = Vec::new();
    while numbers.len() < 2 {
        let Some((head, tail)) = path.rsplit_once(':') else {
            break;
        };
        let Ok(number) = tail.parse::<u32>() else {
            break;
        };
        numbers.push(number);
        path = head;
    }
    // With two trailing numbers the last-parsed one is the line; with one,
    // that one is the line itself.
    let line = match numbers.len() {
        2 => Some(numbers[1]),
        1 => Some(numbers[0]),
        _ => None,
    };
    (path.to_owned(), line)
}

/// Scans outward from the innermost library frame to the first foreign
/// frame carrying source information.
fn select_caller(frames: &[Frame]) -> Result<CallSite, StackResolutionError> {
    let anchor = frames
        .iter()
        .position(is_library_frame)
        .ok_or_else(|| StackResolutionError {
            reason: "no frame belonging to the logging library in the captured stack"
                .to_owned(),
        })?;

    for frame in &frames[anchor + 1..] {
        if is_library_frame(frame) {
            continue;
        }
        let Some(file) = &frame.file else { continue };
        let Some(line) = frame.line else { continue };
        return Ok(CallSite {
            file: base_name(file),
            function: simple_function_name(&frame.function),
            line,
        });
    }

    Err(StackResolutionError {
        reason: "no caller frame beyond the logging library".to_owned(),
    })
}

fn is_library_frame(frame: &Frame) -> bool {
    frame.function.starts_with(LIBRARY_PREFIX)
        || frame.function.starts_with(LIBRARY_QUALIFIED_PREFIX)
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_owned(), |name| name.to_string_lossy().into_owned())
}

/// Reduces a symbol path to the bare function name, dropping closure
/// markers and trailing symbol hashes.
fn simple_function_name(symbol: &str) -> String {
    symbol
        .rsplit("::")
        .find(|segment| {
            !segment.is_empty() && *segment != "{{closure}}" && !is_symbol_hash(segment)
        })
        .unwrap_or(symbol)
        .to_owned()
}

fn is_symbol_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].chars().all(|c| c.is_ascii_hexdigit())
}
