//! crates/logging/src/error.rs
//! Umbrella error surfaced by logging and configuration calls.

use std::io;

use levels::InvalidLevelError;
use thiserror::Error;

use crate::callsite::StackResolutionError;
use crate::value::UnsupportedTypeError;

/// Any failure a logging call can surface.
///
/// None of these are retried or downgraded: they indicate either a
/// programming error by the caller or a violated assumption about the host
/// environment, and a logging call fails loudly rather than masking them.
#[derive(Debug, Error)]
pub enum LogError {
    /// An unrecognized level name was supplied.
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevelError),
    /// A log argument is of a kind the formatter cannot render.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
    /// The caller's location could not be determined.
    #[error(transparent)]
    StackResolution(#[from] StackResolutionError),
    /// A sink writer failed.
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),
}
