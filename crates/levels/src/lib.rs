#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/levels/src/lib.rs
//!
//! # Overview
//!
//! `levels` defines the ordered set of severity levels shared by the logging
//! workspace, together with the conversions between level names and numeric
//! ranks. Every filtering decision in the workspace goes through this
//! registry; no other crate compares raw rank numbers directly.
//!
//! # Design
//!
//! [`Level`] is a closed enum whose declaration order doubles as the rank
//! order: `Fatal` has rank 0 (highest severity) and `Trace` has rank 5
//! (most verbose). A message passes a sink's filter iff its rank is less
//! than or equal to the rank of the sink's threshold, which
//! [`Level::passes`] encodes.
//!
//! # Errors
//!
//! Name lookups fail with [`InvalidLevelError`] when the supplied string is
//! not one of the six recognized level names. Rank lookups outside `0..=5`
//! return `None`.
//!
//! # Examples
//!
//! ```
//! use levels::Level;
//!
//! let warn: Level = "Warn".parse()?;
//! assert_eq!(warn.rank(), 2);
//! assert!(warn.passes(Level::Debug));
//! assert!(!Level::Trace.passes(warn));
//! # Ok::<(), levels::InvalidLevelError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a level name is not one of the six recognized levels.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid log level supplied: {name}")]
pub struct InvalidLevelError {
    name: String,
}

impl InvalidLevelError {
    /// Returns the rejected level name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Severity of a log message, ordered from most severe to most verbose.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Unrecoverable failure.
    Fatal,
    /// Operation failed.
    Error,
    /// Suspicious but survivable condition.
    Warn,
    /// Routine informational message.
    Info,
    /// Developer diagnostics.
    Debug,
    /// Finest-grained diagnostics.
    Trace,
}

impl Level {
    /// Every level in rank order, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Numeric rank of the level. Lower rank means higher severity; higher
    /// rank means more verbose.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Looks up a level by its numeric rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Fatal),
            1 => Some(Self::Error),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Canonical name of the level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    /// Single-letter tag used at the front of a rendered log line.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Fatal => 'F',
            Self::Error => 'E',
            Self::Warn => 'W',
            Self::Info => 'I',
            Self::Debug => 'D',
            Self::Trace => 'T',
        }
    }

    /// Looks up a level by name.
    ///
    /// This is the single gateway from level names to ranks; callers must
    /// not map names to numbers themselves.
    pub fn from_name(name: &str) -> Result<Self, InvalidLevelError> {
        Self::ALL
            .into_iter()
            .find(|level| level.name() == name)
            .ok_or_else(|| InvalidLevelError {
                name: name.to_owned(),
            })
    }

    /// Reports whether a message at this level passes a sink configured
    /// with `threshold`.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = InvalidLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
