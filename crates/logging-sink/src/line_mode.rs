//! crates/logging-sink/src/line_mode.rs
//! Newline policy for stream-backed sinks.

/// Controls whether a [`StreamSink`](crate::StreamSink) appends a trailing
/// newline when writing a line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after each written line.
    #[default]
    WithNewline,
    /// Emit the line without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

impl From<bool> for LineMode {
    /// `true` maps to [`LineMode::WithNewline`], `false` to
    /// [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_appends_newline() {
        assert_eq!(LineMode::default(), LineMode::WithNewline);
        assert!(LineMode::default().append_newline());
    }

    #[test]
    fn without_newline_does_not_append() {
        assert!(!LineMode::WithoutNewline.append_newline());
    }

    #[test]
    fn from_bool_round_trips() {
        assert_eq!(LineMode::from(true), LineMode::WithNewline);
        assert_eq!(LineMode::from(false), LineMode::WithoutNewline);
    }
}
