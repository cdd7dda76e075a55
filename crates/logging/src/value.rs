//! crates/logging/src/value.rs
//! Closed set of renderable argument kinds and their text rendering.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error as StdError;

use thiserror::Error;

use crate::text::hang_indent;

/// Spaces prepended to every body line after the first, so structured
/// blocks hang under the log prefix.
const BODY_INDENT: usize = 4;

/// Spaces of nesting indentation per structural depth inside a block.
const NESTING_INDENT: usize = 2;

/// Error returned when a log argument is of a kind the formatter cannot
/// render.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unsupported argument type: {type_name}")]
pub struct UnsupportedTypeError {
    type_name: String,
}

impl UnsupportedTypeError {
    /// Runtime type tag of the rejected value.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A single argument to a log call.
///
/// The set of renderable kinds is closed: conversion into `LogValue`
/// happens at the call boundary (via `From` impls and the constructors
/// below), so the formatter never inspects runtime types. The
/// [`Unsupported`](Self::Unsupported) fallback carries a type tag and fails
/// rendering with [`UnsupportedTypeError`].
///
/// Values form an owned tree, so cyclic references cannot be constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogValue {
    /// No value; renders as an empty body.
    Absent,
    /// Boolean, rendered as the literal `true`/`false`.
    Bool(bool),
    /// Text, rendered unmodified.
    Str(String),
    /// Signed integer in decimal form.
    Int(i64),
    /// Unsigned integer in decimal form.
    Uint(u64),
    /// Floating-point number in decimal form.
    Float(f64),
    /// Ordered sequence, pretty-printed as a multi-line block.
    Seq(Vec<LogValue>),
    /// Structured record with insertion-ordered fields, pretty-printed as a
    /// multi-line block.
    Record(Vec<(String, LogValue)>),
    /// An error transformed into its message plus the stack captured when
    /// the value was built.
    ErrorRecord {
        /// Display form of the source error.
        error: String,
        /// Trimmed stack lines captured at conversion time.
        stack: Vec<String>,
    },
    /// Fallback for kinds the formatter cannot render.
    Unsupported(String),
}

impl LogValue {
    /// Builds a structured record, preserving field order.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Builds a sequence.
    pub fn seq<V, I>(items: I) -> Self
    where
        V: Into<Self>,
        I: IntoIterator<Item = V>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Transforms an error into an [`ErrorRecord`](Self::ErrorRecord).
    ///
    /// Raw errors do not enumerate their own fields meaningfully, so the
    /// record pairs the error's display form with a stack captured here, at
    /// the conversion boundary. The capture is forced, independent of the
    /// `RUST_BACKTRACE` environment.
    #[must_use]
    pub fn from_error<E: StdError + ?Sized>(error: &E) -> Self {
        let backtrace = Backtrace::force_capture().to_string();
        let stack = backtrace
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self::ErrorRecord {
            error: error.to_string(),
            stack,
        }
    }

    /// Marks a value of type `T` as unrenderable, carrying its type tag.
    #[must_use]
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::Unsupported(std::any::type_name::<T>().to_owned())
    }

    /// Renders the value to its display text.
    ///
    /// Scalars render inline; sequences, records and error records render
    /// as a multi-line block starting with a newline, every following line
    /// hanging four spaces under the log prefix.
    pub fn render(&self) -> Result<String, UnsupportedTypeError> {
        match self {
            Self::Absent => Ok(String::new()),
            Self::Bool(value) => Ok(value.to_string()),
            Self::Str(value) => Ok(value.clone()),
            Self::Int(value) => Ok(value.to_string()),
            Self::Uint(value) => Ok(value.to_string()),
            Self::Float(value) => Ok(value.to_string()),
            Self::Seq(_) | Self::Record(_) | Self::ErrorRecord { .. } => {
                let mut block = String::from("\n");
                pretty(self, 0, &mut block)?;
                Ok(hang_indent(&block, BODY_INDENT))
            }
            Self::Unsupported(type_name) => Err(UnsupportedTypeError {
                type_name: type_name.clone(),
            }),
        }
    }
}

/// Renders each argument independently and joins them with `", "`.
pub fn render_arguments(args: &[LogValue]) -> Result<String, UnsupportedTypeError> {
    let mut rendered = Vec::with_capacity(args.len());
    for arg in args {
        rendered.push(arg.render()?);
    }
    Ok(rendered.join(", "))
}

/// Structural pretty-printer: 2-space indentation per nesting level,
/// insertion-ordered record fields.
fn pretty(
    value: &LogValue,
    depth: usize,
    out: &mut String,
) -> Result<(), UnsupportedTypeError> {
    match value {
        LogValue::Absent => out.push_str("null"),
        LogValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        LogValue::Str(s) => push_quoted(out, s),
        LogValue::Int(i) => out.push_str(&i.to_string()),
        LogValue::Uint(u) => out.push_str(&u.to_string()),
        LogValue::Float(f) => out.push_str(&f.to_string()),
        LogValue::Seq(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return Ok(());
            }
            out.push_str("[\n");
            let last = items.len() - 1;
            for (index, item) in items.iter().enumerate() {
                push_nesting(out, depth + 1);
                pretty(item, depth + 1, out)?;
                if index != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_nesting(out, depth);
            out.push(']');
        }
        LogValue::Record(fields) => {
            if fields.is_empty() {
                out.push_str("{}");
                return Ok(());
            }
            out.push_str("{\n");
            let last = fields.len() - 1;
            for (index, (key, item)) in fields.iter().enumerate() {
                push_nesting(out, depth + 1);
                push_quoted(out, key);
                out.push_str(": ");
                pretty(item, depth + 1, out)?;
                if index != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_nesting(out, depth);
            out.push('}');
        }
        LogValue::ErrorRecord { error, stack } => {
            let record = LogValue::record([
                ("error", LogValue::Str(error.clone())),
                ("stack", LogValue::seq(stack.iter().cloned())),
            ]);
            pretty(&record, depth, out)?;
        }
        LogValue::Unsupported(type_name) => {
            return Err(UnsupportedTypeError {
                type_name: type_name.clone(),
            });
        }
    }
    Ok(())
}

fn push_nesting(out: &mut String, depth: usize) {
    for _ in 0..depth * NESTING_INDENT {
        out.push(' ');
    }
}

/// Quotes a string JSON-style, except that embedded newlines stay literal
/// so multi-line text remains readable in the rendered block.
fn push_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push('\n'),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl From<()> for LogValue {
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Cow<'_, str>> for LogValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Str(value.into_owned())
    }
}

impl From<char> for LogValue {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::Uint(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for LogValue {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::Seq(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Record(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

/// Bundles one call's worth of log arguments.
///
/// Implemented for single values convertible into [`LogValue`] and for
/// tuples of such values, so the facade's level entry points accept a
/// variable number of arguments without macros.
pub trait IntoArguments {
    /// Converts the bundle into the argument list handed to the formatter.
    fn into_arguments(self) -> Vec<LogValue>;
}

impl IntoArguments for LogValue {
    fn into_arguments(self) -> Vec<LogValue> {
        vec![self]
    }
}

macro_rules! impl_into_arguments_for_scalar {
    ($($ty:ty),*) => {
        $(impl IntoArguments for $ty {
            fn into_arguments(self) -> Vec<LogValue> {
                vec![LogValue::from(self)]
            }
        })*
    };
}

impl_into_arguments_for_scalar!(
    (),
    bool,
    &str,
    String,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64
);

macro_rules! impl_into_arguments_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<LogValue>),+> IntoArguments for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_arguments(self) -> Vec<LogValue> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_arguments_for_tuple!(A, B);
impl_into_arguments_for_tuple!(A, B, C);
impl_into_arguments_for_tuple!(A, B, C, D);
impl_into_arguments_for_tuple!(A, B, C, D, E);
impl_into_arguments_for_tuple!(A, B, C, D, E, F);
impl_into_arguments_for_tuple!(A, B, C, D, E, F, G);
impl_into_arguments_for_tuple!(A, B, C, D, E, F, G, H);
