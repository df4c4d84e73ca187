//! The error type for time value parsing.

use alloc::borrow::Cow;
use core::fmt;

/// The category of a [`TimeValueError`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input did not match the time grammar, or the reassembled
    /// fields were rejected by the time value container.
    Malformed,
    /// A non-empty calendar model token was not recognized by the
    /// calendar resolver.
    InvalidCalendarModel,
    /// The input was not a textual value.
    InvalidArgumentType,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => "MalformedTime",
            Self::InvalidCalendarModel => "InvalidCalendarModel",
            Self::InvalidArgumentType => "InvalidArgumentType",
        }
        .fmt(f)
    }
}

/// The error type returned by the parsing operations of this crate.
///
/// Errors carry a kind and a message. Construct them with the kind
/// builders and attach context with [`TimeValueError::with_message`].
///
/// ```rust
/// use timevalue_rs::{ErrorKind, TimeValueError};
///
/// let err = TimeValueError::malformed().with_message("unterminated time string");
/// assert_eq!(err.kind(), ErrorKind::Malformed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeValueError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TimeValueError {
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a malformed-time error.
    #[must_use]
    pub const fn malformed() -> Self {
        Self::new(ErrorKind::Malformed)
    }

    /// Creates an invalid-calendar-model error.
    #[must_use]
    pub const fn invalid_calendar_model() -> Self {
        Self::new(ErrorKind::InvalidCalendarModel)
    }

    /// Creates an invalid-argument-type error.
    #[must_use]
    pub const fn invalid_argument_type() -> Self {
        Self::new(ErrorKind::InvalidArgumentType)
    }

    /// Attaches a message to the error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message attached to the error, if any.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for TimeValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for TimeValueError {}
