//! Options recognized by the time parser.

use crate::{CalendarModel, Precision};

/// Options consumed by [`TimeParser`] at construction time.
///
/// The options are immutable once the parser is built; there is no
/// runtime mutation.
///
/// | option      | effect                                                        | default   |
/// |-------------|---------------------------------------------------------------|-----------|
/// | `calendar`  | calendar model used when the input omits a calendar token and the option is itself a well-known calendar IRI | Gregorian |
/// | `precision` | upper bound (coarser-or-equal) on the inferred precision       | `None`    |
///
/// [`TimeParser`]: crate::TimeParser
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeParserOptions {
    /// The calendar model to fall back to when the input carries no
    /// calendar token. Only honored when it is one of the two
    /// well-known calendar IRIs; any other value falls back to
    /// Gregorian.
    pub calendar: CalendarModel,
    /// An explicit precision override. Only honored when it requests a
    /// precision coarser than or equal to the one inferred from the
    /// input; a finer request is ignored.
    pub precision: Option<Precision>,
}

impl TimeParserOptions {
    /// Creates the default options: Gregorian calendar, no precision
    /// override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
