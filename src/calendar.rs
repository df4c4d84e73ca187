//! Calendar model identifiers and the calendar resolver capability.
//!
//! A calendar model is identified by an opaque IRI. Only the Gregorian
//! and Julian models are well known to this crate; any other IRI is
//! carried verbatim and compared byte-exactly.

use crate::{TimeValueError, TimeValueResult};
use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Canonical IRI of the proleptic Gregorian calendar model.
pub const GREGORIAN_IRI: &str = "http://www.wikidata.org/entity/Q1985727";

/// Canonical IRI of the proleptic Julian calendar model.
pub const JULIAN_IRI: &str = "http://www.wikidata.org/entity/Q1985786";

/// An opaque calendar model identifier.
///
/// Equality is case-insensitive when either side is one of the two
/// well-known canonical IRIs, and byte-exact otherwise.
#[derive(Debug, Clone)]
pub struct CalendarModel(Cow<'static, str>);

impl CalendarModel {
    /// The Gregorian calendar model.
    pub const GREGORIAN: Self = Self(Cow::Borrowed(GREGORIAN_IRI));

    /// The Julian calendar model.
    pub const JULIAN: Self = Self(Cow::Borrowed(JULIAN_IRI));

    /// Creates a calendar model from an IRI, stored verbatim.
    pub fn from_iri(iri: impl Into<String>) -> Self {
        Self(Cow::Owned(iri.into()))
    }

    /// Returns the IRI of this calendar model.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the Gregorian canonical IRI.
    #[must_use]
    pub fn is_gregorian(&self) -> bool {
        self.0.eq_ignore_ascii_case(GREGORIAN_IRI)
    }

    /// Returns `true` if this is the Julian canonical IRI.
    #[must_use]
    pub fn is_julian(&self) -> bool {
        self.0.eq_ignore_ascii_case(JULIAN_IRI)
    }
}

impl Default for CalendarModel {
    fn default() -> Self {
        Self::GREGORIAN
    }
}

impl PartialEq for CalendarModel {
    fn eq(&self, other: &Self) -> bool {
        if self.is_gregorian() || self.is_julian() {
            self.0.eq_ignore_ascii_case(&other.0)
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for CalendarModel {}

impl fmt::Display for CalendarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CalendarModel {
    type Err = TimeValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefaultCalendarResolver.resolve(s)
    }
}

/// Capability for validating and normalizing a calendar model token
/// into a canonical [`CalendarModel`].
///
/// Implementations must be stateless validators. The parser only calls
/// [`resolve`](CalendarModelResolver::resolve) for non-empty tokens.
pub trait CalendarModelResolver {
    /// Resolves a calendar model token.
    ///
    /// Returns an [`ErrorKind::InvalidCalendarModel`] error when the
    /// token is not recognized.
    ///
    /// [`ErrorKind::InvalidCalendarModel`]: crate::ErrorKind::InvalidCalendarModel
    fn resolve(&self, token: &str) -> TimeValueResult<CalendarModel>;
}

/// The stateless resolver used when the caller supplies none.
///
/// Recognizes the two canonical IRIs and the names `Gregorian` and
/// `Julian`, all case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCalendarResolver;

impl DefaultCalendarResolver {
    /// Creates a new `DefaultCalendarResolver`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CalendarModelResolver for DefaultCalendarResolver {
    fn resolve(&self, token: &str) -> TimeValueResult<CalendarModel> {
        if token.eq_ignore_ascii_case("gregorian") || token.eq_ignore_ascii_case(GREGORIAN_IRI) {
            Ok(CalendarModel::GREGORIAN)
        } else if token.eq_ignore_ascii_case("julian") || token.eq_ignore_ascii_case(JULIAN_IRI) {
            Ok(CalendarModel::JULIAN)
        } else {
            Err(TimeValueError::invalid_calendar_model()
                .with_message(format!("unknown calendar model token {token:?}")))
        }
    }
}
