//! The `timevalue_rs` crate parses extended ISO-8601 time strings with
//! an optional calendar model annotation into structured time values.
//!
//! ```rust
//! use timevalue_rs::{Precision, TimeParser, TimeParserOptions};
//!
//! let parser = TimeParser::new();
//!
//! let value = parser.parse("+2013-07-16T00:00:00Z").unwrap();
//! assert_eq!(value.time(), "+0000000000002013-07-16T00:00:00Z");
//! assert_eq!(value.precision(), Precision::Day);
//! assert!(value.calendar_model().is_gregorian());
//!
//! // A trailing annotation selects the calendar model.
//! let value = parser.parse("-0427-05-12T00:00:00Z (Julian)").unwrap();
//! assert!(value.calendar_model().is_julian());
//!
//! // Options can coarsen the inferred precision, never sharpen it.
//! let mut options = TimeParserOptions::new();
//! options.precision = Some(Precision::Month);
//! let value = TimeParser::with_options(options)
//!     .parse("+2013-07-16T00:00:00Z")
//!     .unwrap();
//! assert_eq!(value.precision(), Precision::Month);
//! ```
//!
//! A year far outside the range 4000 BCE to 4000 CE is assumed to carry
//! only as many significant digits as it has non-zero trailing
//! positions, so `+5000000000-00-00T00:00:00Z` parses with
//! billion-years precision rather than year precision.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod calendar;
pub mod error;
pub mod options;
pub mod parsers;
pub mod time_value;

#[doc(inline)]
pub use error::{ErrorKind, TimeValueError};

/// The result type of this crate's parsing operations.
pub type TimeValueResult<T> = Result<T, TimeValueError>;

pub use crate::calendar::{CalendarModel, CalendarModelResolver, DefaultCalendarResolver};
pub use crate::options::TimeParserOptions;
pub use crate::parsers::TimeParser;
pub use crate::time_value::{Precision, TimeValue};
