//! The structured time value and its precision scale.

use crate::{CalendarModel, TimeValueError, TimeValueResult};
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// The precision of a [`TimeValue`], ordered from coarsest to finest.
///
/// The discriminants form the ordinal scale used for comparisons: a
/// smaller ordinal is a coarser precision, so `a <= b` reads as "`a` is
/// at most as fine as `b`".
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    /// Precise to a billion years.
    BillionYears = 0,
    /// Precise to a hundred million years.
    HundredMillionYears = 1,
    /// Precise to ten million years.
    TenMillionYears = 2,
    /// Precise to a million years.
    MillionYears = 3,
    /// Precise to a hundred thousand years.
    HundredThousandYears = 4,
    /// Precise to ten thousand years.
    TenThousandYears = 5,
    /// Precise to a millennium.
    Millennium = 6,
    /// Precise to a century.
    Century = 7,
    /// Precise to a decade.
    Decade = 8,
    /// Precise to a year.
    Year = 9,
    /// Precise to a month.
    Month = 10,
    /// Precise to a day.
    Day = 11,
    /// Precise to an hour.
    Hour = 12,
    /// Precise to a minute.
    Minute = 13,
    /// Precise to a second.
    Second = 14,
}

impl Precision {
    /// Returns the ordinal value of this precision.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns the precision for an ordinal value, if it is on the scale.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        let precision = match ordinal {
            0 => Self::BillionYears,
            1 => Self::HundredMillionYears,
            2 => Self::TenMillionYears,
            3 => Self::MillionYears,
            4 => Self::HundredThousandYears,
            5 => Self::TenThousandYears,
            6 => Self::Millennium,
            7 => Self::Century,
            8 => Self::Decade,
            9 => Self::Year,
            10 => Self::Month,
            11 => Self::Day,
            12 => Self::Hour,
            13 => Self::Minute,
            14 => Self::Second,
            _ => return None,
        };
        Some(precision)
    }
}

/// A parsing error for [`Precision`].
#[derive(Debug, Clone, Copy)]
pub struct ParsePrecisionError;

impl fmt::Display for ParsePrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid precision")
    }
}

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "billion-years" => Ok(Self::BillionYears),
            "hundred-million-years" => Ok(Self::HundredMillionYears),
            "ten-million-years" => Ok(Self::TenMillionYears),
            "million-years" => Ok(Self::MillionYears),
            "hundred-thousand-years" => Ok(Self::HundredThousandYears),
            "ten-thousand-years" => Ok(Self::TenThousandYears),
            "millennium" => Ok(Self::Millennium),
            "century" => Ok(Self::Century),
            "decade" => Ok(Self::Decade),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            _ => Err(ParsePrecisionError),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BillionYears => "billion-years",
            Self::HundredMillionYears => "hundred-million-years",
            Self::TenMillionYears => "ten-million-years",
            Self::MillionYears => "million-years",
            Self::HundredThousandYears => "hundred-thousand-years",
            Self::TenThousandYears => "ten-thousand-years",
            Self::Millennium => "millennium",
            Self::Century => "century",
            Self::Decade => "decade",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
        .fmt(f)
    }
}

// Canonical timestamp layout after the optional sign:
// 16 year digits, then "-MM-DDTHH:MM:SSZ".
const TIMESTAMP_LEN: usize = 32;
pub(crate) const YEAR_DIGITS: usize = 16;

/// A structured point in time: a canonical timestamp string, a
/// [`Precision`], and a [`CalendarModel`].
///
/// The timestamp carries an optional sign, a 16-digit year, and
/// `-MM-DDTHH:MM:SSZ`. Construction validates the layout and the field
/// ranges and fails with a malformed-time error otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeValue {
    time: String,
    precision: Precision,
    calendar: CalendarModel,
}

impl TimeValue {
    /// Creates a new `TimeValue` from a canonical timestamp string.
    ///
    /// Fails with an [`ErrorKind::Malformed`] error when the timestamp
    /// does not have the canonical layout or a field is out of range.
    ///
    /// [`ErrorKind::Malformed`]: crate::ErrorKind::Malformed
    pub fn new(
        time: impl Into<String>,
        precision: Precision,
        calendar: CalendarModel,
    ) -> TimeValueResult<Self> {
        let time = time.into();
        validate_timestamp(&time)?;
        Ok(Self {
            time,
            precision,
            calendar,
        })
    }

    /// Returns the canonical timestamp string.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the precision of this value.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the calendar model of this value.
    #[must_use]
    pub fn calendar_model(&self) -> &CalendarModel {
        &self.calendar
    }
}

impl Writeable for TimeValue {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str(&self.time)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(self.time.len())
    }
}

impl_display_with_writeable!(TimeValue);

fn two_digit_field(bytes: &[u8], max: u8) -> Option<u8> {
    let &[tens, ones] = bytes else {
        return None;
    };
    if !tens.is_ascii_digit() || !ones.is_ascii_digit() {
        return None;
    }
    let value = (tens - b'0') * 10 + (ones - b'0');
    (value <= max).then_some(value)
}

fn validate_timestamp(time: &str) -> TimeValueResult<()> {
    let illegal =
        |detail: &str| TimeValueError::malformed().with_message(format!("{detail}: {time:?}"));

    let bytes = time.as_bytes();
    let unsigned = match bytes.first() {
        Some(b'+' | b'-') => &bytes[1..],
        _ => bytes,
    };

    if unsigned.len() != TIMESTAMP_LEN {
        return Err(illegal("timestamp has the wrong length"));
    }
    if !unsigned[..YEAR_DIGITS].iter().all(u8::is_ascii_digit) {
        return Err(illegal("year is not 16 digits"));
    }

    let (fields, separators) = (
        [
            (&unsigned[17..19], 12u8, "month"),
            (&unsigned[20..22], 31, "day"),
            (&unsigned[23..25], 23, "hour"),
            (&unsigned[26..28], 59, "minute"),
            // Leap second digits pass through unvalidated.
            (&unsigned[29..31], 61, "second"),
        ],
        [
            (unsigned[16], b'-'),
            (unsigned[19], b'-'),
            (unsigned[22], b'T'),
            (unsigned[25], b':'),
            (unsigned[28], b':'),
            (unsigned[31], b'Z'),
        ],
    );

    for (found, expected) in separators {
        if found != expected {
            return Err(illegal("unexpected separator"));
        }
    }
    for (digits, max, name) in fields {
        if two_digit_field(digits, max).is_none() {
            return Err(illegal(name));
        }
    }

    Ok(())
}
