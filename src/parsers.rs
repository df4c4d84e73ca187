//! This module implements time string parsing and reassembly.
//!
//! The accepted shape is an extended ISO-8601 timestamp with a year of
//! up to sixteen digits and an optional, possibly parenthesized,
//! calendar model annotation:
//!
//! ```text
//! [+-]? Y{1,16}-MM-DDTHH:MM:SSZ [(calendarToken)]
//! ```
//!
//! `T` and `Z` match case-insensitively. Whitespace is permitted before
//! the sign, between the sign and the year, and around the calendar
//! annotation.

use crate::{
    calendar::{CalendarModel, CalendarModelResolver, DefaultCalendarResolver},
    options::TimeParserOptions,
    time_value::{Precision, TimeValue, YEAR_DIGITS},
    TimeValueError, TimeValueResult,
};
use alloc::format;
use alloc::string::String;
use core::str;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// The named fields of a split time string.
///
/// Transient; borrows from the input of a single parse call. All
/// numeric fields are digit-only once the split succeeds. The year is
/// not yet padded and the sign is tracked separately from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeParts<'a> {
    sign: &'a str,
    year: &'a str,
    month: &'a str,
    day: &'a str,
    hour: &'a str,
    minute: &'a str,
    second: &'a str,
    calendar: &'a str,
}

impl<'a> TimeParts<'a> {
    /// The sub-year fields paired with their precision, finest first.
    /// The array order is the tie-break order of the precision scan.
    fn unit_fields(&self) -> [(&'a str, Precision); 5] {
        [
            (self.second, Precision::Second),
            (self.minute, Precision::Minute),
            (self.hour, Precision::Hour),
            (self.day, Precision::Day),
            (self.month, Precision::Month),
        ]
    }
}

fn take_digits<'a>(rest: &mut &'a str) -> &'a str {
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(end);
    *rest = tail;
    digits
}

fn take_two_digits<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return None;
    }
    let (digits, tail) = rest.split_at(2);
    *rest = tail;
    Some(digits)
}

fn eat(rest: &mut &str, expected: u8) -> bool {
    match rest.as_bytes().first() {
        Some(b) if b.eq_ignore_ascii_case(&expected) => {
            *rest = &rest[1..];
            true
        }
        _ => false,
    }
}

fn split_time_string(source: &str) -> TimeValueResult<TimeParts<'_>> {
    let malformed = || TimeValueError::malformed().with_message(format!("malformed time {source:?}"));

    let mut rest = source.trim_start();
    let sign = match rest.as_bytes().first() {
        Some(b'+') => {
            rest = &rest[1..];
            "+"
        }
        Some(b'-') => {
            rest = &rest[1..];
            "-"
        }
        _ => "",
    };
    rest = rest.trim_start();

    let year = take_digits(&mut rest);
    if year.is_empty() || year.len() > YEAR_DIGITS {
        return Err(malformed());
    }

    if !eat(&mut rest, b'-') {
        return Err(malformed());
    }
    let month = take_two_digits(&mut rest).ok_or_else(malformed)?;
    if !eat(&mut rest, b'-') {
        return Err(malformed());
    }
    let day = take_two_digits(&mut rest).ok_or_else(malformed)?;
    if !eat(&mut rest, b'T') {
        return Err(malformed());
    }
    let hour = take_two_digits(&mut rest).ok_or_else(malformed)?;
    if !eat(&mut rest, b':') {
        return Err(malformed());
    }
    let minute = take_two_digits(&mut rest).ok_or_else(malformed)?;
    if !eat(&mut rest, b':') {
        return Err(malformed());
    }
    let second = take_two_digits(&mut rest).ok_or_else(malformed)?;
    if !eat(&mut rest, b'Z') {
        return Err(malformed());
    }

    // Optional calendar annotation; the parentheses are each optional.
    // Token validation is the resolver's concern, not the splitter's.
    let mut calendar = rest.trim();
    if let Some(stripped) = calendar.strip_prefix('(') {
        calendar = stripped.trim_start();
    }
    if let Some(stripped) = calendar.strip_suffix(')') {
        calendar = stripped.trim_end();
    }

    Ok(TimeParts {
        sign,
        year,
        month,
        day,
        hour,
        minute,
        second,
        calendar,
    })
}

/// Left-pads a year to [`YEAR_DIGITS`] digits. The sign is tracked
/// separately and is never part of the padded string.
fn pad_year(year: &str) -> String {
    let mut padded = String::with_capacity(YEAR_DIGITS);
    for _ in year.len()..YEAR_DIGITS {
        padded.push('0');
    }
    padded.push_str(year);
    padded
}

fn precision_from_parts(parts: &TimeParts<'_>, padded_year: &str) -> Precision {
    for (value, precision) in parts.unit_fields() {
        if value != "00" {
            return precision;
        }
    }
    precision_from_year(parts.sign, padded_year)
}

fn precision_from_year(sign: &str, padded_year: &str) -> Precision {
    // Sixteen digits always fit in an i64.
    let mut year: i64 = padded_year
        .bytes()
        .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'));
    if sign == "-" {
        year = -year;
    }

    // Year precision is assumed for the range 4000 BCE to 4000 CE.
    if (-4000..=4000).contains(&year) {
        return Precision::Year;
    }

    // Trailing zeros in a far-past or far-future year signal reduced
    // significant digits, down to the billion-years floor.
    let trailing_zeros = padded_year.len() - padded_year.trim_end_matches('0').len();
    let ordinal = Precision::Year.ordinal().saturating_sub(trailing_zeros as u8);
    Precision::from_ordinal(ordinal).unwrap_or(Precision::BillionYears)
}

/// Writes the canonical timestamp: the sign verbatim, the padded year,
/// and the remaining fields with literal separators.
struct FormattableTimestamp<'a> {
    sign: &'a str,
    year: &'a str,
    month: &'a str,
    day: &'a str,
    hour: &'a str,
    minute: &'a str,
    second: &'a str,
}

impl Writeable for FormattableTimestamp<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_str(self.sign)?;
        sink.write_str(self.year)?;
        sink.write_char('-')?;
        sink.write_str(self.month)?;
        sink.write_char('-')?;
        sink.write_str(self.day)?;
        sink.write_char('T')?;
        sink.write_str(self.hour)?;
        sink.write_char(':')?;
        sink.write_str(self.minute)?;
        sink.write_char(':')?;
        sink.write_str(self.second)?;
        sink.write_char('Z')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        // "-MM-DDTHH:MM:SSZ" is 16 bytes of fields and separators.
        LengthHint::exact(self.sign.len() + self.year.len() + 16)
    }
}

impl_display_with_writeable!(FormattableTimestamp<'_>);

/// Parser for extended ISO-8601 time strings with an optional calendar
/// model annotation.
///
/// The parser holds only immutable configuration fixed at construction
/// time. A single instance may be shared across threads provided the
/// resolver is reentrant; [`DefaultCalendarResolver`] is.
///
/// ```rust
/// use timevalue_rs::{Precision, TimeParser};
///
/// let parser = TimeParser::new();
/// let value = parser.parse("+2013-07-16T00:00:00Z").unwrap();
/// assert_eq!(value.time(), "+0000000000002013-07-16T00:00:00Z");
/// assert_eq!(value.precision(), Precision::Day);
/// ```
#[derive(Debug, Clone)]
pub struct TimeParser<R = DefaultCalendarResolver> {
    options: TimeParserOptions,
    resolver: R,
}

impl TimeParser {
    /// Creates a parser with default options and the default calendar
    /// resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TimeParserOptions::default())
    }

    /// Creates a parser with the given options and the default calendar
    /// resolver.
    #[must_use]
    pub fn with_options(options: TimeParserOptions) -> Self {
        Self::with_resolver(options, DefaultCalendarResolver::new())
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CalendarModelResolver> TimeParser<R> {
    /// Creates a parser with the given options and calendar resolver.
    pub fn with_resolver(options: TimeParserOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    /// Parses a time string into a [`TimeValue`].
    ///
    /// The pipeline splits the input into named fields, pads the year
    /// to sixteen digits, resolves the calendar model, computes the
    /// precision, and reassembles the canonical timestamp.
    pub fn parse(&self, source: &str) -> TimeValueResult<TimeValue> {
        let parts = split_time_string(source)?;
        let year = pad_year(parts.year);

        let calendar = self.resolve_calendar(parts.calendar)?;

        let inferred = precision_from_parts(&parts, &year);
        let precision = match self.options.precision {
            // An override may only coarsen; a finer request is ignored
            // because the input does not carry that precision.
            Some(requested) if requested <= inferred => requested,
            _ => inferred,
        };

        #[cfg(feature = "log")]
        log::trace!("parsed {source:?}: precision {precision}, calendar {calendar}");

        let time = FormattableTimestamp {
            sign: parts.sign,
            year: &year,
            month: parts.month,
            day: parts.day,
            hour: parts.hour,
            minute: parts.minute,
            second: parts.second,
        };
        TimeValue::new(time.write_to_string(), precision, calendar).map_err(|err| {
            TimeValueError::malformed()
                .with_message(format!("malformed time {source:?}: {}", err.message()))
        })
    }

    /// Parses raw bytes into a [`TimeValue`].
    ///
    /// Fails with an [`ErrorKind::InvalidArgumentType`] error when the
    /// input is not textual.
    ///
    /// [`ErrorKind::InvalidArgumentType`]: crate::ErrorKind::InvalidArgumentType
    pub fn parse_bytes(&self, source: &[u8]) -> TimeValueResult<TimeValue> {
        let source = str::from_utf8(source).map_err(|_| {
            TimeValueError::invalid_argument_type()
                .with_message("time input must be a UTF-8 string")
        })?;
        self.parse(source)
    }

    /// Three-way calendar defaulting policy, in order: a well-known
    /// calendar option fills in for an absent token, a present token is
    /// resolved, and anything else defaults to Gregorian.
    fn resolve_calendar(&self, token: &str) -> TimeValueResult<CalendarModel> {
        let fallback = &self.options.calendar;
        if token.is_empty() && (fallback.is_gregorian() || fallback.is_julian()) {
            Ok(fallback.clone())
        } else if !token.is_empty() {
            self.resolver.resolve(token)
        } else {
            Ok(CalendarModel::GREGORIAN)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{GREGORIAN_IRI, JULIAN_IRI};
    use crate::ErrorKind;
    use writeable::assert_writeable_eq;

    fn parse(source: &str) -> TimeValueResult<TimeValue> {
        TimeParser::new().parse(source)
    }

    fn parse_with(options: TimeParserOptions, source: &str) -> TimeValueResult<TimeValue> {
        TimeParser::with_options(options).parse(source)
    }

    #[test]
    fn split_names_every_field() {
        let parts = split_time_string("+2013-07-16T04:05:06Z (Gregorian)").unwrap();
        assert_eq!(parts.sign, "+");
        assert_eq!(parts.year, "2013");
        assert_eq!(parts.month, "07");
        assert_eq!(parts.day, "16");
        assert_eq!(parts.hour, "04");
        assert_eq!(parts.minute, "05");
        assert_eq!(parts.second, "06");
        assert_eq!(parts.calendar, "Gregorian");
    }

    #[test]
    fn split_accepts_flexible_whitespace_and_case() {
        let parts = split_time_string("  - 0427-05-12t03:02:01z ( Julian )  ").unwrap();
        assert_eq!(parts.sign, "-");
        assert_eq!(parts.year, "0427");
        assert_eq!(parts.calendar, "Julian");

        let parts = split_time_string("1999-00-00T00:00:00Z Gregorian").unwrap();
        assert_eq!(parts.sign, "");
        assert_eq!(parts.calendar, "Gregorian");
    }

    #[test]
    fn split_rejects_malformed_inputs() {
        for bad in [
            "",
            "   ",
            "2013",
            "2013-07-16",
            "2013-7-16T00:00:00Z",
            "2013 -07-16T00:00:00Z",
            "2013-07-16T00:00:00",
            "2013-07-16X00:00:00Z",
            "2013-07-16T00.00.00Z",
            "+-2013-07-16T00:00:00Z",
            "12345678901234567-00-00T00:00:00Z",
            "-00000000000000000-00-00T00:00:00Z",
        ] {
            let err = parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "{bad:?}");
        }
    }

    #[test]
    fn pad_year_is_left_zero_padded() {
        assert_eq!(pad_year("2013"), "0000000000002013");
        assert_eq!(pad_year("5"), "0000000000000005");
        assert_eq!(pad_year("0000000000002013"), "0000000000002013");
    }

    #[test]
    fn day_precision_round_trip() {
        let value = parse("+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.time(), "+0000000000002013-07-16T00:00:00Z");
        assert_eq!(value.precision(), Precision::Day);
        assert!(value.calendar_model().is_gregorian());
    }

    #[test]
    fn sign_is_reproduced_verbatim() {
        let unsigned = parse("2013-07-16t00:00:00z").unwrap();
        assert_eq!(unsigned.time(), "0000000000002013-07-16T00:00:00Z");

        let negative = parse("-44-03-15T00:00:00Z").unwrap();
        assert_eq!(negative.time(), "-0000000000000044-03-15T00:00:00Z");
    }

    #[test]
    fn precision_scan_is_finest_first() {
        assert_eq!(
            parse("+2013-07-16T00:00:06Z").unwrap().precision(),
            Precision::Second
        );
        assert_eq!(
            parse("+2013-07-16T00:05:00Z").unwrap().precision(),
            Precision::Minute
        );
        assert_eq!(
            parse("+2013-07-16T04:00:00Z").unwrap().precision(),
            Precision::Hour
        );
        assert_eq!(
            parse("+2013-07-16T00:00:00Z").unwrap().precision(),
            Precision::Day
        );
        assert_eq!(
            parse("+2013-07-00T00:00:00Z").unwrap().precision(),
            Precision::Month
        );
    }

    #[test]
    fn year_precision_within_range() {
        assert_eq!(
            parse("1999-00-00T00:00:00Z").unwrap().precision(),
            Precision::Year
        );
        assert_eq!(
            parse("+4000-00-00T00:00:00Z").unwrap().precision(),
            Precision::Year
        );
        assert_eq!(
            parse("-4000-00-00T00:00:00Z").unwrap().precision(),
            Precision::Year
        );
    }

    #[test]
    fn year_precision_collapses_trailing_zeros() {
        // 5000000000 pads to 0000005000000000: nine trailing zeros.
        assert_eq!(
            parse("+5000000000-00-00T00:00:00Z").unwrap().precision(),
            Precision::BillionYears
        );
        assert_eq!(
            parse("+10000-00-00T00:00:00Z").unwrap().precision(),
            Precision::TenThousandYears
        );
        assert_eq!(
            parse("-5000000-00-00T00:00:00Z").unwrap().precision(),
            Precision::MillionYears
        );
        // No trailing zeros: every digit is significant.
        assert_eq!(
            parse("+12345678-00-00T00:00:00Z").unwrap().precision(),
            Precision::Year
        );
    }

    #[test]
    fn year_precision_clamps_at_billion_years() {
        assert_eq!(
            parse("+1000000000000000-00-00T00:00:00Z").unwrap().precision(),
            Precision::BillionYears
        );
    }

    #[test]
    fn explicit_precision_can_coarsen() {
        let options = TimeParserOptions {
            precision: Some(Precision::Month),
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.precision(), Precision::Month);

        let options = TimeParserOptions {
            precision: Some(Precision::Day),
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.precision(), Precision::Day);
    }

    #[test]
    fn explicit_precision_cannot_sharpen() {
        let options = TimeParserOptions {
            precision: Some(Precision::Second),
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.precision(), Precision::Day);
    }

    #[test]
    fn calendar_option_fills_in_for_absent_token() {
        let options = TimeParserOptions {
            calendar: CalendarModel::JULIAN,
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert!(value.calendar_model().is_julian());
    }

    #[test]
    fn calendar_option_is_used_verbatim() {
        let uppercase = JULIAN_IRI.to_ascii_uppercase();
        let options = TimeParserOptions {
            calendar: CalendarModel::from_iri(uppercase.clone()),
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.calendar_model().as_str(), uppercase);
        assert!(value.calendar_model().is_julian());
    }

    #[test]
    fn unrecognized_calendar_option_falls_back_to_gregorian() {
        let options = TimeParserOptions {
            calendar: CalendarModel::from_iri("http://example.org/lunisolar"),
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.calendar_model().as_str(), GREGORIAN_IRI);
    }

    #[test]
    fn explicit_token_beats_the_calendar_option() {
        let options = TimeParserOptions {
            calendar: CalendarModel::JULIAN,
            ..Default::default()
        };
        let value = parse_with(options, "+2013-07-16T00:00:00Z (Gregorian)").unwrap();
        assert!(value.calendar_model().is_gregorian());
    }

    #[test]
    fn unknown_token_fails_with_invalid_calendar_model() {
        let err = parse("+2013-07-16T00:00:00Z (Coptic)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCalendarModel);
        assert!(err.message().contains("Coptic"));
    }

    #[test]
    fn inconsistent_fields_fail_after_reassembly() {
        for bad in [
            "+2013-13-01T00:00:00Z",
            "+2013-07-32T00:00:00Z",
            "+2013-07-16T24:00:00Z",
        ] {
            let err = parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "{bad:?}");
            assert!(err.message().contains(bad));
        }
    }

    #[test]
    fn canonical_output_reparses_to_equal_value() {
        for source in [
            "+2013-07-16T00:00:00Z",
            "1999-00-00T00:00:00Z",
            "+5000000000-00-00T00:00:00Z",
            "-44-03-15T12:30:45Z (Julian)",
        ] {
            let first = parse(source).unwrap();
            // The calendar annotation is not part of the canonical
            // string, so carry it over for the second pass.
            let options = TimeParserOptions {
                calendar: first.calendar_model().clone(),
                ..Default::default()
            };
            let second = parse_with(options, first.time()).unwrap();
            assert_eq!(first, second, "{source:?}");
        }
    }

    #[test]
    fn parse_bytes_guards_the_text_contract() {
        let parser = TimeParser::new();
        let value = parser.parse_bytes(b"+2013-07-16T00:00:00Z").unwrap();
        assert_eq!(value.precision(), Precision::Day);

        let err = parser.parse_bytes(&[0xff, 0xfe, 0xfd]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentType);
    }

    #[test]
    fn custom_resolver_is_injected() {
        struct PrefixResolver;

        impl CalendarModelResolver for PrefixResolver {
            fn resolve(&self, token: &str) -> TimeValueResult<CalendarModel> {
                Ok(CalendarModel::from_iri(format!("http://example.org/{token}")))
            }
        }

        let parser = TimeParser::with_resolver(TimeParserOptions::default(), PrefixResolver);
        let value = parser.parse("+2013-07-16T00:00:00Z (lunisolar)").unwrap();
        assert_eq!(
            value.calendar_model().as_str(),
            "http://example.org/lunisolar"
        );
    }

    #[test]
    fn timestamp_writeable() {
        let timestamp = FormattableTimestamp {
            sign: "+",
            year: "0000000000002013",
            month: "07",
            day: "16",
            hour: "00",
            minute: "00",
            second: "00",
        };
        assert_writeable_eq!(timestamp, "+0000000000002013-07-16T00:00:00Z");

        let timestamp = FormattableTimestamp {
            sign: "",
            year: "0000000000001999",
            month: "00",
            day: "00",
            hour: "00",
            minute: "00",
            second: "00",
        };
        assert_writeable_eq!(timestamp, "0000000000001999-00-00T00:00:00Z");
    }
}
