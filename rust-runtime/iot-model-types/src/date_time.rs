/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Timestamp value for model fields of kind `timestamp`.
//!
//! The control-plane wire formats carry timestamps with millisecond precision, so a
//! [`DateTime`] stores milliseconds since the Unix epoch (January 1, 1970 at midnight UTC).

use num_integer::div_mod_floor;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const MILLIS_PER_SECOND: i64 = 1000;
const NANOS_PER_MILLI: i128 = 1_000_000;

/// Instant in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime {
    epoch_millis: i64,
}

/// Wire formats a [`DateTime`] can be written in and read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// RFC 3339 date-time, e.g. `2019-12-16T23:48:18.52Z`.
    DateTime,
    /// Seconds since the Unix epoch with an optional fractional part, e.g. `1576540098.52`.
    EpochSeconds,
}

impl DateTime {
    /// Creates a `DateTime` from a number of milliseconds since the Unix epoch.
    pub const fn from_millis(epoch_millis: i64) -> Self {
        Self { epoch_millis }
    }

    /// Creates a `DateTime` from a number of whole seconds since the Unix epoch.
    ///
    /// Values that don't fit in `i64` milliseconds saturate.
    pub const fn from_secs(epoch_seconds: i64) -> Self {
        Self {
            epoch_millis: epoch_seconds.saturating_mul(MILLIS_PER_SECOND),
        }
    }

    /// Creates a `DateTime` from fractional seconds since the Unix epoch, rounded to the
    /// nearest millisecond.
    pub fn from_secs_f64(epoch_seconds: f64) -> Self {
        Self::from_millis((epoch_seconds * MILLIS_PER_SECOND as f64).round() as i64)
    }

    /// Returns the number of milliseconds since the Unix epoch.
    pub const fn as_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Returns the whole epoch seconds, rounded towards negative infinity.
    pub fn secs(&self) -> i64 {
        div_mod_floor(self.epoch_millis, MILLIS_PER_SECOND).0
    }

    /// Returns the millisecond component; always in `0..1000`.
    pub fn subsec_millis(&self) -> u32 {
        div_mod_floor(self.epoch_millis, MILLIS_PER_SECOND).1 as u32
    }

    /// Returns the value as fractional seconds since the Unix epoch.
    pub fn as_secs_f64(&self) -> f64 {
        self.epoch_millis as f64 / MILLIS_PER_SECOND as f64
    }

    /// Parses a `DateTime` from a string using the given `format`.
    ///
    /// Sub-millisecond digits are truncated.
    pub fn from_str(s: &str, format: Format) -> Result<Self, DateTimeParseError> {
        match format {
            Format::DateTime => parse_date_time(s),
            Format::EpochSeconds => parse_epoch_seconds(s),
        }
    }

    /// Formats the `DateTime` to a string using the given `format`.
    pub fn fmt(&self, format: Format) -> Result<String, DateTimeFormatError> {
        match format {
            Format::DateTime => format_date_time(self.epoch_millis),
            Format::EpochSeconds => Ok(format_epoch_seconds(self.epoch_millis)),
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fmt(Format::DateTime) {
            Ok(date) => f.write_str(&date),
            Err(_) => f.write_str(&format_epoch_seconds(self.epoch_millis)),
        }
    }
}

impl From<SystemTime> for DateTime {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self::from_millis(i64::try_from(after.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => Self::from_millis(
                i64::try_from(before.duration().as_millis())
                    .map(|millis| -millis)
                    .unwrap_or(i64::MIN),
            ),
        }
    }
}

fn format_epoch_seconds(epoch_millis: i64) -> String {
    let sign = if epoch_millis < 0 { "-" } else { "" };
    let magnitude = epoch_millis.unsigned_abs();
    let (secs, millis) = (magnitude / 1000, magnitude % 1000);
    if millis == 0 {
        format!("{sign}{secs}")
    } else {
        let mut fraction = format!("{millis:03}");
        while fraction.ends_with('0') {
            fraction.pop();
        }
        format!("{sign}{secs}.{fraction}")
    }
}

fn parse_epoch_seconds(s: &str) -> Result<DateTime, DateTimeParseError> {
    if s.contains(['e', 'E']) {
        let value: f64 = s
            .parse()
            .map_err(|_| DateTimeParseError::invalid("epoch seconds must be a number"))?;
        if !value.is_finite() {
            return Err(DateTimeParseError::out_of_range());
        }
        return Ok(DateTime::from_secs_f64(value));
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
        Some(_) => return Err(DateTimeParseError::invalid("missing fractional digits")),
        None => (digits, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return Err(DateTimeParseError::invalid(
            "epoch seconds must only contain digits and a decimal point",
        ));
    }
    // Accumulate in i128 so the magnitude of i64::MIN fits before the sign is applied.
    let secs: i128 = whole
        .parse()
        .map_err(|_| DateTimeParseError::out_of_range())?;
    let millis = format!("{:0<3}", &fraction[..fraction.len().min(3)])
        .parse::<i128>()
        .map_err(|_| DateTimeParseError::invalid("invalid fractional seconds"))?;
    let total = secs
        .checked_mul(i128::from(MILLIS_PER_SECOND))
        .and_then(|value| value.checked_add(millis))
        .ok_or_else(DateTimeParseError::out_of_range)?;
    i64::try_from(if negative { -total } else { total })
        .map(DateTime::from_millis)
        .map_err(|_| DateTimeParseError::out_of_range())
}

fn format_date_time(epoch_millis: i64) -> Result<String, DateTimeFormatError> {
    let date = OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_millis) * NANOS_PER_MILLI)
        .map_err(|_| DateTimeFormatError::new("timestamp is outside the supported date range"))?;
    date.format(&Rfc3339)
        .map_err(|err| DateTimeFormatError::new(format!("failed to format as RFC 3339: {err}")))
}

fn parse_date_time(s: &str) -> Result<DateTime, DateTimeParseError> {
    let date = OffsetDateTime::parse(s, &Rfc3339)
        .map_err(|err| DateTimeParseError::invalid(format!("not an RFC 3339 date-time: {err}")))?;
    let (millis, _) = div_mod_floor(date.unix_timestamp_nanos(), NANOS_PER_MILLI);
    i64::try_from(millis)
        .map(DateTime::from_millis)
        .map_err(|_| DateTimeParseError::out_of_range())
}

#[derive(Debug)]
enum DateTimeParseErrorKind {
    Invalid(Cow<'static, str>),
    OutOfRange,
}

/// Failure to parse a [`DateTime`] from a string.
#[derive(Debug)]
pub struct DateTimeParseError {
    kind: DateTimeParseErrorKind,
}

impl DateTimeParseError {
    fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: DateTimeParseErrorKind::Invalid(message.into()),
        }
    }

    fn out_of_range() -> Self {
        Self {
            kind: DateTimeParseErrorKind::OutOfRange,
        }
    }
}

impl fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateTimeParseErrorKind::*;
        match &self.kind {
            Invalid(message) => write!(f, "invalid timestamp: {message}"),
            OutOfRange => write!(f, "timestamp is out of range"),
        }
    }
}

impl StdError for DateTimeParseError {}

/// Failure to format a [`DateTime`].
#[derive(Debug)]
pub struct DateTimeFormatError {
    message: Cow<'static, str>,
}

impl DateTimeFormatError {
    fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DateTimeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to format timestamp: {}", self.message)
    }
}

impl StdError for DateTimeFormatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn epoch_seconds_formatting() {
        assert_eq!(DateTime::from_secs(1576540098).fmt(Format::EpochSeconds).unwrap(), "1576540098");
        assert_eq!(
            DateTime::from_millis(1576540098520).fmt(Format::EpochSeconds).unwrap(),
            "1576540098.52"
        );
        assert_eq!(DateTime::from_millis(-1500).fmt(Format::EpochSeconds).unwrap(), "-1.5");
        assert_eq!(DateTime::from_millis(-1).fmt(Format::EpochSeconds).unwrap(), "-0.001");
    }

    #[test]
    fn epoch_seconds_parsing() {
        let parse = |s| DateTime::from_str(s, Format::EpochSeconds).unwrap();
        assert_eq!(parse("1576540098"), DateTime::from_secs(1576540098));
        assert_eq!(parse("1576540098.52"), DateTime::from_millis(1576540098520));
        assert_eq!(parse("-1.5"), DateTime::from_millis(-1500));
        assert_eq!(parse("1.2345"), DateTime::from_millis(1234));
        assert_eq!(parse("1.5e3"), DateTime::from_secs(1500));
        assert!(DateTime::from_str("1.", Format::EpochSeconds).is_err());
        assert!(DateTime::from_str("abc", Format::EpochSeconds).is_err());
        assert!(DateTime::from_str("", Format::EpochSeconds).is_err());
    }

    #[test]
    fn epoch_seconds_at_the_ends_of_the_range() {
        for millis in [i64::MIN, i64::MIN + 1, i64::MAX, 1 << 62] {
            let date = DateTime::from_millis(millis);
            let text = date.fmt(Format::EpochSeconds).unwrap();
            assert_eq!(DateTime::from_str(&text, Format::EpochSeconds).unwrap(), date, "{text}");
        }
        assert_eq!(
            DateTime::from_millis(i64::MIN).fmt(Format::EpochSeconds).unwrap(),
            "-9223372036854775.808"
        );
        assert!(DateTime::from_str("9223372036854775.808", Format::EpochSeconds).is_err());
        assert!(DateTime::from_str("-9223372036854775.809", Format::EpochSeconds).is_err());
    }

    #[test]
    fn date_time_formatting() {
        let date = DateTime::from_secs(1576540098);
        assert_eq!(date.fmt(Format::DateTime).unwrap(), "2019-12-16T23:48:18Z");
        assert_eq!(date.to_string(), "2019-12-16T23:48:18Z");
        assert_eq!(
            DateTime::from_str("2019-12-16T23:48:18Z", Format::DateTime).unwrap(),
            date
        );
    }

    #[test]
    fn secs_and_subsec_millis_floor_for_negative_values() {
        let date = DateTime::from_millis(-1500);
        assert_eq!(date.secs(), -2);
        assert_eq!(date.subsec_millis(), 500);
    }

    proptest! {
        #[test]
        fn epoch_seconds_round_trip(millis in any::<i64>()) {
            let date = DateTime::from_millis(millis);
            let text = date.fmt(Format::EpochSeconds).unwrap();
            prop_assert_eq!(DateTime::from_str(&text, Format::EpochSeconds).unwrap(), date);
        }

        #[test]
        fn date_time_round_trip(millis in 0i64..253_402_300_799_000i64) {
            let date = DateTime::from_millis(millis);
            let text = date.fmt(Format::DateTime).unwrap();
            prop_assert_eq!(DateTime::from_str(&text, Format::DateTime).unwrap(), date);
        }
    }
}
