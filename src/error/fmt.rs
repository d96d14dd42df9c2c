use alloc::boxed::Box;

use crate::{error, util::escape};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ExpectedColonFoundByte { byte: u8 },
    ExpectedColonFoundEndOfInput,
    ExpectedDateDesignatorFoundByte { byte: u8, expected: &'static str },
    ExpectedDateDesignatorFoundEndOfInput { expected: &'static str },
    ExpectedDigits,
    ExpectedDigitsAfterSign { sign: u8 },
    ExpectedDurationDesignatorFoundByte { byte: u8 },
    ExpectedDurationDesignatorFoundEndOfInput,
    ExpectedFourDigitYear,
    ExpectedFractionDigits,
    ExpectedOffsetFoundByte { byte: u8 },
    ExpectedOffsetFoundEndOfInput,
    ExpectedSeparatorFoundByte { byte: u8 },
    ExpectedSeparatorFoundEndOfInput,
    ExpectedSignedYear { max_digits: u8 },
    ExpectedTimeDesignatorFoundByte { byte: u8 },
    ExpectedTimeDesignatorFoundEndOfInput,
    ExpectedTimeSeparatorFoundByte { byte: u8 },
    ExpectedTimeSeparatorFoundEndOfInput,
    ExpectedTimeUnits,
    ExpectedTwoDigitDay,
    ExpectedTwoDigitHour,
    ExpectedTwoDigitMinute,
    ExpectedTwoDigitMonth,
    ExpectedTwoDigitSecond,
    ExpectedUnits,
    FailedDayInDate,
    FailedFractionalSecondInTime,
    FailedHourInTime,
    FailedMinuteInTime,
    FailedMonthInDate,
    FailedOffset,
    FailedSecondInTime,
    FailedYearInDate,
    FractionNotOnSeconds { designator: u8 },
    FractionTooLong,
    IntoFull { value: Box<str>, unparsed: Box<[u8]> },
    InvalidDigit { byte: u8, digits: Box<str> },
    InvalidYearZero,
    NumberTooBig { digits: Box<str> },
    UnitOutOfOrder { designator: u8 },
    YearNeedsSign,
}

impl Error {
    pub(crate) fn into_full_error(
        value: &dyn core::fmt::Display,
        unparsed: &[u8],
    ) -> Error {
        Error::IntoFull {
            value: alloc::string::ToString::to_string(value).into(),
            unparsed: unparsed.into(),
        }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            ExpectedColonFoundByte { byte } => write!(
                f,
                "expected `:` separator, but found `{byte}`",
                byte = escape::Byte(byte),
            ),
            ExpectedColonFoundEndOfInput => {
                f.write_str("expected `:` separator, but found end of input")
            }
            ExpectedDateDesignatorFoundByte { byte, expected } => write!(
                f,
                "expected to find date unit designator suffix \
                 ({expected}), but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedDateDesignatorFoundEndOfInput { expected } => write!(
                f,
                "expected to find date unit designator suffix \
                 ({expected}), but found end of input",
            ),
            ExpectedDigits => {
                f.write_str("expected one or more digits, but found none")
            }
            ExpectedDigitsAfterSign { sign } => write!(
                f,
                "expected digits after sign `{sign}`, but found none",
                sign = escape::Byte(sign),
            ),
            ExpectedDurationDesignatorFoundByte { byte } => write!(
                f,
                "expected to find duration beginning with `P` or `p`, \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedDurationDesignatorFoundEndOfInput => f.write_str(
                "expected to find duration beginning with `P` or `p`, \
                 but found end of input",
            ),
            ExpectedFourDigitYear => f.write_str(
                "expected four digit year \
                 (or leading sign for longer years)",
            ),
            ExpectedFractionDigits => f.write_str(
                "found decimal separator, but no digits after it",
            ),
            ExpectedOffsetFoundByte { byte } => write!(
                f,
                "expected `Z` or a UTC offset beginning with `+` or `-`, \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedOffsetFoundEndOfInput => f.write_str(
                "expected `Z` or a UTC offset beginning with `+` or `-`, \
                 but found end of input",
            ),
            ExpectedSeparatorFoundByte { byte } => write!(
                f,
                "expected `-` separator, but found `{byte}`",
                byte = escape::Byte(byte),
            ),
            ExpectedSeparatorFoundEndOfInput => {
                f.write_str("expected `-` separator, but found end of input")
            }
            ExpectedSignedYear { max_digits } => write!(
                f,
                "expected four to {max_digits} digit year \
                 after leading sign",
            ),
            ExpectedTimeDesignatorFoundByte { byte } => write!(
                f,
                "expected to find time unit designator suffix \
                 (`H`, `M` or `S`), but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedTimeDesignatorFoundEndOfInput => f.write_str(
                "expected to find time unit designator suffix \
                 (`H`, `M` or `S`), but found end of input",
            ),
            ExpectedTimeSeparatorFoundByte { byte } => write!(
                f,
                "expected `T` or `t` between date and time, \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedTimeSeparatorFoundEndOfInput => f.write_str(
                "expected `T` or `t` between date and time, \
                 but found end of input",
            ),
            ExpectedTimeUnits => f.write_str(
                "found a time designator (`T` or `t`) in an ISO 8601 \
                 duration string, but did not find any time units",
            ),
            ExpectedTwoDigitDay => {
                f.write_str("expected two digit day, but found end of input")
            }
            ExpectedTwoDigitHour => {
                f.write_str("expected two digit hour, but found end of input")
            }
            ExpectedTwoDigitMinute => f.write_str(
                "expected two digit minute, but found end of input",
            ),
            ExpectedTwoDigitMonth => {
                f.write_str("expected two digit month, but found end of input")
            }
            ExpectedTwoDigitSecond => f.write_str(
                "expected two digit second, but found end of input",
            ),
            ExpectedUnits => f.write_str(
                "expected at least one unit in ISO 8601 duration, \
                 but found none",
            ),
            FailedDayInDate => f.write_str("failed to parse day in date"),
            FailedFractionalSecondInTime => {
                f.write_str("failed to parse fractional seconds in time")
            }
            FailedHourInTime => f.write_str("failed to parse hour in time"),
            FailedMinuteInTime => {
                f.write_str("failed to parse minute in time")
            }
            FailedMonthInDate => f.write_str("failed to parse month in date"),
            FailedOffset => f.write_str("failed to parse UTC offset"),
            FailedSecondInTime => {
                f.write_str("failed to parse second in time")
            }
            FailedYearInDate => f.write_str("failed to parse year in date"),
            FractionNotOnSeconds { designator } => write!(
                f,
                "found a fractional value on unit `{designator}`, \
                 but only seconds may have a fractional part",
                designator = escape::Byte(designator),
            ),
            FractionTooLong => f.write_str(
                "found more than 9 digits after the decimal separator",
            ),
            IntoFull { ref value, ref unparsed } => write!(
                f,
                "parsed value '{value}', but unparsed input {unparsed:?} \
                 remains (expected no unparsed input)",
                unparsed = escape::Bytes(unparsed),
            ),
            InvalidDigit { byte, ref digits } => write!(
                f,
                "invalid digit, expected 0-9 but got {byte:?} in \"{digits}\"",
                byte = escape::Byte(byte),
            ),
            InvalidYearZero => f.write_str(
                "year zero must be written with a `+` sign or none at all",
            ),
            NumberTooBig { ref digits } => write!(
                f,
                "number \"{digits}\" is too big to parse into a 64-bit integer",
            ),
            UnitOutOfOrder { designator } => write!(
                f,
                "found unit designator `{designator}` out of order \
                 or more than once",
                designator = escape::Byte(designator),
            ),
            YearNeedsSign => f.write_str(
                "years with more than four digits require a leading sign",
            ),
        }
    }
}
