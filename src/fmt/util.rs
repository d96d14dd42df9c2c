use crate::{
    error::{fmt::Error as E, Error, ErrorContext},
    fmt::Parsed,
    util::parse,
};

/// A simple formatter for converting `i64` values to ASCII byte strings.
///
/// This avoids going through the formatting machinery for every component
/// of a date or time, and makes padding and forced signs trivial.
///
/// By default, this only includes the sign if it's negative. To always include
/// the sign, use `force_sign`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    force_sign: bool,
    minimum_digits: u8,
}

impl DecimalFormatter {
    /// Creates a new decimal formatter using the default configuration.
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { force_sign: false, minimum_digits: 0 }
    }

    /// Format the given value using this configuration as a decimal ASCII
    /// number.
    pub(crate) const fn format(&self, value: i64) -> Decimal {
        Decimal::new(self, value)
    }

    /// Forces the sign to be rendered, even if it's positive. Zero is
    /// rendered with a `+`.
    pub(crate) const fn force_sign(self, yes: bool) -> DecimalFormatter {
        DecimalFormatter { force_sign: yes, ..self }
    }

    /// The minimum number of digits that this number should be formatted
    /// with. If the number would have fewer digits than this, then it is
    /// padded out with zeros until the minimum is reached. The sign does not
    /// count as a digit.
    ///
    /// The minimum number of digits is capped at the maximum number of digits
    /// for an i64 value (which is 19).
    pub(crate) const fn padding(self, mut digits: u8) -> DecimalFormatter {
        if digits > Decimal::MAX_I64_DIGITS {
            digits = Decimal::MAX_I64_DIGITS;
        }
        DecimalFormatter { minimum_digits: digits, ..self }
    }
}

/// A formatted decimal number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Self::MAX_I64_LEN as usize],
    start: u8,
    end: u8,
}

impl Decimal {
    /// Discovered via `i64::MIN.to_string().len()`.
    const MAX_I64_LEN: u8 = 20;
    /// Discovered via `i64::MAX.to_string().len()`.
    const MAX_I64_DIGITS: u8 = 19;

    /// Using the given formatter, turn the value given into a decimal
    /// representation using ASCII bytes.
    const fn new(formatter: &DecimalFormatter, value: i64) -> Decimal {
        let negative = value < 0;
        // `unsigned_abs` sidesteps the one value without a positive twin.
        let mut value = value.unsigned_abs();
        let mut decimal = Decimal {
            buf: [0; Self::MAX_I64_LEN as usize],
            start: Self::MAX_I64_LEN,
            end: Self::MAX_I64_LEN,
        };
        loop {
            decimal.start -= 1;

            let digit = (value % 10) as u8;
            value /= 10;
            decimal.buf[decimal.start as usize] = b'0' + digit;
            if value == 0 {
                break;
            }
        }
        while decimal.len() < formatter.minimum_digits {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'0';
        }
        if negative {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'-';
        } else if formatter.force_sign {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'+';
        }
        decimal
    }

    /// Returns the total number of ASCII bytes (including the sign) that are
    /// used to represent this decimal number.
    const fn len(&self) -> u8 {
        self.end - self.start
    }

    /// Returns the ASCII representation of this decimal as a string slice.
    pub(crate) fn as_str(&self) -> &str {
        let bytes = &self.buf[usize::from(self.start)..usize::from(self.end)];
        // SAFETY: Every byte written to `self.buf` within `start..end` is an
        // ASCII digit or sign, and thus valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(bytes) }
    }
}

/// A simple formatter for converting fractional components to ASCII byte
/// strings.
///
/// We only support precision to 9 decimal places, which corresponds to
/// nanosecond precision as a fractional second component.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractionalFormatter {
    precision: Option<u8>,
}

impl FractionalFormatter {
    /// Creates a new fractional formatter that trims trailing zeros.
    pub(crate) const fn new() -> FractionalFormatter {
        FractionalFormatter { precision: None }
    }

    /// Format the given value using this configuration as a decimal ASCII
    /// fractional number.
    pub(crate) const fn format(&self, value: i32) -> Fractional {
        Fractional::new(self, value)
    }

    /// Set the precision.
    ///
    /// If the `precision` is greater than `9`, then it is clamped to `9`.
    ///
    /// When the precision is not set, then trailing zeros are trimmed.
    pub(crate) const fn precision(
        self,
        precision: Option<u8>,
    ) -> FractionalFormatter {
        let precision = match precision {
            Some(p) if p > 9 => Some(9),
            p => p,
        };
        FractionalFormatter { precision }
    }
}

/// A formatted fractional number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Fractional {
    buf: [u8; Self::MAX_LEN as usize],
    end: u8,
}

impl Fractional {
    /// Since we don't support precision bigger than this.
    const MAX_LEN: u8 = 9;

    /// Using the given formatter, turn the value given into a fractional
    /// decimal representation using ASCII bytes.
    ///
    /// The fractional number returned is empty when the precision is `0`, or
    /// when the precision is not set and the value is `0`.
    ///
    /// This panics if the value given isn't in the range `0..=999_999_999`.
    const fn new(formatter: &FractionalFormatter, mut value: i32) -> Fractional {
        assert!(0 <= value && value <= 999_999_999);
        let mut fractional = Fractional {
            buf: [b'0'; Self::MAX_LEN as usize],
            end: Self::MAX_LEN,
        };
        let mut i = 9;
        while value != 0 {
            i -= 1;
            fractional.buf[i] += (value % 10) as u8;
            value /= 10;
        }
        if let Some(precision) = formatter.precision {
            fractional.end = precision;
        } else {
            while fractional.end > 0
                && fractional.buf[fractional.end as usize - 1] == b'0'
            {
                fractional.end -= 1;
            }
        }
        fractional
    }

    /// Returns the ASCII representation of this fractional number as a string
    /// slice. The slice returned may be empty.
    pub(crate) fn as_str(&self) -> &str {
        let bytes = &self.buf[..usize::from(self.end)];
        // SAFETY: `self.buf` only ever contains ASCII digits.
        unsafe { core::str::from_utf8_unchecked(bytes) }
    }
}

/// Extension methods for writing formatted integers.
pub(crate) trait WriteExt: core::fmt::Write {
    /// Write the given number as a decimal using ASCII digits.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<i64>,
    ) -> core::fmt::Result {
        self.write_str(formatter.format(n.into()).as_str())
    }

    /// Write the given fractional number using ASCII digits.
    #[inline]
    fn write_fraction(
        &mut self,
        formatter: &FractionalFormatter,
        n: i32,
    ) -> core::fmt::Result {
        self.write_str(formatter.format(n).as_str())
    }
}

impl<W: core::fmt::Write + ?Sized> WriteExt for W {}

/// Parses an optional fractional number from the start of `input`.
///
/// If `input` does not begin with a `.` (or a `,`), then this returns `None`
/// and no input is consumed. Otherwise, between 1 and 9 ASCII digits are
/// parsed after the decimal separator and returned scaled to nanoseconds.
pub(crate) fn parse_fraction<'i>(
    input: &'i [u8],
) -> Result<Parsed<'i, Option<i32>>, Error> {
    let Some(input) = input
        .strip_prefix(b".")
        .or_else(|| input.strip_prefix(b","))
    else {
        return Ok(Parsed { value: None, input });
    };
    let (digits, input) = parse::digits(input);
    if digits.is_empty() {
        return Err(Error::from(E::ExpectedFractionDigits));
    }
    let nanos = parse::fraction(digits).context(E::FailedFractionalSecondInTime)?;
    Ok(Parsed { value: Some(nanos), input })
}
