use crate::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    error::{fmt::Error as E, Error, ErrorContext},
    fmt::{iso8601::what, util::parse_fraction, Parsed},
    math,
    tz::offset::Offset,
    util::{
        common::{self, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
        parse,
    },
    Duration, Instant, Period, PeriodDuration,
};

/// The number of year digits permitted after a sign for civil dates.
const DATE_YEAR_DIGITS: u8 = 6;
/// The number of year digits permitted after a sign for instants. One more
/// than for dates, since instants span years `-1000000..=1000000`.
const INSTANT_YEAR_DIGITS: u8 = 7;

/// The year, month and day of a date as they appeared in the input.
///
/// These are not validated beyond being made of digits.
#[derive(Debug)]
struct DateFields {
    year: i32,
    month: i8,
    day: i8,
}

/// A single, possibly signed, unit value in an ISO 8601 duration.
#[derive(Clone, Copy, Debug)]
struct UnitValue {
    negative: bool,
    magnitude: i64,
}

impl UnitValue {
    fn get(self) -> i64 {
        // `magnitude` comes from `parse::i64`, so it can't be `i64::MIN`.
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

/// The unit values of an ISO 8601 duration, collected while parsing.
#[derive(Debug, Default)]
struct DurationUnits {
    negative: bool,
    any: bool,
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanos: i32,
}

impl DurationUnits {
    fn set_date_unit(&mut self, designator: u8, value: UnitValue) {
        let slot = match designator {
            b'Y' => &mut self.years,
            b'M' => &mut self.months,
            b'W' => &mut self.weeks,
            _ => &mut self.days,
        };
        *slot = value.get();
        self.any = true;
    }

    fn set_time_unit(
        &mut self,
        designator: u8,
        value: UnitValue,
        fraction: Option<i32>,
    ) {
        match designator {
            b'H' => self.hours = value.get(),
            b'M' => self.minutes = value.get(),
            _ => {
                self.seconds = value.get();
                let nanos = fraction.unwrap_or(0);
                // The fraction takes the sign of its seconds, even when the
                // seconds are `-0`.
                self.nanos = if value.negative { -nanos } else { nanos };
            }
        }
        self.any = true;
    }

    /// Returns the days and time units as a single duration, for the
    /// `Duration` grammar where `D` means exactly 86,400 seconds.
    fn to_duration(&self) -> Result<Duration, Error> {
        let days = math::multiply_exact(self.days, SECONDS_PER_DAY)?;
        self.time_duration(days)
    }

    /// Returns only the `H`, `M` and `S` units as a duration. Days belong to
    /// the period part of a `PeriodDuration`.
    fn to_time_duration(&self) -> Result<Duration, Error> {
        self.time_duration(0)
    }

    fn time_duration(&self, mut seconds: i64) -> Result<Duration, Error> {
        seconds = math::add_exact(
            seconds,
            math::multiply_exact(self.hours, SECONDS_PER_HOUR)?,
        )?;
        seconds = math::add_exact(
            seconds,
            math::multiply_exact(self.minutes, SECONDS_PER_MINUTE)?,
        )?;
        seconds = math::add_exact(seconds, self.seconds)?;
        let duration = Duration::of_seconds(seconds, i64::from(self.nanos))?;
        if self.negative {
            duration.negated()
        } else {
            Ok(duration)
        }
    }

    fn to_period(&self) -> Result<Period, Error> {
        let days = math::add_exact(
            self.days,
            math::multiply_exact(self.weeks, 7)?,
        )?;
        let period = Period::of(
            math::to_i32_exact(self.years)?,
            math::to_i32_exact(self.months)?,
            math::to_i32_exact(days)?,
        );
        if self.negative {
            period.negated()
        } else {
            Ok(period)
        }
    }

    fn to_period_duration(&self) -> Result<PeriodDuration, Error> {
        Ok(PeriodDuration::of(self.to_period()?, self.to_time_duration()?))
    }
}

/// A parser for the ISO 8601 forms of every value type in this crate.
#[derive(Debug)]
pub(crate) struct DateTimeParser {
    /// There are currently no configuration options for this parser.
    _priv: (),
}

impl DateTimeParser {
    /// Create a new ISO 8601 parser with the default configuration.
    pub(crate) const fn new() -> DateTimeParser {
        DateTimeParser { _priv: () }
    }

    /// Parses `[±]YYYY-MM-DD`.
    pub(crate) fn parse_local_date<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<LocalDate, Error> {
        let input = input.as_ref();
        full(what::DATE, input, |input| self.parse_date(input))
    }

    /// Parses `HH:MM[:SS[.fffffffff]]`.
    pub(crate) fn parse_local_time<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<LocalTime, Error> {
        let input = input.as_ref();
        full(what::TIME, input, |input| self.parse_time(input))
    }

    /// Parses a date and a time separated by `T`.
    pub(crate) fn parse_local_datetime<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<LocalDateTime, Error> {
        let input = input.as_ref();
        full(what::DATETIME, input, |input| self.parse_datetime(input))
    }

    /// Parses a datetime followed by `Z` or a UTC offset, and returns the
    /// instant it denotes.
    pub(crate) fn parse_instant<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Instant, Error> {
        let input = input.as_ref();
        full(what::INSTANT, input, |input| self.parse_instant_spec(input))
    }

    /// Parses `±HH:MM[:SS]` into a number of seconds.
    ///
    /// The offset is not checked against any range beyond its minutes and
    /// seconds being valid.
    pub(crate) fn parse_offset<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<i32, Error> {
        let input = input.as_ref();
        full(what::OFFSET, input, |input| self.parse_offset_spec(input))
    }

    /// Parses `[±]P[±nD][T[±nH][±nM][±n[.f]S]]`.
    pub(crate) fn parse_duration<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration, Error> {
        let input = input.as_ref();
        full(what::DURATION, input, |input| {
            self.parse_units(input, b"D", "`D`", true)?
                .and_then(|units| units.to_duration())
        })
    }

    /// Parses `[±]P[±nY][±nM][±nW][±nD]`.
    pub(crate) fn parse_period<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Period, Error> {
        let input = input.as_ref();
        full(what::PERIOD, input, |input| {
            self.parse_units(input, b"YMWD", "`Y`, `M`, `W` or `D`", false)?
                .and_then(|units| units.to_period())
        })
    }

    /// Parses a period followed by the time part of a duration, like
    /// `P1Y2M3DT4H5M6.7S`.
    pub(crate) fn parse_period_duration<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<PeriodDuration, Error> {
        let input = input.as_ref();
        full(what::PERIOD_DURATION, input, |input| {
            self.parse_units(input, b"YMWD", "`Y`, `M`, `W` or `D`", true)?
                .and_then(|units| units.to_period_duration())
        })
    }

    fn parse_date<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, LocalDate>, Error> {
        self.parse_date_fields(input, DATE_YEAR_DIGITS)?
            .and_then(|f| LocalDate::of(f.year, f.month, f.day))
    }

    fn parse_datetime<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, LocalDateTime>, Error> {
        let Parsed { value: date, input } = self.parse_date(input)?;
        let Parsed { input, .. } = self.parse_time_separator(input)?;
        let Parsed { value: time, input } = self.parse_time(input)?;
        Ok(Parsed { value: LocalDateTime::of(date, time), input })
    }

    fn parse_instant_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Instant>, Error> {
        let Parsed { value: date, input } =
            self.parse_date_fields(input, INSTANT_YEAR_DIGITS)?;
        let Parsed { input, .. } = self.parse_time_separator(input)?;
        let Parsed { value: time, input } = self.parse_time(input)?;
        let Parsed { value: offset, input } = self
            .parse_instant_offset(input)
            .context(E::FailedOffset)?;

        // The year may be outside of what `LocalDate` supports, so the
        // calendar is checked by hand here.
        if !(1..=12).contains(&date.month) {
            return Err(Error::range("month", date.month, 1, 12));
        }
        let max_day = common::days_in_month(date.year, date.month);
        if !(1..=max_day).contains(&date.day) {
            return Err(Error::range("day", date.day, 1, max_day));
        }
        let epoch_day = common::to_epoch_day(date.year, date.month, date.day);
        let second = epoch_day * SECONDS_PER_DAY
            + i64::from(time.to_second_of_day())
            - i64::from(offset.seconds());
        let instant = Instant::of_epoch_second(second, i64::from(time.nano()))?;
        Ok(Parsed { value: instant, input })
    }

    fn parse_date_fields<'i>(
        &self,
        input: &'i [u8],
        max_year_digits: u8,
    ) -> Result<Parsed<'i, DateFields>, Error> {
        let Parsed { value: year, input } = self
            .parse_year(input, max_year_digits)
            .context(E::FailedYearInDate)?;
        let Parsed { input, .. } = self.parse_date_separator(input)?;
        let Parsed { value: month, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitMonth)
            .context(E::FailedMonthInDate)?;
        let Parsed { input, .. } = self.parse_date_separator(input)?;
        let Parsed { value: day, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitDay)
            .context(E::FailedDayInDate)?;
        Ok(Parsed { value: DateFields { year, month, day }, input })
    }

    fn parse_time<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, LocalTime>, Error> {
        let Parsed { value: hour, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitHour)
            .context(E::FailedHourInTime)?;
        let Parsed { input, .. } = self.parse_colon(input)?;
        let Parsed { value: minute, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitMinute)
            .context(E::FailedMinuteInTime)?;
        let Some(input) = input.strip_prefix(b":") else {
            let time = LocalTime::of(hour, minute, 0, 0)?;
            return Ok(Parsed { value: time, input });
        };
        let Parsed { value: second, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitSecond)
            .context(E::FailedSecondInTime)?;
        let Parsed { value: nanosecond, input } = parse_fraction(input)?;
        let time = LocalTime::of(hour, minute, second, nanosecond.unwrap_or(0))?;
        Ok(Parsed { value: time, input })
    }

    fn parse_year<'i>(
        &self,
        input: &'i [u8],
        max_digits: u8,
    ) -> Result<Parsed<'i, i32>, Error> {
        let Parsed { value: sign, input } = self.parse_sign(input);
        let (digits, input) = parse::digits(input);
        match sign {
            None if digits.len() < 4 => {
                return Err(Error::from(E::ExpectedFourDigitYear));
            }
            None if digits.len() > 4 => {
                return Err(Error::from(E::YearNeedsSign));
            }
            Some(_) if !(4..=usize::from(max_digits)).contains(&digits.len()) => {
                return Err(Error::from(E::ExpectedSignedYear { max_digits }));
            }
            _ => {}
        }
        // OK because there are at most 7 digits.
        let year = parse::i64(digits)? as i32;
        if sign == Some(b'-') {
            if year == 0 {
                return Err(Error::from(E::InvalidYearZero));
            }
            return Ok(Parsed { value: -year, input });
        }
        Ok(Parsed { value: year, input })
    }

    fn parse_two_digits<'i>(
        &self,
        input: &'i [u8],
        missing: E,
    ) -> Result<Parsed<'i, i8>, Error> {
        let (digits, input) = parse::split(input, 2).ok_or(missing)?;
        // OK because two digits always fit in an `i8`.
        let value = parse::i64(digits)? as i8;
        Ok(Parsed { value, input })
    }

    fn parse_instant_offset<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        let Some((&first, tail)) = input.split_first() else {
            return Err(Error::from(E::ExpectedOffsetFoundEndOfInput));
        };
        if matches!(first, b'Z' | b'z') {
            return Ok(Parsed { value: Offset::UTC, input: tail });
        }
        if !matches!(first, b'+' | b'-') {
            return Err(Error::from(E::ExpectedOffsetFoundByte { byte: first }));
        }
        self.parse_offset_spec(input)?.and_then(Offset::new)
    }

    fn parse_offset_spec<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, i32>, Error> {
        let Parsed { value: sign, input } = self.parse_sign(input);
        let Some(sign) = sign else {
            return Err(match input.first() {
                None => Error::from(E::ExpectedOffsetFoundEndOfInput),
                Some(&byte) => Error::from(E::ExpectedOffsetFoundByte { byte }),
            });
        };
        let Parsed { value: hours, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitHour)
            .context(E::FailedHourInTime)?;
        let Parsed { input, .. } = self.parse_colon(input)?;
        let Parsed { value: minutes, input } = self
            .parse_two_digits(input, E::ExpectedTwoDigitMinute)
            .context(E::FailedMinuteInTime)?;
        if minutes > 59 {
            return Err(Error::range("offset minutes", minutes, 0, 59));
        }
        let (seconds, input) = match input.strip_prefix(b":") {
            None => (0, input),
            Some(input) => {
                let Parsed { value: seconds, input } = self
                    .parse_two_digits(input, E::ExpectedTwoDigitSecond)
                    .context(E::FailedSecondInTime)?;
                if seconds > 59 {
                    return Err(Error::range("offset seconds", seconds, 0, 59));
                }
                (seconds, input)
            }
        };
        let total = i32::from(hours) * 3_600
            + i32::from(minutes) * 60
            + i32::from(seconds);
        let value = if sign == b'-' { -total } else { total };
        Ok(Parsed { value, input })
    }

    /// Parses the units of an ISO 8601 duration.
    ///
    /// `date_designators` lists the date units permitted, in the order they
    /// must appear. When `allow_time` is false, the input ends before any
    /// `T`.
    fn parse_units<'i>(
        &self,
        input: &'i [u8],
        date_designators: &'static [u8],
        expected: &'static str,
        allow_time: bool,
    ) -> Result<Parsed<'i, DurationUnits>, Error> {
        let mut units = DurationUnits::default();
        let Parsed { value: sign, input } = self.parse_sign(input);
        units.negative = sign == Some(b'-');

        let Parsed { input, .. } = self.parse_duration_designator(input)?;
        let Parsed { mut input, .. } = self.parse_date_units(
            input,
            date_designators,
            expected,
            &mut units,
        )?;
        if allow_time {
            if let Some(tail) =
                input.strip_prefix(b"T").or_else(|| input.strip_prefix(b"t"))
            {
                let any_before = units.any;
                units.any = false;
                input = self.parse_time_units(tail, &mut units)?.input;
                if !units.any {
                    return Err(Error::from(E::ExpectedTimeUnits));
                }
                units.any |= any_before;
            }
        }
        if !units.any {
            return Err(Error::from(E::ExpectedUnits));
        }
        Ok(Parsed { value: units, input })
    }

    fn parse_date_units<'i>(
        &self,
        mut input: &'i [u8],
        designators: &'static [u8],
        expected: &'static str,
        units: &mut DurationUnits,
    ) -> Result<Parsed<'i, ()>, Error> {
        let mut next = 0;
        loop {
            let parsed = self.parse_unit_value(input)?;
            input = parsed.input;
            let Some(value) = parsed.value else { break };

            let (&designator, rest) = input
                .split_first()
                .ok_or(E::ExpectedDateDesignatorFoundEndOfInput { expected })?;
            let upper = designator.to_ascii_uppercase();
            let Some(position) = designators.iter().position(|&d| d == upper)
            else {
                return Err(Error::from(E::ExpectedDateDesignatorFoundByte {
                    byte: designator,
                    expected,
                }));
            };
            if position < next {
                return Err(Error::from(E::UnitOutOfOrder { designator }));
            }
            next = position + 1;
            units.set_date_unit(upper, value);
            input = rest;
        }
        Ok(Parsed { value: (), input })
    }

    fn parse_time_units<'i>(
        &self,
        mut input: &'i [u8],
        units: &mut DurationUnits,
    ) -> Result<Parsed<'i, ()>, Error> {
        const DESIGNATORS: &[u8] = b"HMS";

        let mut next = 0;
        loop {
            let parsed = self.parse_unit_value(input)?;
            input = parsed.input;
            let Some(value) = parsed.value else { break };

            let parsed = parse_fraction(input)?;
            input = parsed.input;
            let fraction = parsed.value;

            let (&designator, rest) = input
                .split_first()
                .ok_or(E::ExpectedTimeDesignatorFoundEndOfInput)?;
            let upper = designator.to_ascii_uppercase();
            let Some(position) = DESIGNATORS.iter().position(|&d| d == upper)
            else {
                return Err(Error::from(E::ExpectedTimeDesignatorFoundByte {
                    byte: designator,
                }));
            };
            if position < next {
                return Err(Error::from(E::UnitOutOfOrder { designator }));
            }
            if fraction.is_some() && upper != b'S' {
                return Err(Error::from(E::FractionNotOnSeconds { designator }));
            }
            next = position + 1;
            units.set_time_unit(upper, value, fraction);
            input = rest;
        }
        Ok(Parsed { value: (), input })
    }

    /// Parses an optionally signed integer. If there is neither a sign nor a
    /// digit, then `None` is returned and no input is consumed.
    fn parse_unit_value<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<UnitValue>>, Error> {
        let Parsed { value: sign, input: rest } = self.parse_sign(input);
        let (digits, rest) = parse::digits(rest);
        if digits.is_empty() {
            if let Some(sign) = sign {
                return Err(Error::from(E::ExpectedDigitsAfterSign { sign }));
            }
            return Ok(Parsed { value: None, input });
        }
        let value = UnitValue {
            negative: sign == Some(b'-'),
            magnitude: parse::i64(digits)?,
        };
        Ok(Parsed { value: Some(value), input: rest })
    }

    fn parse_duration_designator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let (&first, input) = input
            .split_first()
            .ok_or(E::ExpectedDurationDesignatorFoundEndOfInput)?;
        if !matches!(first, b'P' | b'p') {
            return Err(Error::from(E::ExpectedDurationDesignatorFoundByte {
                byte: first,
            }));
        }
        Ok(Parsed { value: (), input })
    }

    fn parse_date_separator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let (&first, input) =
            input.split_first().ok_or(E::ExpectedSeparatorFoundEndOfInput)?;
        if first != b'-' {
            return Err(Error::from(E::ExpectedSeparatorFoundByte {
                byte: first,
            }));
        }
        Ok(Parsed { value: (), input })
    }

    fn parse_time_separator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let (&first, input) = input
            .split_first()
            .ok_or(E::ExpectedTimeSeparatorFoundEndOfInput)?;
        if !matches!(first, b'T' | b't') {
            return Err(Error::from(E::ExpectedTimeSeparatorFoundByte {
                byte: first,
            }));
        }
        Ok(Parsed { value: (), input })
    }

    fn parse_colon<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let (&first, input) =
            input.split_first().ok_or(E::ExpectedColonFoundEndOfInput)?;
        if first != b':' {
            return Err(Error::from(E::ExpectedColonFoundByte { byte: first }));
        }
        Ok(Parsed { value: (), input })
    }

    /// Parses an ASCII `+` or `-`, returning the sign byte found.
    fn parse_sign<'i>(&self, input: &'i [u8]) -> Parsed<'i, Option<u8>> {
        match input.split_first() {
            Some((&sign @ (b'+' | b'-'), tail)) => {
                Parsed { value: Some(sign), input: tail }
            }
            _ => Parsed { value: None, input },
        }
    }
}

/// Runs `parse` on all of `input`, labeling any error with what was being
/// parsed and the input itself.
fn full<'i, V: core::fmt::Display>(
    what: &'static str,
    input: &'i [u8],
    parse: impl FnOnce(&'i [u8]) -> Result<Parsed<'i, V>, Error>,
) -> Result<V, Error> {
    parse(input)
        .and_then(Parsed::into_full)
        .with_context(|| Error::parse(what, input))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    static P: DateTimeParser = DateTimeParser::new();

    #[test]
    fn ok_date() {
        let d = |s: &str| P.parse_local_date(s).unwrap().to_string();
        assert_eq!(d("2024-06-19"), "2024-06-19");
        assert_eq!(d("+2024-06-19"), "2024-06-19");
        assert_eq!(d("+012345-01-01"), "+12345-01-01");
        assert_eq!(d("-0001-12-31"), "-0001-12-31");
        assert_eq!(d("-999999-01-01"), "-999999-01-01");
        assert_eq!(d("+0000-02-29"), "0000-02-29");
    }

    #[test]
    fn err_date() {
        insta::assert_snapshot!(
            P.parse_local_date("2023-02-29").unwrap_err(),
            @r#"failed to parse "2023-02-29" as a date: parameter 'day' with value 29 is not in the required range of 1..=28"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("12345-01-01").unwrap_err(),
            @r#"failed to parse "12345-01-01" as a date: failed to parse year in date: years with more than four digits require a leading sign"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("+1000000-01-01").unwrap_err(),
            @r#"failed to parse "+1000000-01-01" as a date: failed to parse year in date: expected four to 6 digit year after leading sign"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("-0000-01-01").unwrap_err(),
            @r#"failed to parse "-0000-01-01" as a date: failed to parse year in date: year zero must be written with a `+` sign or none at all"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("2024/01/01").unwrap_err(),
            @r#"failed to parse "2024/01/01" as a date: expected `-` separator, but found `/`"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("2024-01-0").unwrap_err(),
            @r#"failed to parse "2024-01-0" as a date: failed to parse day in date: expected two digit day, but found end of input"#,
        );
        insta::assert_snapshot!(
            P.parse_local_date("2024-01-01T00:00").unwrap_err(),
            @r#"failed to parse "2024-01-01T00:00" as a date: parsed value '2024-01-01', but unparsed input "T00:00" remains (expected no unparsed input)"#,
        );
        assert!(P.parse_local_date("2023-02-29").unwrap_err().is_validation());
        assert!(P.parse_local_date("2023-02-29").unwrap_err().is_parse());
    }

    #[test]
    fn ok_time() {
        let t = |s: &str| P.parse_local_time(s).unwrap().to_string();
        assert_eq!(t("09:05"), "09:05");
        assert_eq!(t("09:05:00"), "09:05");
        assert_eq!(t("09:05:07"), "09:05:07");
        assert_eq!(t("09:05:07,5"), "09:05:07.500");
        assert_eq!(t("23:59:59.123456789"), "23:59:59.123456789");
        assert_eq!(t("00:00:00.000120"), "00:00:00.000120");
    }

    #[test]
    fn err_time() {
        insta::assert_snapshot!(
            P.parse_local_time("24:00").unwrap_err(),
            @r#"failed to parse "24:00" as a time: parameter 'hour' with value 24 is not in the required range of 0..=23"#,
        );
        insta::assert_snapshot!(
            P.parse_local_time("0905").unwrap_err(),
            @r#"failed to parse "0905" as a time: expected `:` separator, but found `0`"#,
        );
        insta::assert_snapshot!(
            P.parse_local_time("09:05:07.").unwrap_err(),
            @r#"failed to parse "09:05:07." as a time: found decimal separator, but no digits after it"#,
        );
        insta::assert_snapshot!(
            P.parse_local_time("9:05").unwrap_err(),
            @r#"failed to parse "9:05" as a time: failed to parse hour in time: invalid digit, expected 0-9 but got ":" in "9:""#,
        );
    }

    #[test]
    fn datetime_and_instant() {
        let dt = P.parse_local_datetime("2024-06-19t09:05:07").unwrap();
        assert_eq!(dt.to_string(), "2024-06-19T09:05:07");

        let i = |s: &str| P.parse_instant(s).unwrap().to_string();
        assert_eq!(i("2024-06-19T09:05Z"), "2024-06-19T09:05:00Z");
        assert_eq!(i("2024-06-19T09:05:00+02:00"), "2024-06-19T07:05:00Z");
        assert_eq!(i("2024-06-19T09:05:00-00:00:30"), "2024-06-19T09:05:30Z");
        assert_eq!(i("-1000000-01-01T00:00:00Z"), "-1000000-01-01T00:00:00Z");
        assert_eq!(
            i("+1000000-12-31T23:59:59.999999999z"),
            "+1000000-12-31T23:59:59.999999999Z",
        );

        insta::assert_snapshot!(
            P.parse_local_datetime("2024-06-19T09:05Z").unwrap_err(),
            @r#"failed to parse "2024-06-19T09:05Z" as a datetime: parsed value '2024-06-19T09:05', but unparsed input "Z" remains (expected no unparsed input)"#,
        );
        insta::assert_snapshot!(
            P.parse_instant("2024-06-19T09:05").unwrap_err(),
            @r#"failed to parse "2024-06-19T09:05" as an instant: failed to parse UTC offset: expected `Z` or a UTC offset beginning with `+` or `-`, but found end of input"#,
        );
        insta::assert_snapshot!(
            P.parse_instant("2024-06-19T09:05+19:00").unwrap_err(),
            @r#"failed to parse "2024-06-19T09:05+19:00" as an instant: failed to parse UTC offset: fixed offset of 68400 seconds is not in the required range of -64800..=64800"#,
        );
        insta::assert_snapshot!(
            P.parse_instant("+1000001-01-01T00:00Z").unwrap_err(),
            @r#"failed to parse "+1000001-01-01T00:00Z" as an instant: parameter 'epoch second' with value 31494816403200 is not in the required range of -31619119219200..=31494816403199"#,
        );
    }

    #[test]
    fn offsets() {
        assert_eq!(P.parse_offset("+05:30").unwrap(), 19_800);
        assert_eq!(P.parse_offset("-03:06:28").unwrap(), -11_188);
        assert_eq!(P.parse_offset("+25:00").unwrap(), 90_000);
        assert!(P.parse_offset("+05:60").unwrap_err().is_validation());
        insta::assert_snapshot!(
            P.parse_offset("+5").unwrap_err(),
            @r#"failed to parse "+5" as a UTC offset: failed to parse hour in time: expected two digit hour, but found end of input"#,
        );
    }

    #[test]
    fn ok_duration() {
        let d = |s: &str| {
            let d = P.parse_duration(s).unwrap();
            (d.seconds(), d.nano())
        };
        assert_eq!(d("PT0S"), (0, 0));
        assert_eq!(d("P2D"), (172_800, 0));
        assert_eq!(d("pt1h30m"), (5_400, 0));
        assert_eq!(d("PT-0.5S"), (-1, 500_000_000));
        assert_eq!(d("PT-1.5S"), (-2, 500_000_000));
        assert_eq!(d("PT1.000000001S"), (1, 1));
        assert_eq!(d("P1DT-1H"), (82_800, 0));
        assert_eq!(d("-PT1H-30M"), (-1_800, 0));
        assert_eq!(d("+PT-0,5S"), (-1, 500_000_000));
        assert_eq!(d("-PT-0.5S"), (0, 500_000_000));
    }

    #[test]
    fn err_duration() {
        insta::assert_snapshot!(
            P.parse_duration("P").unwrap_err(),
            @r#"failed to parse "P" as an ISO 8601 duration: expected at least one unit in ISO 8601 duration, but found none"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("PT").unwrap_err(),
            @r#"failed to parse "PT" as an ISO 8601 duration: found a time designator (`T` or `t`) in an ISO 8601 duration string, but did not find any time units"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("P1DT").unwrap_err(),
            @r#"failed to parse "P1DT" as an ISO 8601 duration: found a time designator (`T` or `t`) in an ISO 8601 duration string, but did not find any time units"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("P1Y").unwrap_err(),
            @r#"failed to parse "P1Y" as an ISO 8601 duration: expected to find date unit designator suffix (`D`), but found `Y` instead"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("PT1S2M").unwrap_err(),
            @r#"failed to parse "PT1S2M" as an ISO 8601 duration: found unit designator `M` out of order or more than once"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("PT1.5M").unwrap_err(),
            @r#"failed to parse "PT1.5M" as an ISO 8601 duration: found a fractional value on unit `M`, but only seconds may have a fractional part"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("PT-S").unwrap_err(),
            @r#"failed to parse "PT-S" as an ISO 8601 duration: expected digits after sign `-`, but found none"#,
        );
        insta::assert_snapshot!(
            P.parse_duration("1D").unwrap_err(),
            @r#"failed to parse "1D" as an ISO 8601 duration: expected to find duration beginning with `P` or `p`, but found `1` instead"#,
        );
        let err = P.parse_duration("P9007199254740991D").unwrap_err();
        assert!(err.is_parse());
        assert!(err.is_overflow());
    }

    #[test]
    fn ok_period() {
        let p = |s: &str| {
            let p = P.parse_period(s).unwrap();
            (p.years(), p.months(), p.days())
        };
        assert_eq!(p("P1Y2M3W4D"), (1, 2, 25));
        assert_eq!(p("p1y"), (1, 0, 0));
        assert_eq!(p("P-2W"), (0, 0, -14));
        assert_eq!(p("-P1Y-2M"), (-1, 2, 0));
        assert_eq!(p("P0D"), (0, 0, 0));
    }

    #[test]
    fn err_period() {
        insta::assert_snapshot!(
            P.parse_period("P1DT1H").unwrap_err(),
            @r#"failed to parse "P1DT1H" as an ISO 8601 period: parsed value 'P1D', but unparsed input "T1H" remains (expected no unparsed input)"#,
        );
        insta::assert_snapshot!(
            P.parse_period("P1M1Y").unwrap_err(),
            @r#"failed to parse "P1M1Y" as an ISO 8601 period: found unit designator `Y` out of order or more than once"#,
        );
        insta::assert_snapshot!(
            P.parse_period("P2147483648Y").unwrap_err(),
            @r#"failed to parse "P2147483648Y" as an ISO 8601 period: value 2147483648 does not fit in a 32-bit signed integer"#,
        );
    }

    #[test]
    fn period_duration() {
        let pd = P.parse_period_duration("P1Y2M3W4DT5H6M7.008S").unwrap();
        assert_eq!((pd.years(), pd.months(), pd.days()), (1, 2, 25));
        assert_eq!((pd.seconds(), pd.nanos()), (18_367, 8_000_000));

        let pd = P.parse_period_duration("-P1DT1H").unwrap();
        assert_eq!(pd.days(), -1);
        assert_eq!(pd.seconds(), -3_600);

        // Days and weeks go to the period only.
        let pd = P.parse_period_duration("P1DT1H").unwrap();
        assert_eq!((pd.days(), pd.seconds()), (1, 3_600));
        let pd = P.parse_period_duration("P1W2D").unwrap();
        assert_eq!((pd.days(), pd.seconds(), pd.nanos()), (9, 0, 0));
        let d = P.parse_duration("P1DT1H").unwrap();
        assert_eq!(d.seconds(), 90_000);

        assert!(P.parse_period_duration("P").unwrap_err().is_parse());
    }
}
