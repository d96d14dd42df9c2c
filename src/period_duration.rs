use crate::{
    civil::LocalDateTime,
    error::{period::Error as E, Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    util::common::{NANOS_PER_DAY, SECONDS_PER_DAY},
    Duration, Period,
};

/// A combination of a calendar [`Period`] and an exact [`Duration`].
///
/// This corresponds to a full ISO 8601 duration, like `P1Y2M3DT4H5M6.7S`,
/// where the date part has no fixed length and the time part does. When
/// added to a civil datetime, the period is applied first and the duration
/// second.
///
/// # Example
///
/// ```
/// use hora::{civil::LocalDateTime, PeriodDuration};
///
/// let pd: PeriodDuration = "P1MT25H".parse()?;
/// let dt = LocalDateTime::constant(2024, 1, 31, 0, 0, 0, 0);
/// assert_eq!(pd.add_to(dt)?.to_string(), "2024-03-01T01:00");
///
/// let pd = pd.normalized_standard_days()?;
/// assert_eq!(pd.to_string(), "P1M1DT1H");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct PeriodDuration {
    period: Period,
    duration: Duration,
}

impl PeriodDuration {
    /// A period and duration of zero length.
    pub const ZERO: PeriodDuration =
        PeriodDuration { period: Period::ZERO, duration: Duration::ZERO };

    /// Combines a period and a duration.
    #[inline]
    pub const fn of(period: Period, duration: Duration) -> PeriodDuration {
        PeriodDuration { period, duration }
    }

    /// Creates a value with the given period and a zero duration.
    #[inline]
    pub const fn of_period(period: Period) -> PeriodDuration {
        PeriodDuration::of(period, Duration::ZERO)
    }

    /// Creates a value with the given duration and a zero period.
    #[inline]
    pub const fn of_duration(duration: Duration) -> PeriodDuration {
        PeriodDuration::of(Period::ZERO, duration)
    }

    /// Returns the period and duration between two civil datetimes.
    ///
    /// The date difference is computed as by [`Period::between`], after the
    /// end date is moved by a day when the time difference has the opposite
    /// sign. The time difference is then always less than a day and has the
    /// same sign as the period.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDateTime, PeriodDuration};
    ///
    /// let start = LocalDateTime::constant(2024, 1, 1, 22, 0, 0, 0);
    /// let end = LocalDateTime::constant(2024, 2, 3, 1, 30, 0, 0);
    /// let pd = PeriodDuration::between(start, end)?;
    /// assert_eq!(pd.to_string(), "P1M1DT3H30M");
    /// assert_eq!(pd.add_to(start)?, end);
    ///
    /// let pd = PeriodDuration::between(end, start)?;
    /// assert_eq!(pd.to_string(), "P-1M-1DT-3H-30M");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn between(
        start: LocalDateTime,
        end: LocalDateTime,
    ) -> Result<PeriodDuration, Error> {
        PeriodDuration::between_impl(start, end)
            .with_context(|| E::Between { start, end })
    }

    fn between_impl(
        start: LocalDateTime,
        end: LocalDateTime,
    ) -> Result<PeriodDuration, Error> {
        let mut end_date = end.date();
        let mut nanos =
            end.time().to_nano_of_day() - start.time().to_nano_of_day();
        if end_date > start.date() && nanos < 0 {
            end_date = end_date.minus_days(1)?;
            nanos += NANOS_PER_DAY;
        } else if end_date < start.date() && nanos > 0 {
            end_date = end_date.plus_days(1)?;
            nanos -= NANOS_PER_DAY;
        }
        let period = Period::between(start.date(), end_date)?;
        let duration = Duration::of_nanos(nanos)?;
        Ok(PeriodDuration { period, duration })
    }

    /// Returns the period part.
    #[inline]
    pub const fn period(self) -> Period {
        self.period
    }

    /// Returns the duration part.
    #[inline]
    pub const fn duration(self) -> Duration {
        self.duration
    }

    /// Returns the years of the period part.
    #[inline]
    pub const fn years(self) -> i32 {
        self.period.years()
    }

    /// Returns the months of the period part.
    #[inline]
    pub const fn months(self) -> i32 {
        self.period.months()
    }

    /// Returns the days of the period part.
    #[inline]
    pub const fn days(self) -> i32 {
        self.period.days()
    }

    /// Returns the seconds of the duration part.
    #[inline]
    pub const fn seconds(self) -> i64 {
        self.duration.seconds()
    }

    /// Returns the nanosecond component of the duration part.
    #[inline]
    pub const fn nanos(self) -> i32 {
        self.duration.nano()
    }

    /// Returns a copy with the period part replaced.
    #[inline]
    pub const fn with_period(self, period: Period) -> PeriodDuration {
        PeriodDuration { period, ..self }
    }

    /// Returns a copy with the duration part replaced.
    #[inline]
    pub const fn with_duration(self, duration: Duration) -> PeriodDuration {
        PeriodDuration { duration, ..self }
    }

    /// Returns a copy with the years of the period part replaced.
    #[inline]
    pub const fn with_years(self, years: i32) -> PeriodDuration {
        self.with_period(self.period.with_years(years))
    }

    /// Returns a copy with the months of the period part replaced.
    #[inline]
    pub const fn with_months(self, months: i32) -> PeriodDuration {
        self.with_period(self.period.with_months(months))
    }

    /// Returns a copy with the days of the period part replaced.
    #[inline]
    pub const fn with_days(self, days: i32) -> PeriodDuration {
        self.with_period(self.period.with_days(days))
    }

    /// Returns true when both parts are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.period.is_zero() && self.duration.is_zero()
    }

    /// Adds the parts of `other` to the parts of this value.
    #[inline]
    pub fn plus(self, other: PeriodDuration) -> Result<PeriodDuration, Error> {
        let period = self.period.plus(other.period)?;
        let duration = self.duration.plus(other.duration)?;
        Ok(PeriodDuration { period, duration })
    }

    /// Subtracts the parts of `other` from the parts of this value.
    #[inline]
    pub fn minus(self, other: PeriodDuration) -> Result<PeriodDuration, Error> {
        let period = self.period.minus(other.period)?;
        let duration = self.duration.minus(other.duration)?;
        Ok(PeriodDuration { period, duration })
    }

    /// Multiplies both parts by a scalar.
    #[inline]
    pub fn multiplied_by(self, scalar: i32) -> Result<PeriodDuration, Error> {
        let period = self.period.multiplied_by(scalar)?;
        let duration = self.duration.multiplied_by(i64::from(scalar))?;
        Ok(PeriodDuration { period, duration })
    }

    /// Negates both parts.
    #[inline]
    pub fn negated(self) -> Result<PeriodDuration, Error> {
        self.multiplied_by(-1)
    }

    /// Normalizes the years and months of the period part. See
    /// [`Period::normalized`].
    #[inline]
    pub fn normalized(self) -> Result<PeriodDuration, Error> {
        Ok(self.with_period(self.period.normalized()?))
    }

    /// Moves whole 24 hour blocks from the duration part into the days of
    /// the period part.
    ///
    /// The number of days moved is truncated toward zero, so the remaining
    /// duration keeps its sign.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{Duration, Period, PeriodDuration};
    ///
    /// let pd = PeriodDuration::of(Period::of_days(1), Duration::of_hours(-49)?);
    /// assert_eq!(pd.normalized_standard_days()?.to_string(), "P-1DT-1H");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn normalized_standard_days(self) -> Result<PeriodDuration, Error> {
        let mut seconds = self.duration.seconds();
        if seconds < 0 && self.duration.nano() > 0 {
            seconds += 1;
        }
        let days = seconds / SECONDS_PER_DAY;
        if days == 0 {
            return Ok(self);
        }
        let period = self.period.plus_days(days)?;
        let duration = self.duration.minus_days(days)?;
        Ok(PeriodDuration { period, duration })
    }

    /// Adds this value to a civil datetime. The period is applied to the
    /// date first, then the duration is added.
    pub fn add_to(self, dt: LocalDateTime) -> Result<LocalDateTime, Error> {
        let date = self.period.add_to_local_date(dt.date())?;
        dt.with_date(date)
            .plus_seconds(self.duration.seconds())?
            .plus_nanos(i64::from(self.duration.nano()))
    }

    /// Subtracts this value from a civil datetime. The period is subtracted
    /// from the date first, then the duration is subtracted.
    pub fn subtract_from(
        self,
        dt: LocalDateTime,
    ) -> Result<LocalDateTime, Error> {
        let date = self.period.subtract_from_local_date(dt.date())?;
        dt.with_date(date)
            .minus_seconds(self.duration.seconds())?
            .minus_nanos(i64::from(self.duration.nano()))
    }
}

impl From<Period> for PeriodDuration {
    fn from(period: Period) -> PeriodDuration {
        PeriodDuration::of_period(period)
    }
}

impl From<Duration> for PeriodDuration {
    fn from(duration: Duration) -> PeriodDuration {
        PeriodDuration::of_duration(duration)
    }
}

impl core::fmt::Debug for PeriodDuration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for PeriodDuration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_period_duration(self, f)
    }
}

impl core::str::FromStr for PeriodDuration {
    type Err = Error;

    fn from_str(string: &str) -> Result<PeriodDuration, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_period_duration(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for PeriodDuration {
    fn arbitrary(g: &mut quickcheck::Gen) -> PeriodDuration {
        use quickcheck::Arbitrary;

        PeriodDuration::of(Period::arbitrary(g), Duration::arbitrary(g))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = PeriodDuration>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            (self.period, self.duration)
                .shrink()
                .map(|(period, duration)| PeriodDuration { period, duration }),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn printing() {
        let p = |s: &str| s.parse::<PeriodDuration>().unwrap().to_string();
        assert_eq!(PeriodDuration::ZERO.to_string(), "PT0S");
        assert_eq!(p("P0D"), "PT0S");
        assert_eq!(p("P1Y"), "P1Y");
        assert_eq!(p("PT-0.5S"), "PT-0.500S");
        assert_eq!(p("P1Y2M3W4DT5H6M7.008S"), "P1Y2M25DT5H6M7.008S");
        assert_eq!(p("-P1DT1H"), "P-1DT-1H");
        assert_eq!(p("P1DT1H"), "P1DT1H");
        assert_eq!(p("P2D"), "P2D");
    }

    #[test]
    fn standard_days_truncate() {
        let d = |s: &str| s.parse::<Duration>().unwrap();
        let pd = PeriodDuration::of_duration(d("PT-23H-59M-59.5S"));
        assert_eq!(pd.normalized_standard_days().unwrap(), pd);
        let pd = PeriodDuration::of_duration(d("PT-24H-0.5S"));
        assert_eq!(pd.normalized_standard_days().unwrap().to_string(), "P-1DT-0.500S");
    }

    #[test]
    fn between_same_date() {
        let start = LocalDateTime::constant(2024, 5, 5, 10, 0, 0, 0);
        let end = LocalDateTime::constant(2024, 5, 5, 9, 0, 0, 1);
        let pd = PeriodDuration::between(start, end).unwrap();
        assert!(pd.period().is_zero());
        assert_eq!(pd.to_string(), "PT-59M-59.999999999S");
    }

    quickcheck::quickcheck! {
        fn prop_between_then_add(a: LocalDateTime, b: LocalDateTime) -> quickcheck::TestResult {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            let Ok(pd) = PeriodDuration::between(a, b) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(pd.add_to(a).unwrap() == b)
        }

        fn prop_display_roundtrip(pd: PeriodDuration) -> bool {
            pd.to_string().parse::<PeriodDuration>().unwrap() == pd
        }
    }
}
