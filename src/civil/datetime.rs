use crate::{
    civil::{LocalDate, LocalTime, Weekday},
    clock::Clock,
    error::{civil::Error as E, Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    math,
    tz::TimeZone,
    util::common::{NANOS_PER_DAY, SECONDS_PER_DAY},
    Instant, Unit,
};

/// A representation of a civil datetime in the proleptic Gregorian calendar.
///
/// A `LocalDateTime` value corresponds to a pair of a [`LocalDate`] and a
/// [`LocalTime`]. It has no time zone, so it does not identify a point in
/// time until it is resolved with [`LocalDateTime::to_instant`].
///
/// # Example
///
/// ```
/// use hora::civil::LocalDateTime;
///
/// let dt: LocalDateTime = "2024-02-29T23:59:59.5".parse()?;
/// assert_eq!(dt.plus_nanos(500_000_000)?.to_string(), "2024-03-01T00:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Resolving against a time zone
///
/// A civil datetime may not exist in a time zone (it falls in a gap created
/// by a forward transition) or may exist twice (it falls in an overlap
/// created by a backward transition). In a gap, the datetime is shifted
/// forward by the length of the gap. In an overlap, the earlier of the two
/// instants is used.
///
/// ```
/// use hora::{civil::LocalDateTime, tz::TimeZone};
///
/// let tz = TimeZone::get("America/Sao_Paulo")?;
/// // Clocks went back from 00:00 on 2019-02-17 to 23:00 on the 16th, so
/// // 23:30 on the 16th happened twice. The first occurrence is chosen.
/// let dt: LocalDateTime = "2019-02-16T23:30".parse()?;
/// assert_eq!(dt.to_instant(&tz)?.to_string(), "2019-02-17T01:30:00Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

impl LocalDateTime {
    /// The minimum representable datetime, `-999999-01-01T00:00`.
    pub const MIN: LocalDateTime =
        LocalDateTime::of(LocalDate::MIN, LocalTime::MIN);

    /// The maximum representable datetime,
    /// `+999999-12-31T23:59:59.999999999`.
    pub const MAX: LocalDateTime =
        LocalDateTime::of(LocalDate::MAX, LocalTime::MAX);

    /// Creates a datetime from a date and a time.
    #[inline]
    pub const fn of(date: LocalDate, time: LocalTime) -> LocalDateTime {
        LocalDateTime { date, time }
    }

    /// Creates a datetime from all of its components.
    ///
    /// # Errors
    ///
    /// This returns a validation error when [`LocalDate::of`] or
    /// [`LocalTime::of`] would.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDateTime;
    ///
    /// let dt = LocalDateTime::from_parts(2024, 6, 19, 15, 22, 45, 0)?;
    /// assert_eq!(dt.to_string(), "2024-06-19T15:22:45");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_parts(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Result<LocalDateTime, Error> {
        let date = LocalDate::of(year, month, day)?;
        let time = LocalTime::of(hour, minute, second, nanosecond)?;
        Ok(LocalDateTime { date, time })
    }

    /// Creates a datetime in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`LocalDateTime::from_parts`] would return an error.
    #[inline]
    pub const fn constant(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> LocalDateTime {
        let date = LocalDate::constant(year, month, day);
        let time = LocalTime::constant(hour, minute, second, nanosecond);
        LocalDateTime { date, time }
    }

    /// Creates the civil datetime observed at the given epoch second and
    /// nanosecond in a place whose UTC offset is `offset_seconds`.
    ///
    /// # Errors
    ///
    /// This returns a validation error when `nanosecond` is not in
    /// `0..=999_999_999` or when the resulting date is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDateTime;
    ///
    /// let dt = LocalDateTime::of_epoch_second(0, 0, -18_000)?;
    /// assert_eq!(dt.to_string(), "1969-12-31T19:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_epoch_second(
        seconds: i64,
        nanosecond: i32,
        offset_seconds: i32,
    ) -> Result<LocalDateTime, Error> {
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range("nanosecond", nanosecond, 0, 999_999_999));
        }
        let local = math::add_exact(seconds, i64::from(offset_seconds))?;
        let epoch_day = local.div_euclid(SECONDS_PER_DAY);
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY);
        let date = LocalDate::of_epoch_day(epoch_day)?;
        let time =
            LocalTime::from_second_of_day_unchecked(second_of_day, nanosecond);
        Ok(LocalDateTime { date, time })
    }

    /// Converts an instant to the civil datetime observed in the given time
    /// zone at that instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the time zone cannot report an offset for
    /// the instant, or when the resulting date is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDateTime, tz::TimeZone, Instant};
    ///
    /// let instant: Instant = "2024-07-01T12:00:00Z".parse()?;
    /// let tz = TimeZone::get("Europe/Paris")?;
    /// let dt = LocalDateTime::of_instant(instant, &tz)?;
    /// assert_eq!(dt.to_string(), "2024-07-01T14:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_instant(
        instant: Instant,
        tz: &TimeZone,
    ) -> Result<LocalDateTime, Error> {
        let offset = tz.offset_at(instant)?;
        LocalDateTime::of_epoch_second(
            instant.epoch_second(),
            instant.nano(),
            offset,
        )
    }

    /// Returns the current datetime according to the contextual clock.
    ///
    /// # Panics
    ///
    /// This panics if the clock reports an instant that cannot be converted
    /// to a civil datetime in the clock's time zone. If you want to get the
    /// current datetime fallibly, use [`LocalDateTime::now_with`].
    #[cfg(feature = "std")]
    #[inline]
    pub fn now() -> LocalDateTime {
        LocalDateTime::now_with(&Clock::contextual())
            .expect("contextual clock reports a valid datetime")
    }

    /// Returns the current datetime according to the given clock, in the
    /// clock's time zone.
    #[inline]
    pub fn now_with(clock: &Clock) -> Result<LocalDateTime, Error> {
        let instant = clock.instant()?;
        LocalDateTime::of_instant(instant, &clock.zone())
    }

    /// Returns the date component.
    #[inline]
    pub const fn date(self) -> LocalDate {
        self.date
    }

    /// Returns the time component.
    #[inline]
    pub const fn time(self) -> LocalTime {
        self.time
    }

    /// Returns the year.
    #[inline]
    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Returns the month, in `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day of the month.
    #[inline]
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the ordinal day of the year.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.date.day_of_year()
    }

    /// Returns the weekday.
    #[inline]
    pub fn day_of_week(self) -> Weekday {
        self.date.day_of_week()
    }

    /// Returns the hour.
    #[inline]
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute.
    #[inline]
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second.
    #[inline]
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional second in nanoseconds.
    #[inline]
    pub fn nano(self) -> i32 {
        self.time.nano()
    }

    /// Returns a new datetime with the date replaced.
    #[inline]
    pub fn with_date(self, date: LocalDate) -> LocalDateTime {
        LocalDateTime { date, ..self }
    }

    /// Returns a new datetime with the time replaced.
    #[inline]
    pub fn with_time(self, time: LocalTime) -> LocalDateTime {
        LocalDateTime { time, ..self }
    }

    /// Adds the given number of days. See [`LocalDate::plus_days`].
    #[inline]
    pub fn plus_days(self, days: i64) -> Result<LocalDateTime, Error> {
        Ok(self.with_date(self.date.plus_days(days)?))
    }

    /// Adds the given number of weeks. See [`LocalDate::plus_weeks`].
    #[inline]
    pub fn plus_weeks(self, weeks: i64) -> Result<LocalDateTime, Error> {
        Ok(self.with_date(self.date.plus_weeks(weeks)?))
    }

    /// Adds the given number of months. See [`LocalDate::plus_months`].
    #[inline]
    pub fn plus_months(self, months: i64) -> Result<LocalDateTime, Error> {
        Ok(self.with_date(self.date.plus_months(months)?))
    }

    /// Adds the given number of years. See [`LocalDate::plus_years`].
    #[inline]
    pub fn plus_years(self, years: i64) -> Result<LocalDateTime, Error> {
        Ok(self.with_date(self.date.plus_years(years)?))
    }

    /// Adds the given number of hours, carrying whole days into the date.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDateTime;
    ///
    /// let dt = LocalDateTime::constant(2024, 1, 1, 1, 0, 0, 0);
    /// assert_eq!(dt.plus_hours(-2)?.to_string(), "2023-12-31T23:00");
    /// assert_eq!(dt.plus_hours(49)?.to_string(), "2024-01-03T02:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn plus_hours(self, hours: i64) -> Result<LocalDateTime, Error> {
        self.plus_time(hours, Unit::Hour)
    }

    /// Adds the given number of minutes, carrying whole days into the date.
    #[inline]
    pub fn plus_minutes(self, minutes: i64) -> Result<LocalDateTime, Error> {
        self.plus_time(minutes, Unit::Minute)
    }

    /// Adds the given number of seconds, carrying whole days into the date.
    #[inline]
    pub fn plus_seconds(self, seconds: i64) -> Result<LocalDateTime, Error> {
        self.plus_time(seconds, Unit::Second)
    }

    /// Adds the given number of nanoseconds, carrying whole days into the
    /// date.
    #[inline]
    pub fn plus_nanos(self, nanos: i64) -> Result<LocalDateTime, Error> {
        self.plus_time(nanos, Unit::Nanosecond)
    }

    /// Subtracts the given number of days.
    #[inline]
    pub fn minus_days(self, days: i64) -> Result<LocalDateTime, Error> {
        self.plus_days(math::negate_exact(days)?)
    }

    /// Subtracts the given number of weeks.
    #[inline]
    pub fn minus_weeks(self, weeks: i64) -> Result<LocalDateTime, Error> {
        self.plus_weeks(math::negate_exact(weeks)?)
    }

    /// Subtracts the given number of months.
    #[inline]
    pub fn minus_months(self, months: i64) -> Result<LocalDateTime, Error> {
        self.plus_months(math::negate_exact(months)?)
    }

    /// Subtracts the given number of years.
    #[inline]
    pub fn minus_years(self, years: i64) -> Result<LocalDateTime, Error> {
        self.plus_years(math::negate_exact(years)?)
    }

    /// Subtracts the given number of hours.
    #[inline]
    pub fn minus_hours(self, hours: i64) -> Result<LocalDateTime, Error> {
        self.plus_hours(math::negate_exact(hours)?)
    }

    /// Subtracts the given number of minutes.
    #[inline]
    pub fn minus_minutes(self, minutes: i64) -> Result<LocalDateTime, Error> {
        self.plus_minutes(math::negate_exact(minutes)?)
    }

    /// Subtracts the given number of seconds.
    #[inline]
    pub fn minus_seconds(self, seconds: i64) -> Result<LocalDateTime, Error> {
        self.plus_seconds(math::negate_exact(seconds)?)
    }

    /// Subtracts the given number of nanoseconds.
    #[inline]
    pub fn minus_nanos(self, nanos: i64) -> Result<LocalDateTime, Error> {
        self.plus_nanos(math::negate_exact(nanos)?)
    }

    /// Returns this datetime with everything smaller than `unit` in its time
    /// set to zero.
    #[inline]
    pub fn truncated_to(self, unit: Unit) -> LocalDateTime {
        self.with_time(self.time.truncated_to(unit))
    }

    /// Returns the number of seconds since the Unix epoch at which this
    /// civil datetime is observed in a place with the given UTC offset.
    ///
    /// The fractional second is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDateTime;
    ///
    /// let dt = LocalDateTime::constant(1970, 1, 1, 1, 0, 0, 0);
    /// assert_eq!(dt.to_epoch_second(0), 3_600);
    /// assert_eq!(dt.to_epoch_second(3_600), 0);
    /// ```
    #[inline]
    pub fn to_epoch_second(self, offset_seconds: i32) -> i64 {
        self.date.to_epoch_day() * SECONDS_PER_DAY
            + i64::from(self.time.to_second_of_day())
            - i64::from(offset_seconds)
    }

    /// Resolves this civil datetime to an instant in the given time zone.
    ///
    /// This is the same as [`TimeZone::to_instant`]. See the type level
    /// documentation for how gaps and overlaps are resolved.
    ///
    /// # Errors
    ///
    /// This returns an error when the time zone cannot report offsets near
    /// this datetime, or when the resulting instant is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDateTime, tz::TimeZone};
    ///
    /// let tz = TimeZone::get("Australia/Lord_Howe")?;
    /// let dt = LocalDateTime::constant(2022, 10, 2, 2, 0, 0, 0);
    /// assert_eq!(dt.to_instant(&tz)?.to_string(), "2022-10-01T15:30:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_instant(self, tz: &TimeZone) -> Result<Instant, Error> {
        tz.to_instant(self)
    }

    /// Adds an amount of a time unit, using floor division and modulus of
    /// the nanosecond of day to carry into the date.
    fn plus_time(self, amount: i64, unit: Unit) -> Result<LocalDateTime, Error> {
        if amount == 0 {
            return Ok(self);
        }
        let amount = math::safe_int(amount)
            .with_context(|| E::AddTime { amount, unit })?;
        let unit_nanos = unit.nanoseconds();
        let per_day = NANOS_PER_DAY / unit_nanos;
        // The carried days are split off first so that the remaining number
        // of nanoseconds always fits comfortably.
        let mut days = amount / per_day;
        let rem_nanos = (amount % per_day) * unit_nanos;
        let current = self.time.to_nano_of_day();
        let total = rem_nanos + current;
        days += total.div_euclid(NANOS_PER_DAY);
        let nano_of_day = total.rem_euclid(NANOS_PER_DAY);
        let time = if nano_of_day == current {
            self.time
        } else {
            LocalTime::from_nano_of_day_unchecked(nano_of_day)
        };
        let date = self
            .date
            .plus_days(days)
            .with_context(|| E::AddTime { amount, unit })?;
        Ok(LocalDateTime { date, time })
    }
}

impl core::fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_datetime(self, f)
    }
}

impl core::str::FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<LocalDateTime, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_local_datetime(string)
    }
}

impl From<LocalDate> for LocalDateTime {
    #[inline]
    fn from(date: LocalDate) -> LocalDateTime {
        date.at_start_of_day()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalDateTime {
        use quickcheck::Arbitrary;

        let date = LocalDate::arbitrary(g);
        let time = LocalTime::arbitrary(g);
        LocalDateTime { date, time }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            (self.date, self.time)
                .shrink()
                .map(|(date, time)| LocalDateTime { date, time }),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn carry_into_date() {
        let dt = LocalDateTime::constant(2024, 2, 28, 23, 0, 0, 0);
        assert_eq!(
            dt.plus_minutes(60 * 24 + 90).unwrap(),
            LocalDateTime::constant(2024, 3, 1, 0, 30, 0, 0),
        );
        assert_eq!(
            dt.minus_seconds(86_400 * 59).unwrap(),
            LocalDateTime::constant(2023, 12, 31, 23, 0, 0, 0),
        );
        assert_eq!(
            dt.plus_nanos(-1).unwrap(),
            LocalDateTime::constant(2024, 2, 28, 22, 59, 59, 999_999_999),
        );
    }

    #[test]
    fn carry_errors() {
        let err = LocalDateTime::MAX.plus_nanos(1).unwrap_err();
        assert!(err.is_date_range());
        insta::assert_snapshot!(
            err,
            @"failed to add 1 nanoseconds to datetime: failed to add 1 days to date: date with epoch day 364522972 is outside the supported range of dates",
        );

        let err = LocalDateTime::MIN.plus_hours(i64::MIN).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn epoch_seconds() {
        let dt = LocalDateTime::constant(2018, 11, 4, 0, 0, 0, 0);
        assert_eq!(dt.to_epoch_second(0), 1_541_289_600);
        assert_eq!(dt.to_epoch_second(-10_800), 1_541_300_400);
        let back =
            LocalDateTime::of_epoch_second(1_541_300_400, 0, -10_800).unwrap();
        assert_eq!(back, dt);
    }

    quickcheck::quickcheck! {
        fn prop_epoch_second_roundtrip(dt: LocalDateTime, offset: i32) -> bool {
            let offset = offset % 64_800;
            let secs = dt.to_epoch_second(offset);
            match LocalDateTime::of_epoch_second(secs, dt.nano(), offset) {
                Ok(got) => got == dt,
                // Only possible at the edges of the supported range.
                Err(err) => err.is_validation(),
            }
        }

        fn prop_plus_nanos_agrees_with_epoch(dt: LocalDateTime, n: i64) -> quickcheck::TestResult {
            let n = n % (1 << 52);
            let Ok(got) = dt.plus_nanos(n) else {
                return quickcheck::TestResult::discard();
            };
            let expected = i128::from(dt.to_epoch_second(0)) * 1_000_000_000
                + i128::from(dt.nano())
                + i128::from(n);
            let actual = i128::from(got.to_epoch_second(0)) * 1_000_000_000
                + i128::from(got.nano());
            quickcheck::TestResult::from_bool(expected == actual)
        }

        fn prop_display_roundtrip(dt: LocalDateTime) -> bool {
            dt.to_string().parse::<LocalDateTime>().unwrap() == dt
        }
    }
}
