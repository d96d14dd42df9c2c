use crate::{
    civil::{LocalDate, LocalDateTime},
    clock::Clock,
    error::Error,
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    util::common::{
        HOURS_PER_DAY, MINUTES_PER_DAY, NANOS_PER_DAY, NANOS_PER_HOUR,
        NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR,
        SECONDS_PER_MINUTE,
    },
    Unit,
};

/// A representation of civil "wall clock" time.
///
/// A `LocalTime` is an hour, minute, second and nanosecond. It has no date
/// and no time zone. Every `LocalTime` is in the range
/// `00:00:00..=23:59:59.999999999`.
///
/// Arithmetic on a `LocalTime` wraps around midnight and never fails:
///
/// ```
/// use hora::civil::LocalTime;
///
/// let t = LocalTime::of(23, 30, 0, 0)?;
/// assert_eq!(t.plus_hours(1), LocalTime::of(0, 30, 0, 0)?);
/// assert_eq!(t.plus_minutes(-24 * 60), t);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Parsing and printing
///
/// Times print in the shortest of `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`
/// (with 3, 6 or 9 fractional digits) that represents them exactly:
///
/// ```
/// use hora::civil::LocalTime;
///
/// assert_eq!(LocalTime::of(9, 5, 0, 0)?.to_string(), "09:05");
/// assert_eq!(LocalTime::of(9, 5, 7, 0)?.to_string(), "09:05:07");
/// assert_eq!(LocalTime::of(9, 5, 7, 120_000)?.to_string(), "09:05:07.000120");
///
/// let t: LocalTime = "09:05:07,5".parse()?;
/// assert_eq!(t.nano(), 500_000_000);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalTime {
    hour: i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
}

impl LocalTime {
    /// The first instant of a day, `00:00`.
    pub const MIDNIGHT: LocalTime = LocalTime::constant(0, 0, 0, 0);

    /// The middle of a day, `12:00`.
    pub const NOON: LocalTime = LocalTime::constant(12, 0, 0, 0);

    /// The minimum representable time. This is the same as `MIDNIGHT`.
    pub const MIN: LocalTime = LocalTime::MIDNIGHT;

    /// The maximum representable time, `23:59:59.999999999`.
    pub const MAX: LocalTime = LocalTime::constant(23, 59, 59, 999_999_999);

    /// Creates a new `LocalTime` from its components.
    ///
    /// # Errors
    ///
    /// This returns a validation error when any component is out of range:
    ///
    /// * `hour` must be in `0..=23`.
    /// * `minute` must be in `0..=59`.
    /// * `second` must be in `0..=59`.
    /// * `nanosecond` must be in `0..=999_999_999`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalTime;
    ///
    /// assert!(LocalTime::of(24, 0, 0, 0).unwrap_err().is_validation());
    /// assert!(LocalTime::of(23, 59, 60, 0).is_err());
    /// ```
    #[inline]
    pub fn of(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Result<LocalTime, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range("nanosecond", nanosecond, 0, 999_999_999));
        }
        Ok(LocalTime { hour, minute, second, nanosecond })
    }

    /// Creates a new `LocalTime` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`LocalTime::of`] would return an error.
    #[inline]
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> LocalTime {
        if hour < 0 || hour > 23 {
            panic!("invalid hour");
        }
        if minute < 0 || minute > 59 {
            panic!("invalid minute");
        }
        if second < 0 || second > 59 {
            panic!("invalid second");
        }
        if nanosecond < 0 || nanosecond > 999_999_999 {
            panic!("invalid nanosecond");
        }
        LocalTime { hour, minute, second, nanosecond }
    }

    /// Creates a time from the number of seconds since midnight.
    ///
    /// # Errors
    ///
    /// This returns a validation error when `second_of_day` is not in
    /// `0..86_400`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalTime;
    ///
    /// assert_eq!(LocalTime::of_second_of_day(3_661)?, LocalTime::of(1, 1, 1, 0)?);
    /// assert!(LocalTime::of_second_of_day(86_400).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_second_of_day(second_of_day: i64) -> Result<LocalTime, Error> {
        if !(0..SECONDS_PER_DAY).contains(&second_of_day) {
            return Err(Error::range(
                "second of day",
                second_of_day,
                0,
                SECONDS_PER_DAY - 1,
            ));
        }
        Ok(LocalTime::from_nano_of_day_unchecked(
            second_of_day * NANOS_PER_SECOND,
        ))
    }

    /// Creates a time from the number of nanoseconds since midnight.
    ///
    /// # Errors
    ///
    /// This returns a validation error when `nano_of_day` is not in
    /// `0..86_400_000_000_000`.
    #[inline]
    pub fn of_nano_of_day(nano_of_day: i64) -> Result<LocalTime, Error> {
        if !(0..NANOS_PER_DAY).contains(&nano_of_day) {
            return Err(Error::range(
                "nanosecond of day",
                nano_of_day,
                0,
                NANOS_PER_DAY - 1,
            ));
        }
        Ok(LocalTime::from_nano_of_day_unchecked(nano_of_day))
    }

    /// Returns the current time according to the contextual clock.
    ///
    /// # Panics
    ///
    /// This panics if the clock reports an instant that cannot be converted
    /// to a civil time in the clock's time zone. If you want to get the
    /// current time fallibly, use [`LocalTime::now_with`].
    #[cfg(feature = "std")]
    #[inline]
    pub fn now() -> LocalTime {
        LocalTime::now_with(&Clock::contextual())
            .expect("contextual clock reports a valid time")
    }

    /// Returns the current time according to the given clock, in the clock's
    /// time zone.
    #[inline]
    pub fn now_with(clock: &Clock) -> Result<LocalTime, Error> {
        LocalDateTime::now_with(clock).map(|dt| dt.time())
    }

    /// Returns the hour, in `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute, in `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second, in `0..=59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the fractional second in nanoseconds, in `0..=999_999_999`.
    #[inline]
    pub fn nano(self) -> i32 {
        self.nanosecond
    }

    /// Returns the number of whole seconds since midnight.
    #[inline]
    pub fn to_second_of_day(self) -> i32 {
        i32::from(self.hour) * 3_600
            + i32::from(self.minute) * 60
            + i32::from(self.second)
    }

    /// Returns the number of nanoseconds since midnight.
    #[inline]
    pub fn to_nano_of_day(self) -> i64 {
        i64::from(self.to_second_of_day()) * NANOS_PER_SECOND
            + i64::from(self.nanosecond)
    }

    /// Returns a new time with the hour replaced.
    #[inline]
    pub fn with_hour(self, hour: i8) -> Result<LocalTime, Error> {
        LocalTime::of(hour, self.minute, self.second, self.nanosecond)
    }

    /// Returns a new time with the minute replaced.
    #[inline]
    pub fn with_minute(self, minute: i8) -> Result<LocalTime, Error> {
        LocalTime::of(self.hour, minute, self.second, self.nanosecond)
    }

    /// Returns a new time with the second replaced.
    #[inline]
    pub fn with_second(self, second: i8) -> Result<LocalTime, Error> {
        LocalTime::of(self.hour, self.minute, second, self.nanosecond)
    }

    /// Returns a new time with the fractional second replaced.
    #[inline]
    pub fn with_nano(self, nanosecond: i32) -> Result<LocalTime, Error> {
        LocalTime::of(self.hour, self.minute, self.second, nanosecond)
    }

    /// Adds the given number of hours, wrapping around midnight.
    #[inline]
    pub fn plus_hours(self, hours: i64) -> LocalTime {
        if hours == 0 {
            return self;
        }
        let hour = (i64::from(self.hour) + hours.rem_euclid(HOURS_PER_DAY))
            .rem_euclid(HOURS_PER_DAY);
        // OK because the hour is in `0..24`.
        LocalTime { hour: hour as i8, ..self }
    }

    /// Adds the given number of minutes, wrapping around midnight.
    #[inline]
    pub fn plus_minutes(self, minutes: i64) -> LocalTime {
        if minutes == 0 {
            return self;
        }
        let current = i64::from(self.hour) * 60 + i64::from(self.minute);
        let new = (current + minutes.rem_euclid(MINUTES_PER_DAY))
            .rem_euclid(MINUTES_PER_DAY);
        if new == current {
            return self;
        }
        // OK because `new` is in `0..1440`.
        LocalTime {
            hour: (new / 60) as i8,
            minute: (new % 60) as i8,
            ..self
        }
    }

    /// Adds the given number of seconds, wrapping around midnight.
    #[inline]
    pub fn plus_seconds(self, seconds: i64) -> LocalTime {
        if seconds == 0 {
            return self;
        }
        let current = i64::from(self.to_second_of_day());
        let new = (current + seconds.rem_euclid(SECONDS_PER_DAY))
            .rem_euclid(SECONDS_PER_DAY);
        if new == current {
            return self;
        }
        LocalTime::from_nano_of_day_unchecked(
            new * NANOS_PER_SECOND + i64::from(self.nanosecond),
        )
    }

    /// Adds the given number of nanoseconds, wrapping around midnight.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalTime;
    ///
    /// let t = LocalTime::MIDNIGHT.plus_nanos(-1);
    /// assert_eq!(t, LocalTime::MAX);
    /// assert_eq!(t.to_string(), "23:59:59.999999999");
    /// ```
    #[inline]
    pub fn plus_nanos(self, nanos: i64) -> LocalTime {
        if nanos == 0 {
            return self;
        }
        let current = self.to_nano_of_day();
        let new = (current + nanos.rem_euclid(NANOS_PER_DAY))
            .rem_euclid(NANOS_PER_DAY);
        if new == current {
            return self;
        }
        LocalTime::from_nano_of_day_unchecked(new)
    }

    /// Subtracts the given number of hours, wrapping around midnight.
    #[inline]
    pub fn minus_hours(self, hours: i64) -> LocalTime {
        self.plus_hours(-(hours % HOURS_PER_DAY))
    }

    /// Subtracts the given number of minutes, wrapping around midnight.
    #[inline]
    pub fn minus_minutes(self, minutes: i64) -> LocalTime {
        self.plus_minutes(-(minutes % MINUTES_PER_DAY))
    }

    /// Subtracts the given number of seconds, wrapping around midnight.
    #[inline]
    pub fn minus_seconds(self, seconds: i64) -> LocalTime {
        self.plus_seconds(-(seconds % SECONDS_PER_DAY))
    }

    /// Subtracts the given number of nanoseconds, wrapping around midnight.
    #[inline]
    pub fn minus_nanos(self, nanos: i64) -> LocalTime {
        self.plus_nanos(-(nanos % NANOS_PER_DAY))
    }

    /// Returns this time with everything smaller than `unit` set to zero.
    ///
    /// Truncating to [`Unit::Day`] always returns midnight.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalTime, Unit};
    ///
    /// let t = LocalTime::of(15, 47, 23, 123_456_789)?;
    /// assert_eq!(t.truncated_to(Unit::Millisecond).to_string(), "15:47:23.123");
    /// assert_eq!(t.truncated_to(Unit::Hour).to_string(), "15:00");
    /// assert_eq!(t.truncated_to(Unit::HalfDay), LocalTime::NOON);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn truncated_to(self, unit: Unit) -> LocalTime {
        match unit {
            Unit::Nanosecond => self,
            Unit::Day => LocalTime::MIDNIGHT,
            unit => {
                let nod = self.to_nano_of_day();
                let nanos = unit.nanoseconds();
                LocalTime::from_nano_of_day_unchecked(nod - nod % nanos)
            }
        }
    }

    /// Combines this time with a date to create a datetime.
    #[inline]
    pub const fn at_date(self, date: LocalDate) -> LocalDateTime {
        LocalDateTime::of(date, self)
    }

    /// Creates a time from a nanosecond of day by successive division.
    ///
    /// Callers must guarantee that `nano_of_day` is in `0..NANOS_PER_DAY`.
    #[inline]
    pub(crate) fn from_nano_of_day_unchecked(nano_of_day: i64) -> LocalTime {
        debug_assert!((0..NANOS_PER_DAY).contains(&nano_of_day));
        let hour = nano_of_day / NANOS_PER_HOUR;
        let rem = nano_of_day % NANOS_PER_HOUR;
        let minute = rem / NANOS_PER_MINUTE;
        let rem = rem % NANOS_PER_MINUTE;
        let second = rem / NANOS_PER_SECOND;
        let nanosecond = rem % NANOS_PER_SECOND;
        LocalTime {
            hour: hour as i8,
            minute: minute as i8,
            second: second as i8,
            nanosecond: nanosecond as i32,
        }
    }

    /// Creates a time from a second of day.
    ///
    /// Callers must guarantee that `second_of_day` is in
    /// `0..SECONDS_PER_DAY`.
    #[inline]
    pub(crate) fn from_second_of_day_unchecked(
        second_of_day: i64,
        nanosecond: i32,
    ) -> LocalTime {
        debug_assert!((0..SECONDS_PER_DAY).contains(&second_of_day));
        LocalTime {
            hour: (second_of_day / SECONDS_PER_HOUR) as i8,
            minute: ((second_of_day / SECONDS_PER_MINUTE) % 60) as i8,
            second: (second_of_day % SECONDS_PER_MINUTE) as i8,
            nanosecond,
        }
    }
}

impl core::fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for LocalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_time(self, f)
    }
}

impl core::str::FromStr for LocalTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<LocalTime, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_local_time(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalTime {
        use quickcheck::Arbitrary;

        let nod = i64::arbitrary(g).rem_euclid(NANOS_PER_DAY);
        // Bias towards values that print without a fraction, since those
        // exercise the short printed forms.
        if bool::arbitrary(g) {
            LocalTime::from_nano_of_day_unchecked(nod - nod % NANOS_PER_SECOND)
        } else {
            LocalTime::from_nano_of_day_unchecked(nod)
        }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = LocalTime>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            self.to_nano_of_day()
                .shrink()
                .filter(|n| (0..NANOS_PER_DAY).contains(n))
                .map(LocalTime::from_nano_of_day_unchecked),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn printing() {
        let t = |h, m, s, n| LocalTime::constant(h, m, s, n).to_string();
        assert_eq!(t(0, 0, 0, 0), "00:00");
        assert_eq!(t(0, 0, 1, 0), "00:00:01");
        assert_eq!(t(0, 0, 0, 1), "00:00:00.000000001");
        assert_eq!(t(12, 34, 56, 100_000_000), "12:34:56.100");
        assert_eq!(t(12, 34, 56, 123_400_000), "12:34:56.123400");
    }

    #[test]
    fn second_of_day() {
        let t = LocalTime::of_second_of_day(86_399).unwrap();
        assert_eq!(t, LocalTime::constant(23, 59, 59, 0));
        assert_eq!(t.to_second_of_day(), 86_399);
        assert!(LocalTime::of_second_of_day(-1).unwrap_err().is_validation());
        assert_eq!(
            LocalTime::from_second_of_day_unchecked(3_723, 5),
            LocalTime::constant(1, 2, 3, 5),
        );
    }

    #[test]
    fn wrapping_extremes() {
        let t = LocalTime::constant(10, 20, 30, 40);
        // -2^63 is 16 modulo 24, and 2^63 is 8.
        assert_eq!(t.plus_hours(i64::MIN), t.plus_hours(i64::MIN.rem_euclid(24)));
        assert_eq!(t.plus_hours(i64::MIN), LocalTime::constant(2, 20, 30, 40));
        assert_eq!(t.minus_hours(i64::MIN), LocalTime::constant(18, 20, 30, 40));
        assert_eq!(t.minus_nanos(i64::MIN).plus_nanos(i64::MIN), t);
        assert_eq!(t.plus_seconds(i64::MAX).minus_seconds(i64::MAX), t);
        assert_eq!(t.plus_minutes(-1), LocalTime::constant(10, 19, 30, 40));
    }

    quickcheck::quickcheck! {
        fn prop_nano_of_day_roundtrip(t: LocalTime) -> bool {
            LocalTime::of_nano_of_day(t.to_nano_of_day()).unwrap() == t
        }

        fn prop_plus_minus_nanos(t: LocalTime, n: i64) -> bool {
            t.plus_nanos(n).minus_nanos(n) == t
        }

        fn prop_display_roundtrip(t: LocalTime) -> bool {
            t.to_string().parse::<LocalTime>().unwrap() == t
        }
    }
}
