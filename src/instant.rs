use crate::{
    civil::LocalDateTime,
    clock::Clock,
    error::{Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    math,
    tz::TimeZone,
    util::common::{MILLIS_PER_SECOND, NANOS_PER_MILLI, NANOS_PER_SECOND},
    Duration, Unit,
};

/// An instant in time, represented as a number of seconds and nanoseconds
/// since the Unix epoch, `1970-01-01T00:00:00Z`.
///
/// An `Instant` is always in UTC and has no time zone. To get the civil
/// datetime observed somewhere at a particular instant, use
/// [`Instant::to_local_date_time`].
///
/// # Representation
///
/// The nanosecond component is always in the range `0..=999_999_999`. For
/// instants before the Unix epoch, this means the second component is
/// borrowed from. That is, half a second before the epoch is represented as
/// `-1` seconds and `500_000_000` nanoseconds.
///
/// ```
/// use hora::Instant;
///
/// let t = Instant::of_epoch_second(0, -500_000_000)?;
/// assert_eq!(t.epoch_second(), -1);
/// assert_eq!(t.nano(), 500_000_000);
/// assert_eq!(t.to_string(), "1969-12-31T23:59:59.500Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Range
///
/// An `Instant` spans `-1000000-01-01T00:00:00Z` to
/// `+1000000-12-31T23:59:59.999999999Z`. This is slightly larger than the
/// range of [`LocalDate`](crate::civil::LocalDate), so converting an instant
/// at either extreme to a civil datetime may fail.
///
/// # Parsing and printing
///
/// An `Instant` is printed with seconds always present and a `Z` suffix. It
/// can be parsed from a string with either a `Z` or a numeric UTC offset.
///
/// ```
/// use hora::Instant;
///
/// let t: Instant = "2024-06-19T15:22:45-04:00".parse()?;
/// assert_eq!(t.to_string(), "2024-06-19T19:22:45Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    second: i64,
    nanosecond: i32,
}

/// The smallest epoch second, `-1000000-01-01T00:00:00Z`.
pub(crate) const MIN_SECOND: i64 = -31_619_119_219_200;

/// The largest epoch second, `+1000000-12-31T23:59:59Z`.
pub(crate) const MAX_SECOND: i64 = 31_494_816_403_199;

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const EPOCH: Instant = Instant { second: 0, nanosecond: 0 };

    /// The minimum supported instant.
    pub const MIN: Instant = Instant { second: MIN_SECOND, nanosecond: 0 };

    /// The maximum supported instant.
    pub const MAX: Instant =
        Instant { second: MAX_SECOND, nanosecond: 999_999_999 };

    /// Creates an instant from a number of seconds since the Unix epoch and
    /// an adjustment in nanoseconds.
    ///
    /// The adjustment may be any value, positive or negative. It is
    /// normalized with floor division into the second component, so that the
    /// nanosecond component is always in `0..=999_999_999`.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the resulting instant is outside
    /// of the range [`Instant::MIN`] to [`Instant::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Instant;
    ///
    /// let t = Instant::of_epoch_second(3, 1_000_000_001)?;
    /// assert_eq!((t.epoch_second(), t.nano()), (4, 1));
    ///
    /// let t = Instant::of_epoch_second(3, -1)?;
    /// assert_eq!((t.epoch_second(), t.nano()), (2, 999_999_999));
    ///
    /// assert!(Instant::of_epoch_second(i64::MAX / 2, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_epoch_second(
        seconds: i64,
        nano_adjustment: i64,
    ) -> Result<Instant, Error> {
        let carry = nano_adjustment.div_euclid(NANOS_PER_SECOND);
        let nanosecond = nano_adjustment.rem_euclid(NANOS_PER_SECOND) as i32;
        let second = seconds.checked_add(carry).ok_or_else(|| {
            Error::range("epoch second", seconds, MIN_SECOND, MAX_SECOND)
        })?;
        Instant::checked(second, nanosecond)
    }

    /// Creates an instant from a number of milliseconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the resulting instant is out of
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Instant;
    ///
    /// let t = Instant::of_epoch_milli(-1)?;
    /// assert_eq!(t.to_string(), "1969-12-31T23:59:59.999Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_epoch_milli(millis: i64) -> Result<Instant, Error> {
        let second = millis.div_euclid(MILLIS_PER_SECOND);
        let nanosecond =
            (millis.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLI) as i32;
        Instant::checked(second, nanosecond)
    }

    /// Returns the current instant according to the contextual clock.
    ///
    /// See [`clock`](crate::clock) for how the contextual clock is chosen.
    ///
    /// # Panics
    ///
    /// This panics if the clock reports a time outside of the supported
    /// range. This is not expected to happen for the system clock. If you
    /// want to get the current instant fallibly, use [`Instant::now_with`].
    #[cfg(feature = "std")]
    pub fn now() -> Instant {
        Instant::now_with(&Clock::contextual())
            .expect("contextual clock reports a valid instant")
    }

    /// Returns the current instant according to the given clock.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{clock::Clock, tz::TimeZone, Instant};
    ///
    /// let fixed: Instant = "2024-01-01T00:00:00Z".parse()?;
    /// let clock = Clock::fixed(fixed, TimeZone::UTC);
    /// assert_eq!(Instant::now_with(&clock)?, fixed);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn now_with(clock: &Clock) -> Result<Instant, Error> {
        clock.instant()
    }

    /// Returns the number of whole seconds since the Unix epoch.
    ///
    /// For instants before the epoch with a non-zero nanosecond component,
    /// this is rounded toward negative infinity.
    #[inline]
    pub const fn epoch_second(self) -> i64 {
        self.second
    }

    /// Returns the nanosecond component, always in `0..=999_999_999`.
    #[inline]
    pub const fn nano(self) -> i32 {
        self.nanosecond
    }

    /// Returns the number of milliseconds since the Unix epoch.
    ///
    /// Any sub-millisecond precision is discarded by rounding toward
    /// negative infinity.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the number of milliseconds is
    /// outside of the safe integer domain. This happens for instants roughly
    /// more than 285,000 years away from the epoch.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Instant;
    ///
    /// let t = Instant::of_epoch_second(-1, 999_000_001)?;
    /// assert_eq!(t.to_epoch_milli()?, -1);
    /// assert!(Instant::MAX.to_epoch_milli().unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_epoch_milli(self) -> Result<i64, Error> {
        let millis = math::multiply_exact(self.second, MILLIS_PER_SECOND)?;
        math::add_exact(millis, i64::from(self.nanosecond) / NANOS_PER_MILLI)
    }

    /// Returns true if this instant is strictly before `other`.
    #[inline]
    pub fn is_before(self, other: Instant) -> bool {
        self < other
    }

    /// Returns true if this instant is strictly after `other`.
    #[inline]
    pub fn is_after(self, other: Instant) -> bool {
        self > other
    }

    /// Adds a duration to this instant.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the result is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{Duration, Instant};
    ///
    /// let t: Instant = "2024-03-10T06:59:59.5Z".parse()?;
    /// let d = Duration::of_millis(1_500)?;
    /// assert_eq!(t.plus(d)?.to_string(), "2024-03-10T07:00:01Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn plus(self, duration: Duration) -> Result<Instant, Error> {
        if duration.is_zero() {
            return Ok(self);
        }
        let seconds = math::add_exact(self.second, duration.seconds())?;
        let nanos = i64::from(self.nanosecond) + i64::from(duration.nano());
        Instant::of_epoch_second(seconds, nanos)
    }

    /// Subtracts a duration from this instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the duration cannot be negated or when the
    /// result is out of range.
    #[inline]
    pub fn minus(self, duration: Duration) -> Result<Instant, Error> {
        self.plus(duration.negated()?)
    }

    /// Adds the given number of seconds to this instant.
    #[inline]
    pub fn plus_seconds(self, seconds: i64) -> Result<Instant, Error> {
        self.plus(Duration::of_seconds(seconds, 0)?)
    }

    /// Adds the given number of milliseconds to this instant.
    #[inline]
    pub fn plus_millis(self, millis: i64) -> Result<Instant, Error> {
        self.plus(Duration::of_millis(millis)?)
    }

    /// Adds the given number of nanoseconds to this instant.
    #[inline]
    pub fn plus_nanos(self, nanos: i64) -> Result<Instant, Error> {
        self.plus(Duration::of_nanos(nanos)?)
    }

    /// Subtracts the given number of seconds from this instant.
    #[inline]
    pub fn minus_seconds(self, seconds: i64) -> Result<Instant, Error> {
        self.plus_seconds(math::negate_exact(seconds)?)
    }

    /// Subtracts the given number of milliseconds from this instant.
    #[inline]
    pub fn minus_millis(self, millis: i64) -> Result<Instant, Error> {
        self.plus_millis(math::negate_exact(millis)?)
    }

    /// Subtracts the given number of nanoseconds from this instant.
    #[inline]
    pub fn minus_nanos(self, nanos: i64) -> Result<Instant, Error> {
        self.plus_nanos(math::negate_exact(nanos)?)
    }

    /// Returns the exact duration from this instant until `other`.
    ///
    /// The duration is negative when `other` is before this instant. This
    /// never fails, since the difference between any two instants always
    /// fits in a [`Duration`].
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Instant;
    ///
    /// let start: Instant = "2024-01-01T00:00:00Z".parse()?;
    /// let end: Instant = "2024-01-02T01:30:00.25Z".parse()?;
    /// assert_eq!(start.until(end).to_string(), "PT25H30M0.250S");
    /// assert_eq!(end.until(start).to_string(), "PT-25H-30M-0.250S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until(self, other: Instant) -> Duration {
        let seconds = other.second - self.second;
        let nanos = i64::from(other.nanosecond) - i64::from(self.nanosecond);
        Duration::new_unchecked(
            seconds + nanos.div_euclid(NANOS_PER_SECOND),
            nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        )
    }

    /// Returns this instant truncated to the given unit.
    ///
    /// Truncation always rounds toward negative infinity. Truncating to
    /// [`Unit::Day`] returns midnight in UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{Instant, Unit};
    ///
    /// let t: Instant = "1969-12-31T23:59:59.123456789Z".parse()?;
    /// assert_eq!(
    ///     t.truncated_to(Unit::Millisecond).to_string(),
    ///     "1969-12-31T23:59:59.123Z",
    /// );
    /// assert_eq!(t.truncated_to(Unit::Hour).to_string(), "1969-12-31T23:00:00Z");
    /// assert_eq!(t.truncated_to(Unit::Day).to_string(), "1969-12-31T00:00:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn truncated_to(self, unit: Unit) -> Instant {
        match unit.seconds() {
            Some(secs) => Instant {
                second: self.second - self.second.rem_euclid(secs),
                nanosecond: 0,
            },
            None => {
                let unit_nanos = unit.nanoseconds() as i32;
                Instant {
                    second: self.second,
                    nanosecond: self.nanosecond
                        - self.nanosecond % unit_nanos,
                }
            }
        }
    }

    /// Returns the civil datetime observed in the given time zone at this
    /// instant.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{tz::TimeZone, Instant};
    ///
    /// let t: Instant = "2018-11-04T03:00:00Z".parse()?;
    /// let tz = TimeZone::get("America/Sao_Paulo")?;
    /// assert_eq!(t.to_local_date_time(&tz)?.to_string(), "2018-11-04T01:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_local_date_time(
        self,
        tz: &TimeZone,
    ) -> Result<LocalDateTime, Error> {
        LocalDateTime::of_instant(self, tz)
    }

    /// Creates an instant without checking its range.
    ///
    /// Callers must guarantee that `second` is in `MIN_SECOND..=MAX_SECOND`
    /// and `nanosecond` is in `0..=999_999_999`.
    #[inline]
    pub(crate) const fn new_unchecked(second: i64, nanosecond: i32) -> Instant {
        Instant { second, nanosecond }
    }

    #[inline]
    fn checked(second: i64, nanosecond: i32) -> Result<Instant, Error> {
        if !(MIN_SECOND..=MAX_SECOND).contains(&second) {
            return Err(Error::range(
                "epoch second",
                second,
                MIN_SECOND,
                MAX_SECOND,
            ));
        }
        Ok(Instant { second, nanosecond })
    }
}

#[cfg(feature = "std")]
impl TryFrom<std::time::SystemTime> for Instant {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant, Error> {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let (duration, sign) = match system_time.duration_since(unix_epoch) {
            Ok(duration) => (duration, 1),
            Err(err) => (err.duration(), -1),
        };
        let seconds = i64::try_from(duration.as_secs()).map_err(|_| {
            Error::range(
                "epoch second",
                duration.as_secs(),
                MIN_SECOND,
                MAX_SECOND,
            )
        })?;
        let nanos = i64::from(duration.subsec_nanos());
        Instant::of_epoch_second(sign * seconds, sign * nanos)
            .with_context(|| {
                Error::from_args(format_args!(
                    "system time is outside the supported range of instants"
                ))
            })
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_instant(self, f)
    }
}

impl core::str::FromStr for Instant {
    type Err = Error;

    fn from_str(string: &str) -> Result<Instant, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_instant(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        use quickcheck::Arbitrary;

        let span = MAX_SECOND - MIN_SECOND + 1;
        let second = MIN_SECOND + i64::arbitrary(g).rem_euclid(span);
        let nanosecond = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Instant { second, nanosecond }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Instant>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            (self.second, self.nanosecond).shrink().filter_map(
                |(second, nanosecond)| {
                    let nanosecond = nanosecond.rem_euclid(1_000_000_000);
                    Instant::checked(second, nanosecond).ok()
                },
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn range_boundaries() {
        assert_eq!(Instant::MIN.to_string(), "-1000000-01-01T00:00:00Z");
        assert_eq!(
            Instant::MAX.to_string(),
            "+1000000-12-31T23:59:59.999999999Z",
        );
        assert!(Instant::MAX.plus_nanos(1).unwrap_err().is_validation());
        assert!(Instant::MIN.minus_nanos(1).unwrap_err().is_validation());

        let err = Instant::of_epoch_second(MAX_SECOND + 1, 0).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"parameter 'epoch second' with value 31494816403200 is not in the required range of -31619119219200..=31494816403199",
        );
    }

    #[test]
    fn normalizes_negative_adjustment() {
        let t = Instant::of_epoch_second(-1, -1).unwrap();
        assert_eq!((t.epoch_second(), t.nano()), (-2, 999_999_999));
        let t = Instant::of_epoch_milli(-1_001).unwrap();
        assert_eq!((t.epoch_second(), t.nano()), (-2, 999_000_000));
        assert_eq!(t.to_epoch_milli().unwrap(), -1_001);
    }

    #[test]
    fn truncation() {
        let t = Instant::of_epoch_second(-1, 123_456_789).unwrap();
        assert_eq!(t.truncated_to(Unit::Microsecond).nano(), 123_456_000);
        assert_eq!(t.truncated_to(Unit::Second), Instant::new_unchecked(-1, 0));
        assert_eq!(
            t.truncated_to(Unit::HalfDay),
            Instant::new_unchecked(-43_200, 0),
        );
        assert_eq!(Instant::MIN.truncated_to(Unit::Day), Instant::MIN);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_time_conversion() {
        let before = std::time::SystemTime::UNIX_EPOCH
            - std::time::Duration::new(1, 250_000_000);
        let t = Instant::try_from(before).unwrap();
        assert_eq!((t.epoch_second(), t.nano()), (-2, 750_000_000));

        let after = std::time::SystemTime::UNIX_EPOCH
            + std::time::Duration::new(86_400, 1);
        let t = Instant::try_from(after).unwrap();
        assert_eq!(t.to_string(), "1970-01-02T00:00:00.000000001Z");
    }

    quickcheck::quickcheck! {
        fn prop_until_then_plus(a: Instant, b: Instant) -> bool {
            a.plus(a.until(b)).unwrap() == b
        }

        fn prop_until_antisymmetric(a: Instant, b: Instant) -> bool {
            a.until(b).negated().unwrap() == b.until(a)
        }

        fn prop_nanos_in_range(seconds: i64, adjustment: i64) -> quickcheck::TestResult {
            let seconds = seconds % MAX_SECOND;
            let Ok(t) = Instant::of_epoch_second(seconds, adjustment) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(
                (0..=999_999_999).contains(&t.nano()),
            )
        }

        fn prop_display_roundtrip(t: Instant) -> bool {
            t.to_string().parse::<Instant>().unwrap() == t
        }
    }
}
