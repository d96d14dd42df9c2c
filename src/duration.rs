use crate::{
    error::{duration::Error as E, math::Error as M, Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    math,
    util::common::{
        MILLIS_PER_SECOND, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND,
        SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    },
    Instant, Unit,
};

/// An exact amount of time, as a number of seconds and nanoseconds.
///
/// A `Duration` may be negative. Like [`Instant`], its nanosecond component
/// is always in the range `0..=999_999_999`, so a negative duration with a
/// fractional second borrows from its seconds. That is, `-0.5s` is
/// represented as `-1` seconds and `500_000_000` nanoseconds.
///
/// The number of seconds is always within the "safe integer" domain
/// described in [`crate::math`]. Arithmetic that would leave that domain
/// returns an overflow error.
///
/// # Days
///
/// A `Duration` has no notion of calendar days. Methods that speak in days,
/// like [`Duration::of_days`], always treat a day as exactly 24 hours. For
/// calendar days, see [`Period`](crate::Period).
///
/// # Parsing and printing
///
/// A `Duration` prints using the ISO 8601 duration format with hours as its
/// largest unit. Only non-zero units are printed. Parsing additionally
/// accepts days, and each unit may carry its own sign.
///
/// ```
/// use hora::Duration;
///
/// let d: Duration = "P1DT-1H".parse()?;
/// assert_eq!(d.to_string(), "PT23H");
///
/// let d = Duration::of_seconds(-5_401, 500_000_000)?;
/// assert_eq!(d.to_string(), "PT-1H-30M-0.500S");
/// assert_eq!(d.to_string().parse::<Duration>()?, d);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration {
    second: i64,
    nanosecond: i32,
}

impl Duration {
    /// A duration of zero length.
    pub const ZERO: Duration = Duration { second: 0, nanosecond: 0 };

    /// Creates a duration from a number of seconds and an adjustment in
    /// nanoseconds.
    ///
    /// The adjustment may be any value. It is normalized with floor division
    /// into the seconds.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the number of seconds is outside
    /// of the safe integer domain.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let d = Duration::of_seconds(9, -8)?;
    /// assert_eq!((d.seconds(), d.nano()), (8, 999_999_992));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_seconds(
        seconds: i64,
        nano_adjustment: i64,
    ) -> Result<Duration, Error> {
        let carry = nano_adjustment.div_euclid(NANOS_PER_SECOND);
        let nanosecond = nano_adjustment.rem_euclid(NANOS_PER_SECOND) as i32;
        let second = math::add_exact(seconds, carry)?;
        Ok(Duration { second, nanosecond })
    }

    /// Creates a duration of the given number of 24 hour days.
    #[inline]
    pub fn of_days(days: i64) -> Result<Duration, Error> {
        Duration::of(days, Unit::Day)
    }

    /// Creates a duration of the given number of hours.
    #[inline]
    pub fn of_hours(hours: i64) -> Result<Duration, Error> {
        Duration::of(hours, Unit::Hour)
    }

    /// Creates a duration of the given number of minutes.
    #[inline]
    pub fn of_minutes(minutes: i64) -> Result<Duration, Error> {
        Duration::of(minutes, Unit::Minute)
    }

    /// Creates a duration of the given number of milliseconds.
    #[inline]
    pub fn of_millis(millis: i64) -> Result<Duration, Error> {
        Duration::of(millis, Unit::Millisecond)
    }

    /// Creates a duration of the given number of microseconds.
    #[inline]
    pub fn of_micros(micros: i64) -> Result<Duration, Error> {
        Duration::of(micros, Unit::Microsecond)
    }

    /// Creates a duration of the given number of nanoseconds.
    #[inline]
    pub fn of_nanos(nanos: i64) -> Result<Duration, Error> {
        Duration::of(nanos, Unit::Nanosecond)
    }

    /// Creates a duration of an amount of the given unit.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the resulting number of seconds
    /// is outside of the safe integer domain.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{Duration, Unit};
    ///
    /// assert_eq!(Duration::of(3, Unit::HalfDay)?, Duration::of_hours(36)?);
    /// assert_eq!(Duration::of(-1, Unit::Microsecond)?.to_string(), "PT-0.000001S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of(amount: i64, unit: Unit) -> Result<Duration, Error> {
        let result = match unit.seconds() {
            Some(seconds) => math::multiply_exact(amount, seconds)
                .and_then(|seconds| Duration::of_seconds(seconds, 0)),
            None => {
                let unit_nanos = unit.nanoseconds();
                let per_second = NANOS_PER_SECOND / unit_nanos;
                Duration::of_seconds(
                    amount.div_euclid(per_second),
                    amount.rem_euclid(per_second) * unit_nanos,
                )
            }
        };
        result.with_context(|| E::OfUnit { amount, unit })
    }

    /// Returns the exact duration between two instants.
    ///
    /// This is the same as `start.until(end)`.
    #[inline]
    pub fn between(start: Instant, end: Instant) -> Duration {
        start.until(end)
    }

    /// Returns the number of whole seconds in this duration, rounded toward
    /// negative infinity.
    #[inline]
    pub const fn seconds(self) -> i64 {
        self.second
    }

    /// Returns the nanosecond component of this duration, always in
    /// `0..=999_999_999`.
    #[inline]
    pub const fn nano(self) -> i32 {
        self.nanosecond
    }

    /// Returns true when this duration has zero length.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.second == 0 && self.nanosecond == 0
    }

    /// Returns true when this duration is strictly less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.second < 0
    }

    /// Returns true when this duration is strictly longer than `other`.
    #[inline]
    pub fn is_longer_than(self, other: Duration) -> bool {
        self > other
    }

    /// Returns true when this duration is strictly shorter than `other`.
    #[inline]
    pub fn is_shorter_than(self, other: Duration) -> bool {
        self < other
    }

    /// Returns true when this duration has the same length as `other`.
    #[inline]
    pub fn is_equal_to(self, other: Duration) -> bool {
        self == other
    }

    /// Returns a copy of this duration with the given number of seconds.
    #[inline]
    pub fn with_seconds(self, seconds: i64) -> Result<Duration, Error> {
        Ok(Duration { second: math::safe_int(seconds)?, ..self })
    }

    /// Returns a copy of this duration with the given nanosecond component.
    ///
    /// # Errors
    ///
    /// This returns a validation error when `nanosecond` is not in
    /// `0..=999_999_999`.
    #[inline]
    pub fn with_nanos(self, nanosecond: i32) -> Result<Duration, Error> {
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range("nanosecond", nanosecond, 0, 999_999_999));
        }
        Ok(Duration { nanosecond, ..self })
    }

    /// Adds two durations.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let d = Duration::of_millis(750)?.plus(Duration::of_millis(-1_500)?)?;
    /// assert_eq!(d.to_string(), "PT-0.750S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn plus(self, other: Duration) -> Result<Duration, Error> {
        let seconds = math::add_exact(self.second, other.second)?;
        let nanos = i64::from(self.nanosecond) + i64::from(other.nanosecond);
        Duration::of_seconds(seconds, nanos)
    }

    /// Subtracts `other` from this duration.
    #[inline]
    pub fn minus(self, other: Duration) -> Result<Duration, Error> {
        let seconds = math::subtract_exact(self.second, other.second)?;
        let nanos = i64::from(self.nanosecond) - i64::from(other.nanosecond);
        Duration::of_seconds(seconds, nanos)
    }

    /// Adds the given number of 24 hour days.
    #[inline]
    pub fn plus_days(self, days: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_days(days)?)
    }

    /// Adds the given number of hours.
    #[inline]
    pub fn plus_hours(self, hours: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_hours(hours)?)
    }

    /// Adds the given number of minutes.
    #[inline]
    pub fn plus_minutes(self, minutes: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_minutes(minutes)?)
    }

    /// Adds the given number of seconds.
    #[inline]
    pub fn plus_seconds(self, seconds: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_seconds(seconds, 0)?)
    }

    /// Adds the given number of milliseconds.
    #[inline]
    pub fn plus_millis(self, millis: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_millis(millis)?)
    }

    /// Adds the given number of nanoseconds.
    #[inline]
    pub fn plus_nanos(self, nanos: i64) -> Result<Duration, Error> {
        self.plus(Duration::of_nanos(nanos)?)
    }

    /// Subtracts the given number of 24 hour days.
    #[inline]
    pub fn minus_days(self, days: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_days(days)?)
    }

    /// Subtracts the given number of hours.
    #[inline]
    pub fn minus_hours(self, hours: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_hours(hours)?)
    }

    /// Subtracts the given number of minutes.
    #[inline]
    pub fn minus_minutes(self, minutes: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_minutes(minutes)?)
    }

    /// Subtracts the given number of seconds.
    #[inline]
    pub fn minus_seconds(self, seconds: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_seconds(seconds, 0)?)
    }

    /// Subtracts the given number of milliseconds.
    #[inline]
    pub fn minus_millis(self, millis: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_millis(millis)?)
    }

    /// Subtracts the given number of nanoseconds.
    #[inline]
    pub fn minus_nanos(self, nanos: i64) -> Result<Duration, Error> {
        self.minus(Duration::of_nanos(nanos)?)
    }

    /// Multiplies this duration by a scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let d = Duration::of_millis(-1_500)?.multiplied_by(3)?;
    /// assert_eq!(d.to_string(), "PT-4.500S");
    /// assert!(Duration::of_days(1)?.multiplied_by(i64::MAX).unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn multiplied_by(self, scalar: i64) -> Result<Duration, Error> {
        match scalar {
            0 => return Ok(Duration::ZERO),
            1 => return Ok(self),
            _ => {}
        }
        let nanos = self.to_nanos_i128() * i128::from(scalar);
        Duration::from_nanos_i128("duration multiplication", nanos)
    }

    /// Divides this duration by a scalar, truncating toward zero at
    /// nanosecond precision.
    ///
    /// # Errors
    ///
    /// This returns an error when `divisor` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let d = Duration::of_seconds(10, 0)?.divided_by(3)?;
    /// assert_eq!(d.to_string(), "PT3.333333333S");
    /// let d = Duration::of_seconds(-10, 0)?.divided_by(3)?;
    /// assert_eq!(d.to_string(), "PT-3.333333333S");
    /// assert!(d.divided_by(0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn divided_by(self, divisor: i64) -> Result<Duration, Error> {
        match divisor {
            0 => {
                return Err(Error::from(M::DivideByZero {
                    op: "duration division",
                    dividend: self.second,
                }))
            }
            1 => return Ok(self),
            _ => {}
        }
        let nanos = self.to_nanos_i128() / i128::from(divisor);
        Duration::from_nanos_i128("duration division", nanos)
    }

    /// Returns this duration with its sign flipped.
    #[inline]
    pub fn negated(self) -> Result<Duration, Error> {
        Duration::of_seconds(
            math::negate_exact(self.second)?,
            -i64::from(self.nanosecond),
        )
    }

    /// Returns the absolute value of this duration.
    #[inline]
    pub fn abs(self) -> Result<Duration, Error> {
        if self.is_negative() {
            self.negated()
        } else {
            Ok(self)
        }
    }

    /// Returns the number of whole 24 hour days, truncated toward zero.
    #[inline]
    pub fn to_days(self) -> i64 {
        self.second / SECONDS_PER_DAY
    }

    /// Returns the number of whole hours, truncated toward zero.
    #[inline]
    pub fn to_hours(self) -> i64 {
        self.second / SECONDS_PER_HOUR
    }

    /// Returns the number of whole minutes, truncated toward zero.
    #[inline]
    pub fn to_minutes(self) -> i64 {
        self.second / SECONDS_PER_MINUTE
    }

    /// Returns the number of whole seconds. This is the same as
    /// [`Duration::seconds`], which means a duration of `-0.5s` returns
    /// `-1`.
    #[inline]
    pub fn to_seconds(self) -> i64 {
        self.second
    }

    /// Returns the total number of milliseconds, rounded toward negative
    /// infinity.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the total is outside of the safe
    /// integer domain.
    #[inline]
    pub fn to_millis(self) -> Result<i64, Error> {
        let millis = math::multiply_exact(self.second, MILLIS_PER_SECOND)?;
        math::add_exact(millis, i64::from(self.nanosecond) / NANOS_PER_MILLI)
    }

    /// Returns the total number of microseconds, rounded toward negative
    /// infinity.
    #[inline]
    pub fn to_micros(self) -> Result<i64, Error> {
        let micros = math::multiply_exact(self.second, 1_000_000)?;
        math::add_exact(micros, i64::from(self.nanosecond) / NANOS_PER_MICRO)
    }

    /// Returns the total number of nanoseconds.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the total is outside of the safe
    /// integer domain, which is the case for durations longer than about
    /// 104 days.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// assert_eq!(Duration::of_millis(-1)?.to_nanos()?, -1_000_000);
    /// assert!(Duration::of_days(105)?.to_nanos().unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_nanos(self) -> Result<i64, Error> {
        let nanos = math::multiply_exact(self.second, NANOS_PER_SECOND)?;
        math::add_exact(nanos, i64::from(self.nanosecond))
    }

    /// Returns the number of whole days. This is the same as
    /// [`Duration::to_days`].
    #[inline]
    pub fn to_days_part(self) -> i64 {
        self.to_days()
    }

    /// Returns the hours remaining after whole days are removed, in
    /// `-23..=23`.
    #[inline]
    pub fn to_hours_part(self) -> i8 {
        (self.to_hours() % 24) as i8
    }

    /// Returns the minutes remaining after whole hours are removed, in
    /// `-59..=59`.
    #[inline]
    pub fn to_minutes_part(self) -> i8 {
        (self.to_minutes() % 60) as i8
    }

    /// Returns the seconds remaining after whole minutes are removed, in
    /// `-59..=59`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let d: Duration = "PT26H3M4.005S".parse()?;
    /// assert_eq!(d.to_days_part(), 1);
    /// assert_eq!(d.to_hours_part(), 2);
    /// assert_eq!(d.to_minutes_part(), 3);
    /// assert_eq!(d.to_seconds_part(), 4);
    /// assert_eq!(d.to_millis_part(), 5);
    /// assert_eq!(d.to_nanos_part(), 5_000_000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_seconds_part(self) -> i8 {
        (self.second % SECONDS_PER_MINUTE) as i8
    }

    /// Returns the milliseconds in the nanosecond component.
    #[inline]
    pub fn to_millis_part(self) -> i32 {
        self.nanosecond / (NANOS_PER_MILLI as i32)
    }

    /// Returns the nanosecond component. This is the same as
    /// [`Duration::nano`].
    #[inline]
    pub fn to_nanos_part(self) -> i32 {
        self.nanosecond
    }

    /// Adds this duration to an instant.
    #[inline]
    pub fn add_to(self, instant: Instant) -> Result<Instant, Error> {
        instant.plus(self)
    }

    /// Subtracts this duration from an instant.
    #[inline]
    pub fn subtract_from(self, instant: Instant) -> Result<Instant, Error> {
        instant.minus(self)
    }

    /// Creates a duration without checking it.
    ///
    /// Callers must guarantee that `second` is a safe integer and that
    /// `nanosecond` is in `0..=999_999_999`.
    #[inline]
    pub(crate) const fn new_unchecked(second: i64, nanosecond: i32) -> Duration {
        Duration { second, nanosecond }
    }

    #[inline]
    fn to_nanos_i128(self) -> i128 {
        i128::from(self.second) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanosecond)
    }

    fn from_nanos_i128(op: &'static str, nanos: i128) -> Result<Duration, Error> {
        let billion = i128::from(NANOS_PER_SECOND);
        let second = nanos.div_euclid(billion);
        let nanosecond = nanos.rem_euclid(billion) as i32;
        if !(i128::from(math::SAFE_MIN)..=i128::from(math::SAFE_MAX))
            .contains(&second)
        {
            return Err(Error::from(M::Overflow { op, value: second }));
        }
        Ok(Duration { second: second as i64, nanosecond })
    }
}

impl TryFrom<core::time::Duration> for Duration {
    type Error = Error;

    fn try_from(d: core::time::Duration) -> Result<Duration, Error> {
        let second = i64::try_from(d.as_secs()).map_err(|_| {
            Error::from(M::Overflow {
                op: "unsigned duration conversion",
                value: i128::from(d.as_secs()),
            })
        })?;
        Duration::of_seconds(second, i64::from(d.subsec_nanos()))
    }
}

impl TryFrom<Duration> for core::time::Duration {
    type Error = Error;

    fn try_from(d: Duration) -> Result<core::time::Duration, Error> {
        if d.is_negative() {
            return Err(Error::from(E::NegativeToUnsigned { duration: d }));
        }
        Ok(core::time::Duration::new(d.second as u64, d.nanosecond as u32))
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_duration(self, f)
    }
}

impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_duration(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        use quickcheck::Arbitrary;

        let second = i64::arbitrary(g) % math::SAFE_MAX;
        let nanosecond = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Duration { second, nanosecond }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Duration>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new((self.second, self.nanosecond).shrink().map(
            |(second, nanosecond)| Duration {
                second,
                nanosecond: nanosecond.rem_euclid(1_000_000_000),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn normalization() {
        let d = Duration::of_seconds(9, -8).unwrap();
        assert_eq!((d.seconds(), d.nano()), (8, 999_999_992));
        let d = Duration::of_millis(-500).unwrap();
        assert_eq!((d.seconds(), d.nano()), (-1, 500_000_000));
        assert!(d.is_negative());
        assert_eq!(d.to_seconds(), -1);
        let d = Duration::of_seconds(0, i64::MIN).unwrap();
        assert!(d.to_nanos().unwrap_err().is_overflow());
    }

    #[test]
    fn printing() {
        let p = |s: i64, n: i64| Duration::of_seconds(s, n).unwrap().to_string();
        assert_eq!(p(0, 0), "PT0S");
        assert_eq!(p(0, -500_000_000), "PT-0.500S");
        assert_eq!(p(-5_401, 500_000_000), "PT-1H-30M-0.500S");
        assert_eq!(p(90_000, 0), "PT25H");
        assert_eq!(p(3_600, 1), "PT1H0.000000001S");
        assert_eq!(p(-60, 0), "PT-1M");
        assert_eq!(p(61, 120_000_000), "PT1M1.120S");
        assert_eq!(p(-3, 250_000_000), "PT-2.750S");
    }

    #[test]
    fn parts_of_negative() {
        let d = Duration::of_seconds(-90_061, 0).unwrap();
        assert_eq!(d.to_days_part(), -1);
        assert_eq!(d.to_hours_part(), -1);
        assert_eq!(d.to_minutes_part(), -1);
        assert_eq!(d.to_seconds_part(), -1);
    }

    #[test]
    fn overflow_has_context() {
        let err = Duration::of_days(i64::MAX).unwrap_err();
        assert!(err.is_overflow());
        insta::assert_snapshot!(
            err,
            @"failed to create duration of 9223372036854775807 days: multiplication produced 796899343984252629724800, which is outside the safe integer range of -9007199254740991..=9007199254740991",
        );
    }

    #[test]
    fn std_conversion() {
        let d = Duration::try_from(core::time::Duration::new(5, 7)).unwrap();
        assert_eq!((d.seconds(), d.nano()), (5, 7));
        let back = core::time::Duration::try_from(d).unwrap();
        assert_eq!(back, core::time::Duration::new(5, 7));

        let neg = Duration::of_millis(-1).unwrap();
        insta::assert_snapshot!(
            core::time::Duration::try_from(neg).unwrap_err(),
            @"cannot convert negative duration PT-0.001S to an unsigned duration",
        );
    }

    quickcheck::quickcheck! {
        fn prop_display_roundtrip(d: Duration) -> bool {
            d.to_string().parse::<Duration>().unwrap() == d
        }

        fn prop_negate_twice(d: Duration) -> quickcheck::TestResult {
            let Ok(neg) = d.negated() else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(neg.negated().unwrap() == d)
        }

        fn prop_plus_minus(a: Duration, b: Duration) -> quickcheck::TestResult {
            let Ok(sum) = a.plus(b) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(sum.minus(b).unwrap() == a)
        }

        fn prop_divide_undoes_multiply(d: Duration, k: i8) -> quickcheck::TestResult {
            if k == 0 {
                return quickcheck::TestResult::discard();
            }
            let Ok(product) = d.multiplied_by(i64::from(k)) else {
                return quickcheck::TestResult::discard();
            };
            let back = product.divided_by(i64::from(k)).unwrap();
            quickcheck::TestResult::from_bool(back == d)
        }
    }
}
