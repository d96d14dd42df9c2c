use crate::{
    civil::{LocalDateTime, LocalTime, Weekday},
    clock::Clock,
    error::{civil::Error as E, Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    math,
    util::common,
    Period,
};

/// The smallest year a `LocalDate` can represent.
pub(crate) const MIN_YEAR: i32 = -999_999;
/// The largest year a `LocalDate` can represent.
pub(crate) const MAX_YEAR: i32 = 999_999;
/// The epoch day of `LocalDate::MIN`.
pub(crate) const MIN_EPOCH_DAY: i64 = common::to_epoch_day(MIN_YEAR, 1, 1);
/// The epoch day of `LocalDate::MAX`.
pub(crate) const MAX_EPOCH_DAY: i64 = common::to_epoch_day(MAX_YEAR, 12, 31);

/// A representation of a civil date in the proleptic Gregorian calendar.
///
/// A `LocalDate` value corresponds to a triple of year, month and day. Every
/// `LocalDate` value is guaranteed to be a valid Gregorian calendar date. For
/// example, both `2023-02-29` and `2023-11-31` are invalid and cannot be
/// represented by a `LocalDate`.
///
/// # Parsing and printing
///
/// The `LocalDate` type provides convenient trait implementations of
/// [`core::str::FromStr`] and [`core::fmt::Display`]. Years with more than
/// four digits must be written with a sign:
///
/// ```
/// use hora::civil::LocalDate;
///
/// let date: LocalDate = "2024-06-19".parse()?;
/// assert_eq!(date.to_string(), "2024-06-19");
///
/// let date: LocalDate = "+012345-01-01".parse()?;
/// assert_eq!(date.to_string(), "+12345-01-01");
///
/// let date = LocalDate::of(-1, 12, 31)?;
/// assert_eq!(date.to_string(), "-0001-12-31");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Arithmetic
///
/// Adding days never changes the day-of-month in surprising ways. Adding
/// months or years does: when the resulting month is shorter than the
/// original day-of-month, the day is clamped to the last day of that month.
///
/// ```
/// use hora::civil::LocalDate;
///
/// let date = LocalDate::of(2024, 1, 31)?;
/// assert_eq!(date.plus_months(1)?, LocalDate::of(2024, 2, 29)?);
/// assert_eq!(date.plus_months(2)?, LocalDate::of(2024, 3, 31)?);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Arithmetic that leaves the supported range of years reports an error for
/// which [`Error::is_date_range`] returns true.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalDate {
    year: i32,
    month: i8,
    day: i8,
}

impl LocalDate {
    /// The minimum representable date, `-999999-01-01`.
    pub const MIN: LocalDate = LocalDate::constant(MIN_YEAR, 1, 1);

    /// The maximum representable date, `+999999-12-31`.
    pub const MAX: LocalDate = LocalDate::constant(MAX_YEAR, 12, 31);

    /// The Unix epoch, `1970-01-01`.
    pub const EPOCH: LocalDate = LocalDate::constant(1970, 1, 1);

    /// Creates a new `LocalDate` value from its component year, month and
    /// day values.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the given year-month-day does
    /// not correspond to a valid date. Namely, all of the following must be
    /// true:
    ///
    /// * The year must be in the range `-999_999..=999_999`.
    /// * The month must be in the range `1..=12`.
    /// * The day must be at least `1` and must be at most the number of days
    /// in the corresponding month. So for example, `2024-02-29` is valid but
    /// `2023-02-29` is not.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// let d = LocalDate::of(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// let err = LocalDate::of(2023, 2, 29).unwrap_err();
    /// assert!(err.is_validation());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of(year: i32, month: i8, day: i8) -> Result<LocalDate, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::range("year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = common::days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(Error::range("day", day, 1, max_day));
        }
        Ok(LocalDate { year, month, day })
    }

    /// Creates a new `LocalDate` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This routine panics when [`LocalDate::of`] would return an error.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// const LEAP: LocalDate = LocalDate::constant(2024, 2, 29);
    /// assert_eq!(LEAP.day(), 29);
    /// ```
    #[inline]
    pub const fn constant(year: i32, month: i8, day: i8) -> LocalDate {
        if year < MIN_YEAR || year > MAX_YEAR {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        if day < 1 || day > common::days_in_month(year, month) {
            panic!("invalid day");
        }
        LocalDate { year, month, day }
    }

    /// Creates a date from a number of days since `1970-01-01`.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the epoch day corresponds to a
    /// date outside of [`LocalDate::MIN`] and [`LocalDate::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// assert_eq!(LocalDate::of_epoch_day(0)?, LocalDate::EPOCH);
    /// assert_eq!(LocalDate::of_epoch_day(-1)?, LocalDate::of(1969, 12, 31)?);
    /// assert_eq!(LocalDate::of_epoch_day(19_723)?.to_string(), "2024-01-01");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_epoch_day(epoch_day: i64) -> Result<LocalDate, Error> {
        LocalDate::from_epoch_day_checked(epoch_day).ok_or_else(|| {
            Error::range("epoch day", epoch_day, MIN_EPOCH_DAY, MAX_EPOCH_DAY)
        })
    }

    /// Creates a date from a year and an ordinal day of that year, starting
    /// at `1`.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the year is out of range or
    /// when the day is not in `1..=365` (`1..=366` in leap years).
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// assert_eq!(LocalDate::of_year_day(2024, 60)?, LocalDate::of(2024, 2, 29)?);
    /// assert_eq!(LocalDate::of_year_day(2023, 60)?, LocalDate::of(2023, 3, 1)?);
    /// assert!(LocalDate::of_year_day(2023, 366).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_year_day(year: i32, day_of_year: i16) -> Result<LocalDate, Error> {
        let first = LocalDate::of(year, 1, 1)?;
        let max = common::days_in_year(year);
        if !(1..=max).contains(&day_of_year) {
            return Err(Error::range("day of year", day_of_year, 1, max));
        }
        let epoch_day = first.to_epoch_day() + i64::from(day_of_year) - 1;
        LocalDate::of_epoch_day(epoch_day)
    }

    /// Returns the current date according to the contextual clock.
    ///
    /// See [`clock`](crate::clock) for how the contextual clock is chosen.
    ///
    /// # Panics
    ///
    /// This panics if the clock reports an instant that cannot be converted
    /// to a date in the clock's time zone. If you want to get the current
    /// date fallibly, use [`LocalDate::now_with`].
    #[cfg(feature = "std")]
    #[inline]
    pub fn now() -> LocalDate {
        LocalDate::now_with(&Clock::contextual())
            .expect("contextual clock reports a valid date")
    }

    /// Returns the current date according to the given clock, in the
    /// clock's time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDate, clock::Clock, tz::TimeZone, Instant};
    ///
    /// let instant: Instant = "2024-03-10T23:30:00Z".parse()?;
    /// let clock = Clock::fixed(instant, TimeZone::fixed(3_600)?);
    /// assert_eq!(LocalDate::now_with(&clock)?.to_string(), "2024-03-11");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn now_with(clock: &Clock) -> Result<LocalDate, Error> {
        LocalDateTime::now_with(clock).map(|dt| dt.date())
    }

    /// Returns the year of this date.
    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month of this date, in `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day of the month of this date.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the ordinal day of the year, in `1..=366`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// assert_eq!(LocalDate::of(2024, 12, 31)?.day_of_year(), 366);
    /// assert_eq!(LocalDate::of(2023, 12, 31)?.day_of_year(), 365);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn day_of_year(self) -> i16 {
        common::day_of_year(self.year, self.month, self.day)
    }

    /// Returns the weekday of this date.
    #[inline]
    pub fn day_of_week(self) -> Weekday {
        // 1970-01-01 was a Thursday.
        let offset = (self.to_epoch_day() + 3).rem_euclid(7);
        // OK because `rem_euclid(7)` is always in `0..=6`.
        Weekday::from_monday_zero_offset_unchecked(offset as i8)
    }

    /// Returns true if and only if the year of this date is a leap year.
    #[inline]
    pub fn is_leap_year(self) -> bool {
        common::is_leap_year(self.year)
    }

    /// Returns the number of days in the month of this date.
    #[inline]
    pub fn length_of_month(self) -> i8 {
        common::days_in_month(self.year, self.month)
    }

    /// Returns the number of days in the year of this date.
    #[inline]
    pub fn length_of_year(self) -> i16 {
        common::days_in_year(self.year)
    }

    /// Returns the number of days from `1970-01-01` to this date.
    #[inline]
    pub fn to_epoch_day(self) -> i64 {
        common::to_epoch_day(self.year, self.month, self.day)
    }

    /// Returns a new date with the year replaced.
    ///
    /// If the day-of-month is invalid in the new year (only possible for
    /// February 29), it is clamped to the last day of the month.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// let date = LocalDate::of(2024, 2, 29)?;
    /// assert_eq!(date.with_year(2023)?, LocalDate::of(2023, 2, 28)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn with_year(self, year: i32) -> Result<LocalDate, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::range("year", year, MIN_YEAR, MAX_YEAR));
        }
        Ok(LocalDate::resolve_previous_valid(year, self.month, self.day))
    }

    /// Returns a new date with the month replaced.
    ///
    /// If the day-of-month is invalid in the new month, it is clamped to the
    /// last day of that month.
    #[inline]
    pub fn with_month(self, month: i8) -> Result<LocalDate, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        Ok(LocalDate::resolve_previous_valid(self.year, month, self.day))
    }

    /// Returns a new date with the day-of-month replaced.
    ///
    /// # Errors
    ///
    /// Unlike [`LocalDate::with_month`], this returns a validation error
    /// when the day is not valid in this date's month.
    #[inline]
    pub fn with_day_of_month(self, day: i8) -> Result<LocalDate, Error> {
        LocalDate::of(self.year, self.month, day)
    }

    /// Adds the given number of days to this date.
    ///
    /// # Errors
    ///
    /// This returns an error for which [`Error::is_date_range`] is true when
    /// the result is outside of the supported range, and an overflow error
    /// when `days` is outside of the safe integer domain.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// let date = LocalDate::of(2024, 2, 28)?;
    /// assert_eq!(date.plus_days(1)?, LocalDate::of(2024, 2, 29)?);
    /// assert_eq!(date.plus_days(-59)?, LocalDate::of(2023, 12, 31)?);
    /// assert!(LocalDate::MAX.plus_days(1).unwrap_err().is_date_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn plus_days(self, days: i64) -> Result<LocalDate, Error> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_day = math::add_exact(self.to_epoch_day(), days)
            .with_context(|| E::AddDays { days })?;
        LocalDate::from_epoch_day_checked(epoch_day)
            .ok_or_else(|| Error::date_range(epoch_day))
            .with_context(|| E::AddDays { days })
    }

    /// Adds the given number of weeks to this date.
    #[inline]
    pub fn plus_weeks(self, weeks: i64) -> Result<LocalDate, Error> {
        let days = math::multiply_exact(weeks, 7)
            .with_context(|| E::AddWeeks { weeks })?;
        self.plus_days(days)
    }

    /// Adds the given number of months to this date, clamping the
    /// day-of-month to the length of the resulting month.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// let date = LocalDate::of(2023, 3, 31)?;
    /// assert_eq!(date.plus_months(-1)?, LocalDate::of(2023, 2, 28)?);
    /// assert_eq!(date.plus_months(-13)?, LocalDate::of(2022, 2, 28)?);
    /// assert_eq!(date.plus_months(11)?, LocalDate::of(2024, 2, 29)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn plus_months(self, months: i64) -> Result<LocalDate, Error> {
        if months == 0 {
            return Ok(self);
        }
        let total = math::add_exact(self.proleptic_month(), months)
            .with_context(|| E::AddMonths { months })?;
        let year = total.div_euclid(12);
        // OK because `rem_euclid(12)` is in `0..=11`.
        let month = (total.rem_euclid(12) + 1) as i8;
        let year = LocalDate::checked_year(year)
            .with_context(|| E::AddMonths { months })?;
        Ok(LocalDate::resolve_previous_valid(year, month, self.day))
    }

    /// Adds the given number of years to this date, clamping February 29 to
    /// February 28 when the resulting year is not a leap year.
    #[inline]
    pub fn plus_years(self, years: i64) -> Result<LocalDate, Error> {
        if years == 0 {
            return Ok(self);
        }
        let year = math::add_exact(i64::from(self.year), years)
            .and_then(|year| LocalDate::checked_year(year))
            .with_context(|| E::AddYears { years })?;
        Ok(LocalDate::resolve_previous_valid(year, self.month, self.day))
    }

    /// Subtracts the given number of days from this date.
    #[inline]
    pub fn minus_days(self, days: i64) -> Result<LocalDate, Error> {
        self.plus_days(math::negate_exact(days)?)
    }

    /// Subtracts the given number of weeks from this date.
    #[inline]
    pub fn minus_weeks(self, weeks: i64) -> Result<LocalDate, Error> {
        self.plus_weeks(math::negate_exact(weeks)?)
    }

    /// Subtracts the given number of months from this date.
    #[inline]
    pub fn minus_months(self, months: i64) -> Result<LocalDate, Error> {
        self.plus_months(math::negate_exact(months)?)
    }

    /// Subtracts the given number of years from this date.
    #[inline]
    pub fn minus_years(self, years: i64) -> Result<LocalDate, Error> {
        self.plus_years(math::negate_exact(years)?)
    }

    /// Combines this date with a time to create a datetime.
    #[inline]
    pub const fn at_time(self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::of(self, time)
    }

    /// Returns the datetime at midnight at the start of this date.
    #[inline]
    pub const fn at_start_of_day(self) -> LocalDateTime {
        LocalDateTime::of(self, LocalTime::MIDNIGHT)
    }

    /// Returns the period from this date until the given `end` date.
    ///
    /// This is the same as [`Period::between`].
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDate, Period};
    ///
    /// let start = LocalDate::of(2023, 1, 31)?;
    /// let end = LocalDate::of(2024, 3, 1)?;
    /// assert_eq!(start.until(end)?, Period::of(1, 1, 1));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until(self, end: LocalDate) -> Result<Period, Error> {
        Period::between(self, end)
    }

    /// Returns the number of months since the (proleptic) start of year `0`.
    #[inline]
    pub(crate) fn proleptic_month(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Converts an epoch day to a date, returning `None` when it is out of
    /// range.
    #[inline]
    pub(crate) fn from_epoch_day_checked(epoch_day: i64) -> Option<LocalDate> {
        if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
            return None;
        }
        let (year, month, day) = common::from_epoch_day(epoch_day);
        Some(LocalDate { year, month, day })
    }

    /// Checks that the year produced by arithmetic is in range, reporting a
    /// date range error otherwise.
    #[inline]
    fn checked_year(year: i64) -> Result<i32, Error> {
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(Error::year_range(year));
        }
        // OK because the year is in `MIN_YEAR..=MAX_YEAR`.
        Ok(year as i32)
    }

    /// Creates a date, clamping the day to the length of the month.
    ///
    /// Callers must guarantee that the year and month are in range.
    #[inline]
    fn resolve_previous_valid(year: i32, month: i8, day: i8) -> LocalDate {
        let day = common::saturate_day_in_month(year, month, day);
        LocalDate { year, month, day }
    }
}

impl Default for LocalDate {
    fn default() -> LocalDate {
        LocalDate::EPOCH
    }
}

impl core::fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_date(self, f)
    }
}

impl core::str::FromStr for LocalDate {
    type Err = Error;

    fn from_str(string: &str) -> Result<LocalDate, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_local_date(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalDate {
        use quickcheck::Arbitrary;

        let span = MAX_EPOCH_DAY - MIN_EPOCH_DAY + 1;
        let day = MIN_EPOCH_DAY + i64::arbitrary(g).rem_euclid(span);
        LocalDate::from_epoch_day_checked(day).unwrap()
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = LocalDate>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            self.to_epoch_day()
                .shrink()
                .filter_map(LocalDate::from_epoch_day_checked),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_boundaries() {
        assert_eq!(LocalDate::MIN.to_epoch_day(), MIN_EPOCH_DAY);
        assert_eq!(LocalDate::MAX.to_epoch_day(), MAX_EPOCH_DAY);
        assert_eq!(LocalDate::of_epoch_day(MIN_EPOCH_DAY).unwrap(), LocalDate::MIN);
        assert!(LocalDate::of_epoch_day(MIN_EPOCH_DAY - 1)
            .unwrap_err()
            .is_validation());
        assert!(LocalDate::MIN.plus_days(-1).unwrap_err().is_date_range());
        assert!(LocalDate::MAX.plus_months(1).unwrap_err().is_date_range());
        assert!(LocalDate::MAX.plus_years(1).unwrap_err().is_date_range());
        assert!(LocalDate::MIN.plus_years(-1).unwrap_err().is_date_range());
    }

    #[test]
    fn overflow_is_not_date_range() {
        let err = LocalDate::EPOCH.plus_days(i64::MAX).unwrap_err();
        assert!(err.is_overflow());
        assert!(!err.is_date_range());

        let err = LocalDate::EPOCH.plus_weeks(math::SAFE_MAX).unwrap_err();
        assert!(err.is_overflow());

        let err = LocalDate::EPOCH.plus_years(math::SAFE_MAX).unwrap_err();
        assert!(err.is_overflow());

        let err = LocalDate::EPOCH.plus_years(1_000_000).unwrap_err();
        assert!(err.is_date_range());
        insta::assert_snapshot!(
            err,
            @"failed to add 1000000 years to date: year 1001970 is outside the supported range of years -999999..=999999",
        );
    }

    #[test]
    fn error_messages() {
        insta::assert_snapshot!(
            LocalDate::of(2023, 2, 29).unwrap_err(),
            @"parameter 'day' with value 29 is not in the required range of 1..=28",
        );
        insta::assert_snapshot!(
            LocalDate::MAX.plus_days(2).unwrap_err(),
            @"failed to add 2 days to date: date with epoch day 364522973 is outside the supported range of dates",
        );
    }

    #[test]
    fn month_arithmetic_clamps() {
        let d = LocalDate::constant(2016, 1, 31);
        assert_eq!(d.plus_months(1).unwrap(), LocalDate::constant(2016, 2, 29));
        assert_eq!(d.plus_months(-2).unwrap(), LocalDate::constant(2015, 11, 30));
        assert_eq!(d.plus_months(14).unwrap(), LocalDate::constant(2017, 3, 31));
        assert_eq!(d.minus_months(13).unwrap(), LocalDate::constant(2014, 12, 31));
        assert_eq!(d.plus_weeks(-1).unwrap(), LocalDate::constant(2016, 1, 24));
    }

    #[test]
    fn weekdays() {
        assert_eq!(LocalDate::EPOCH.day_of_week(), Weekday::Thursday);
        assert_eq!(LocalDate::constant(2024, 6, 17).day_of_week(), Weekday::Monday);
        assert_eq!(LocalDate::constant(0, 1, 1).day_of_week(), Weekday::Saturday);
        assert_eq!(LocalDate::constant(-1, 12, 31).day_of_week(), Weekday::Friday);
    }

    quickcheck::quickcheck! {
        fn prop_epoch_day_roundtrip(date: LocalDate) -> bool {
            LocalDate::of_epoch_day(date.to_epoch_day()).unwrap() == date
        }

        fn prop_plus_days_then_minus(date: LocalDate, days: i32) -> quickcheck::TestResult {
            let Ok(moved) = date.plus_days(i64::from(days)) else {
                return quickcheck::TestResult::discard();
            };
            let back = moved.minus_days(i64::from(days)).unwrap();
            quickcheck::TestResult::from_bool(back == date)
        }

        fn prop_day_of_week_advances(date: LocalDate) -> quickcheck::TestResult {
            let Ok(next) = date.plus_days(1) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(
                next.day_of_week() == date.day_of_week().next(),
            )
        }

        fn prop_display_roundtrip(date: LocalDate) -> bool {
            use alloc::string::ToString;

            date.to_string().parse::<LocalDate>().unwrap() == date
        }
    }
}
