use crate::{
    civil::LocalDate,
    error::{period::Error as E, Error, ErrorContext},
    fmt::iso8601::{DateTimeParser, DateTimePrinter},
    math,
};

/// A calendar based amount of time, in years, months and days.
///
/// Unlike a [`Duration`](crate::Duration), a period has no fixed length. One
/// month added to January 31 is February 29 (in a leap year) while one month
/// added to March 1 is April 1. Each field may be independently positive or
/// negative and periods are never normalized implicitly. For example,
/// `P14M` and `P1Y2M` are not equal, although [`Period::normalized`] maps
/// both to `P1Y2M`.
///
/// # Example
///
/// ```
/// use hora::{civil::LocalDate, Period};
///
/// let p = Period::of(1, 2, 3);
/// let date = LocalDate::of(2016, 1, 31)?;
/// assert_eq!(p.add_to_local_date(date)?, LocalDate::of(2017, 4, 3)?);
///
/// let p: Period = "P1Y2M3W4D".parse()?;
/// assert_eq!((p.years(), p.months(), p.days()), (1, 2, 25));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    /// A period of zero length.
    pub const ZERO: Period = Period { years: 0, months: 0, days: 0 };

    /// Creates a period from years, months and days.
    #[inline]
    pub const fn of(years: i32, months: i32, days: i32) -> Period {
        Period { years, months, days }
    }

    /// Creates a period of the given number of years.
    #[inline]
    pub const fn of_years(years: i32) -> Period {
        Period::of(years, 0, 0)
    }

    /// Creates a period of the given number of months.
    #[inline]
    pub const fn of_months(months: i32) -> Period {
        Period::of(0, months, 0)
    }

    /// Creates a period of the given number of weeks, stored as days.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when the number of days does not fit
    /// in an `i32`.
    #[inline]
    pub fn of_weeks(weeks: i32) -> Result<Period, Error> {
        let days = math::multiply_exact(i64::from(weeks), 7)?;
        Ok(Period::of(0, 0, math::to_i32_exact(days)?))
    }

    /// Creates a period of the given number of days.
    #[inline]
    pub const fn of_days(days: i32) -> Period {
        Period::of(0, 0, days)
    }

    /// Returns the period between two dates.
    ///
    /// The result is negative when `end` is before `start`. Whole months are
    /// counted first, and the remaining days always have the same sign as
    /// the months.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDate, Period};
    ///
    /// let start = LocalDate::of(2024, 1, 31)?;
    /// let end = LocalDate::of(2025, 3, 1)?;
    /// assert_eq!(Period::between(start, end)?.to_string(), "P1Y1M1D");
    /// assert_eq!(Period::between(end, start)?.to_string(), "P-1Y-1M-1D");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn between(start: LocalDate, end: LocalDate) -> Result<Period, Error> {
        let mut total_months = end.proleptic_month() - start.proleptic_month();
        let mut days = i64::from(end.day()) - i64::from(start.day());
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let anchor = start.plus_months(total_months)?;
            days = end.to_epoch_day() - anchor.to_epoch_day();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i64::from(end.length_of_month());
        }
        Ok(Period {
            years: math::to_i32_exact(total_months / 12)?,
            months: math::to_i32_exact(total_months % 12)?,
            days: math::to_i32_exact(days)?,
        })
    }

    /// Returns the years field.
    #[inline]
    pub const fn years(self) -> i32 {
        self.years
    }

    /// Returns the months field.
    #[inline]
    pub const fn months(self) -> i32 {
        self.months
    }

    /// Returns the days field.
    #[inline]
    pub const fn days(self) -> i32 {
        self.days
    }

    /// Returns a copy of this period with the years field replaced.
    #[inline]
    pub const fn with_years(self, years: i32) -> Period {
        Period { years, ..self }
    }

    /// Returns a copy of this period with the months field replaced.
    #[inline]
    pub const fn with_months(self, months: i32) -> Period {
        Period { months, ..self }
    }

    /// Returns a copy of this period with the days field replaced.
    #[inline]
    pub const fn with_days(self, days: i32) -> Period {
        Period { days, ..self }
    }

    /// Returns true when every field is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Returns true when any field is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Adds two periods field by field.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when a field does not fit in an
    /// `i32`.
    pub fn plus(self, other: Period) -> Result<Period, Error> {
        self.combine(other, math::add_exact)
            .with_context(|| E::Add { period: other })
    }

    /// Subtracts `other` from this period field by field.
    pub fn minus(self, other: Period) -> Result<Period, Error> {
        self.combine(other, math::subtract_exact)
            .with_context(|| E::Subtract { period: other })
    }

    /// Adds the given number of years.
    #[inline]
    pub fn plus_years(self, years: i64) -> Result<Period, Error> {
        let years = math::add_exact(i64::from(self.years), years)?;
        Ok(self.with_years(math::to_i32_exact(years)?))
    }

    /// Adds the given number of months.
    #[inline]
    pub fn plus_months(self, months: i64) -> Result<Period, Error> {
        let months = math::add_exact(i64::from(self.months), months)?;
        Ok(self.with_months(math::to_i32_exact(months)?))
    }

    /// Adds the given number of days.
    #[inline]
    pub fn plus_days(self, days: i64) -> Result<Period, Error> {
        let days = math::add_exact(i64::from(self.days), days)?;
        Ok(self.with_days(math::to_i32_exact(days)?))
    }

    /// Subtracts the given number of years.
    #[inline]
    pub fn minus_years(self, years: i64) -> Result<Period, Error> {
        self.plus_years(math::negate_exact(years)?)
    }

    /// Subtracts the given number of months.
    #[inline]
    pub fn minus_months(self, months: i64) -> Result<Period, Error> {
        self.plus_months(math::negate_exact(months)?)
    }

    /// Subtracts the given number of days.
    #[inline]
    pub fn minus_days(self, days: i64) -> Result<Period, Error> {
        self.plus_days(math::negate_exact(days)?)
    }

    /// Multiplies every field by a scalar.
    pub fn multiplied_by(self, scalar: i32) -> Result<Period, Error> {
        if scalar == 1 {
            return Ok(self);
        }
        let scalar_period = Period::of(scalar, scalar, scalar);
        self.combine(scalar_period, math::multiply_exact)
            .with_context(|| E::Multiply { scalar })
    }

    /// Negates every field.
    ///
    /// # Errors
    ///
    /// This returns an overflow error when a field is `i32::MIN`.
    pub fn negated(self) -> Result<Period, Error> {
        self.multiplied_by(-1)
    }

    /// Returns the total number of months in the years and months fields.
    /// The days field is ignored.
    #[inline]
    pub fn to_total_months(self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }

    /// Returns a copy of this period with months rolled up into years.
    ///
    /// Years and months end up with the same sign (or are zero), and the
    /// absolute number of months is less than 12. The days field is left
    /// alone.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Period;
    ///
    /// assert_eq!(Period::of(1, 15, 40).normalized()?, Period::of(2, 3, 40));
    /// assert_eq!(Period::of(1, -15, 0).normalized()?, Period::of(0, -3, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn normalized(self) -> Result<Period, Error> {
        let total = self.to_total_months();
        let years = math::to_i32_exact(total / 12).context(E::Normalize)?;
        Ok(Period { years, months: (total % 12) as i32, days: self.days })
    }

    /// Adds this period to a date.
    ///
    /// Years and months are applied together, as a single number of months,
    /// and the day of month is clamped to the length of the resulting month.
    /// Days are applied afterwards.
    ///
    /// # Errors
    ///
    /// This returns a date range error when the result is outside of the
    /// supported range of dates.
    pub fn add_to_local_date(self, date: LocalDate) -> Result<LocalDate, Error> {
        let mut date = date;
        if self.months == 0 {
            if self.years != 0 {
                date = date.plus_years(i64::from(self.years))?;
            }
        } else {
            date = date.plus_months(self.to_total_months())?;
        }
        if self.days != 0 {
            date = date.plus_days(i64::from(self.days))?;
        }
        Ok(date)
    }

    /// Subtracts this period from a date.
    ///
    /// This is the same as adding the negation of this period, except that
    /// no field can overflow.
    pub fn subtract_from_local_date(
        self,
        date: LocalDate,
    ) -> Result<LocalDate, Error> {
        let mut date = date;
        if self.months == 0 {
            if self.years != 0 {
                date = date.minus_years(i64::from(self.years))?;
            }
        } else {
            date = date.minus_months(self.to_total_months())?;
        }
        if self.days != 0 {
            date = date.minus_days(i64::from(self.days))?;
        }
        Ok(date)
    }

    /// Applies `op` to each pair of fields, narrowing the results back to
    /// `i32`.
    fn combine(
        self,
        other: Period,
        op: impl Fn(i64, i64) -> Result<i64, Error>,
    ) -> Result<Period, Error> {
        let field = |a: i32, b: i32| {
            math::to_i32_exact(op(i64::from(a), i64::from(b))?)
        };
        Ok(Period {
            years: field(self.years, other.years)?,
            months: field(self.months, other.months)?,
            days: field(self.days, other.days)?,
        })
    }
}

impl core::fmt::Debug for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_period(self, f)
    }
}

impl core::str::FromStr for Period {
    type Err = Error;

    fn from_str(string: &str) -> Result<Period, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_period(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Period {
    fn arbitrary(g: &mut quickcheck::Gen) -> Period {
        use quickcheck::Arbitrary;

        Period::of(i32::arbitrary(g), i32::arbitrary(g), i32::arbitrary(g))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Period>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            (self.years, self.months, self.days)
                .shrink()
                .map(|(y, m, d)| Period::of(y, m, d)),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn date(y: i32, m: i8, d: i8) -> LocalDate {
        LocalDate::of(y, m, d).unwrap()
    }

    #[test]
    fn add_clamps_once() {
        let p = Period::of(1, 2, 3);
        assert_eq!(p.add_to_local_date(date(2016, 1, 31)).unwrap(), date(2017, 4, 3));
        // Years alone go through `plus_years`, which clamps Feb 29.
        let p = Period::of_years(1);
        assert_eq!(p.add_to_local_date(date(2024, 2, 29)).unwrap(), date(2025, 2, 28));
        assert_eq!(
            p.subtract_from_local_date(date(2024, 2, 29)).unwrap(),
            date(2023, 2, 28),
        );
    }

    #[test]
    fn between_sign_agreement() {
        let got = Period::between(date(2024, 3, 31), date(2024, 2, 1)).unwrap();
        assert_eq!(got, Period::of(0, -1, -30));
        let got = Period::between(date(2024, 1, 31), date(2024, 2, 29)).unwrap();
        assert_eq!(got, Period::of(0, 0, 29));
        let got = Period::between(date(2023, 12, 25), date(2023, 12, 25)).unwrap();
        assert!(got.is_zero());
    }

    #[test]
    fn overflow_errors() {
        let err = Period::of(i32::MAX, 0, 0).plus(Period::of_years(1)).unwrap_err();
        assert!(err.is_overflow());
        insta::assert_snapshot!(
            err,
            @"failed to add period P1Y: value 2147483648 does not fit in a 32-bit signed integer",
        );
        assert!(Period::of_days(i32::MIN).negated().unwrap_err().is_overflow());
        assert!(Period::of_weeks(i32::MAX).unwrap_err().is_overflow());
    }

    #[test]
    fn printing() {
        assert_eq!(Period::ZERO.to_string(), "P0D");
        assert_eq!(Period::of(0, -3, 0).to_string(), "P-3M");
        assert_eq!(Period::of(1, 0, -2).to_string(), "P1Y-2D");
    }

    quickcheck::quickcheck! {
        fn prop_between_then_add(a: LocalDate, b: LocalDate) -> bool {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            let period = Period::between(a, b).unwrap();
            period.add_to_local_date(a).unwrap() == b
        }

        fn prop_normalized_signs(p: Period) -> quickcheck::TestResult {
            let Ok(n) = p.normalized() else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(
                n.to_total_months() == p.to_total_months()
                    && n.months().abs() < 12
                    && (n.years() == 0
                        || n.months() == 0
                        || n.years().signum() == n.months().signum()),
            )
        }

        fn prop_display_roundtrip(p: Period) -> bool {
            p.to_string().parse::<Period>().unwrap() == p
        }
    }
}
