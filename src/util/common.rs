/*!
A collection of calendar related utility functions.

Everything here works on primitive integers and is `const`, so that the
civil types can expose `const` constructors. Callers are responsible for
passing values that are in range. None of these routines can overflow for
years in `-999_999..=999_999`.

# Algorithms

The conversions between civil dates and epoch days are taken from
Howard Hinnant, "chrono-Compatible Low-Level Date Algorithms":
- https://howardhinnant.github.io/date_algorithms.html
*/

pub(crate) const NANOS_PER_MICRO: i64 = 1_000;
pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub(crate) const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const MINUTES_PER_DAY: i64 = 1_440;
pub(crate) const HOURS_PER_DAY: i64 = 24;

/// The number of days from `0000-03-01` to `1970-01-01`.
const DAYS_0000_TO_1970: i64 = 719_468;

/// The number of days in a 400 year cycle of the Gregorian calendar.
const DAYS_PER_ERA: i64 = 146_097;

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i32) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in the given year and month.
///
/// This correctly returns `29` when the year is a leap year and the month is
/// February. When the month is invalid, this returns `0`.
#[inline]
pub(crate) const fn days_in_month(year: i32, month: i8) -> i8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        _ => 0,
    }
}

/// Saturates the given day in the month.
///
/// That is, if the day exceeds the maximum number of days in the given year
/// and month, then this returns the maximum. Otherwise, it returns the day
/// given.
#[inline]
pub(crate) const fn saturate_day_in_month(year: i32, month: i8, day: i8) -> i8 {
    let max = days_in_month(year, month);
    if day > max {
        max
    } else {
        day
    }
}

/// Converts a civil date to the number of days since `1970-01-01`.
#[inline]
pub(crate) const fn to_epoch_day(year: i32, month: i8, day: i8) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_index = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * month_index + 2) / 5 + day - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - DAYS_0000_TO_1970
}

/// Converts a number of days since `1970-01-01` to a civil date.
///
/// The epoch day given must correspond to a year that fits in an `i32`.
#[inline]
pub(crate) const fn from_epoch_day(epoch_day: i64) -> (i32, i8, i8) {
    let days = epoch_day + DAYS_0000_TO_1970;
    let era = days.div_euclid(DAYS_PER_ERA);
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36524
        - day_of_era / (DAYS_PER_ERA - 1))
        / 365;
    let day_of_year =
        day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_index + 2) / 5 + 1;
    let month = if month_index < 10 { month_index + 3 } else { month_index - 9 };
    let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as i32, month as i8, day as i8)
}

/// Returns the ordinal day of the year, starting at `1`.
#[inline]
pub(crate) const fn day_of_year(year: i32, month: i8, day: i8) -> i16 {
    // The number of days before the first of each month in a common year.
    const CUMULATIVE: [i16; 12] =
        [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let leap = if month > 2 && is_leap_year(year) { 1 } else { 0 };
    CUMULATIVE[(month - 1) as usize] + day as i16 + leap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_is_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(1600));
        assert!(is_leap_year(0));
        assert!(!is_leap_year(-1));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
        assert!(!is_leap_year(999_999));
        assert!(is_leap_year(-999_600));
    }

    #[test]
    fn t_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(-9999, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn t_epoch_day() {
        assert_eq!(to_epoch_day(1970, 1, 1), 0);
        assert_eq!(to_epoch_day(1969, 12, 31), -1);
        assert_eq!(to_epoch_day(2000, 3, 1), 11_017);
        assert_eq!(from_epoch_day(11_017), (2000, 3, 1));
        assert_eq!(to_epoch_day(-999_999, 1, 1), -365_961_662);
        assert_eq!(to_epoch_day(999_999, 12, 31), 364_522_971);
        assert_eq!(from_epoch_day(-365_961_662), (-999_999, 1, 1));
        assert_eq!(from_epoch_day(364_522_971), (999_999, 12, 31));
    }

    #[test]
    fn t_day_of_year() {
        assert_eq!(day_of_year(2023, 1, 1), 1);
        assert_eq!(day_of_year(2023, 12, 31), 365);
        assert_eq!(day_of_year(2024, 12, 31), 366);
        assert_eq!(day_of_year(2024, 3, 1), 61);
    }

    quickcheck::quickcheck! {
        fn prop_epoch_day_roundtrip(day: i64) -> bool {
            let day = day % 364_522_972;
            let (y, m, d) = from_epoch_day(day);
            to_epoch_day(y, m, d) == day
        }
    }
}
