/*!
Civil ("wall clock") dates and times.

The types in this module describe a reading on a calendar and a clock, with
no time zone attached. A [`LocalDateTime`] like `2018-11-04T00:00` is
ambiguous until it is resolved against a [`TimeZone`](crate::tz::TimeZone)
with [`LocalDateTime::to_instant`]. In some zones it may not exist at all
(a daylight saving time "gap") or it may exist twice (an "overlap").

All dates use the proleptic Gregorian calendar. That is, the Gregorian leap
year rules are applied to every year, including years before the calendar was
introduced. Years range over `-999_999..=999_999`, and the year `0` exists
(it corresponds to 1 BCE).

# Example

```
use hora::civil::{LocalDate, LocalTime, Weekday};

let date = LocalDate::of(2024, 2, 29)?;
assert_eq!(date.day_of_week(), Weekday::Thursday);
assert_eq!(date.plus_years(1)?, LocalDate::of(2025, 2, 28)?);

let dt = date.at_time(LocalTime::of(23, 30, 0, 0)?);
assert_eq!(dt.plus_hours(1)?.to_string(), "2024-03-01T00:30");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    date::LocalDate, datetime::LocalDateTime, time::LocalTime,
    weekday::Weekday,
};

pub(crate) use self::date::{MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR};

mod date;
mod datetime;
mod time;
mod weekday;
