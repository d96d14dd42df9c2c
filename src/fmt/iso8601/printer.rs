use crate::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    fmt::util::{DecimalFormatter, FractionalFormatter, WriteExt},
    util::common::{self, SECONDS_PER_DAY},
    Duration, Instant, Period, PeriodDuration,
};

/// A printer for the ISO 8601 forms of every value type in this crate.
///
/// Everything printed by this type can be parsed back by
/// [`DateTimeParser`](super::DateTimeParser) to an equal value.
#[derive(Debug)]
pub(crate) struct DateTimePrinter {
    _priv: (),
}

impl DateTimePrinter {
    pub(crate) const fn new() -> DateTimePrinter {
        DateTimePrinter { _priv: () }
    }

    pub(crate) fn print_date<W: core::fmt::Write>(
        &self,
        date: &LocalDate,
        mut wtr: W,
    ) -> core::fmt::Result {
        self.print_ymd(date.year(), date.month(), date.day(), &mut wtr)
    }

    /// Prints `HH:MM`, followed by seconds only when they (or a fraction)
    /// are non-zero.
    pub(crate) fn print_time<W: core::fmt::Write>(
        &self,
        time: &LocalTime,
        mut wtr: W,
    ) -> core::fmt::Result {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        wtr.write_int(&FMT_TWO, time.hour())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, time.minute())?;
        if time.second() != 0 || time.nano() != 0 {
            wtr.write_str(":")?;
            wtr.write_int(&FMT_TWO, time.second())?;
            self.print_grouped_fraction(time.nano(), &mut wtr)?;
        }
        Ok(())
    }

    pub(crate) fn print_datetime<W: core::fmt::Write>(
        &self,
        dt: &LocalDateTime,
        mut wtr: W,
    ) -> core::fmt::Result {
        self.print_date(&dt.date(), &mut wtr)?;
        wtr.write_str("T")?;
        self.print_time(&dt.time(), &mut wtr)
    }

    /// Prints an instant in UTC with a `Z` suffix. Seconds are always
    /// included.
    pub(crate) fn print_instant<W: core::fmt::Write>(
        &self,
        instant: &Instant,
        mut wtr: W,
    ) -> core::fmt::Result {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        let second = instant.epoch_second();
        let (year, month, day) =
            common::from_epoch_day(second.div_euclid(SECONDS_PER_DAY));
        let second_of_day = second.rem_euclid(SECONDS_PER_DAY);

        self.print_ymd(year, month, day, &mut wtr)?;
        wtr.write_str("T")?;
        wtr.write_int(&FMT_TWO, second_of_day / 3_600)?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, (second_of_day / 60) % 60)?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, second_of_day % 60)?;
        self.print_grouped_fraction(instant.nano(), &mut wtr)?;
        wtr.write_str("Z")
    }

    pub(crate) fn print_duration<W: core::fmt::Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> core::fmt::Result {
        if duration.is_zero() {
            return wtr.write_str("PT0S");
        }
        wtr.write_str("P")?;
        self.print_duration_body(duration, &mut wtr)
    }

    /// Prints the non-zero years, months and days of a period. A zero
    /// period is `P0D`.
    pub(crate) fn print_period<W: core::fmt::Write>(
        &self,
        period: &Period,
        mut wtr: W,
    ) -> core::fmt::Result {
        static FMT_INT: DecimalFormatter = DecimalFormatter::new();

        if period.is_zero() {
            return wtr.write_str("P0D");
        }
        wtr.write_str("P")?;
        if period.years() != 0 {
            wtr.write_int(&FMT_INT, period.years())?;
            wtr.write_str("Y")?;
        }
        if period.months() != 0 {
            wtr.write_int(&FMT_INT, period.months())?;
            wtr.write_str("M")?;
        }
        if period.days() != 0 {
            wtr.write_int(&FMT_INT, period.days())?;
            wtr.write_str("D")?;
        }
        Ok(())
    }

    /// Prints a period followed by the time part of a duration. Whichever
    /// part is zero is omitted, and a zero value is `PT0S`.
    pub(crate) fn print_period_duration<W: core::fmt::Write>(
        &self,
        pd: &PeriodDuration,
        mut wtr: W,
    ) -> core::fmt::Result {
        let (period, duration) = (pd.period(), pd.duration());
        if duration.is_zero() {
            if period.is_zero() {
                return wtr.write_str("PT0S");
            }
            return self.print_period(&period, wtr);
        }
        if period.is_zero() {
            return self.print_duration(&duration, wtr);
        }
        self.print_period(&period, &mut wtr)?;
        self.print_duration_body(&duration, &mut wtr)
    }

    /// Prints everything in a non-zero duration that follows the `P`.
    ///
    /// Hours are the largest unit. The sign of each unit follows the sign of
    /// the duration, so negative sub-second amounts are written like
    /// `-0.500S`. Fractions are written in groups of three digits.
    fn print_duration_body<W: core::fmt::Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> core::fmt::Result {
        static FMT_INT: DecimalFormatter = DecimalFormatter::new();

        // A negative duration stores a positive nano adjustment below a
        // negative second. Borrow it back so every unit shares one sign.
        let (seconds, nanos) = if duration.seconds() < 0 && duration.nano() > 0
        {
            (duration.seconds() + 1, 1_000_000_000 - duration.nano())
        } else {
            (duration.seconds(), duration.nano())
        };
        let negative = duration.seconds() < 0;
        let hours = seconds / 3_600;
        let minutes = (seconds % 3_600) / 60;
        let secs = seconds % 60;

        wtr.write_str("T")?;
        if hours != 0 {
            wtr.write_int(&FMT_INT, hours)?;
            wtr.write_str("H")?;
        }
        if minutes != 0 {
            wtr.write_int(&FMT_INT, minutes)?;
            wtr.write_str("M")?;
        }
        if secs == 0 && nanos == 0 && (hours != 0 || minutes != 0) {
            return Ok(());
        }
        if secs == 0 && nanos > 0 && negative {
            wtr.write_str("-0")?;
        } else {
            wtr.write_int(&FMT_INT, secs)?;
        }
        self.print_grouped_fraction(nanos, &mut wtr)?;
        wtr.write_str("S")
    }

    /// Prints a year padded to four digits, with a sign when it needs more,
    /// followed by `-MM-DD`.
    fn print_ymd<W: core::fmt::Write>(
        &self,
        year: i32,
        month: i8,
        day: i8,
        mut wtr: W,
    ) -> core::fmt::Result {
        static FMT_YEAR: DecimalFormatter = DecimalFormatter::new().padding(4);
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        if year > 9999 {
            wtr.write_int(&FMT_YEAR.force_sign(true), year)?;
        } else {
            wtr.write_int(&FMT_YEAR, year)?;
        }
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, month)?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, day)
    }

    /// Prints a fraction of a second in groups of three digits, or nothing
    /// at all when it is zero.
    fn print_grouped_fraction<W: core::fmt::Write>(
        &self,
        nanos: i32,
        mut wtr: W,
    ) -> core::fmt::Result {
        let precision = if nanos == 0 {
            return Ok(());
        } else if nanos % 1_000_000 == 0 {
            3
        } else if nanos % 1_000 == 0 {
            6
        } else {
            9
        };
        wtr.write_str(".")?;
        wtr.write_fraction(
            &FractionalFormatter::new().precision(Some(precision)),
            nanos,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    static P: DateTimePrinter = DateTimePrinter::new();

    fn date(y: i32, m: i8, d: i8) -> String {
        let mut buf = String::new();
        P.print_date(&LocalDate::constant(y, m, d), &mut buf).unwrap();
        buf
    }

    fn time(h: i8, m: i8, s: i8, n: i32) -> String {
        let mut buf = String::new();
        P.print_time(&LocalTime::constant(h, m, s, n), &mut buf).unwrap();
        buf
    }

    fn duration(seconds: i64, nanos: i64) -> String {
        let mut buf = String::new();
        let d = Duration::of_seconds(seconds, nanos).unwrap();
        P.print_duration(&d, &mut buf).unwrap();
        buf
    }

    fn instant(second: i64, nanos: i64) -> String {
        let mut buf = String::new();
        let i = Instant::of_epoch_second(second, nanos).unwrap();
        P.print_instant(&i, &mut buf).unwrap();
        buf
    }

    #[test]
    fn print_date() {
        assert_eq!(date(2024, 6, 9), "2024-06-09");
        assert_eq!(date(0, 1, 1), "0000-01-01");
        assert_eq!(date(-1, 12, 31), "-0001-12-31");
        assert_eq!(date(9999, 12, 31), "9999-12-31");
        assert_eq!(date(10000, 1, 1), "+10000-01-01");
        assert_eq!(date(-999_999, 1, 1), "-999999-01-01");
    }

    #[test]
    fn print_time() {
        assert_eq!(time(0, 0, 0, 0), "00:00");
        assert_eq!(time(9, 5, 0, 0), "09:05");
        assert_eq!(time(9, 5, 7, 0), "09:05:07");
        assert_eq!(time(9, 5, 0, 1), "09:05:00.000000001");
        assert_eq!(time(9, 5, 7, 500_000_000), "09:05:07.500");
        assert_eq!(time(9, 5, 7, 120_000), "09:05:07.000120");
    }

    #[test]
    fn print_instant() {
        assert_eq!(instant(0, 0), "1970-01-01T00:00:00Z");
        assert_eq!(instant(-1, 0), "1969-12-31T23:59:59Z");
        assert_eq!(instant(0, -1), "1969-12-31T23:59:59.999999999Z");
        assert_eq!(instant(1_718_803_507, 5_000), "2024-06-19T13:25:07.000005Z");
        assert_eq!(
            instant(-31_619_119_219_200, 0),
            "-1000000-01-01T00:00:00Z",
        );
    }

    #[test]
    fn print_duration() {
        assert_eq!(duration(0, 0), "PT0S");
        assert_eq!(duration(1, 0), "PT1S");
        assert_eq!(duration(3_600, 0), "PT1H");
        assert_eq!(duration(90_061, 0), "PT25H1M1S");
        assert_eq!(duration(0, 500_000_000), "PT0.500S");
        assert_eq!(duration(1, 120_000_000), "PT1.120S");
        assert_eq!(duration(0, 1_000), "PT0.000001S");
        assert_eq!(duration(0, -500_000_000), "PT-0.500S");
        assert_eq!(duration(-2, 500_000_000), "PT-1.500S");
        assert_eq!(duration(-1, 0), "PT-1S");
        assert_eq!(duration(-3_601, -1), "PT-1H-1.000000001S");
        assert_eq!(duration(-1_800, 0), "PT-30M");
        assert_eq!(duration(60, 1), "PT1M0.000000001S");
    }

    #[test]
    fn print_negative_duration_borrows_across_units() {
        assert_eq!(duration(-60, 500_000_000), "PT-59.500S");
        assert_eq!(duration(-3_600, 500_000_000), "PT-59M-59.500S");
        assert_eq!(duration(-3_600, 1), "PT-59M-59.999999999S");
        assert_eq!(duration(-3_601, 500_000_000), "PT-1H-0.500S");
        assert_eq!(duration(-7_260, 250_000_000), "PT-2H-59.750S");
    }

    #[test]
    fn print_period() {
        let p = |y, m, d| {
            let mut buf = String::new();
            P.print_period(&Period::of(y, m, d), &mut buf).unwrap();
            buf
        };
        assert_eq!(p(0, 0, 0), "P0D");
        assert_eq!(p(1, 0, 0), "P1Y");
        assert_eq!(p(1, -2, 3), "P1Y-2M3D");
        assert_eq!(p(0, 0, -14), "P-14D");
    }

    #[test]
    fn print_period_duration() {
        let pd = |period, seconds| {
            let mut buf = String::new();
            let d = Duration::of_seconds(seconds, 0).unwrap();
            P.print_period_duration(&PeriodDuration::of(period, d), &mut buf)
                .unwrap();
            buf
        };
        assert_eq!(pd(Period::ZERO, 0), "PT0S");
        assert_eq!(pd(Period::of(0, 1, 0), 0), "P1M");
        assert_eq!(pd(Period::ZERO, 90_000), "PT25H");
        assert_eq!(pd(Period::of(0, 1, 0), 90_000), "P1MT25H");
    }
}
