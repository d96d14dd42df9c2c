use crate::error::Error;

/// A representation for the day of the week.
///
/// The weekdays follow ISO 8601: the week starts on Monday, and Monday is
/// day number `1`.
///
/// # Example
///
/// ```
/// use hora::civil::{LocalDate, Weekday};
///
/// let date = LocalDate::of(1970, 1, 1)?;
/// assert_eq!(date.day_of_week(), Weekday::Thursday);
/// assert_eq!(date.day_of_week().to_monday_one_offset(), 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Converts a Monday-one offset to a weekday.
    ///
    /// # Errors
    ///
    /// This returns an error when `offset` is not in the range `1..=7`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::Weekday;
    ///
    /// assert_eq!(Weekday::from_monday_one_offset(7)?, Weekday::Sunday);
    /// assert!(Weekday::from_monday_one_offset(0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        if !(1..=7).contains(&offset) {
            return Err(Error::range("weekday", offset, 1, 7));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked(offset - 1))
    }

    /// Returns this weekday as a number in `1..=7`, where Monday is `1`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns this weekday as a number in `0..=6`, where Monday is `0`.
    #[inline]
    pub fn to_monday_zero_offset(self) -> i8 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns the next weekday, wrapping from Sunday to Monday.
    #[inline]
    pub fn next(self) -> Weekday {
        self.plus_days(1)
    }

    /// Returns the previous weekday, wrapping from Monday to Sunday.
    #[inline]
    pub fn previous(self) -> Weekday {
        self.plus_days(-1)
    }

    /// Returns the weekday `days` after this one. `days` may be negative.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Friday.plus_days(3), Weekday::Monday);
    /// assert_eq!(Weekday::Friday.plus_days(-5), Weekday::Sunday);
    /// assert_eq!(Weekday::Friday.plus_days(i64::MIN), Weekday::Thursday);
    /// ```
    #[inline]
    pub fn plus_days(self, days: i64) -> Weekday {
        let offset = i64::from(self.to_monday_zero_offset());
        let shifted = (offset + days.rem_euclid(7)).rem_euclid(7);
        // OK because `rem_euclid(7)` is always in `0..=6`.
        Weekday::from_monday_zero_offset_unchecked(shifted as i8)
    }

    /// Converts an offset in `0..=6` to a weekday.
    ///
    /// Callers must guarantee the range. An offset out of range is treated
    /// as Sunday.
    #[inline]
    pub(crate) fn from_monday_zero_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Weekday {
    fn arbitrary(g: &mut quickcheck::Gen) -> Weekday {
        use quickcheck::Arbitrary;

        let offset = i8::arbitrary(g).rem_euclid(7);
        Weekday::from_monday_zero_offset_unchecked(offset)
    }
}
