/// A unit of time with an exact, fixed length.
///
/// Units are used to build a [`Duration`](crate::Duration) from an amount
/// (see [`Duration::of`](crate::Duration::of)) and to truncate instants and
/// civil times (see, e.g., [`Instant::truncated_to`](crate::Instant::truncated_to)).
///
/// A [`Unit::Day`] is always exactly 24 hours and a [`Unit::HalfDay`] is
/// always exactly 12 hours. In a time zone with daylight saving time, a
/// civil day may be longer or shorter than that. Calendar units like months
/// and years have no fixed length at all, which is why they are not units
/// here but fields of a [`Period`](crate::Period).
///
/// # Example: ordering
///
/// This example demonstrates that `Unit` has an ordering defined such that
/// bigger units compare greater than smaller units.
///
/// ```
/// use hora::Unit;
///
/// assert!(Unit::Day > Unit::Nanosecond);
/// assert!(Unit::Day > Unit::HalfDay);
/// assert!(Unit::Hour > Unit::Minute);
/// assert_eq!(Unit::Hour, Unit::Hour);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    /// A nanosecond is the smallest granularity of time supported.
    Nanosecond = 0,
    /// A microsecond is always 1,000 nanoseconds.
    Microsecond = 1,
    /// A millisecond is always 1,000 microseconds.
    Millisecond = 2,
    /// A second is always 1,000 milliseconds. (Leap seconds do not exist
    /// here.)
    Second = 3,
    /// A minute is always 60 seconds.
    Minute = 4,
    /// An hour is always 60 minutes.
    Hour = 5,
    /// Half of a day, always 12 hours.
    HalfDay = 6,
    /// A day, always 24 hours.
    Day = 7,
}

impl Unit {
    /// Returns the exact number of nanoseconds in this unit.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Unit;
    ///
    /// assert_eq!(Unit::Millisecond.nanoseconds(), 1_000_000);
    /// assert_eq!(Unit::Day.nanoseconds(), 86_400_000_000_000);
    /// ```
    pub const fn nanoseconds(self) -> i64 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => 1_000,
            Unit::Millisecond => 1_000_000,
            Unit::Second => 1_000_000_000,
            Unit::Minute => 60 * 1_000_000_000,
            Unit::Hour => 3_600 * 1_000_000_000,
            Unit::HalfDay => 43_200 * 1_000_000_000,
            Unit::Day => 86_400 * 1_000_000_000,
        }
    }

    /// Returns the number of whole seconds in this unit, or `None` when the
    /// unit is shorter than a second.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Unit;
    ///
    /// assert_eq!(Unit::Hour.seconds(), Some(3_600));
    /// assert_eq!(Unit::Millisecond.seconds(), None);
    /// ```
    pub const fn seconds(self) -> Option<i64> {
        match self {
            Unit::Nanosecond | Unit::Microsecond | Unit::Millisecond => None,
            Unit::Second => Some(1),
            Unit::Minute => Some(60),
            Unit::Hour => Some(3_600),
            Unit::HalfDay => Some(43_200),
            Unit::Day => Some(86_400),
        }
    }

    /// A human readable singular description of this unit of time.
    pub(crate) fn singular(&self) -> &'static str {
        match *self {
            Unit::Nanosecond => "nanosecond",
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::HalfDay => "half day",
            Unit::Day => "day",
        }
    }

    /// A human readable plural description of this unit of time.
    pub(crate) fn plural(&self) -> &'static str {
        match *self {
            Unit::Nanosecond => "nanoseconds",
            Unit::Microsecond => "microseconds",
            Unit::Millisecond => "milliseconds",
            Unit::Second => "seconds",
            Unit::Minute => "minutes",
            Unit::Hour => "hours",
            Unit::HalfDay => "half days",
            Unit::Day => "days",
        }
    }
}

#[cfg(test)]
impl Unit {
    fn from_usize(n: usize) -> Option<Unit> {
        match n {
            0 => Some(Unit::Nanosecond),
            1 => Some(Unit::Microsecond),
            2 => Some(Unit::Millisecond),
            3 => Some(Unit::Second),
            4 => Some(Unit::Minute),
            5 => Some(Unit::Hour),
            6 => Some(Unit::HalfDay),
            7 => Some(Unit::Day),
            _ => None,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Unit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Unit {
        use quickcheck::Arbitrary;

        Unit::from_usize(usize::arbitrary(g) % 8).unwrap()
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        alloc::boxed::Box::new(
            (*self as usize).shrink().map(|n| Unit::from_usize(n % 8).unwrap()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_agree() {
        for n in 0..8 {
            let unit = Unit::from_usize(n).unwrap();
            if let Some(secs) = unit.seconds() {
                assert_eq!(secs * 1_000_000_000, unit.nanoseconds());
            } else {
                assert!(unit.nanoseconds() < 1_000_000_000);
            }
        }
        assert_eq!(Unit::HalfDay.singular(), "half day");
        assert_eq!(Unit::Day.plural(), "days");
    }
}
