use crate::{
    error::{tz::Error as E, Error},
    util::common::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
};

/// A fixed UTC offset, in seconds east of UTC.
///
/// This is only used internally. The public API speaks in plain `i32`
/// seconds, which is what offset oracles report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Offset {
    seconds: i32,
}

impl Offset {
    /// The largest magnitude of a fixed offset, 18 hours.
    pub(crate) const MAX_SECONDS: i32 = 18 * 60 * 60;

    pub(crate) const UTC: Offset = Offset { seconds: 0 };

    #[inline]
    pub(crate) fn new(seconds: i32) -> Result<Offset, Error> {
        if !(-Offset::MAX_SECONDS..=Offset::MAX_SECONDS).contains(&seconds) {
            return Err(Error::from(E::InvalidFixedOffset { seconds }));
        }
        Ok(Offset { seconds })
    }

    #[inline]
    pub(crate) fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the coarsest step that can land exactly on a transition into
    /// or out of this offset.
    ///
    /// Real world offsets are overwhelmingly whole hours or half hours. Any
    /// other offset (like Nepal's `+05:45`, or local mean time) is searched
    /// in quarter hours.
    #[inline]
    pub(crate) fn granularity(self) -> i64 {
        let seconds = i64::from(self.seconds);
        if seconds % SECONDS_PER_HOUR == 0 {
            SECONDS_PER_HOUR
        } else if seconds % (30 * SECONDS_PER_MINUTE) == 0 {
            30 * SECONDS_PER_MINUTE
        } else {
            15 * SECONDS_PER_MINUTE
        }
    }
}

/// Prints as `±HH:MM`, with a trailing `:SS` only when the offset has a
/// seconds component.
impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "+" };
        let abs = self.seconds.unsigned_abs();
        let hours = abs / 3_600;
        let minutes = (abs / 60) % 60;
        let seconds = abs % 60;
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}
