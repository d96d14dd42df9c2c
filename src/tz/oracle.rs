use crate::{error::Error, Instant};

/// A source of UTC offsets for named time zones.
///
/// An oracle answers one question: what is the UTC offset, in seconds, of a
/// particular time zone at a particular instant? Everything else, including
/// turning a civil datetime back into an instant across daylight saving
/// transitions, is computed from the answers to that question.
///
/// This crate ships with one oracle, [`Tzdb`](crate::tz::Tzdb), backed by a
/// copy of the IANA Time Zone Database compiled into the binary. Callers can
/// provide their own, for example to use a different database release or to
/// test behavior around synthetic transitions.
///
/// # Example
///
/// This implements an oracle for a single fictional zone that moves from
/// `+01:00` to `+02:00` at the Unix epoch.
///
/// ```
/// use std::sync::Arc;
///
/// use hora::{civil::LocalDateTime, tz::{OffsetOracle, TimeZone}, Error, Instant};
///
/// #[derive(Debug)]
/// struct Epochal;
///
/// impl OffsetOracle for Epochal {
///     fn offset_seconds(&self, _: &str, instant: Instant) -> Result<i32, Error> {
///         Ok(if instant < Instant::EPOCH { 3_600 } else { 7_200 })
///     }
///
///     fn contains(&self, zone_id: &str) -> bool {
///         zone_id == "Test/Epochal"
///     }
/// }
///
/// let tz = TimeZone::with_oracle("Test/Epochal", Arc::new(Epochal))?;
/// // 01:30 never happened, so it is moved forward by the length of the gap.
/// let dt = LocalDateTime::constant(1970, 1, 1, 1, 30, 0, 0);
/// assert_eq!(tz.to_instant(dt)?.to_string(), "1970-01-01T00:30:00Z");
///
/// assert!(TimeZone::with_oracle("Test/Other", Arc::new(Epochal)).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait OffsetOracle: core::fmt::Debug + Send + Sync {
    /// Returns the offset from UTC, in seconds, observed in the zone with
    /// the given identifier at the given instant.
    ///
    /// A positive offset means local time is ahead of UTC.
    ///
    /// # Errors
    ///
    /// Implementations should return an error when the zone is unknown or
    /// the offset cannot be determined for the given instant.
    fn offset_seconds(
        &self,
        zone_id: &str,
        instant: Instant,
    ) -> Result<i32, Error>;

    /// Returns true when this oracle knows about the given zone identifier.
    fn contains(&self, zone_id: &str) -> bool;
}
