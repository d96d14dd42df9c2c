/*!
Time zones and the conversion of civil datetimes to instants.

A [`TimeZone`] is one of three things:

* [`TimeZone::UTC`].
* A fixed offset from UTC, created with [`TimeZone::fixed`].
* A named zone, like `America/New_York`, whose offsets are looked up in an
[`OffsetOracle`]. By default, this is the IANA Time Zone Database bundled
with this crate (see [`Tzdb`]), which requires the `tzdb` crate feature.

Converting an [`Instant`] to a civil datetime is a single offset lookup.
Converting the other way is more involved, since a civil datetime may be
skipped by a forward transition (a "gap") or repeated by a backward
transition (an "overlap"). This crate always resolves gaps by moving the
civil datetime forward by the length of the gap, and overlaps by picking the
earlier of the two instants.

# Example

```
use hora::{civil::LocalDateTime, tz::TimeZone};

let tz = TimeZone::get("America/Sao_Paulo")?;
// Midnight was skipped on this day. Clocks went straight to 01:00.
let dt = LocalDateTime::constant(2018, 11, 4, 0, 0, 0, 0);
let instant = tz.to_instant(dt)?;
assert_eq!(instant.to_string(), "2018-11-04T03:00:00Z");
assert_eq!(instant.to_local_date_time(&tz)?.to_string(), "2018-11-04T01:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::{boxed::Box, string::ToString, sync::Arc};

use crate::{
    civil::LocalDateTime,
    error::{tz::Error as E, Error, ErrorContext},
    fmt::iso8601::DateTimeParser,
    instant::{MAX_SECOND, MIN_SECOND},
    Instant,
};

use self::offset::Offset;

#[cfg(feature = "tzdb")]
pub use self::db::{db, Tzdb};
pub use self::oracle::OffsetOracle;

#[cfg(feature = "tzdb")]
mod db;
pub(crate) mod offset;
mod oracle;
mod resolve;

/// A time zone.
///
/// Time zones are cheap to clone. Two time zones are equal when their
/// identifiers are equal. For a fixed offset zone, the identifier is the
/// offset formatted as `±HH:MM[:SS]`.
///
/// # Example
///
/// ```
/// use hora::tz::TimeZone;
///
/// assert_eq!(TimeZone::get("UTC")?, TimeZone::UTC);
/// assert_eq!(TimeZone::get("+05:30")?, TimeZone::fixed(19_800)?);
/// assert_eq!(TimeZone::fixed(-11_188)?.id(), "-03:06:28");
/// assert_eq!(TimeZone::fixed(0)?, TimeZone::UTC);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TimeZone {
    kind: Option<Arc<TimeZoneKind>>,
}

impl TimeZone {
    /// The UTC time zone, whose offset is always zero.
    pub const UTC: TimeZone = TimeZone { kind: None };

    /// Creates a time zone with a fixed offset from UTC, in seconds.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the offset is not in the range
    /// `-18:00` to `+18:00`.
    #[inline]
    pub fn fixed(offset_seconds: i32) -> Result<TimeZone, Error> {
        let offset = Offset::new(offset_seconds)?;
        Ok(TimeZone::from_offset(offset))
    }

    /// Looks up a time zone by identifier.
    ///
    /// The identifier may be `UTC`, a fixed offset in the form
    /// `±HH:MM[:SS]` or the name of a zone in the bundled IANA Time Zone
    /// Database (when the `tzdb` crate feature is enabled).
    ///
    /// # Errors
    ///
    /// This returns a validation error when the identifier is not known.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::tz::TimeZone;
    ///
    /// let tz = TimeZone::get("Australia/Lord_Howe")?;
    /// assert_eq!(tz.id(), "Australia/Lord_Howe");
    ///
    /// let err = TimeZone::get("Mars/Olympus_Mons").unwrap_err();
    /// assert!(err.is_validation());
    /// assert_eq!(err.to_string(), "failed to find time zone `Mars/Olympus_Mons`");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(id: &str) -> Result<TimeZone, Error> {
        if id == "UTC" {
            return Ok(TimeZone::UTC);
        }
        if id.starts_with(['+', '-']) {
            static P: DateTimeParser = DateTimeParser::new();
            let seconds = P.parse_offset(id)?;
            return TimeZone::fixed(seconds);
        }
        #[cfg(feature = "tzdb")]
        {
            TimeZone::with_oracle(id, db())
        }
        #[cfg(not(feature = "tzdb"))]
        {
            Err(Error::from(E::UnknownZone { id: id.into() }))
        }
    }

    /// Creates a named time zone whose offsets are provided by the given
    /// oracle.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the oracle does not contain the
    /// given identifier.
    pub fn with_oracle(
        id: &str,
        oracle: Arc<dyn OffsetOracle>,
    ) -> Result<TimeZone, Error> {
        if !oracle.contains(id) {
            return Err(Error::from(E::UnknownZone { id: id.into() }));
        }
        let named = TimeZoneNamed { id: id.into(), oracle };
        Ok(TimeZone { kind: Some(Arc::new(TimeZoneKind::Named(named))) })
    }

    /// Returns the identifier of this time zone.
    pub fn id(&self) -> &str {
        let Some(ref kind) = self.kind else { return "UTC" };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => &tz.id,
            TimeZoneKind::Named(ref tz) => &tz.id,
        }
    }

    /// Returns the offset from UTC, in seconds, observed in this time zone
    /// at the given instant.
    ///
    /// # Errors
    ///
    /// For named zones, this returns any error reported by the oracle.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{tz::TimeZone, Instant};
    ///
    /// let tz = TimeZone::get("Europe/London")?;
    /// let winter: Instant = "2024-01-15T12:00:00Z".parse()?;
    /// let summer: Instant = "2024-07-15T12:00:00Z".parse()?;
    /// assert_eq!(tz.offset_at(winter)?, 0);
    /// assert_eq!(tz.offset_at(summer)?, 3_600);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn offset_at(&self, instant: Instant) -> Result<i32, Error> {
        Ok(self.offset(instant)?.seconds())
    }

    /// Converts a civil datetime to the instant at which it is observed in
    /// this time zone.
    ///
    /// In a gap, the civil datetime is moved forward by the length of the
    /// gap. In an overlap, the earlier instant is returned. See the module
    /// documentation for an example.
    ///
    /// # Errors
    ///
    /// This returns an error when the oracle fails, when the instant is out
    /// of range or when no matching offset could be found.
    pub fn to_instant(&self, dt: LocalDateTime) -> Result<Instant, Error> {
        let nanos = i64::from(dt.nano());
        if let Some(offset) = self.fixed_offset() {
            let second = dt.to_epoch_second(offset.seconds());
            return Instant::of_epoch_second(second, nanos);
        }
        let target = dt.to_epoch_second(0);
        let second = resolve::resolve(target, |second| {
            let second = second.clamp(MIN_SECOND, MAX_SECOND);
            self.offset(Instant::new_unchecked(second, 0))
        })
        .with_context(|| E::Resolve { datetime: dt, id: self.id().into() })?;
        Instant::of_epoch_second(second, nanos)
    }

    /// Creates a time zone from an already validated offset.
    pub(crate) fn from_offset(offset: Offset) -> TimeZone {
        if offset == Offset::UTC {
            return TimeZone::UTC;
        }
        let fixed = TimeZoneFixed { offset, id: offset.to_string().into() };
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Fixed(fixed))) }
    }

    fn offset(&self, instant: Instant) -> Result<Offset, Error> {
        let Some(ref kind) = self.kind else { return Ok(Offset::UTC) };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => Ok(tz.offset),
            TimeZoneKind::Named(ref tz) => {
                let seconds = tz
                    .oracle
                    .offset_seconds(&tz.id, instant)
                    .with_context(|| E::OffsetLookup { id: tz.id.clone() })?;
                Offset::new(seconds)
            }
        }
    }

    fn fixed_offset(&self) -> Option<Offset> {
        let Some(ref kind) = self.kind else { return Some(Offset::UTC) };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => Some(tz.offset),
            TimeZoneKind::Named(_) => None,
        }
    }
}

impl Default for TimeZone {
    fn default() -> TimeZone {
        TimeZone::UTC
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("TimeZone").field(&self.id()).finish()
    }
}

impl core::fmt::Display for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

impl Eq for TimeZone {}

/// Two time zones are equal when their identifiers are equal.
///
/// Named zones with the same identifier backed by different oracles compare
/// equal, even if the oracles disagree.
impl PartialEq for TimeZone {
    fn eq(&self, rhs: &TimeZone) -> bool {
        self.id() == rhs.id()
    }
}

impl core::hash::Hash for TimeZone {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

#[derive(Debug)]
enum TimeZoneKind {
    Fixed(TimeZoneFixed),
    Named(TimeZoneNamed),
}

#[derive(Debug)]
struct TimeZoneFixed {
    offset: Offset,
    id: Box<str>,
}

#[derive(Debug)]
struct TimeZoneNamed {
    id: Box<str>,
    oracle: Arc<dyn OffsetOracle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    impl OffsetOracle for Broken {
        fn offset_seconds(&self, _: &str, _: Instant) -> Result<i32, Error> {
            Ok(100_000)
        }

        fn contains(&self, _: &str) -> bool {
            true
        }
    }

    #[test]
    fn fixed_closed_form() {
        let tz = TimeZone::fixed(-18_000).unwrap();
        let dt = LocalDateTime::constant(2024, 3, 10, 2, 30, 0, 5);
        let instant = tz.to_instant(dt).unwrap();
        assert_eq!(instant.epoch_second(), dt.to_epoch_second(-18_000));
        assert_eq!(instant.nano(), 5);
    }

    #[test]
    fn equality_by_id() {
        let a = TimeZone::with_oracle("Etc/Broken", Arc::new(Broken)).unwrap();
        let b = TimeZone::with_oracle("Etc/Broken", Arc::new(Broken)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, TimeZone::UTC);
        assert_eq!(TimeZone::fixed(3_600).unwrap().id(), "+01:00");
    }

    #[test]
    fn oracle_errors_have_context() {
        let tz = TimeZone::with_oracle("Etc/Broken", Arc::new(Broken)).unwrap();
        let err = tz.offset_at(Instant::EPOCH).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"fixed offset of 100000 seconds is not in the required range of -64800..=64800",
        );

        let dt = LocalDateTime::constant(2024, 1, 1, 0, 0, 0, 0);
        let err = tz.to_instant(dt).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"failed to resolve civil datetime 2024-01-01T00:00 in time zone `Etc/Broken`: fixed offset of 100000 seconds is not in the required range of -64800..=64800",
        );
    }

    #[test]
    fn bad_fixed_ids() {
        assert!(TimeZone::get("+25:00").unwrap_err().is_validation());
        assert!(TimeZone::get("+5").unwrap_err().is_parse());
    }
}
