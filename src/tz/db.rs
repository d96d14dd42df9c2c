use alloc::sync::Arc;

use chrono::{Offset as _, TimeZone as _};

use crate::{
    error::{tz::Error as E, Error},
    tz::OffsetOracle,
    Instant,
};

/// Returns a handle to the bundled time zone database.
///
/// This is the oracle used by [`TimeZone::get`](crate::tz::TimeZone::get).
/// The handle is created once and shared by every time zone that uses it.
pub fn db() -> Arc<dyn OffsetOracle> {
    use std::sync::OnceLock;

    static DB: OnceLock<Arc<dyn OffsetOracle>> = OnceLock::new();
    Arc::clone(DB.get_or_init(|| {
        debug!("initializing bundled time zone database");
        Arc::new(Tzdb::new())
    }))
}

/// An offset oracle backed by a copy of the IANA Time Zone Database compiled
/// into this crate.
///
/// The data comes from the `chrono-tz` crate. Which release of the database
/// is used depends on the version of that crate selected by Cargo.
///
/// Offsets for instants outside of the range supported by `chrono` (roughly
/// ±262,000 years) are clamped to the offset at the nearest supported
/// instant. Since no real time zone has transitions that far out, this never
/// changes an answer.
///
/// # Example
///
/// ```
/// use hora::{tz::{OffsetOracle, Tzdb}, Instant};
///
/// let tzdb = Tzdb::new();
/// assert!(tzdb.contains("Asia/Kolkata"));
/// assert!(!tzdb.contains("Asia/Calcutta-ish"));
///
/// let t: Instant = "2024-01-01T00:00:00Z".parse()?;
/// assert_eq!(tzdb.offset_seconds("Asia/Kolkata", t)?, 19_800);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Tzdb {
    _priv: (),
}

impl Tzdb {
    /// Creates a handle to the bundled database.
    pub const fn new() -> Tzdb {
        Tzdb { _priv: () }
    }

    /// Returns an iterator over every zone identifier in the bundled
    /// database, in lexicographic order.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::tz::Tzdb;
    ///
    /// assert!(Tzdb::new().ids().any(|id| id == "America/Sao_Paulo"));
    /// ```
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name())
    }

    fn lookup(&self, zone_id: &str) -> Option<chrono_tz::Tz> {
        zone_id.parse::<chrono_tz::Tz>().ok()
    }
}

impl OffsetOracle for Tzdb {
    fn offset_seconds(
        &self,
        zone_id: &str,
        instant: Instant,
    ) -> Result<i32, Error> {
        let Some(tz) = self.lookup(zone_id) else {
            return Err(Error::from(E::UnknownZone { id: zone_id.into() }));
        };
        let min = chrono::DateTime::<chrono::Utc>::MIN_UTC.timestamp();
        let max = chrono::DateTime::<chrono::Utc>::MAX_UTC.timestamp();
        let second = instant.epoch_second().clamp(min, max);
        let Some(utc) = chrono::DateTime::from_timestamp(second, 0) else {
            return Err(Error::from(E::OffsetLookup { id: zone_id.into() }));
        };
        let offset = tz.offset_from_utc_datetime(&utc.naive_utc());
        Ok(offset.fix().local_minus_utc())
    }

    fn contains(&self, zone_id: &str) -> bool {
        self.lookup(zone_id).is_some()
    }
}
