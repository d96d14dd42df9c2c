/*!
Sources of the current instant.

Every `now` constructor in this crate (like [`Instant::now`] or
[`LocalDate::now`](crate::civil::LocalDate::now)) asks a [`Clock`] for the
current instant and, for civil types, for the time zone to interpret it in.
The `now_with` variants accept an explicit clock, which makes code that
depends on the current time easy to test:

```
use hora::{civil::LocalDate, clock::Clock, tz::TimeZone, Instant};

let instant: Instant = "2024-03-10T23:30:00Z".parse()?;
let clock = Clock::fixed(instant, TimeZone::fixed(3_600)?);
assert_eq!(LocalDate::now_with(&clock)?.to_string(), "2024-03-11");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# The contextual clock

The `now` constructors without an explicit clock use
[`Clock::contextual`]. When the `std` crate feature is enabled, this reads the
clock installed for the current thread by [`with_clock`], and falls back to
the process wide default set by [`set_default`]. When neither has been
installed, the system clock in UTC is used.

```
use hora::{clock::{self, Clock}, tz::TimeZone, Instant};

let fixed: Instant = "2000-01-01T00:00:00Z".parse()?;
let now = clock::with_clock(Clock::fixed(fixed, TimeZone::UTC), Instant::now);
assert_eq!(now, fixed);
// The override is gone once `with_clock` returns.
assert_ne!(Instant::now(), fixed);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::sync::Arc;

use crate::{
    error::{clock::Error as E, Error},
    tz::TimeZone,
    util::common::NANOS_PER_SECOND,
    Duration, Instant,
};

/// A source of the current instant, paired with a time zone.
///
/// A clock is cheap to clone. Clocks that wrap another clock (like
/// [`Clock::offset`] and [`Clock::tick`]) share it.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    kind: ClockKind,
}

#[derive(Clone, Debug, PartialEq)]
enum ClockKind {
    #[cfg(feature = "std")]
    System {
        zone: TimeZone,
    },
    Fixed {
        instant: Instant,
        zone: TimeZone,
    },
    Offset {
        base: Arc<Clock>,
        offset: Duration,
    },
    Tick {
        base: Arc<Clock>,
        tick: Duration,
    },
    #[cfg(feature = "std")]
    Contextual,
}

impl Clock {
    /// Returns a clock that reads the system clock and reports UTC as its
    /// time zone.
    #[cfg(feature = "std")]
    #[inline]
    pub fn system_utc() -> Clock {
        Clock::system(TimeZone::UTC)
    }

    /// Returns a clock that reads the system clock and reports the given
    /// time zone.
    #[cfg(feature = "std")]
    #[inline]
    pub fn system(zone: TimeZone) -> Clock {
        Clock { kind: ClockKind::System { zone } }
    }

    /// Returns a clock that always reports the same instant.
    #[inline]
    pub fn fixed(instant: Instant, zone: TimeZone) -> Clock {
        Clock { kind: ClockKind::Fixed { instant, zone } }
    }

    /// Returns a clock that reports the instants of `base` shifted by
    /// `offset`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{clock::Clock, tz::TimeZone, Duration, Instant};
    ///
    /// let base = Clock::fixed(Instant::EPOCH, TimeZone::UTC);
    /// let clock = Clock::offset(base, Duration::of_hours(-1)?);
    /// assert_eq!(clock.instant()?.to_string(), "1969-12-31T23:00:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn offset(base: Clock, offset: Duration) -> Clock {
        if offset.is_zero() {
            return base;
        }
        Clock { kind: ClockKind::Offset { base: Arc::new(base), offset } }
    }

    /// Returns a clock that reports the instants of `base` truncated to a
    /// multiple of `tick`.
    ///
    /// The tick must be positive. It must also either be a whole number of
    /// seconds, or divide one second exactly.
    ///
    /// # Errors
    ///
    /// This returns a validation error when the tick does not satisfy the
    /// above.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{clock::Clock, tz::TimeZone, Duration, Instant};
    ///
    /// let instant: Instant = "2024-06-01T12:34:56.789Z".parse()?;
    /// let base = Clock::fixed(instant, TimeZone::UTC);
    ///
    /// let clock = Clock::tick(base.clone(), Duration::of_millis(250)?)?;
    /// assert_eq!(clock.instant()?.to_string(), "2024-06-01T12:34:56.750Z");
    /// let clock = Clock::tick(base.clone(), Duration::of_minutes(15)?)?;
    /// assert_eq!(clock.instant()?.to_string(), "2024-06-01T12:30:00Z");
    ///
    /// assert!(Clock::tick(base.clone(), Duration::ZERO).is_err());
    /// assert!(Clock::tick(base, Duration::of_millis(300)?).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn tick(base: Clock, tick: Duration) -> Result<Clock, Error> {
        if tick.is_negative() || tick.is_zero() {
            return Err(Error::from(E::NonPositiveTick));
        }
        let nanos = i64::from(tick.nano());
        if nanos != 0 && (tick.seconds() != 0 || NANOS_PER_SECOND % nanos != 0)
        {
            return Err(Error::from(E::InvalidTick { tick }));
        }
        Ok(Clock { kind: ClockKind::Tick { base: Arc::new(base), tick } })
    }

    /// Returns a system clock in the given zone that ticks in whole seconds.
    #[cfg(feature = "std")]
    #[inline]
    pub fn tick_seconds(zone: TimeZone) -> Clock {
        Clock::whole_tick(Clock::system(zone), 1)
    }

    /// Returns a system clock in the given zone that ticks in whole minutes.
    #[cfg(feature = "std")]
    #[inline]
    pub fn tick_minutes(zone: TimeZone) -> Clock {
        Clock::whole_tick(Clock::system(zone), 60)
    }

    /// Returns the contextual clock.
    ///
    /// This clock does not read time itself. Each time it is asked for an
    /// instant or a zone, it defers to the clock installed for the current
    /// thread by [`with_clock`], then the process default installed by
    /// [`set_default`], then the system clock in UTC.
    #[cfg(feature = "std")]
    #[inline]
    pub fn contextual() -> Clock {
        Clock { kind: ClockKind::Contextual }
    }

    /// Returns the current instant according to this clock.
    ///
    /// # Errors
    ///
    /// This returns an error if the instant cannot be represented. For
    /// example, a fixed clock at [`Instant::MAX`] shifted by a positive
    /// offset.
    pub fn instant(&self) -> Result<Instant, Error> {
        match self.kind {
            #[cfg(feature = "std")]
            ClockKind::System { .. } => {
                Instant::try_from(std::time::SystemTime::now())
                    .map_err(|err| err.context(E::SystemTime))
            }
            ClockKind::Fixed { instant, .. } => Ok(instant),
            ClockKind::Offset { ref base, offset } => {
                base.instant()?.plus(offset)
            }
            ClockKind::Tick { ref base, tick } => {
                let instant = base.instant()?;
                if tick.nano() == 0 {
                    let rem = instant.epoch_second().rem_euclid(tick.seconds());
                    Instant::of_epoch_second(instant.epoch_second() - rem, 0)
                } else {
                    let rem = instant.nano() % tick.nano();
                    Ok(Instant::new_unchecked(
                        instant.epoch_second(),
                        instant.nano() - rem,
                    ))
                }
            }
            #[cfg(feature = "std")]
            ClockKind::Contextual => current().instant(),
        }
    }

    /// Returns the time zone of this clock.
    ///
    /// Clocks that wrap another clock report the zone of the clock they
    /// wrap.
    pub fn zone(&self) -> TimeZone {
        match self.kind {
            #[cfg(feature = "std")]
            ClockKind::System { ref zone } => zone.clone(),
            ClockKind::Fixed { ref zone, .. } => zone.clone(),
            ClockKind::Offset { ref base, .. } => base.zone(),
            ClockKind::Tick { ref base, .. } => base.zone(),
            #[cfg(feature = "std")]
            ClockKind::Contextual => current().zone(),
        }
    }

    /// Returns this clock with the given time zone.
    ///
    /// For clocks that wrap another clock, the zone of the innermost clock
    /// is replaced.
    pub fn with_zone(&self, zone: TimeZone) -> Clock {
        match self.kind {
            #[cfg(feature = "std")]
            ClockKind::System { .. } => Clock::system(zone),
            ClockKind::Fixed { instant, .. } => Clock::fixed(instant, zone),
            ClockKind::Offset { ref base, offset } => {
                let base = Arc::new(base.with_zone(zone));
                Clock { kind: ClockKind::Offset { base, offset } }
            }
            ClockKind::Tick { ref base, tick } => {
                let base = Arc::new(base.with_zone(zone));
                Clock { kind: ClockKind::Tick { base, tick } }
            }
            #[cfg(feature = "std")]
            ClockKind::Contextual => current().with_zone(zone),
        }
    }

    fn whole_tick(base: Clock, seconds: i64) -> Clock {
        let tick = Duration::new_unchecked(seconds, 0);
        Clock { kind: ClockKind::Tick { base: Arc::new(base), tick } }
    }

    /// Replaces every contextual clock inside this one with the clock it
    /// currently defers to.
    ///
    /// Installed clocks are always pinned this way, so that resolving the
    /// contextual clock can never find itself again.
    #[cfg(feature = "std")]
    fn pinned(self) -> Clock {
        match self.kind {
            ClockKind::Contextual => current(),
            ClockKind::Offset { base, offset } => {
                let base = Arc::new(Clock::clone(&base).pinned());
                Clock { kind: ClockKind::Offset { base, offset } }
            }
            ClockKind::Tick { base, tick } => {
                let base = Arc::new(Clock::clone(&base).pinned());
                Clock { kind: ClockKind::Tick { base, tick } }
            }
            _ => self,
        }
    }
}

#[cfg(feature = "std")]
static DEFAULT: std::sync::RwLock<Option<Clock>> = std::sync::RwLock::new(None);

#[cfg(feature = "std")]
std::thread_local! {
    static AMBIENT: core::cell::RefCell<Option<Clock>> =
        const { core::cell::RefCell::new(None) };
}

/// Returns the process wide default clock.
///
/// This is the system clock in UTC unless another clock was installed with
/// [`set_default`].
#[cfg(feature = "std")]
pub fn default() -> Clock {
    let default = DEFAULT.read().unwrap_or_else(|err| err.into_inner());
    default.clone().unwrap_or_else(Clock::system_utc)
}

/// Installs the process wide default clock and returns the previous one.
///
/// If `clock` is or wraps [`Clock::contextual`], then the contextual clock
/// is resolved once, now, and that clock is installed in its place.
///
/// # Example
///
/// ```
/// use hora::{clock::{self, Clock}, tz::TimeZone, Instant};
///
/// let fixed = Instant::of_epoch_second(1_000_000_000, 0)?;
/// let previous = clock::set_default(Clock::fixed(fixed, TimeZone::UTC));
/// assert_eq!(Instant::now(), fixed);
/// clock::set_default(previous);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
pub fn set_default(clock: Clock) -> Clock {
    let clock = clock.pinned();
    debug!("installing default clock {clock:?}");
    let mut default = DEFAULT.write().unwrap_or_else(|err| err.into_inner());
    default.replace(clock).unwrap_or_else(Clock::system_utc)
}

/// Runs `f` with `clock` installed as the contextual clock of the current
/// thread.
///
/// The previous contextual clock of this thread is restored when this
/// returns, including when `f` panics. Calls may be nested. Other threads
/// are unaffected.
///
/// If `clock` is or wraps [`Clock::contextual`], then the contextual clock
/// is resolved once, before `f` runs.
#[cfg(feature = "std")]
pub fn with_clock<T>(clock: Clock, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<Clock>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            AMBIENT.with(|ambient| *ambient.borrow_mut() = previous);
        }
    }

    let clock = clock.pinned();
    trace!("installing thread clock {clock:?}");
    let previous = AMBIENT.with(|ambient| ambient.borrow_mut().replace(clock));
    let _restore = Restore(previous);
    f()
}

/// Returns the clock the contextual clock currently defers to. The result is
/// never contextual.
#[cfg(feature = "std")]
fn current() -> Clock {
    AMBIENT.with(|ambient| ambient.borrow().clone()).unwrap_or_else(default)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn fixed(s: &str) -> Clock {
        Clock::fixed(s.parse().unwrap(), TimeZone::UTC)
    }

    #[test]
    fn tick_truncation() {
        let base = fixed("1969-12-31T23:59:59.999Z");
        let clock = Clock::tick(base.clone(), Duration::of_seconds(10, 0).unwrap())
            .unwrap();
        assert_eq!(clock.instant().unwrap().to_string(), "1969-12-31T23:59:50Z");
        let clock =
            Clock::tick(base, Duration::of_micros(100).unwrap()).unwrap();
        assert_eq!(
            clock.instant().unwrap().to_string(),
            "1969-12-31T23:59:59.999Z",
        );
    }

    #[test]
    fn tick_validation() {
        let base = fixed("2024-01-01T00:00:00Z");
        let err = Clock::tick(base.clone(), Duration::of_seconds(-1, 0).unwrap())
            .unwrap_err();
        assert!(err.is_validation());
        insta::assert_snapshot!(err, @"tick duration must be strictly positive");

        let err = Clock::tick(base.clone(), "PT1.5S".parse().unwrap())
            .unwrap_err();
        assert!(err.is_validation());
        insta::assert_snapshot!(
            err,
            @"tick duration PT1.500S must be a whole number of seconds or divide one second exactly",
        );
        assert!(Clock::tick(base, Duration::of_nanos(1).unwrap()).is_ok());
    }

    #[test]
    fn offset_and_zone() {
        let tz = TimeZone::fixed(-7_200).unwrap();
        let base = Clock::fixed(Instant::EPOCH, tz.clone());
        let clock = Clock::offset(base.clone(), Duration::of_days(1).unwrap());
        assert_eq!(clock.zone(), tz);
        assert_eq!(clock.instant().unwrap().to_string(), "1970-01-02T00:00:00Z");
        assert_eq!(Clock::offset(base.clone(), Duration::ZERO), base);

        let clock = clock.with_zone(TimeZone::UTC);
        assert_eq!(clock.zone(), TimeZone::UTC);

        let base = Clock::fixed(Instant::MAX, TimeZone::UTC);
        let clock = Clock::offset(base, Duration::of_nanos(1).unwrap());
        assert!(clock.instant().is_err());
    }

    #[test]
    fn ambient_override_nests_and_restores() {
        let a = fixed("2001-01-01T00:00:00Z");
        let b = fixed("2002-02-02T00:00:00Z");
        let contextual = Clock::contextual();
        let got = with_clock(a.clone(), || {
            let outer = contextual.instant().unwrap();
            let inner = with_clock(b.clone(), || contextual.instant().unwrap());
            (outer, inner, contextual.instant().unwrap())
        });
        assert_eq!(got.0, a.instant().unwrap());
        assert_eq!(got.1, b.instant().unwrap());
        assert_eq!(got.2, a.instant().unwrap());
        assert_ne!(contextual.instant().unwrap(), a.instant().unwrap());
    }

    #[test]
    fn ambient_override_restored_on_panic() {
        let a = fixed("2001-01-01T00:00:00Z");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
            || with_clock(a.clone(), || panic!("boom")),
        ));
        assert!(result.is_err());
        assert_ne!(Instant::now(), a.instant().unwrap());
    }

    #[test]
    fn contextual_is_pinned_when_installed() {
        let a = fixed("2001-01-01T00:00:00Z");
        let one_hour = Duration::of_hours(1).unwrap();
        let got = with_clock(a, || {
            let shifted = Clock::offset(Clock::contextual(), one_hour);
            with_clock(shifted, Instant::now)
        });
        assert_eq!(got.to_string(), "2001-01-01T01:00:00Z");
    }
}
