/*!
Hora is a calendar and clock arithmetic kernel for Rust.

It provides immutable value types for absolute time ([`Instant`]) and civil
time ([`civil::LocalDate`], [`civil::LocalTime`] and
[`civil::LocalDateTime`]), amounts of time that are either exact
([`Duration`]), calendar based ([`Period`]) or both ([`PeriodDuration`]),
ISO 8601 parsing and printing for all of them, and the conversion of a civil
datetime to an instant through a [`tz::TimeZone`], including correct handling
of daylight saving time gaps and overlaps.

# Overview

* [`Instant`] is a point on the single global timeline, represented as a
number of seconds since the Unix epoch and a non-negative nanosecond
adjustment.
* [`civil::LocalDate`], [`civil::LocalTime`] and [`civil::LocalDateTime`]
are wall clock readings in the proleptic Gregorian calendar with no time zone
attached.
* [`Duration`] is an exact length of time measured in seconds and
nanoseconds.
* [`Period`] is an amount of time in years, months and days. A month has no
fixed length, so a period only has meaning relative to a date.
* [`PeriodDuration`] combines a `Period` and a `Duration`.
* [`tz::TimeZone`] maps instants to UTC offsets by consulting a
[`tz::OffsetOracle`]. With the default `tzdb` crate feature, the oracle is
backed by a bundled copy of the IANA Time Zone Database.
* [`clock::Clock`] is the source of "now" for every `now` constructor.

All arithmetic is exact. Every integer computation is checked against the
"safe integer" domain described in the [`math`] module, and leaving it is
reported as an error instead of silently wrapping.

# Example

```
use hora::{civil::LocalDateTime, tz::TimeZone, Instant};

let dt: LocalDateTime = "2018-11-04T00:00".parse()?;
let tz = TimeZone::get("America/Sao_Paulo")?;
// Midnight did not exist that day in Sao Paulo. The clocks jumped from
// 23:59:59 straight to 01:00:00, so the civil time resolves forward.
let instant = dt.to_instant(&tz)?;
assert_eq!(instant.to_string(), "2018-11-04T03:00:00Z");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - Enables the system clock, the process-wide
default clock and per-thread ambient clock overrides.
* **tzdb** (enabled by default) - Provides [`tz::Tzdb`], a zone offset oracle
backed by a bundled copy of the IANA Time Zone Database.
* **logging** - Emits `log` records, mostly while resolving civil datetimes
in time zones.
* **serde** - Implements `Serialize` and `Deserialize` for every value type
using its ISO 8601 form.
* **perf-inline** (enabled by default) - Adds inlining hints on hot paths.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::{
    duration::Duration, error::Error, instant::Instant, period::Period,
    period_duration::PeriodDuration, unit::Unit,
};

#[macro_use]
mod logging;

pub mod civil;
pub mod clock;
mod duration;
mod error;
pub mod fmt;
mod instant;
pub mod math;
mod period;
mod period_duration;
pub mod tz;
mod unit;
mod util;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{civil::LocalDate, tz::TimeZone, Period};

    #[test]
    fn period_then_utc_instant() {
        let _ = crate::logging::tests::init();

        let date = LocalDate::constant(2016, 1, 31);
        let got = Period::of(1, 2, 3).add_to_local_date(date).unwrap();
        assert_eq!(got, LocalDate::constant(2017, 4, 3));

        let dt = date.at_start_of_day();
        let instant = dt.to_instant(&TimeZone::UTC).unwrap();
        assert_eq!(instant.to_string(), "2016-01-31T00:00:00Z");
    }
}
