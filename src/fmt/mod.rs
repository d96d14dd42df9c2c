/*!
Parsing and printing of ISO 8601 text.

Every value type in this crate implements [`core::str::FromStr`] and
[`core::fmt::Display`] using an ISO 8601 form:

| Type | Example | Notes |
|---|---|---|
| [`LocalDate`](crate::civil::LocalDate) | `2024-06-19`, `+12345-01-01` | Years beyond four digits need a sign. |
| [`LocalTime`](crate::civil::LocalTime) | `09:05`, `09:05:07.5` | Seconds and fraction are optional. A `,` may be used as the decimal separator. |
| [`LocalDateTime`](crate::civil::LocalDateTime) | `2024-06-19T09:05` | An offset or `Z` is rejected. |
| [`Instant`](crate::Instant) | `2024-06-19T13:05:00Z` | A `Z` or a `±HH:MM[:SS]` offset is required. |
| [`Duration`](crate::Duration) | `PT1H30M`, `P2DT-0.5S` | Days, hours, minutes and seconds. |
| [`Period`](crate::Period) | `P1Y2M3W4D` | Weeks are folded into days. |
| [`PeriodDuration`](crate::PeriodDuration) | `P1MT25H` | A period followed by a duration. |

Parsing is strict. The entire input must be consumed, and an error always
includes the text that could not be parsed:

```
use hora::civil::LocalDateTime;

let err = "2024-06-19T09:05Z".parse::<LocalDateTime>().unwrap_err();
assert!(err.is_parse());
assert_eq!(
    err.to_string(),
    "failed to parse \"2024-06-19T09:05Z\" as a datetime: \
     parsed value '2024-06-19T09:05', but unparsed input \"Z\" remains \
     (expected no unparsed input)",
);
```

Amounts of time use signed fields. Each field may carry its own sign, and
a sign in front of the `P` negates every field:

```
use hora::Duration;

let d: Duration = "-PT1H-30M".parse()?;
assert_eq!(d.to_string(), "PT-30M");

# Ok::<(), Box<dyn std::error::Error>>(())
```

Printing always produces text that parses back to an equal value.

# Serde

When the `serde` crate feature is enabled, every value type is serialized
as its ISO 8601 string. The [`serde`](self::serde) module provides helpers
for (de)serializing instants as integers instead.
*/

use crate::error::{fmt::Error as E, Error};

pub(crate) mod iso8601;
#[cfg(feature = "serde")]
pub mod serde;
mod util;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the offset at which the value
/// ended in the input given. This makes it possible to parse, e.g., a date
/// and then a time from the remaining input.
#[derive(Clone, Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    value: V,
    /// The remaining input that was not consumed.
    input: &'i [u8],
}

impl<'i, V: core::fmt::Display> Parsed<'i, V> {
    /// Ensures that the parsed value represents the entire input. This occurs
    /// precisely when the `input` on this parsed value is empty.
    ///
    /// This is useful when one expects a parsed value to consume the entire
    /// input, and to consider it an error if it doesn't.
    #[inline]
    fn into_full(self) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(Error::from(E::into_full_error(&self.value, self.input)))
    }
}

impl<'i, V> Parsed<'i, V> {
    /// Maps the value of this parsed value to another value, keeping the
    /// remaining input.
    #[inline]
    fn and_then<U>(
        self,
        map: impl FnOnce(V) -> Result<U, Error>,
    ) -> Result<Parsed<'i, U>, Error> {
        let Parsed { value, input } = self;
        Ok(Parsed { value: map(value)?, input })
    }
}
