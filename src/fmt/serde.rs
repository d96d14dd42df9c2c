/*!
Helpers for using this crate with [Serde].

Every value type implements `Serialize` and `Deserialize` using its ISO 8601
string form, so nothing here is needed for that. This module only provides
helpers, meant to be used with Serde's [`with` attribute], for (de)serializing
[`Instant`](crate::Instant) values as an integer number of seconds or
milliseconds since the Unix epoch.

* [`instant`]
    * [`hora::fmt::serde::instant::second::required`](self::instant::second::required)
    * [`hora::fmt::serde::instant::second::optional`](self::instant::second::optional)
    * [`hora::fmt::serde::instant::millisecond::required`](self::instant::millisecond::required)
    * [`hora::fmt::serde::instant::millisecond::optional`](self::instant::millisecond::optional)

Serializing an instant whose sub-second part is finer than the chosen unit
truncates it toward the past.

# Example

```
use hora::Instant;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "hora::fmt::serde::instant::second::required")]
    at: Instant,
    #[serde(with = "hora::fmt::serde::instant::millisecond::optional")]
    seen: Option<Instant>,
}

let json = r#"{"at":1517644800,"seen":1517644800123}"#;
let got: Record = serde_json::from_str(json)?;
assert_eq!(got.at, Instant::of_epoch_second(1517644800, 0)?);
assert_eq!(got.seen, Some(Instant::of_epoch_milli(1517644800_123)?));
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[Serde]: https://serde.rs/
[`with` attribute]: https://serde.rs/field-attrs.html#with
*/

/// Implements `Serialize` and `Deserialize` for a type using its `Display`
/// and `FromStr` impls.
macro_rules! string_serde {
    ($ty:ty, $expecting:expr) => {
        impl serde::Serialize for $ty {
            #[inline]
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            #[inline]
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$ty, D::Error> {
                use serde::de;

                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        f.write_str($expecting)
                    }

                    #[inline]
                    fn visit_bytes<E: de::Error>(
                        self,
                        value: &[u8],
                    ) -> Result<$ty, E> {
                        let value = core::str::from_utf8(value)
                            .map_err(de::Error::custom)?;
                        self.visit_str(value)
                    }

                    #[inline]
                    fn visit_str<E: de::Error>(
                        self,
                        value: &str,
                    ) -> Result<$ty, E> {
                        value.parse().map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

string_serde!(crate::Instant, "an instant string in ISO 8601 format");
string_serde!(crate::civil::LocalDate, "a date string in ISO 8601 format");
string_serde!(crate::civil::LocalTime, "a time string in ISO 8601 format");
string_serde!(
    crate::civil::LocalDateTime,
    "a datetime string in ISO 8601 format"
);
string_serde!(crate::Duration, "an ISO 8601 duration string");
string_serde!(crate::Period, "an ISO 8601 period string");
string_serde!(
    crate::PeriodDuration,
    "an ISO 8601 period and duration string"
);

/// Convenience routines for (de)serializing [`Instant`](crate::Instant) as
/// raw integer values.
pub mod instant {
    use serde::de;

    /// A generic visitor for `Option<Instant>`.
    struct OptionalVisitor<V>(V);

    impl<'de, V: de::Visitor<'de, Value = crate::Instant>> de::Visitor<'de>
        for OptionalVisitor<V>
    {
        type Value = Option<crate::Instant>;

        fn expecting(
            &self,
            f: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
            f.write_str("an integer offset from the Unix epoch or `None`")
        }

        #[inline]
        fn visit_some<D: de::Deserializer<'de>>(
            self,
            de: D,
        ) -> Result<Option<crate::Instant>, D::Error> {
            de.deserialize_i64(self.0).map(Some)
        }

        #[inline]
        fn visit_none<E: de::Error>(self) -> Result<Option<crate::Instant>, E> {
            Ok(None)
        }
    }

    /// Converts an unsigned integer from a deserializer to an `i64`.
    fn unsigned<E: de::Error>(v: u64, unit: &str) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| {
            de::Error::custom(alloc::format!(
                "got unsigned integer {v} {unit}, \
                 which is too big to fit in an `Instant`",
            ))
        })
    }

    /// (De)serialize an integer number of seconds from the Unix epoch.
    pub mod second {
        use serde::de;

        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = crate::Instant;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("an integer number of seconds from the Unix epoch")
            }

            #[inline]
            fn visit_i64<E: de::Error>(
                self,
                v: i64,
            ) -> Result<crate::Instant, E> {
                crate::Instant::of_epoch_second(v, 0)
                    .map_err(de::Error::custom)
            }

            #[inline]
            fn visit_u64<E: de::Error>(
                self,
                v: u64,
            ) -> Result<crate::Instant, E> {
                self.visit_i64(super::unsigned(v, "seconds")?)
            }
        }

        /// (De)serialize a required integer number of seconds from the Unix
        /// epoch.
        pub mod required {
            /// Serialize a required integer number of seconds since the Unix
            /// epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &crate::Instant,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                se.serialize_i64(instant.epoch_second())
            }

            /// Deserialize a required integer number of seconds since the
            /// Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<crate::Instant, D::Error> {
                de.deserialize_i64(super::Visitor)
            }
        }

        /// (De)serialize an optional integer number of seconds from the Unix
        /// epoch.
        pub mod optional {
            /// Serialize an optional integer number of seconds since the Unix
            /// epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Option<crate::Instant>,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                match *instant {
                    None => se.serialize_none(),
                    Some(instant) => se.serialize_i64(instant.epoch_second()),
                }
            }

            /// Deserialize an optional integer number of seconds since the
            /// Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Option<crate::Instant>, D::Error> {
                de.deserialize_option(super::super::OptionalVisitor(
                    super::Visitor,
                ))
            }
        }
    }

    /// (De)serialize an integer number of milliseconds from the Unix epoch.
    pub mod millisecond {
        use serde::de;

        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = crate::Instant;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str(
                    "an integer number of milliseconds from the Unix epoch",
                )
            }

            #[inline]
            fn visit_i64<E: de::Error>(
                self,
                v: i64,
            ) -> Result<crate::Instant, E> {
                crate::Instant::of_epoch_milli(v).map_err(de::Error::custom)
            }

            #[inline]
            fn visit_u64<E: de::Error>(
                self,
                v: u64,
            ) -> Result<crate::Instant, E> {
                self.visit_i64(super::unsigned(v, "milliseconds")?)
            }
        }

        /// (De)serialize a required integer number of milliseconds from the
        /// Unix epoch.
        pub mod required {
            /// Serialize a required integer number of milliseconds since the
            /// Unix epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &crate::Instant,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                let millis = instant
                    .to_epoch_milli()
                    .map_err(serde::ser::Error::custom)?;
                se.serialize_i64(millis)
            }

            /// Deserialize a required integer number of milliseconds since
            /// the Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<crate::Instant, D::Error> {
                de.deserialize_i64(super::Visitor)
            }
        }

        /// (De)serialize an optional integer number of milliseconds from the
        /// Unix epoch.
        pub mod optional {
            /// Serialize an optional integer number of milliseconds since the
            /// Unix epoch.
            #[inline]
            pub fn serialize<S: serde::Serializer>(
                instant: &Option<crate::Instant>,
                se: S,
            ) -> Result<S::Ok, S::Error> {
                match *instant {
                    None => se.serialize_none(),
                    Some(ref instant) => super::required::serialize(instant, se),
                }
            }

            /// Deserialize an optional integer number of milliseconds since
            /// the Unix epoch.
            #[inline]
            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                de: D,
            ) -> Result<Option<crate::Instant>, D::Error> {
                de.deserialize_option(super::super::OptionalVisitor(
                    super::Visitor,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        string::{String, ToString},
        vec::Vec,
    };

    use crate::{civil::LocalDate, Duration, Instant, PeriodDuration};

    #[test]
    fn strings() {
        let date = LocalDate::constant(2024, 2, 29);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2024-02-29""#);
        assert_eq!(serde_json::from_str::<LocalDate>(&json).unwrap(), date);

        let got: Vec<Duration> =
            serde_json::from_str(r#"["PT1H","-PT0.5S"]"#).unwrap();
        let json = serde_json::to_string(&got).unwrap();
        assert_eq!(json, r#"["PT1H","PT-0.500S"]"#);

        let pd: PeriodDuration = serde_json::from_str(r#""P1MT25H""#).unwrap();
        assert_eq!(serde_json::to_string(&pd).unwrap(), r#""P1MT25H""#);
    }

    #[test]
    fn string_errors() {
        let err = serde_json::from_str::<LocalDate>(r#""2023-02-29""#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("parameter 'day' with value 29"), "{err}");

        let err = serde_json::from_str::<Instant>("0").unwrap_err().to_string();
        assert!(err.contains("an instant string in ISO 8601 format"), "{err}");
    }

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Seconds {
        #[serde(with = "super::instant::second::required")]
        at: Instant,
        #[serde(with = "super::instant::second::optional")]
        maybe: Option<Instant>,
    }

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Millis {
        #[serde(with = "super::instant::millisecond::required")]
        at: Instant,
        #[serde(with = "super::instant::millisecond::optional")]
        maybe: Option<Instant>,
    }

    #[test]
    fn instant_seconds() {
        let got: Seconds =
            serde_json::from_str(r#"{"at":-1,"maybe":null}"#).unwrap();
        assert_eq!(got.at.to_string(), "1969-12-31T23:59:59Z");
        assert_eq!(got.maybe, None);
        assert_eq!(
            serde_json::to_string(&got).unwrap(),
            r#"{"at":-1,"maybe":null}"#,
        );

        let err = serde_json::from_str::<Seconds>(
            r#"{"at":18446744073709551615,"maybe":null}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("too big to fit in an `Instant`"), "{err}");
    }

    #[test]
    fn instant_millis() {
        let got: Millis =
            serde_json::from_str(r#"{"at":1500,"maybe":-1}"#).unwrap();
        assert_eq!(got.at.to_string(), "1970-01-01T00:00:01.500Z");
        assert_eq!(
            got.maybe.map(|t| t.to_string()),
            Some(String::from("1969-12-31T23:59:59.999Z")),
        );
        assert_eq!(
            serde_json::to_string(&got).unwrap(),
            r#"{"at":1500,"maybe":-1}"#,
        );
    }
}
