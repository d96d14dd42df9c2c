use std::sync::Arc;

use hora::{
    civil::LocalDateTime,
    tz::{OffsetOracle, TimeZone},
    Error, Instant,
};

fn resolve(id: &str, dt: LocalDateTime) -> String {
    let tz = TimeZone::get(id).unwrap();
    dt.to_instant(&tz).unwrap().to_string()
}

fn dt(y: i32, m: i8, d: i8, h: i8, mi: i8) -> LocalDateTime {
    LocalDateTime::constant(y, m, d, h, mi, 0, 0)
}

#[test]
fn sao_paulo() {
    let _ = crate::Logger::init();

    // Clocks jumped from 00:00 to 01:00 on 2018-11-04.
    let got = resolve("America/Sao_Paulo", dt(2018, 11, 4, 0, 0));
    assert_eq!(got, "2018-11-04T03:00:00Z");
    let got = resolve("America/Sao_Paulo", dt(2018, 11, 4, 0, 30));
    assert_eq!(got, "2018-11-04T03:30:00Z");
    let got = resolve("America/Sao_Paulo", dt(2018, 11, 3, 23, 59));
    assert_eq!(got, "2018-11-04T02:59:00Z");

    let got = resolve("America/Sao_Paulo", dt(2019, 2, 16, 0, 0));
    assert_eq!(got, "2019-02-16T02:00:00Z");
    // 23:00 to 00:00 happened twice on the night of 2019-02-16.
    let got = resolve("America/Sao_Paulo", dt(2019, 2, 16, 23, 30));
    assert_eq!(got, "2019-02-17T01:30:00Z");
}

#[test]
fn lord_howe_half_hour_gap() {
    let _ = crate::Logger::init();

    let got = resolve("Australia/Lord_Howe", dt(2022, 10, 2, 2, 0));
    assert_eq!(got, "2022-10-01T15:30:00Z");
    let got = resolve("Australia/Lord_Howe", dt(2022, 10, 2, 2, 15));
    assert_eq!(got, "2022-10-01T15:45:00Z");
    let got = resolve("Australia/Lord_Howe", dt(2022, 10, 2, 2, 30));
    assert_eq!(got, "2022-10-01T15:30:00Z");
}

#[test]
fn new_york() {
    let _ = crate::Logger::init();

    let got = resolve("America/New_York", dt(2024, 3, 10, 2, 30));
    assert_eq!(got, "2024-03-10T07:30:00Z");
    let got = resolve("America/New_York", dt(2024, 11, 3, 1, 30));
    assert_eq!(got, "2024-11-03T05:30:00Z");
    let got = resolve("America/New_York", dt(2024, 11, 3, 2, 0));
    assert_eq!(got, "2024-11-03T07:00:00Z");
}

#[test]
fn instants_round_trip_through_civil_time() {
    let zones = [
        "UTC",
        "+05:30",
        "America/Sao_Paulo",
        "Australia/Lord_Howe",
        "Europe/Paris",
        "Asia/Kolkata",
    ];
    let instants = [
        "1970-01-01T00:00:00Z",
        "2018-11-04T02:59:59.999Z",
        "2018-11-04T03:00:00Z",
        "2022-10-01T15:29:59Z",
        "2024-06-19T13:05:00.000000001Z",
    ];
    for id in zones {
        let tz = TimeZone::get(id).unwrap();
        for s in instants {
            let instant: Instant = s.parse().unwrap();
            let local = instant.to_local_date_time(&tz).unwrap();
            // Only the later occurrence of a repeated datetime fails to
            // round trip, and none of the instants above are in an overlap.
            let back = local.to_instant(&tz).unwrap();
            assert_eq!(back, instant, "zone {id}, instant {s}");
        }
    }
}

#[test]
fn fixed_offset_ids() {
    let tz = TimeZone::get("+05:30").unwrap();
    assert_eq!(tz.id(), "+05:30");
    assert_eq!(tz, TimeZone::fixed(19_800).unwrap());
    assert_eq!(TimeZone::get("UTC").unwrap(), TimeZone::UTC);

    let err = TimeZone::get("+5").unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_validation());

    let err = TimeZone::get("+25:00").unwrap_err();
    assert!(err.is_validation());

    let err = TimeZone::get("Mars/Olympus_Mons").unwrap_err();
    assert!(err.is_validation());
}

/// An oracle for a fictional zone that springs forward by an hour at
/// `02:00` local time on 2030-03-31 and falls back an hour at `03:00` local
/// time on 2030-10-27.
#[derive(Debug)]
struct Synthetic;

impl OffsetOracle for Synthetic {
    fn offset_seconds(&self, _: &str, instant: Instant) -> Result<i32, Error> {
        let spring: Instant = "2030-03-31T01:00:00Z".parse()?;
        let fall: Instant = "2030-10-27T01:00:00Z".parse()?;
        Ok(if instant >= spring && instant < fall { 7_200 } else { 3_600 })
    }

    fn contains(&self, zone_id: &str) -> bool {
        zone_id == "Test/Synthetic"
    }
}

#[test]
fn custom_oracle() {
    let _ = crate::Logger::init();

    let tz = TimeZone::with_oracle("Test/Synthetic", Arc::new(Synthetic))
        .unwrap();
    let instant = |dt: LocalDateTime| dt.to_instant(&tz).unwrap().to_string();

    assert_eq!(instant(dt(2030, 3, 31, 1, 59)), "2030-03-31T00:59:00Z");
    assert_eq!(instant(dt(2030, 3, 31, 2, 0)), "2030-03-31T01:00:00Z");
    assert_eq!(instant(dt(2030, 3, 31, 2, 45)), "2030-03-31T01:45:00Z");
    assert_eq!(instant(dt(2030, 3, 31, 3, 0)), "2030-03-31T01:00:00Z");

    assert_eq!(instant(dt(2030, 10, 27, 2, 30)), "2030-10-27T00:30:00Z");
    assert_eq!(instant(dt(2030, 10, 27, 3, 0)), "2030-10-27T02:00:00Z");

    let err = TimeZone::with_oracle("Test/Missing", Arc::new(Synthetic))
        .unwrap_err();
    assert!(err.is_validation());
}
