use hora::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    Duration, Instant, Period, PeriodDuration,
};

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Event {
    date: LocalDate,
    time: LocalTime,
    start: LocalDateTime,
    at: Instant,
    length: Duration,
    repeat: Period,
    grace: PeriodDuration,
    #[serde(with = "hora::fmt::serde::instant::second::optional")]
    legacy: Option<Instant>,
}

#[test]
fn event_round_trip() {
    let json = r#"{
        "date": "2024-02-29",
        "time": "09:05:07.5",
        "start": "2024-02-29T09:05",
        "at": "2024-02-29T08:05:00+01:00",
        "length": "PT1H30M",
        "repeat": "P1Y2W",
        "grace": "P1DT12H",
        "legacy": 1709190300
    }"#;
    let event: Event = serde_json::from_str(json).unwrap();
    assert_eq!(event.at, event.legacy.unwrap());
    assert_eq!(event.repeat, Period::of(1, 0, 14));

    let got = serde_json::to_string(&event).unwrap();
    insta::assert_snapshot!(
        got,
        @r#"{"date":"2024-02-29","time":"09:05:07.500","start":"2024-02-29T09:05","at":"2024-02-29T07:05:00Z","length":"PT1H30M","repeat":"P1Y14D","grace":"P1DT12H","legacy":1709190300}"#,
    );
    let back: Event = serde_json::from_str(&got).unwrap();
    assert_eq!(back, event);
}

#[test]
fn parse_errors_surface() {
    let err = serde_json::from_str::<Duration>(r#""PT1.5M""#).unwrap_err();
    insta::assert_snapshot!(
        err,
        @r#"failed to parse "PT1.5M" as an ISO 8601 duration: found a fractional value on unit `M`, but only seconds may have a fractional part at line 1 column 8"#,
    );
}
