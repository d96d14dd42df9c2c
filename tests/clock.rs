use hora::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    clock::{self, Clock},
    tz::TimeZone,
    Duration, Instant,
};

fn fixed(s: &str, zone: TimeZone) -> Clock {
    Clock::fixed(s.parse().unwrap(), zone)
}

#[test]
fn now_with_explicit_clock() {
    let tz = TimeZone::fixed(-5 * 3_600).unwrap();
    let clock = fixed("2024-01-01T03:30:00Z", tz);
    let now = Instant::now_with(&clock).unwrap();
    assert_eq!(now.to_string(), "2024-01-01T03:30:00Z");
    assert_eq!(LocalDate::now_with(&clock).unwrap().to_string(), "2023-12-31");
    assert_eq!(
        LocalDateTime::now_with(&clock).unwrap().to_string(),
        "2023-12-31T22:30",
    );
    assert_eq!(LocalTime::now_with(&clock).unwrap().to_string(), "22:30");
}

#[test]
fn derived_clocks_compose() {
    let base = fixed("2024-06-01T12:34:56.789Z", TimeZone::UTC);
    let ahead = Clock::offset(base.clone(), Duration::of_minutes(90).unwrap());
    let now = ahead.instant().unwrap();
    assert_eq!(now.to_string(), "2024-06-01T14:04:56.789Z");

    let quarter = Duration::of_minutes(15).unwrap();
    let ticking = Clock::tick(ahead, quarter).unwrap();
    let now = ticking.instant().unwrap();
    assert_eq!(now.to_string(), "2024-06-01T14:00:00Z");

    let plus_two = TimeZone::get("+02:00").unwrap();
    let zoned = ticking.with_zone(plus_two.clone());
    assert_eq!(zoned.zone(), plus_two);
    assert_eq!(zoned.instant().unwrap(), ticking.instant().unwrap());

    assert!(Clock::tick(base, Duration::ZERO).unwrap_err().is_validation());
}

#[test]
fn thread_override_is_scoped() {
    let _ = crate::Logger::init();

    let clock = fixed("1999-12-31T23:59:59Z", TimeZone::UTC);
    let inside = clock::with_clock(clock, || {
        let inner = fixed("2000-01-01T00:00:00Z", TimeZone::UTC);
        let nested = clock::with_clock(inner, Instant::now);
        (Instant::now(), nested)
    });
    assert_eq!(inside.0.to_string(), "1999-12-31T23:59:59Z");
    assert_eq!(inside.1.to_string(), "2000-01-01T00:00:00Z");

    // Another thread never sees this thread's override.
    let clock = fixed("1999-12-31T23:59:59Z", TimeZone::UTC);
    let other = clock::with_clock(clock, || {
        std::thread::spawn(Instant::now).join().unwrap()
    });
    assert_ne!(other.to_string(), "1999-12-31T23:59:59Z");
}

#[test]
fn process_default_can_be_replaced() {
    let _ = crate::Logger::init();

    let clock = fixed("2010-05-06T07:08:09Z", TimeZone::fixed(3_600).unwrap());
    let previous = clock::set_default(clock.clone());
    let seen = std::thread::spawn(|| LocalDateTime::now().to_string())
        .join()
        .unwrap();
    clock::set_default(previous);

    assert_eq!(seen, "2010-05-06T08:08:09");
}
