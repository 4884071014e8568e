use openfahrplan::shared::{Duration, Time};

#[test]
fn add_duration_to_time() {
    let departure = Time::from_hms("08:00:00").unwrap();
    let arrival = departure + Duration::from_minutes(12);
    assert_eq!(arrival, Time::from_hms("08:12:00").unwrap());
}

#[test]
fn subtract_times_to_dwell() {
    let board = Time::from_hms("08:10:00").unwrap();
    let alight = Time::from_hms("08:12:30").unwrap();
    assert_eq!((alight - board).as_seconds(), 150);
}

#[test]
fn post_midnight_stays_unwrapped_in_engine_form() {
    let late = Time::from_hms("25:07:00").unwrap();
    assert_eq!(late.as_seconds(), 25 * 3600 + 7 * 60);
    assert_eq!(late.to_hms_string(), "25:07:00");
}

#[test]
fn clock_string_wraps_for_display_only() {
    let late = Time::from_hms("25:07:00").unwrap();
    assert_eq!(late.to_clock_string(), "01:07:00");
}

#[test]
fn hour_field_accepts_one_or_two_digits_only() {
    assert!(Time::from_hms("7:05:00").is_some());
    assert!(Time::from_hms("07:05:00").is_some());
    assert!(Time::from_hms("107:05:00").is_none());
    assert!(Time::from_hms(":05:00").is_none());
}
