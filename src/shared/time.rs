use std::ops::{Add, AddAssign, Sub, SubAssign};

use chrono::{Local, Timelike};

/// Sentinel meaning "no such time". Unparseable literals and unreached
/// stops carry this value; it must never be fed into arithmetic.
pub const MAX: Time = Time(i64::MAX);

/// Seconds since midnight of the service day.
///
/// GTFS times may exceed 24h (post-midnight service like `25:07:00`);
/// the value is kept as-is and only wrapped at display boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(i64);

impl From<i64> for Time {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(i64::from(now.num_seconds_from_midnight()))
    }

    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> i64 {
        self.0
    }

    /// Parses a GTFS `HH:MM:SS` literal. Accepts one or two hour digits
    /// and exactly two digits for minutes and seconds; hours above 23
    /// pass through unwrapped. Anything else is `None`.
    pub fn from_hms(time: &str) -> Option<Self> {
        let mut split = time.split(':');
        let hours = split.next()?;
        let minutes = split.next()?;
        let seconds = split.next()?;
        if split.next().is_some() {
            return None;
        }
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 || seconds.len() != 2 {
            return None;
        }
        let all_digits = [hours, minutes, seconds]
            .iter()
            .all(|part| part.bytes().all(|b| b.is_ascii_digit()));
        if !all_digits {
            return None;
        }
        let hours: i64 = hours.parse().ok()?;
        let minutes: i64 = minutes.parse().ok()?;
        let seconds: i64 = seconds.parse().ok()?;
        Some(Self(hours * 3600 + minutes * 60 + seconds))
    }

    /// Renders without wrapping, so post-midnight times keep their
    /// service-day form (`25:07:00`).
    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    /// Wall-clock rendering, wrapped to 24h. Display layers only.
    pub fn to_clock_string(&self) -> String {
        let day = self.0.rem_euclid(24 * 3600);
        let h = day / 3600;
        let m = (day % 3600) / 60;
        let s = day % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_post_midnight() {
    let time = "25:07:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_seconds(), 25 * 3600 + 7 * 60);
    assert_eq!(time, stime.to_hms_string());
    assert_eq!("01:07:00", stime.to_clock_string());
}

#[test]
fn valid_time_test_1() {
    let time = "00:00:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 30);
}

#[test]
fn valid_time_test_2() {
    let time = "01:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 3690);
}

#[test]
fn valid_time_single_hour_digit() {
    let time = "8:00:00";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 8 * 3600);
}

#[test]
fn invalid_time_test_1() {
    let time = "00:00:0a";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_test_2() {
    let time = "00:00";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_short_minutes() {
    let time = "01:2:03";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_trailing_field() {
    let time = "01:02:03:04";
    assert!(Time::from_hms(time).is_none())
}

/// A span of seconds, used for walk weights and dwell times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl From<i64> for Duration {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * 60)
    }

    pub const fn as_seconds(&self) -> i64 {
        self.0
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
