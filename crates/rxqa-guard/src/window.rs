//! Access window checks.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::{GuardError, Result};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = MINUTES_PER_HOUR * 24;
const MINUTES_PER_MONTH: u64 = MINUTES_PER_DAY * 30;
const MINUTES_PER_YEAR: u64 = MINUTES_PER_MONTH * 12;

/// A start time plus a whole number of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessWindow {
    pub start: NaiveDateTime,
    pub hours: u32,
}

/// Where "now" falls relative to an access window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowStatus {
    NotYetAvailable {
        minutes_until_start: u64,
    },
    Open {
        remaining_minutes: u64,
        remaining_seconds: u64,
    },
    Expired,
}

impl WindowStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

impl fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotYetAvailable {
                minutes_until_start,
            } => write!(
                f,
                "Access not yet available. Starts in {minutes_until_start} minute(s)."
            ),
            Self::Open {
                remaining_minutes, ..
            } => write!(
                f,
                "Access valid. Time remaining: {remaining_minutes} minute(s)."
            ),
            Self::Expired => f.write_str("Access window has expired"),
        }
    }
}

impl AccessWindow {
    /// Parse `YYYY-MM-DD`, `HH:MM` and a duration such as `3h`.
    pub fn parse(date: &str, time: &str, duration: &str) -> Result<Self> {
        let value = format!("{date}T{time}");
        let start = NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M")
            .map_err(|_| GuardError::InvalidStart { value })?;

        let invalid_duration = || GuardError::InvalidDuration {
            value: duration.to_string(),
        };
        let hours = duration
            .strip_suffix('h')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(invalid_duration)?;
        end_of(start, hours).ok_or_else(invalid_duration)?;

        Ok(Self { start, hours })
    }

    /// End of the window. A window built by hand past the calendar range
    /// ends at the latest representable instant.
    pub fn end(&self) -> NaiveDateTime {
        end_of(self.start, self.hours).unwrap_or(NaiveDateTime::MAX)
    }

    /// Status of the window at `now`. The end instant itself is still open.
    pub fn status(&self, now: NaiveDateTime) -> WindowStatus {
        if now < self.start {
            return WindowStatus::NotYetAvailable {
                minutes_until_start: ceil_minutes(self.start - now),
            };
        }
        let end = self.end();
        if now > end {
            return WindowStatus::Expired;
        }
        let remaining = end - now;
        WindowStatus::Open {
            remaining_minutes: ceil_minutes(remaining),
            remaining_seconds: u64::try_from(remaining.num_seconds()).unwrap_or(0),
        }
    }
}

fn end_of(start: NaiveDateTime, hours: u32) -> Option<NaiveDateTime> {
    start.checked_add_signed(TimeDelta::hours(i64::from(hours)))
}

fn ceil_minutes(delta: TimeDelta) -> u64 {
    let millis = u64::try_from(delta.num_milliseconds()).unwrap_or(0);
    millis.div_ceil(60_000)
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Render a wait such as "1 day, 2 hours, and 5 minutes".
///
/// Months count 30 days and years 12 months. Zero renders as "0 minutes".
pub fn format_wait(minutes: u64) -> String {
    let mut remaining = minutes;
    let mut parts = Vec::new();
    for (size, unit) in [
        (MINUTES_PER_YEAR, "year"),
        (MINUTES_PER_MONTH, "month"),
        (MINUTES_PER_DAY, "day"),
        (MINUTES_PER_HOUR, "hour"),
        (1, "minute"),
    ] {
        let count = remaining / size;
        if count > 0 {
            parts.push(plural(count, unit));
            remaining -= count * size;
        }
    }

    match parts.as_slice() {
        [] => "0 minutes".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("valid datetime")
    }

    fn window() -> AccessWindow {
        AccessWindow::parse("2026-10-19", "14:30", "3h").expect("window")
    }

    #[test]
    fn parses_start_and_duration() {
        let window = window();
        assert_eq!(window.start, at(14, 30, 0));
        assert_eq!(window.end(), at(17, 30, 0));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            AccessWindow::parse("2026-13-01", "14:30", "3h"),
            Err(GuardError::InvalidStart { .. })
        ));
        for duration in ["3", "h", "3.5h", "-3h", "3 h"] {
            assert!(matches!(
                AccessWindow::parse("2026-10-19", "14:30", duration),
                Err(GuardError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn durations_past_the_calendar_are_rejected() {
        assert!(matches!(
            AccessWindow::parse("2026-10-19", "09:00", "4294967295h"),
            Err(GuardError::InvalidDuration { .. })
        ));

        let window = AccessWindow {
            start: at(9, 0, 0),
            hours: u32::MAX,
        };
        assert_eq!(window.end(), NaiveDateTime::MAX);
        assert!(window.status(at(10, 0, 0)).is_open());
    }

    #[test]
    fn status_before_during_and_after() {
        let window = window();
        assert_eq!(
            window.status(at(14, 28, 30)),
            WindowStatus::NotYetAvailable {
                minutes_until_start: 2
            }
        );
        assert_eq!(
            window.status(at(17, 0, 30)),
            WindowStatus::Open {
                remaining_minutes: 30,
                remaining_seconds: 1770
            }
        );
        assert!(window.status(at(17, 30, 0)).is_open());
        assert_eq!(window.status(at(17, 30, 1)), WindowStatus::Expired);
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            WindowStatus::NotYetAvailable {
                minutes_until_start: 5
            }
            .to_string(),
            "Access not yet available. Starts in 5 minute(s)."
        );
        assert_eq!(WindowStatus::Expired.to_string(), "Access window has expired");
    }

    #[test]
    fn wait_formatting() {
        assert_eq!(format_wait(0), "0 minutes");
        assert_eq!(format_wait(1), "1 minute");
        assert_eq!(format_wait(61), "1 hour and 1 minute");
        assert_eq!(format_wait(24 * 60 + 125), "1 day, 2 hours, and 5 minutes");
        assert_eq!(format_wait(MINUTES_PER_YEAR * 2 + MINUTES_PER_MONTH), "2 years and 1 month");
    }
}
