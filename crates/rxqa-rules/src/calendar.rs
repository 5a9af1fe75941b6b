//! Date-of-birth parsing and age arithmetic.
//!
//! Ages are calendar differences in years, months and days with a borrow
//! from the length of the month before "today". Medication age gates are
//! expressed in exactly these units, so elapsed-day arithmetic is not used.

use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use regex::Regex;
use serde::Serialize;

/// `YYYY-M-D` with one or two digit month and day.
static DATE_OF_BIRTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("Invalid date of birth regex")
});

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` for a month outside 1-12.
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let days = *DAYS_IN_MONTH.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(29)
    } else {
        Some(days)
    }
}

/// Year, month and day as typed, before any calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    /// Parse a trimmed `YYYY-MM-DD` value. Out-of-range months and days
    /// still parse; callers decide what to report.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = DATE_OF_BIRTH_REGEX.captures(value.trim())?;
        Some(Self {
            year: captures[1].parse().ok()?,
            month: captures[2].parse().ok()?,
            day: captures[3].parse().ok()?,
        })
    }

    pub fn month_in_range(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    pub fn day_in_range(&self) -> bool {
        (1..=31).contains(&self.day)
    }

    /// Days in the typed month, when the month is valid.
    pub fn max_days(&self) -> Option<u32> {
        days_in_month(self.month, self.year)
    }

    /// The typed values name a real calendar day.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Resolve the parts the way a lenient calendar does: month 13 is
    /// January of the next year, day 0 the last day of the previous month.
    pub fn rolled_over(&self) -> Option<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
        let month_start = match self.month.checked_sub(1) {
            Some(offset) => start.checked_add_months(Months::new(offset))?,
            None => start.checked_sub_months(Months::new(1))?,
        };
        month_start.checked_add_signed(TimeDelta::days(i64::from(self.day) - 1))
    }
}

/// Calendar age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    /// Can be negative when the previous month is shorter than the birth
    /// day (born Jan 31, evaluated Mar 1).
    pub days: i32,
}

impl Age {
    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Age of someone born on `birth` as of `today`; `None` if `birth` is
    /// after `today`.
    pub fn between(birth: NaiveDate, today: NaiveDate) -> Option<Self> {
        if birth > today {
            return None;
        }

        let mut years = today.year() - birth.year();
        let mut months = today.month0() as i32 - birth.month0() as i32;
        let mut days = today.day() as i32 - birth.day() as i32;

        if days < 0 {
            months -= 1;
            days += days_in_previous_month(today) as i32;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        Some(Self {
            years,
            months,
            days,
        })
    }

    pub fn is_exactly(&self, years: i32, months: i32, days: i32) -> bool {
        *self == Self::new(years, months, days)
    }

    /// Strictly older than `years` whole years (`years` plus any months or days).
    pub fn exceeds_years(&self, years: i32) -> bool {
        self.years > years || (self.years == years && (self.months > 0 || self.days > 0))
    }
}

/// Length of the month preceding `date`'s month.
fn days_in_previous_month(date: NaiveDate) -> u32 {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
