//! Date-of-birth validation.
//!
//! Only a missing value or a wrong shape stops validation early; calendar,
//! future-date, realism and age-gate failures accumulate.

use chrono::NaiveDate;
use rxqa_model::{FieldName, Medication, Violation};

use crate::calendar::{Age, DateParts, is_leap_year};
use crate::limits::{MAX_AGE_YEARS, MinimumAge, minimum_age};

pub fn validate(value: &str, medication: Option<Medication>, today: NaiveDate) -> Vec<Violation> {
    if value.trim().is_empty() {
        return vec![Violation::RequiredFieldMissing {
            field: FieldName::DateOfBirth,
        }];
    }
    let Some(parts) = DateParts::parse(value) else {
        return vec![Violation::FormatInvalid];
    };

    let mut violations = Vec::new();
    if !parts.month_in_range() {
        violations.push(Violation::MonthOutOfRange { month: parts.month });
    }
    if !parts.day_in_range() {
        violations.push(Violation::DayOutOfRange { day: parts.day });
    }
    if let Some(max_days) = parts.max_days()
        && parts.day > max_days
    {
        violations.push(Violation::DayOutOfMonth {
            month: parts.month,
            max_days,
            leap_year: is_leap_year(parts.year),
        });
    }

    // Age rules need a real calendar day.
    let Some(birth) = parts.to_date() else {
        return violations;
    };
    if birth > today {
        violations.push(Violation::FutureDate);
    }

    let Some(age) = Age::between(birth, today) else {
        return violations;
    };
    if age.exceeds_years(MAX_AGE_YEARS) {
        violations.push(Violation::UnrealisticAge);
    }
    if let Some(medication) = medication
        && is_too_young(age, medication)
    {
        violations.push(Violation::AgeRestrictionViolation { medication });
    }
    violations
}

fn is_too_young(age: Age, medication: Medication) -> bool {
    match minimum_age(medication) {
        Some(MinimumAge::Years(years)) => age.years < years,
        Some(MinimumAge::Months(months)) => age.years == 0 && age.months < months,
        None => false,
    }
}
