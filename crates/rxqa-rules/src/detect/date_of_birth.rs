//! Date-of-birth detection.
//!
//! Age gates invert the usual min/max naming: a birth date that is too
//! recent for a medication is "above max" on the timeline and an old one is
//! "below min". The oldest realistic age (150 years) is therefore the lower
//! boundary, and the youngest allowed age the upper one.

use chrono::NaiveDate;
use rxqa_model::{DetectionTag, Medication, Pattern, TagSet};

use super::length_tags;
use crate::calendar::{Age, DateParts, is_leap_year};
use crate::limits::{
    DATE_OF_BIRTH_MAX_LENGTH, MAX_AGE_YEARS, MinimumAge, TOTAL_MAX_LENGTH, minimum_age, text_length,
};

pub fn detect(value: &str, medication: Option<Medication>, today: NaiveDate) -> TagSet {
    let mut tags = TagSet::new();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return tags;
    }

    length_tags(
        &mut tags,
        text_length(trimmed),
        DATE_OF_BIRTH_MAX_LENGTH,
        TOTAL_MAX_LENGTH,
    );

    let Some(parts) = DateParts::parse(trimmed) else {
        tags.insert(DetectionTag::generic(Pattern::InvalidFormat));
        return tags;
    };

    calendar_tags(&mut tags, &parts);

    // Out-of-range parts still resolve to a date, so an impossible date can
    // also be a future one.
    let Some(resolved) = parts.rolled_over() else {
        return tags;
    };
    if resolved > today {
        if let Some(medication @ (Medication::Aspirin | Medication::Ibuprofen)) = medication {
            tags.insert(DetectionTag::scoped(medication, Pattern::AboveMax));
        }
        return tags;
    }

    let Some(age) = parts.to_date().and_then(|birth| Age::between(birth, today)) else {
        return tags;
    };
    age_tags(&mut tags, age, medication);
    tags
}

fn calendar_tags(tags: &mut TagSet, parts: &DateParts) {
    if !parts.month_in_range() {
        tags.insert(DetectionTag::generic(Pattern::InvalidMonth));
    }
    if !parts.day_in_range() {
        tags.insert(DetectionTag::generic(Pattern::InvalidDay));
    }

    let Some(max_days) = parts.max_days() else {
        return;
    };
    if parts.day <= max_days {
        return;
    }
    match parts.month {
        4 | 6 | 9 | 11 => {
            tags.insert(DetectionTag::generic(Pattern::InvalidDayForThirtyDayMonth));
        }
        2 => {
            tags.insert(DetectionTag::generic(Pattern::InvalidFebruaryDay));
            if is_leap_year(parts.year) {
                tags.insert(DetectionTag::generic(Pattern::InvalidLeapYearFebruary));
            }
        }
        _ => {}
    }
}

fn age_tags(tags: &mut TagSet, age: Age, medication: Option<Medication>) {
    // Placebo has no age rules and reports generic tags.
    let scope = medication.filter(|medication| minimum_age(*medication).is_some());
    let (scope, patterns) = age_patterns(age, scope);
    tags.extend(
        patterns
            .into_iter()
            .map(|pattern| DetectionTag::for_scope(scope, pattern)),
    );
}

fn age_patterns(age: Age, scope: Option<Medication>) -> (Option<Medication>, Vec<Pattern>) {
    if age.exceeds_years(MAX_AGE_YEARS) {
        return (scope, vec![Pattern::BelowMin]);
    }
    if age.is_exactly(MAX_AGE_YEARS, 0, 0) {
        return (scope, vec![Pattern::Nominal, Pattern::BoundaryMin]);
    }
    if age.is_exactly(0, 0, 0) {
        let newborn_scope = scope.filter(|medication| *medication == Medication::Ibuprofen);
        return (newborn_scope, vec![Pattern::BoundaryMax, Pattern::Nominal]);
    }

    let patterns = match scope.and_then(minimum_age) {
        Some(MinimumAge::Years(years)) => {
            if age.years < years {
                vec![Pattern::AboveMax]
            } else if age.is_exactly(years, 0, 0) {
                vec![Pattern::BoundaryMax, Pattern::Nominal]
            } else if age.years == years {
                vec![Pattern::Nominal]
            } else {
                vec![Pattern::BelowMin]
            }
        }
        Some(MinimumAge::Months(months)) => {
            if age.years == 0 && age.months < months {
                vec![Pattern::AboveMax]
            } else if age.is_exactly(0, months, 0) {
                vec![Pattern::BoundaryMax, Pattern::Nominal]
            } else {
                vec![Pattern::Nominal]
            }
        }
        None => vec![Pattern::Nominal],
    };
    (scope, patterns)
}
