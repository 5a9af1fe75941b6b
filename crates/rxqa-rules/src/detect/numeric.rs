//! Weight, dosage and frequency detection.
//!
//! The three numeric fields share one pipeline: length boundaries, decimal
//! separator shape, parse, sign, then a range classification under the
//! selected medication's limits. Dosage adds the zero-dose tag and, for
//! weight-bounded medications, the total daily dose checks.

use rxqa_model::{DetectionTag, FieldName, FormValues, Medication, Pattern, TagSet};

use super::length_tags;
use crate::limits::{
    NUMERIC_MAX_LENGTH, RangeLimits, TOTAL_MAX_LENGTH, limit_scope, limits_for, text_length,
    total_dose_factor,
};
use crate::numeric::{
    has_comma, has_decimal_point, has_high_precision, has_multiple_decimal_points,
    parse_leading_float, parse_positive,
};

/// Where a total daily dose sits relative to its weight-based maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TotalDose {
    Within,
    AtMax,
    AboveMax,
}

pub fn detect(field: FieldName, value: &str, form: &FormValues) -> TagSet {
    let mut tags = TagSet::new();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return tags;
    }
    let Some(limits) = limits_for(field, None) else {
        return tags;
    };

    length_tags(
        &mut tags,
        text_length(trimmed),
        NUMERIC_MAX_LENGTH,
        TOTAL_MAX_LENGTH,
    );
    insert_if(&mut tags, has_comma(trimmed), Pattern::CommaDecimal);
    insert_if(
        &mut tags,
        has_multiple_decimal_points(trimmed),
        Pattern::MultipleDecimals,
    );

    let Some(number) = parse_leading_float(trimmed) else {
        tags.insert(DetectionTag::generic(Pattern::NonNumeric));
        // Frequency keeps reporting the shape of what was typed.
        if field == FieldName::Frequency {
            decimal_tags(&mut tags, trimmed);
            insert_if(&mut tags, trimmed.starts_with('+'), Pattern::StartsWithPlus);
        }
        return tags;
    };

    insert_if(
        &mut tags,
        field == FieldName::Dosage && number == 0.0,
        Pattern::AbsoluteMinimum,
    );
    decimal_tags(&mut tags, trimmed);
    insert_if(&mut tags, number < 0.0, Pattern::NegativeValue);

    let scope = limit_scope(form.medication());
    let limits = limits_for(field, scope).unwrap_or(limits);
    let total = match (field, scope) {
        (FieldName::Dosage, Some(medication)) => total_dose(medication, number, form),
        _ => None,
    };

    range_tags(
        &mut tags,
        scope,
        number,
        limits,
        total == Some(TotalDose::AboveMax),
    );
    if let (Some(medication), Some(total)) = (scope, total) {
        match total {
            TotalDose::AtMax => {
                tags.insert(DetectionTag::scoped(medication, Pattern::TotalBoundaryMax));
            }
            TotalDose::AboveMax => {
                tags.insert(DetectionTag::scoped(medication, Pattern::TotalAboveMax));
            }
            TotalDose::Within => {}
        }
    }

    insert_if(&mut tags, trimmed.starts_with('+'), Pattern::StartsWithPlus);
    tags
}

fn insert_if(tags: &mut TagSet, condition: bool, pattern: Pattern) {
    if condition {
        tags.insert(DetectionTag::generic(pattern));
    }
}

fn decimal_tags(tags: &mut TagSet, trimmed: &str) {
    if has_decimal_point(trimmed) {
        tags.insert(DetectionTag::generic(Pattern::DecimalValue));
        insert_if(tags, has_high_precision(trimmed), Pattern::PrecisionHigh);
    }
}

/// Boundary and nominal checks are independent: a value on a boundary is
/// also nominal.
fn range_tags(
    tags: &mut TagSet,
    scope: Option<Medication>,
    number: f64,
    limits: RangeLimits,
    suppress_nominal: bool,
) {
    let (min, max) = (limits.min_f64(), limits.max_f64());
    let checks = [
        (number > 0.0 && number < min, Pattern::BelowMin),
        (number == min, Pattern::BoundaryMin),
        (
            number >= min && number <= max && !suppress_nominal,
            Pattern::Nominal,
        ),
        (number == max, Pattern::BoundaryMax),
        (number > max, Pattern::AboveMax),
    ];
    tags.extend(
        checks
            .into_iter()
            .filter(|(matched, _)| *matched)
            .map(|(_, pattern)| DetectionTag::for_scope(scope, pattern)),
    );
}

/// Compare `dosage × frequency` with `weight × factor` when the medication
/// bounds its total dose and every operand is a positive number.
fn total_dose(medication: Medication, dosage: f64, form: &FormValues) -> Option<TotalDose> {
    let factor = f64::from(total_dose_factor(medication)?);
    if dosage <= 0.0 {
        return None;
    }
    let frequency = parse_positive(&form.frequency)?;
    let weight = parse_positive(&form.weight)?;

    let total = dosage * frequency;
    let max_total = weight * factor;
    Some(if total > max_total {
        TotalDose::AboveMax
    } else if total == max_total {
        TotalDose::AtMax
    } else {
        TotalDose::Within
    })
}
