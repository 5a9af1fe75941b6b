//! Weight, dosage and frequency validation.

use rxqa_model::{Bound, FieldName, FormValues, Medication, Violation};

use crate::limits::{
    NUMERIC_MAX_LENGTH, RangeLimits, limit_scope, limits_for, text_length,
    total_dose_factor,
};
use crate::numeric::{has_decimal_point, parse_leading_float, parse_positive};

pub fn validate(field: FieldName, value: &str, form: &FormValues) -> Vec<Violation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return vec![Violation::RequiredFieldMissing { field }];
    }

    let mut violations = Vec::new();
    if text_length(trimmed) > NUMERIC_MAX_LENGTH {
        violations.push(Violation::LengthExceeded {
            field,
            max: NUMERIC_MAX_LENGTH,
        });
    }
    let number = parse_leading_float(trimmed);
    if number.is_none() {
        violations.push(Violation::NotANumber { field });
    }
    let (Some(number), true) = (number, violations.is_empty()) else {
        return violations;
    };

    if field == FieldName::Frequency && has_decimal_point(trimmed) {
        return vec![Violation::NotAnInteger { field }];
    }

    let scope = limit_scope(form.medication());
    if let Some(limits) = limits_for(field, None) {
        // Paracetamol's own dosage ceiling replaces the generic one.
        let check_max = !(field == FieldName::Dosage && scope == Some(Medication::Paracetamol));
        range_violations(&mut violations, field, None, number, limits, check_max);
    }
    if let Some(medication) = scope
        && let Some(limits) = limits_for(field, scope)
    {
        range_violations(&mut violations, field, Some(medication), number, limits, true);
    }

    if field == FieldName::Dosage
        && let Some(medication) = scope
        && let Some(violation) = total_dose_violation(medication, number, form)
    {
        violations.push(violation);
    }
    violations
}

fn range_violations(
    violations: &mut Vec<Violation>,
    field: FieldName,
    scope: Option<Medication>,
    number: f64,
    limits: RangeLimits,
    check_max: bool,
) {
    if number < limits.min_f64() {
        violations.push(Violation::RangeViolation {
            field,
            scope,
            bound: Bound::Min,
            limit: limits.min,
        });
    }
    if check_max && number > limits.max_f64() {
        violations.push(Violation::RangeViolation {
            field,
            scope,
            bound: Bound::Max,
            limit: limits.max,
        });
    }
}

/// The total daily dose must stay strictly below `weight × factor`.
fn total_dose_violation(medication: Medication, dosage: f64, form: &FormValues) -> Option<Violation> {
    let factor = total_dose_factor(medication)?;
    let frequency = parse_positive(&form.frequency)?;
    let weight = parse_positive(&form.weight)?;

    (dosage * frequency >= weight * f64::from(factor))
        .then_some(Violation::CrossFieldFormulaViolation { medication, factor })
}
