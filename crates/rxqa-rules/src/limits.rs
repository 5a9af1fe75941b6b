//! Numeric limits per field and medication.
//!
//! Placebo and unrecognised medications use the generic limits and emit
//! generic (unprefixed) tags.

use rxqa_model::{FieldName, Medication};

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLimits {
    pub min: u32,
    pub max: u32,
}

impl RangeLimits {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn min_f64(&self) -> f64 {
        f64::from(self.min)
    }

    pub fn max_f64(&self) -> f64 {
        f64::from(self.max)
    }
}

/// Limits of the three numeric fields under one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub weight: RangeLimits,
    pub dosage: RangeLimits,
    pub frequency: RangeLimits,
}

impl FieldLimits {
    /// Limits for `field`, or `None` for the non-numeric fields.
    pub fn get(&self, field: FieldName) -> Option<RangeLimits> {
        match field {
            FieldName::Weight => Some(self.weight),
            FieldName::Dosage => Some(self.dosage),
            FieldName::Frequency => Some(self.frequency),
            FieldName::Medication | FieldName::DateOfBirth => None,
        }
    }
}

pub const GENERIC_LIMITS: FieldLimits = FieldLimits {
    weight: RangeLimits::new(5, 500),
    dosage: RangeLimits::new(200, 1000),
    frequency: RangeLimits::new(1, 5),
};

/// Medication-specific limits; `None` means the generic table applies.
pub const fn medication_limits(medication: Medication) -> Option<FieldLimits> {
    match medication {
        Medication::Placebo => None,
        Medication::Aspirin => Some(FieldLimits {
            weight: RangeLimits::new(40, 500),
            dosage: RangeLimits::new(325, 1000),
            frequency: RangeLimits::new(1, 4),
        }),
        Medication::Ibuprofen => Some(FieldLimits {
            weight: RangeLimits::new(5, 500),
            dosage: RangeLimits::new(200, 800),
            frequency: RangeLimits::new(1, 4),
        }),
        Medication::Paracetamol => Some(FieldLimits {
            weight: RangeLimits::new(5, 500),
            dosage: RangeLimits::new(500, 1000),
            frequency: RangeLimits::new(1, 4),
        }),
        Medication::Naproxen => Some(FieldLimits {
            weight: RangeLimits::new(40, 500),
            dosage: RangeLimits::new(220, 550),
            frequency: RangeLimits::new(1, 3),
        }),
    }
}

/// The medication whose limits and tag prefix apply, if any.
pub fn limit_scope(medication: Option<Medication>) -> Option<Medication> {
    medication.filter(|medication| medication_limits(*medication).is_some())
}

/// Limits for `field` under `scope` (generic when `scope` is `None`).
pub fn limits_for(field: FieldName, scope: Option<Medication>) -> Option<RangeLimits> {
    scope
        .and_then(medication_limits)
        .unwrap_or(GENERIC_LIMITS)
        .get(field)
}

/// Daily dose allowed per kilogram of body weight, for medications whose
/// total dose is bounded by weight.
pub const fn total_dose_factor(medication: Medication) -> Option<u32> {
    match medication {
        Medication::Ibuprofen => Some(40),
        Medication::Paracetamol => Some(75),
        Medication::Placebo | Medication::Aspirin | Medication::Naproxen => None,
    }
}

/// Minimum patient age for a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimumAge {
    Years(i32),
    Months(i32),
}

pub const fn minimum_age(medication: Medication) -> Option<MinimumAge> {
    match medication {
        Medication::Aspirin | Medication::Naproxen => Some(MinimumAge::Years(12)),
        Medication::Ibuprofen => Some(MinimumAge::Months(6)),
        Medication::Paracetamol => Some(MinimumAge::Months(3)),
        Medication::Placebo => None,
    }
}

/// Oldest realistic age in whole years.
pub const MAX_AGE_YEARS: i32 = 150;

/// Longest accepted medication name, in characters as typed.
pub const MEDICATION_MAX_LENGTH: usize = 20;
/// Length at which the date-of-birth value reaches its length boundary.
pub const DATE_OF_BIRTH_MAX_LENGTH: usize = 20;
/// Longest accepted numeric value, in trimmed characters.
pub const NUMERIC_MAX_LENGTH: usize = 10;
/// Length of the "total max" length boundary for every field.
pub const TOTAL_MAX_LENGTH: usize = 100;

/// Length of a form value in UTF-16 code units, the unit the form's
/// length limits are expressed in. A character outside the Basic
/// Multilingual Plane counts as two.
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_length_counts_utf16_units() {
        assert_eq!(text_length("aspirin"), 7);
        assert_eq!(text_length("é"), 1);
        assert_eq!(text_length("💊"), 2);
    }

    #[test]
    fn placebo_uses_generic_limits() {
        assert_eq!(limit_scope(Some(Medication::Placebo)), None);
        assert_eq!(
            limits_for(FieldName::Dosage, Some(Medication::Placebo)),
            Some(RangeLimits::new(200, 1000))
        );
    }

    #[test]
    fn medication_limits_table() {
        assert_eq!(
            limits_for(FieldName::Dosage, Some(Medication::Naproxen)),
            Some(RangeLimits::new(220, 550))
        );
        assert_eq!(
            limits_for(FieldName::Weight, Some(Medication::Aspirin)),
            Some(RangeLimits::new(40, 500))
        );
        assert_eq!(
            limits_for(FieldName::Frequency, None),
            Some(RangeLimits::new(1, 5))
        );
        assert_eq!(limits_for(FieldName::DateOfBirth, None), None);
    }
}
