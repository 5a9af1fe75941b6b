//! Validation failures.
//!
//! Validators never abort the caller: every failure is a value of
//! [`Violation`] and its `Display` output is the message shown next to the
//! field.

use serde::Serialize;
use thiserror::Error;

use crate::field::FieldName;
use crate::medication::Medication;

/// Which side of a numeric range was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("{} is required", .field.label())]
    RequiredFieldMissing { field: FieldName },

    #[error("{} must not exceed {max} characters", .field.label())]
    LengthExceeded { field: FieldName, max: usize },

    #[error("Date of Birth must be in YYYY-MM-DD format")]
    FormatInvalid,

    #[error("Month must be between 1 and 12")]
    MonthOutOfRange { month: u32 },

    #[error("Day must be between 1 and 31")]
    DayOutOfRange { day: u32 },

    #[error("{}", day_out_of_month_message(.month, .max_days, .leap_year))]
    DayOutOfMonth {
        month: u32,
        max_days: u32,
        leap_year: bool,
    },

    #[error("{} must be a valid number", .field.label())]
    NotANumber { field: FieldName },

    #[error("{} must be a whole number", .field.label())]
    NotAnInteger { field: FieldName },

    #[error("{}", range_message(.field, .scope, .bound, .limit))]
    RangeViolation {
        field: FieldName,
        scope: Option<Medication>,
        bound: Bound,
        limit: u32,
    },

    #[error("{} total dose must satisfy: dosage × frequency < weight × {factor}", .medication.label())]
    CrossFieldFormulaViolation { medication: Medication, factor: u32 },

    #[error("{}", age_restriction_message(.medication))]
    AgeRestrictionViolation { medication: Medication },

    #[error("Date of Birth must result in a realistic age between 0 and 150 years")]
    UnrealisticAge,

    #[error("Date of Birth cannot be in the future")]
    FutureDate,

    #[error("Medication must be one of: {}", Medication::accepted_list())]
    UnknownMedication,
}

impl Violation {
    /// The form field the message belongs to.
    pub fn field(&self) -> FieldName {
        match self {
            Violation::RequiredFieldMissing { field }
            | Violation::LengthExceeded { field, .. }
            | Violation::NotANumber { field }
            | Violation::NotAnInteger { field }
            | Violation::RangeViolation { field, .. } => *field,
            Violation::FormatInvalid
            | Violation::MonthOutOfRange { .. }
            | Violation::DayOutOfRange { .. }
            | Violation::DayOutOfMonth { .. }
            | Violation::AgeRestrictionViolation { .. }
            | Violation::UnrealisticAge
            | Violation::FutureDate => FieldName::DateOfBirth,
            Violation::CrossFieldFormulaViolation { .. } => FieldName::Dosage,
            Violation::UnknownMedication => FieldName::Medication,
        }
    }

    /// True for failures after which no further checks run on the field.
    pub fn is_short_circuit(&self) -> bool {
        matches!(
            self,
            Violation::RequiredFieldMissing { .. }
                | Violation::FormatInvalid
                | Violation::NotANumber { .. }
                | Violation::NotAnInteger { .. }
        )
    }
}

fn day_out_of_month_message(month: &u32, max_days: &u32, leap_year: &bool) -> String {
    match month {
        2 => format!(
            "February has a maximum of {max_days} days{}",
            if *leap_year { " in leap year" } else { "" }
        ),
        4 | 6 | 9 | 11 => format!("Month {month} has a maximum of 30 days"),
        _ => format!("Day is invalid for month {month}"),
    }
}

fn range_message(
    field: &FieldName,
    scope: &Option<Medication>,
    bound: &Bound,
    limit: &u32,
) -> String {
    let relation = match bound {
        Bound::Min => "must be at least",
        Bound::Max => "must not exceed",
    };
    match scope {
        None => format!("{} {relation} {limit}", field.label()),
        Some(medication) => {
            let unit = match field {
                FieldName::Weight => " kg",
                FieldName::Dosage => " mg",
                FieldName::Frequency => " times per day",
                _ => "",
            };
            format!(
                "{} {} {relation} {limit}{unit}",
                medication.label(),
                field.label().to_lowercase()
            )
        }
    }
}

fn age_restriction_message(medication: &Medication) -> String {
    match medication {
        Medication::Ibuprofen => "Infants (under 6 months old) cannot take ibuprofen".to_string(),
        Medication::Paracetamol => {
            "Infants (under 3 months old) cannot take paracetamol".to_string()
        }
        other => format!("Children (age 12 and under) cannot take {}", other.as_str()),
    }
}
