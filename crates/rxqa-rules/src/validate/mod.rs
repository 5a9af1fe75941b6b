//! Field validators.
//!
//! Validators return every failure for a field as [`Violation`] values. A
//! missing value, a wrong date shape or an unparsable number ends the
//! field's checks early; everything else accumulates.

pub mod date_of_birth;
pub mod medication;
pub mod numeric;

use rxqa_model::{FieldName, FormValues, Violation};

use crate::context::RuleContext;

pub fn validate_field(
    field_name: FieldName,
    value: &str,
    form: &FormValues,
    context: &RuleContext,
) -> Vec<Violation> {
    match field_name {
        FieldName::Medication => medication::validate(value),
        FieldName::DateOfBirth => date_of_birth::validate(value, form.medication(), context.today),
        FieldName::Weight | FieldName::Dosage | FieldName::Frequency => {
            numeric::validate(field_name, value, form)
        }
    }
}
