//! Testing-pattern detectors.
//!
//! Detectors never fail: malformed input simply produces fewer tags.

pub mod date_of_birth;
pub mod field;
pub mod form;
pub mod medication;
pub mod numeric;

use rxqa_model::{DetectionTag, FieldName, FormValues, Pattern, TagSet};

use crate::context::RuleContext;

/// Generic shape tags plus the field's own tags for `value`.
pub fn detect_field(
    field_name: FieldName,
    value: &str,
    form: &FormValues,
    context: &RuleContext,
) -> TagSet {
    let mut tags = field::detect(value);
    let specific = match field_name {
        FieldName::Medication => medication::detect(value),
        FieldName::DateOfBirth => date_of_birth::detect(value, form.medication(), context.today),
        FieldName::Weight | FieldName::Dosage | FieldName::Frequency => {
            numeric::detect(field_name, value, form)
        }
    };
    tags.extend(specific);
    tags
}

/// Length boundary tags shared by every field.
pub(crate) fn length_tags(tags: &mut TagSet, length: usize, max: usize, total_max: usize) {
    if length == max {
        tags.insert(DetectionTag::generic(Pattern::BoundaryLengthMax));
    }
    if length > max && length < total_max {
        tags.insert(DetectionTag::generic(Pattern::BoundaryLengthAboveMax));
    }
    if length == total_max {
        tags.insert(DetectionTag::generic(Pattern::BoundaryLengthTotalMax));
    }
}
