//! Medication field detection.

use rxqa_model::{DetectionTag, Medication, Pattern, TagSet};

use super::length_tags;
use crate::limits::{MEDICATION_MAX_LENGTH, TOTAL_MAX_LENGTH, text_length};

/// Length boundaries are measured on the raw value; the accepted-name
/// check on the trimmed, lower-cased value.
pub fn detect(value: &str) -> TagSet {
    let mut tags = TagSet::new();
    if value.trim().is_empty() {
        return tags;
    }

    let length = text_length(value);
    if length == 1 {
        tags.insert(DetectionTag::generic(Pattern::BoundaryLengthMin));
    }
    length_tags(&mut tags, length, MEDICATION_MAX_LENGTH, TOTAL_MAX_LENGTH);

    let pattern = match Medication::recognize(value) {
        Some(_) => Pattern::Nominal,
        None => Pattern::InvalidValue,
    };
    tags.insert(DetectionTag::generic(pattern));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_names_are_nominal() {
        assert!(detect(" Placebo ").contains("nominal_value"));
        assert!(detect("NAPROXEN").contains("nominal_value"));
    }

    #[test]
    fn unknown_names_are_invalid() {
        let tags = detect("x");
        assert!(tags.contains("invalid_value"));
        assert!(tags.contains("boundary_length_min"));
    }

    #[test]
    fn length_boundaries_use_raw_length() {
        assert!(detect(&"a".repeat(20)).contains("boundary_length_max"));
        assert!(detect(&"a".repeat(21)).contains("boundary_length_above_max"));
        assert!(detect(&"a".repeat(100)).contains("boundary_length_total_max"));
        assert!(!detect(&"a".repeat(101)).contains("boundary_length_above_max"));
        assert!(detect(&format!("{:<20}", "aspirin")).contains("boundary_length_max"));
    }

    #[test]
    fn astral_characters_count_twice() {
        assert!(detect(&"💊".repeat(10)).contains("boundary_length_max"));
        assert!(detect(&"💊".repeat(11)).contains("boundary_length_above_max"));
    }

    #[test]
    fn empty_value_yields_nothing() {
        assert!(detect("").is_empty());
        assert!(detect("  ").is_empty());
    }
}
