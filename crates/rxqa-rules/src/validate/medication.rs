use rxqa_model::{FieldName, Medication, Violation};

use crate::limits::{MEDICATION_MAX_LENGTH, text_length};

pub fn validate(value: &str) -> Vec<Violation> {
    if value.trim().is_empty() {
        return vec![Violation::RequiredFieldMissing {
            field: FieldName::Medication,
        }];
    }

    let mut violations = Vec::new();
    if text_length(value) > MEDICATION_MAX_LENGTH {
        violations.push(Violation::LengthExceeded {
            field: FieldName::Medication,
            max: MEDICATION_MAX_LENGTH,
        });
    }
    if Medication::recognize(value).is_none() {
        violations.push(Violation::UnknownMedication);
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(value: &str) -> Vec<String> {
        validate(value).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn required() {
        assert_eq!(messages("  "), vec!["Medication is required"]);
    }

    #[test]
    fn accepted_names_pass() {
        assert!(validate(" Ibuprofen ").is_empty());
    }

    #[test]
    fn long_unknown_value_reports_both() {
        assert_eq!(
            messages("aspirin-extra-strength"),
            vec![
                "Medication must not exceed 20 characters",
                "Medication must be one of: placebo, aspirin, ibuprofen, paracetamol, naproxen"
            ]
        );
    }

    #[test]
    fn raw_length_counts_padding() {
        let padded = format!("{:<21}", "aspirin");
        assert_eq!(
            messages(&padded),
            vec!["Medication must not exceed 20 characters"]
        );
    }
}
