//! Property tests for detector and validator invariants.

use chrono::NaiveDate;
use proptest::prelude::*;
use rxqa_model::{FieldName, FormValues, Pattern};
use rxqa_rules::{RuleContext, RuleEngine};

fn engine() -> RuleEngine {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    RuleEngine::with_context(RuleContext::new().with_today(today))
}

fn medication() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "", "placebo", "aspirin", "ibuprofen", "paracetamol", "naproxen", "other",
    ])
    .prop_map(String::from)
}

fn numeric_field() -> impl Strategy<Value = FieldName> {
    prop::sample::select(vec![
        FieldName::Weight,
        FieldName::Dosage,
        FieldName::Frequency,
    ])
}

fn any_field() -> impl Strategy<Value = FieldName> {
    prop::sample::select(FieldName::ALL.to_vec())
}

fn number_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (-50i32..1200).prop_map(|n| n.to_string()),
        (-50.0f64..1200.0).prop_map(|n| format!("{n:.2}")),
        prop::sample::select(vec![
            "0", "1", "3", "4", "5", "40", "200", "220", "325", "500", "550", "800", "1000",
        ])
        .prop_map(String::from),
    ]
}

proptest! {
    #[test]
    fn detection_and_validation_are_repeatable(
        field in any_field(),
        value in ".{0,30}",
        medication in medication(),
        weight in number_text(),
        frequency in number_text(),
    ) {
        let engine = engine();
        let form = FormValues::new()
            .with(FieldName::Medication, medication)
            .with(FieldName::Weight, weight)
            .with(FieldName::Frequency, frequency);
        prop_assert_eq!(
            engine.detect(field, &value, &form),
            engine.detect(field, &value, &form)
        );
        prop_assert_eq!(
            engine.validate(field, &value, &form),
            engine.validate(field, &value, &form)
        );
    }

    #[test]
    fn range_tags_partition_the_number_line(
        field in numeric_field(),
        value in number_text(),
        medication in medication(),
        weight in number_text(),
        frequency in number_text(),
    ) {
        let form = FormValues::new()
            .with(FieldName::Medication, medication)
            .with(FieldName::Weight, weight)
            .with(FieldName::Frequency, frequency);
        let patterns: Vec<Pattern> = engine()
            .detect(field, &value, &form)
            .iter()
            .filter_map(|tag| tag.pattern())
            .collect();
        let count = |pattern: Pattern| patterns.iter().filter(|p| **p == pattern).count();

        let edges = [
            Pattern::BelowMin,
            Pattern::BoundaryMin,
            Pattern::BoundaryMax,
            Pattern::AboveMax,
        ];
        let edge_count: usize = edges.iter().map(|pattern| count(*pattern)).sum();
        prop_assert!(edge_count <= 1, "{value}: {patterns:?}");

        if count(Pattern::Nominal) > 0 {
            prop_assert_eq!(count(Pattern::BelowMin), 0);
            prop_assert_eq!(count(Pattern::AboveMax), 0);
        }
    }

    #[test]
    fn empty_values_are_only_required(field in any_field(), blanks in " {0,4}") {
        let engine = engine();
        let form = FormValues::new();
        let tags = engine.detect(field, &blanks, &form);
        prop_assert_eq!(tags.len(), 1);
        prop_assert!(tags.contains("empty_value"));
        prop_assert_eq!(engine.validate(field, &blanks, &form).len(), 1);
    }
}
