//! Rule engine for the prescription form.
//!
//! The engine runs detectors and validators independently for each field.
//! A field can be invalid and still be detected as exercising a boundary;
//! neither pass looks at the other's result.

use std::collections::BTreeMap;

use tracing::debug;

use rxqa_model::{FieldName, FieldTags, FormValues, TagSet, Violation};

use crate::context::RuleContext;
use crate::detect::{self, form::SubmissionContext};
use crate::validate;

/// Violations keyed by the field that produced them.
pub type FieldViolations = BTreeMap<FieldName, Vec<Violation>>;

/// Entry point for detection and validation.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    context: RuleContext,
}

impl RuleEngine {
    /// Create an engine evaluating against today's local date.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: RuleContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RuleContext {
        &self.context
    }

    /// Detection tags for one field: generic shape tags plus field tags.
    pub fn detect(&self, field: FieldName, value: &str, form: &FormValues) -> TagSet {
        let tags = detect::detect_field(field, value, form, &self.context);
        debug!(
            field = %field,
            value = self.context.loggable(value),
            tags = tags.len(),
            "Detected field patterns"
        );
        tags
    }

    /// Validation messages for one field, in check order.
    pub fn validate(&self, field: FieldName, value: &str, form: &FormValues) -> Vec<String> {
        self.violations(field, value, form)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Structured validation failures for one field.
    pub fn violations(&self, field: FieldName, value: &str, form: &FormValues) -> Vec<Violation> {
        let violations = validate::validate_field(field, value, form, &self.context);
        debug!(
            field = %field,
            value = self.context.loggable(value),
            violations = violations.len(),
            "Validated field"
        );
        violations
    }

    /// Form-level tags for one submission.
    pub fn detect_form(
        &self,
        submission: &SubmissionContext,
        detections: &FieldTags,
        form: &FormValues,
    ) -> TagSet {
        detect::form::detect(submission, detections, form.medication())
    }

    /// Detection tags for every field of `form`.
    pub fn detect_all(&self, form: &FormValues) -> FieldTags {
        form.iter()
            .map(|(field, value)| (field, self.detect(field, value, form)))
            .collect()
    }

    /// Violations for every field of `form`; fields without failures are
    /// present with an empty list.
    pub fn validate_all(&self, form: &FormValues) -> FieldViolations {
        form.iter()
            .map(|(field, value)| (field, self.violations(field, value, form)))
            .collect()
    }
}
