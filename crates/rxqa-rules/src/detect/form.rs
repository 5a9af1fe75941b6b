//! Form-level detection.

use rxqa_model::{DetectionTag, FieldName, FieldTags, Medication, Pattern, TagSet};
use serde::{Deserialize, Serialize};

/// Control that had focus when the form was submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveControl {
    TextInput,
    #[default]
    SubmitControl,
    Other,
}

/// How a submission was triggered, as reported by the UI layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionContext {
    pub active_control: ActiveControl,
    /// The UI reported an implicit (keyboard) submission.
    pub implicit_submission: bool,
}

impl SubmissionContext {
    /// Submission by pressing Enter inside a text input.
    pub fn enter_key() -> Self {
        Self {
            active_control: ActiveControl::TextInput,
            implicit_submission: true,
        }
    }

    /// Submission by activating the submit control.
    pub fn submit_control() -> Self {
        Self::default()
    }

    pub fn is_enter_submit(&self) -> bool {
        self.active_control == ActiveControl::TextInput && self.implicit_submission
    }
}

/// Combine one submission's per-field detections into form-level tags.
///
/// `nominal_form` needs every field to carry a nominal tag; other tags on
/// the same field do not matter.
pub fn detect(
    submission: &SubmissionContext,
    detections: &FieldTags,
    medication: Option<Medication>,
) -> TagSet {
    let mut tags = TagSet::new();

    if submission.is_enter_submit() {
        tags.insert(DetectionTag::generic(Pattern::EnterSubmit));
    }

    let all_nominal = FieldName::ALL.into_iter().all(|field| {
        detections
            .get(&field)
            .is_some_and(|field_tags| field_tags.iter().any(DetectionTag::is_nominal))
    });
    if all_nominal {
        tags.insert(DetectionTag::generic(Pattern::NominalForm));
        if let Some(medication) = medication {
            tags.insert(DetectionTag::nominal_form_for(medication));
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal_detections(scope: Option<Medication>) -> FieldTags {
        FieldName::ALL
            .into_iter()
            .map(|field| {
                let mut tags = TagSet::new();
                tags.insert(DetectionTag::for_scope(scope, Pattern::Nominal));
                tags.insert(DetectionTag::generic(Pattern::LeadingSpace));
                (field, tags)
            })
            .collect()
    }

    #[test]
    fn enter_submit_needs_text_input_and_implicit_flag() {
        let detections = FieldTags::new();
        assert!(
            detect(&SubmissionContext::enter_key(), &detections, None).contains("enter_submit")
        );
        let clicked = SubmissionContext {
            active_control: ActiveControl::SubmitControl,
            implicit_submission: true,
        };
        assert!(detect(&clicked, &detections, None).is_empty());
    }

    #[test]
    fn nominal_form_with_medication() {
        let tags = detect(
            &SubmissionContext::submit_control(),
            &nominal_detections(Some(Medication::Aspirin)),
            Some(Medication::Aspirin),
        );
        let keys: Vec<&str> = tags.iter().map(DetectionTag::as_str).collect();
        assert_eq!(keys, vec!["nominal_form", "nominal_form_aspirin"]);
    }

    #[test]
    fn missing_field_blocks_nominal_form() {
        let mut detections = nominal_detections(None);
        detections.remove(&FieldName::Frequency);
        assert!(detect(&SubmissionContext::submit_control(), &detections, None).is_empty());

        let mut detections = nominal_detections(None);
        detections.insert(FieldName::Weight, TagSet::new());
        assert!(detect(&SubmissionContext::submit_control(), &detections, None).is_empty());
    }
}
