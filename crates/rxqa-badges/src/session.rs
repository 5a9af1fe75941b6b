//! Session state for one tester.
//!
//! A [`Session`] owns everything earned so far: per-field accomplishments,
//! the snapshot taken before the latest submission, and form-level
//! accomplishments. Integrity signals raised by the storage layer are
//! queued on the session and folded into the next submission.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rxqa_model::{DetectionTag, FieldName, FieldTags, FormValues, Pattern, TagSet};
use rxqa_rules::{FieldViolations, RuleEngine, SubmissionContext};

use crate::aggregate::{aggregate, newly_earned};
use crate::order::sort_for_display;

/// Integrity signals waiting for the next submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingFlags {
    pub storage_tampering: bool,
    pub concurrent_session: bool,
}

impl PendingFlags {
    pub fn is_empty(&self) -> bool {
        !self.storage_tampering && !self.concurrent_session
    }

    fn tags(self) -> TagSet {
        let mut tags = TagSet::new();
        if self.storage_tampering {
            tags.insert(DetectionTag::generic(Pattern::StorageTampering));
        }
        if self.concurrent_session {
            tags.insert(DetectionTag::generic(Pattern::ConcurrentSession));
        }
        tags
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    /// Detections of this submission alone.
    pub detections: FieldTags,
    pub violations: FieldViolations,
    /// Form-level tags of this submission, including consumed flags.
    pub form_tags: TagSet,
    /// Field tags earned for the first time by this submission.
    pub newly_earned: FieldTags,
    /// Form tags earned for the first time by this submission.
    pub newly_earned_form: TagSet,
}

impl SubmissionOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.values().all(Vec::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    accomplishments: FieldTags,
    previous_accomplishments: FieldTags,
    form_accomplishments: TagSet,
    pending: PendingFlags,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accomplishments(&self) -> &FieldTags {
        &self.accomplishments
    }

    pub fn previous_accomplishments(&self) -> &FieldTags {
        &self.previous_accomplishments
    }

    pub fn form_accomplishments(&self) -> &TagSet {
        &self.form_accomplishments
    }

    pub fn pending(&self) -> PendingFlags {
        self.pending
    }

    /// Queue a `storage_tampering` tag for the next submission.
    pub fn report_tampering(&mut self) {
        warn!("Session storage tampering reported");
        self.pending.storage_tampering = true;
    }

    /// Queue a `concurrent_session` tag for the next submission.
    pub fn report_concurrent_session(&mut self) {
        warn!("Concurrent session reported");
        self.pending.concurrent_session = true;
    }

    /// Evaluate `form` and fold the results into the session.
    ///
    /// Everything is computed first and assigned at the end, so a session
    /// never holds the accomplishments of half a submission.
    pub fn submit(
        &mut self,
        engine: &RuleEngine,
        form: &FormValues,
        submission: &SubmissionContext,
    ) -> SubmissionOutcome {
        let detections = engine.detect_all(form);
        let violations = engine.validate_all(form);

        let (accomplishments, previous) = aggregate(&self.accomplishments, &detections);

        let mut form_tags = engine.detect_form(submission, &detections, form);
        form_tags.extend(self.pending.tags());

        let newly_earned_form: TagSet = form_tags
            .difference(&self.form_accomplishments)
            .cloned()
            .collect();
        let mut form_accomplishments = self.form_accomplishments.clone();
        form_accomplishments.extend(form_tags.iter().cloned());

        let earned = FieldName::ALL
            .into_iter()
            .map(|field| (field, newly_earned(&accomplishments, &previous, field)))
            .filter(|(_, tags)| !tags.is_empty())
            .collect();

        self.accomplishments = accomplishments;
        self.previous_accomplishments = previous;
        self.form_accomplishments = form_accomplishments;
        self.pending = PendingFlags::default();

        let outcome = SubmissionOutcome {
            detections,
            violations,
            form_tags,
            newly_earned: earned,
            newly_earned_form,
        };
        info!(
            valid = outcome.is_valid(),
            new_field_tags = outcome.newly_earned.values().map(TagSet::len).sum::<usize>(),
            new_form_tags = outcome.newly_earned_form.len(),
            "Submission aggregated"
        );
        outcome
    }

    /// Tags of `field` earned by the latest submission.
    pub fn newly_earned(&self, field: FieldName) -> TagSet {
        newly_earned(&self.accomplishments, &self.previous_accomplishments, field)
    }

    /// Accomplishments of `field` in display order.
    pub fn sorted(&self, field: FieldName) -> Vec<DetectionTag> {
        self.accomplishments
            .get(&field)
            .map(sort_for_display)
            .unwrap_or_default()
    }

    /// Form accomplishments in display order.
    pub fn sorted_form(&self) -> Vec<DetectionTag> {
        sort_for_display(&self.form_accomplishments)
    }

    /// Number of distinct tags earned, field and form level together.
    pub fn total(&self) -> usize {
        self.accomplishments.values().map(TagSet::len).sum::<usize>()
            + self.form_accomplishments.len()
    }

    /// Forget everything, including pending flags.
    pub fn reset(&mut self) {
        info!(total = self.total(), "Session reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rxqa_rules::RuleContext;

    fn engine() -> RuleEngine {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        RuleEngine::with_context(RuleContext::new().with_today(today))
    }

    fn nominal_form() -> FormValues {
        FormValues::new()
            .with(FieldName::Medication, "paracetamol")
            .with(FieldName::DateOfBirth, "1990-05-15")
            .with(FieldName::Weight, "70")
            .with(FieldName::Dosage, "700")
            .with(FieldName::Frequency, "2")
    }

    #[test]
    fn second_identical_submission_earns_nothing_new() {
        let engine = engine();
        let mut session = Session::new();

        let first = session.submit(&engine, &nominal_form(), &SubmissionContext::default());
        assert!(first.is_valid());
        assert!(!first.newly_earned.is_empty());
        assert!(session.newly_earned(FieldName::Weight).contains("paracetamol_nominal"));

        let second = session.submit(&engine, &nominal_form(), &SubmissionContext::default());
        assert!(second.newly_earned.is_empty());
        assert!(second.newly_earned_form.is_empty());
        assert!(session.newly_earned(FieldName::Weight).is_empty());
        assert_eq!(session.previous_accomplishments(), session.accomplishments());
    }

    #[test]
    fn pending_flags_are_consumed_once() {
        let engine = engine();
        let mut session = Session::new();
        session.report_tampering();
        session.report_concurrent_session();

        let outcome = session.submit(&engine, &FormValues::new(), &SubmissionContext::default());
        assert!(outcome.form_tags.contains("storage_tampering"));
        assert!(outcome.form_tags.contains("concurrent_session"));
        assert!(session.pending().is_empty());

        let outcome = session.submit(&engine, &FormValues::new(), &SubmissionContext::default());
        assert!(outcome.form_tags.is_empty());
        assert_eq!(session.form_accomplishments().len(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let engine = engine();
        let mut session = Session::new();
        session.submit(&engine, &nominal_form(), &SubmissionContext::enter_key());
        session.report_tampering();

        session.reset();

        assert_eq!(session, Session::default());
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn session_round_trips_through_json() {
        let engine = engine();
        let mut session = Session::new();
        session.submit(&engine, &nominal_form(), &SubmissionContext::enter_key());

        let json = serde_json::to_string(&session).expect("serialize");
        assert!(json.contains("\"formAccomplishments\""));
        let restored: Session = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, session);
    }
}
