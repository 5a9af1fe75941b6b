use std::path::PathBuf;

use rxqa_badges::Session;
use rxqa_model::{DetectionTag, FieldName, TagSet};
use serde::Serialize;

/// Detection and validation outcome of one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub field: FieldName,
    pub value: String,
    /// Tags in display order.
    pub tags: Vec<DetectionTag>,
    pub messages: Vec<String>,
    /// Tags earned for the first time, when evaluated against a session.
    pub new_tags: TagSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    pub fields: Vec<FieldReport>,
    pub form_tags: Vec<DetectionTag>,
}

impl FormReport {
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|field| !field.messages.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    pub form: FormReport,
    pub new_form_tags: TagSet,
    pub session_file: PathBuf,
    pub revision: u64,
    pub total_badges: usize,
    pub signals: IntegritySignals,
}

#[derive(Debug, Clone)]
pub struct BadgesReport {
    pub session: Session,
    pub session_file: PathBuf,
    pub signals: IntegritySignals,
}

/// Integrity problems found while loading the session file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntegritySignals {
    pub tampered: bool,
    pub concurrent_session: bool,
}

impl IntegritySignals {
    pub fn any(&self) -> bool {
        self.tampered || self.concurrent_session
    }
}
