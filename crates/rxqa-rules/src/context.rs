//! Evaluation context shared by every rule.
//!
//! Rules are pure functions of the form snapshot and this context. The only
//! ambient input is the evaluation date, which is pinned here so that age
//! and future-date checks are reproducible.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Engine behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Include raw field values in debug events.
    pub log_values: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// Date that counts as "today" for age and future-date rules.
    pub today: NaiveDate,
    pub options: EngineOptions,
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleContext {
    /// Context evaluated against the local calendar date.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Value as it may appear in log events.
    pub(crate) fn loggable<'a>(&self, value: &'a str) -> &'a str {
        if self.options.log_values {
            value
        } else {
            "[REDACTED]"
        }
    }
}
