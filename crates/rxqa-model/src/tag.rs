//! Detection tag vocabulary.
//!
//! A detection tag names a testing pattern that an input exercised. Generic
//! tags are the bare pattern key (`boundary_min`, `nominal_value`); tags that
//! only make sense for one medication carry its name as a prefix
//! (`aspirin_boundary_min`, `ibuprofen_nominal`).
//!
//! Tags are kept as strings so that persisted sessions survive vocabulary
//! changes: an unknown tag still loads, describes itself, and sorts last.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::field::FieldName;
use crate::medication::Medication;

/// Deduplicated, deterministic set of tags.
pub type TagSet = BTreeSet<DetectionTag>;

/// Tag sets keyed by the field that produced them.
pub type FieldTags = BTreeMap<FieldName, TagSet>;

/// Every testing pattern the detectors know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pattern {
    // String shape
    EmptyValue,
    LeadingSpace,
    TrailingSpace,
    MiddleSpace,
    NonAlphanumeric,
    NonAscii,
    NonPrintable,
    ContainsHtml,
    ContainsXss,
    ContainsSqlInjection,

    // Numeric shape
    NonNumeric,
    StartsWithPlus,
    NegativeValue,
    DecimalValue,
    MultipleDecimals,
    CommaDecimal,
    PrecisionHigh,
    AbsoluteMinimum,

    // Ranges and lengths
    BelowMin,
    BoundaryLengthMin,
    BoundaryMin,
    Nominal,
    BoundaryMax,
    BoundaryLengthMax,
    BoundaryLengthAboveMax,
    BoundaryLengthTotalMax,
    AboveMax,
    TotalBoundaryMax,
    TotalAboveMax,

    // Dates
    InvalidFormat,
    InvalidMonth,
    InvalidFebruaryDay,
    InvalidLeapYearFebruary,
    InvalidDay,
    InvalidDayForThirtyDayMonth,
    FutureDate,

    // Values
    InvalidValue,

    // Form level
    NominalForm,
    EnterSubmit,
    ConcurrentSession,
    StorageTampering,
}

impl Pattern {
    pub const ALL: [Pattern; 41] = [
        Pattern::EmptyValue,
        Pattern::LeadingSpace,
        Pattern::TrailingSpace,
        Pattern::MiddleSpace,
        Pattern::NonAlphanumeric,
        Pattern::NonAscii,
        Pattern::NonPrintable,
        Pattern::ContainsHtml,
        Pattern::ContainsXss,
        Pattern::ContainsSqlInjection,
        Pattern::NonNumeric,
        Pattern::StartsWithPlus,
        Pattern::NegativeValue,
        Pattern::DecimalValue,
        Pattern::MultipleDecimals,
        Pattern::CommaDecimal,
        Pattern::PrecisionHigh,
        Pattern::AbsoluteMinimum,
        Pattern::BelowMin,
        Pattern::BoundaryLengthMin,
        Pattern::BoundaryMin,
        Pattern::Nominal,
        Pattern::BoundaryMax,
        Pattern::BoundaryLengthMax,
        Pattern::BoundaryLengthAboveMax,
        Pattern::BoundaryLengthTotalMax,
        Pattern::AboveMax,
        Pattern::TotalBoundaryMax,
        Pattern::TotalAboveMax,
        Pattern::InvalidFormat,
        Pattern::InvalidMonth,
        Pattern::InvalidFebruaryDay,
        Pattern::InvalidLeapYearFebruary,
        Pattern::InvalidDay,
        Pattern::InvalidDayForThirtyDayMonth,
        Pattern::FutureDate,
        Pattern::InvalidValue,
        Pattern::NominalForm,
        Pattern::EnterSubmit,
        Pattern::ConcurrentSession,
        Pattern::StorageTampering,
    ];

    /// Key of the generic tag for this pattern.
    pub fn key(&self) -> &'static str {
        match self {
            Pattern::EmptyValue => "empty_value",
            Pattern::LeadingSpace => "leading_space",
            Pattern::TrailingSpace => "trailing_space",
            Pattern::MiddleSpace => "middle_space",
            Pattern::NonAlphanumeric => "non_alphanumeric",
            Pattern::NonAscii => "non_ascii",
            Pattern::NonPrintable => "non_printable",
            Pattern::ContainsHtml => "contains_html",
            Pattern::ContainsXss => "contains_xss",
            Pattern::ContainsSqlInjection => "contains_sql_injection",
            Pattern::NonNumeric => "non_numeric",
            Pattern::StartsWithPlus => "starts_with_plus",
            Pattern::NegativeValue => "negative_value",
            Pattern::DecimalValue => "decimal_value",
            Pattern::MultipleDecimals => "multiple_decimals",
            Pattern::CommaDecimal => "comma_decimal",
            Pattern::PrecisionHigh => "precision_high",
            Pattern::AbsoluteMinimum => "absolute_minimum",
            Pattern::BelowMin => "below_min",
            Pattern::BoundaryLengthMin => "boundary_length_min",
            Pattern::BoundaryMin => "boundary_min",
            Pattern::Nominal => "nominal_value",
            Pattern::BoundaryMax => "boundary_max",
            Pattern::BoundaryLengthMax => "boundary_length_max",
            Pattern::BoundaryLengthAboveMax => "boundary_length_above_max",
            Pattern::BoundaryLengthTotalMax => "boundary_length_total_max",
            Pattern::AboveMax => "above_max",
            Pattern::TotalBoundaryMax => "total_boundary_max",
            Pattern::TotalAboveMax => "total_above_max",
            Pattern::InvalidFormat => "invalid_format",
            Pattern::InvalidMonth => "invalid_month",
            Pattern::InvalidFebruaryDay => "invalid_february_day",
            Pattern::InvalidLeapYearFebruary => "invalid_leap_year_february",
            Pattern::InvalidDay => "invalid_day",
            Pattern::InvalidDayForThirtyDayMonth => "invalid_day_for_30day_month",
            Pattern::FutureDate => "future_date",
            Pattern::InvalidValue => "invalid_value",
            Pattern::NominalForm => "nominal_form",
            Pattern::EnterSubmit => "enter_submit",
            Pattern::ConcurrentSession => "concurrent_session",
            Pattern::StorageTampering => "storage_tampering",
        }
    }

    /// Suffix used after the `<medication>_` prefix.
    ///
    /// Nominal and invalid patterns drop their `_value` suffix when scoped
    /// (`aspirin_nominal`, not `aspirin_nominal_value`).
    pub fn scoped_key(&self) -> &'static str {
        match self {
            Pattern::Nominal => "nominal",
            Pattern::InvalidValue => "invalid",
            other => other.key(),
        }
    }

    /// Look up a pattern by its generic or scoped key.
    pub fn from_key(key: &str) -> Option<Pattern> {
        match key {
            "nominal" => Some(Pattern::Nominal),
            "invalid" => Some(Pattern::InvalidValue),
            _ => Pattern::ALL.into_iter().find(|pattern| pattern.key() == key),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single detection tag such as `leading_space` or `naproxen_above_max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionTag(String);

impl DetectionTag {
    /// Tag from an arbitrary key; used when reading persisted sessions.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn generic(pattern: Pattern) -> Self {
        Self(pattern.key().to_string())
    }

    pub fn scoped(medication: Medication, pattern: Pattern) -> Self {
        Self(format!("{}_{}", medication.as_str(), pattern.scoped_key()))
    }

    /// Generic tag when `scope` is `None`, medication-scoped otherwise.
    pub fn for_scope(scope: Option<Medication>, pattern: Pattern) -> Self {
        match scope {
            Some(medication) => Self::scoped(medication, pattern),
            None => Self::generic(pattern),
        }
    }

    /// Form-level "all nominal" tag for one medication (`nominal_form_aspirin`).
    pub fn nominal_form_for(medication: Medication) -> Self {
        Self(format!("{}_{}", Pattern::NominalForm.key(), medication.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a medication-scoped tag into its medication and pattern suffix.
    ///
    /// Returns `None` for generic tags.
    pub fn medication_scope(&self) -> Option<(Medication, &str)> {
        Medication::ALL.into_iter().find_map(|medication| {
            self.0
                .strip_prefix(medication.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|pattern| (medication, pattern))
        })
    }

    /// The known pattern behind this tag, generic or scoped.
    pub fn pattern(&self) -> Option<Pattern> {
        match self.medication_scope() {
            Some((_, suffix)) => Pattern::from_key(suffix),
            None => Pattern::from_key(&self.0),
        }
    }

    /// True for `nominal_value` and any `<medication>_nominal`.
    pub fn is_nominal(&self) -> bool {
        self.pattern() == Some(Pattern::Nominal)
    }
}

impl fmt::Display for DetectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DetectionTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyTag);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<Pattern> for DetectionTag {
    fn from(pattern: Pattern) -> Self {
        Self::generic(pattern)
    }
}

impl Borrow<str> for DetectionTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DetectionTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DetectionTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_tags_drop_value_suffix() {
        assert_eq!(
            DetectionTag::scoped(Medication::Aspirin, Pattern::Nominal).as_str(),
            "aspirin_nominal"
        );
        assert_eq!(
            DetectionTag::scoped(Medication::Ibuprofen, Pattern::TotalAboveMax).as_str(),
            "ibuprofen_total_above_max"
        );
        assert_eq!(DetectionTag::generic(Pattern::Nominal).as_str(), "nominal_value");
    }

    #[test]
    fn medication_scope_requires_underscore_separator() {
        let tag = DetectionTag::new("naproxen_boundary_max");
        assert_eq!(
            tag.medication_scope(),
            Some((Medication::Naproxen, "boundary_max"))
        );
        assert_eq!(tag.pattern(), Some(Pattern::BoundaryMax));

        assert_eq!(DetectionTag::new("aspirinx_nominal").medication_scope(), None);
        assert_eq!(DetectionTag::nominal_form_for(Medication::Aspirin).medication_scope(), None);
    }

    #[test]
    fn nominal_is_recognized_generic_and_scoped() {
        assert!(DetectionTag::new("nominal_value").is_nominal());
        assert!(DetectionTag::new("paracetamol_nominal").is_nominal());
        assert!(!DetectionTag::new("nominal_form").is_nominal());
    }

    #[test]
    fn every_pattern_round_trips_through_its_keys() {
        for pattern in Pattern::ALL {
            assert_eq!(Pattern::from_key(pattern.key()), Some(pattern));
            assert_eq!(Pattern::from_key(pattern.scoped_key()), Some(pattern));
        }
    }

    #[test]
    fn tag_sets_are_queryable_by_str() {
        let mut set = TagSet::new();
        set.insert(DetectionTag::generic(Pattern::EmptyValue));
        assert!(set.contains("empty_value"));
    }
}
