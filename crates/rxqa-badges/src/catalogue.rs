//! Badge descriptions and icons.
//!
//! Medication-scoped tags share the icon of their pattern and prefix the
//! medication label to the pattern's description. Tags outside the
//! vocabulary describe as themselves and use [`DEFAULT_ICON`].

use rxqa_model::{DetectionTag, Medication, Pattern};

/// Icon for tags without one of their own.
pub const DEFAULT_ICON: &str = "•";

const NOMINAL_FORM_PREFIX: &str = "nominal_form_";

pub fn pattern_description(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::EmptyValue => "Empty",
        Pattern::LeadingSpace => " Leading space",
        Pattern::TrailingSpace => "Trailing space ",
        Pattern::MiddleSpace => "Middle space",
        Pattern::NonAlphanumeric => "Non-alphanumeric",
        Pattern::NonAscii => "Non-ASCII",
        Pattern::NonPrintable => "Non-printable",
        Pattern::ContainsHtml => "HTML",
        Pattern::ContainsXss => "XSS",
        Pattern::ContainsSqlInjection => "SQL injection",
        Pattern::NonNumeric => "Non-numeric",
        Pattern::StartsWithPlus => "Plus Sign",
        Pattern::NegativeValue => "Minus Sign",
        Pattern::DecimalValue => "Decimal",
        Pattern::MultipleDecimals => "Decimals",
        Pattern::CommaDecimal => "Comma",
        Pattern::PrecisionHigh => "High Precision",
        Pattern::AbsoluteMinimum => "Absolute Min",
        Pattern::BelowMin => "Below Lower Boundary",
        Pattern::BoundaryLengthMin => "Min Boundary",
        Pattern::BoundaryMin => "Lower Boundary",
        Pattern::Nominal => "Nominal",
        Pattern::BoundaryMax => "Upper Boundary",
        Pattern::BoundaryLengthMax => "Length Max",
        Pattern::BoundaryLengthAboveMax => "Length Above Max",
        Pattern::BoundaryLengthTotalMax => "Length Total Max",
        Pattern::AboveMax => "Above Upper Boundary",
        Pattern::TotalBoundaryMax => "Total Upper Boundary",
        Pattern::TotalAboveMax => "Total Above Upper Boundary",
        Pattern::InvalidFormat => "Wrong format",
        Pattern::InvalidMonth => "Wrong month",
        Pattern::InvalidFebruaryDay => "Feb 30/31",
        Pattern::InvalidLeapYearFebruary => "Leap day",
        Pattern::InvalidDay => "Wrong day",
        Pattern::InvalidDayForThirtyDayMonth => "31 day",
        Pattern::FutureDate => "Future",
        Pattern::InvalidValue => "Invalid value",
        Pattern::NominalForm => "Nominal",
        Pattern::EnterSubmit => "Using Enter",
        Pattern::ConcurrentSession => "Concurrent session",
        Pattern::StorageTampering => "Storage tampering",
    }
}

pub fn pattern_icon(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::BelowMin => "⇊",
        Pattern::BoundaryLengthMin => "⇩",
        Pattern::BoundaryMin => "↓",
        Pattern::Nominal | Pattern::NominalForm => "✓",
        Pattern::InvalidValue => "✗",
        Pattern::BoundaryMax => "↑",
        Pattern::BoundaryLengthAboveMax => "⬆",
        Pattern::AboveMax => "⇈",
        Pattern::BoundaryLengthMax => "⇧",
        Pattern::TotalAboveMax => "∑⇈",
        Pattern::TotalBoundaryMax => "∑↑",
        Pattern::BoundaryLengthTotalMax => "∑⬆",
        Pattern::NonNumeric => "#",
        Pattern::NegativeValue => "−",
        Pattern::DecimalValue => ".",
        Pattern::CommaDecimal => ",",
        Pattern::MultipleDecimals => "..",
        Pattern::PrecisionHigh => "≈",
        Pattern::StartsWithPlus => "+",
        Pattern::InvalidFormat => "📅",
        Pattern::InvalidMonth => "13",
        Pattern::InvalidDay => "32",
        Pattern::InvalidDayForThirtyDayMonth => "31",
        Pattern::InvalidFebruaryDay => "30",
        Pattern::InvalidLeapYearFebruary => "29",
        Pattern::FutureDate => "⭐",
        Pattern::EmptyValue => "∅",
        Pattern::LeadingSpace => "←",
        Pattern::TrailingSpace => "→",
        Pattern::MiddleSpace => "↔",
        Pattern::NonAlphanumeric => "@",
        Pattern::NonAscii => "™",
        Pattern::NonPrintable => "¶",
        Pattern::ContainsHtml => "⟨⟩",
        Pattern::ContainsXss => "js",
        Pattern::ContainsSqlInjection => ";−",
        Pattern::EnterSubmit => "⏎",
        Pattern::StorageTampering => "🔒",
        Pattern::ConcurrentSession => "||",
        Pattern::AbsoluteMinimum => DEFAULT_ICON,
    }
}

/// Medication of a `nominal_form_<medication>` tag.
fn nominal_form_medication(tag: &DetectionTag) -> Option<Medication> {
    tag.as_str()
        .strip_prefix(NOMINAL_FORM_PREFIX)
        .and_then(Medication::recognize)
}

/// Human-readable tooltip text for a tag.
pub fn description(tag: &DetectionTag) -> String {
    if let Some(medication) = nominal_form_medication(tag) {
        return format!("Nominal ({})", medication.label());
    }
    match (tag.medication_scope(), tag.pattern()) {
        (Some((medication, _)), Some(pattern)) => {
            format!("{} {}", medication.label(), pattern_description(pattern))
        }
        (None, Some(pattern)) => pattern_description(pattern).to_string(),
        (_, None) => tag.as_str().to_string(),
    }
}

pub fn icon(tag: &DetectionTag) -> &'static str {
    if nominal_form_medication(tag).is_some() {
        return pattern_icon(Pattern::NominalForm);
    }
    tag.pattern().map_or(DEFAULT_ICON, pattern_icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_descriptions() {
        assert_eq!(description(&DetectionTag::new("empty_value")), "Empty");
        assert_eq!(description(&DetectionTag::new("starts_with_plus")), "Plus Sign");
        assert_eq!(
            description(&DetectionTag::new("invalid_day_for_30day_month")),
            "31 day"
        );
    }

    #[test]
    fn scoped_descriptions_prefix_label() {
        assert_eq!(
            description(&DetectionTag::new("aspirin_boundary_max")),
            "Aspirin Upper Boundary"
        );
        assert_eq!(
            description(&DetectionTag::new("paracetamol_nominal")),
            "Paracetamol Nominal"
        );
        assert_eq!(
            description(&DetectionTag::new("ibuprofen_total_above_max")),
            "Ibuprofen Total Above Upper Boundary"
        );
    }

    #[test]
    fn unknown_tags_describe_as_themselves() {
        let tag = DetectionTag::new("legacy_badge");
        assert_eq!(description(&tag), "legacy_badge");
        assert_eq!(icon(&tag), DEFAULT_ICON);
        assert_eq!(icon(&DetectionTag::new("naproxen_mystery")), DEFAULT_ICON);
    }

    #[test]
    fn icons_follow_the_pattern() {
        assert_eq!(icon(&DetectionTag::new("naproxen_nominal")), "✓");
        assert_eq!(icon(&DetectionTag::new("nominal_form_placebo")), "✓");
        assert_eq!(icon(&DetectionTag::new("ibuprofen_total_boundary_max")), "∑↑");
        assert_eq!(icon(&DetectionTag::new("contains_sql_injection")), ";−");
        assert_eq!(description(&DetectionTag::new("nominal_form_aspirin")), "Nominal (Aspirin)");
    }
}
