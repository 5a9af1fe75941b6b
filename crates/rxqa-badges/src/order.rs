//! Badge display order.
//!
//! Generic tags come first, then medication-scoped tags grouped by
//! medication (placebo, aspirin, ibuprofen, paracetamol, naproxen). Within a
//! group tags follow [`DISPLAY_ORDER`]; patterns missing from it go last in
//! lexicographic order, which keeps the ordering total.

use std::cmp::Ordering;

use rxqa_model::{DetectionTag, Pattern};

/// Pattern precedence for display.
pub const DISPLAY_ORDER: [Pattern; 35] = [
    // Shape
    Pattern::EmptyValue,
    Pattern::LeadingSpace,
    Pattern::MiddleSpace,
    Pattern::TrailingSpace,
    Pattern::ContainsHtml,
    Pattern::ContainsSqlInjection,
    Pattern::ContainsXss,
    Pattern::NonAlphanumeric,
    Pattern::NonAscii,
    Pattern::NonPrintable,
    // Numbers
    Pattern::NonNumeric,
    Pattern::StartsWithPlus,
    Pattern::NegativeValue,
    Pattern::DecimalValue,
    Pattern::MultipleDecimals,
    Pattern::CommaDecimal,
    Pattern::PrecisionHigh,
    // Ranges
    Pattern::BelowMin,
    Pattern::BoundaryLengthMin,
    Pattern::BoundaryMin,
    Pattern::Nominal,
    Pattern::BoundaryMax,
    Pattern::BoundaryLengthMax,
    Pattern::AboveMax,
    // Dates
    Pattern::InvalidFormat,
    Pattern::InvalidMonth,
    Pattern::InvalidFebruaryDay,
    Pattern::InvalidLeapYearFebruary,
    Pattern::InvalidDay,
    Pattern::InvalidDayForThirtyDayMonth,
    // Values
    Pattern::InvalidValue,
    // Form
    Pattern::NominalForm,
    Pattern::EnterSubmit,
    Pattern::ConcurrentSession,
    Pattern::StorageTampering,
];

/// Sort key of a tag: group, pattern rank, then the tag text.
fn sort_key(tag: &DetectionTag) -> (usize, usize, &str) {
    let group = tag
        .medication_scope()
        .map_or(0, |(medication, _)| usize::from(medication.sort_order()) + 1);
    let rank = tag
        .pattern()
        .and_then(|pattern| DISPLAY_ORDER.iter().position(|ranked| *ranked == pattern))
        .unwrap_or(DISPLAY_ORDER.len());
    (group, rank, tag.as_str())
}

/// Compare two tags in display order.
pub fn compare(a: &DetectionTag, b: &DetectionTag) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Tags in display order.
pub fn sort_for_display<'a, I>(tags: I) -> Vec<DetectionTag>
where
    I: IntoIterator<Item = &'a DetectionTag>,
{
    let mut sorted: Vec<DetectionTag> = tags.into_iter().cloned().collect();
    sorted.sort_by(compare);
    sorted.dedup();
    sorted
}
