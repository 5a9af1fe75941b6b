//! Field-agnostic shape detection.
//!
//! Classifies the raw string itself: emptiness, where spaces sit, unusual
//! character classes and text that looks like markup or SQL. Runs on every
//! field, regardless of medication.

use std::sync::LazyLock;

use regex::Regex;
use rxqa_model::{DetectionTag, Pattern, TagSet};

/// Opening-tag shape such as `<b>` or `<img src=x>`.
static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^\s<>][^<>]*>").expect("Invalid HTML tag regex"));

static SCRIPT_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*script\b").expect("Invalid script tag regex"));

/// Statement separator followed by a SQL keyword, or a value starting with `;`.
static SQL_INJECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i);\s*(DROP|DELETE|INSERT|UPDATE|SELECT|UNION|ALTER|CREATE|EXEC|EXECUTE)\b|^\s*;",
    )
    .expect("Invalid SQL injection regex")
});

static NON_ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z -]").expect("Invalid character class regex"));

/// Detect shape patterns in a raw, untrimmed value.
pub fn detect(value: &str) -> TagSet {
    let mut tags = TagSet::new();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        tags.insert(DetectionTag::generic(Pattern::EmptyValue));
        return tags;
    }

    let checks = [
        (value.starts_with(' '), Pattern::LeadingSpace),
        (value.ends_with(' '), Pattern::TrailingSpace),
        (trimmed.contains(' '), Pattern::MiddleSpace),
        (NON_ALPHANUMERIC_REGEX.is_match(value), Pattern::NonAlphanumeric),
        (value.chars().any(|c| u32::from(c) > 127), Pattern::NonAscii),
        (
            value.chars().any(|c| u32::from(c) < 32 || u32::from(c) == 127),
            Pattern::NonPrintable,
        ),
        (HTML_TAG_REGEX.is_match(value), Pattern::ContainsHtml),
        (SCRIPT_TAG_REGEX.is_match(value), Pattern::ContainsXss),
        (SQL_INJECTION_REGEX.is_match(value), Pattern::ContainsSqlInjection),
    ];

    tags.extend(
        checks
            .into_iter()
            .filter(|(matched, _)| *matched)
            .map(|(_, pattern)| DetectionTag::generic(pattern)),
    );
    tags
}
