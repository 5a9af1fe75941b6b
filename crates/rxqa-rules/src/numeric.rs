//! Numeric input helpers shared by the weight, dosage and frequency rules.

use std::sync::LazyLock;

use regex::Regex;

/// Longest leading float literal, the way browsers read a number field.
static LEADING_FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("Invalid leading float regex")
});

/// Parse the longest numeric prefix of `value` after trimming.
///
/// `"12abc"` reads as 12 and `"2.5.5"` as 2.5; a value without a numeric
/// prefix yields `None`.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let literal = LEADING_FLOAT_REGEX.find(trimmed)?.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse().ok(),
    }
}

/// Parse a value that must be present, numeric and strictly positive.
pub fn parse_positive(value: &str) -> Option<f64> {
    parse_leading_float(value).filter(|number| *number > 0.0)
}

pub fn has_decimal_point(value: &str) -> bool {
    value.contains('.')
}

pub fn has_comma(value: &str) -> bool {
    value.contains(',')
}

pub fn has_multiple_decimal_points(value: &str) -> bool {
    value.matches('.').count() > 1
}

/// More than three digits between the first decimal point and the next one.
pub fn has_high_precision(value: &str) -> bool {
    value
        .split('.')
        .nth(1)
        .is_some_and(|fraction| fraction.encode_utf16().count() > 3)
}
