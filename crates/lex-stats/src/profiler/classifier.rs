//! Numeric-vs-text classification of raw field values.

use once_cell::sync::Lazy;
use regex::Regex;

// Optional sign, digits with optional fraction (or a bare fraction),
// optional exponent. Rejects words like "inf" and "NaN" that `f64::from_str`
// would otherwise accept.
static FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("Invalid regex: float literal")
});

/// Parse a field as a finite number.
///
/// Returns `None` for the empty string, non-literal text, and literals
/// that overflow to infinity (e.g. `1e400`).
pub fn parse_numeric(s: &str) -> Option<f64> {
    if !FLOAT_LITERAL.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check whether a field is a finite floating-point literal.
#[inline]
pub fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}

/// Convert the numeric entries of `values`, dropping everything else.
///
/// Order is preserved.
pub fn to_numeric<I, S>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|v| parse_numeric(v.as_ref()))
        .collect()
}
