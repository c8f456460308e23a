//! Required-field checks shared by the stores

/// Return the name of the first field whose value is empty
///
/// Fields are checked in the order given, so callers control which error wins.
/// Whitespace is a value: `"  "` is present.
pub fn first_missing(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
}

/// Weight in tons must be finite and non-negative (zero is allowed)
pub fn validate_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}
