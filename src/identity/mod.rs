//! Canonicalization of free-text identity strings
//!
//! Addresses and person names arrive with inconsistent casing and spacing.
//! The functions here produce the canonical forms used for equality testing
//! throughout the crate. Normalized forms are never used for display.

/// Canonicalize a street string for equality comparison.
///
/// Removes every whitespace character and case-folds, so
/// `"29 rue de Paris"` and `" 29 RUE de paris "` denote the same address.
#[must_use]
pub fn normalize_street(street: &str) -> String {
    street
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonicalize one half of a person name (trim + upper-case).
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Case-insensitive equality on trimmed city names.
#[must_use]
pub fn same_city(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
