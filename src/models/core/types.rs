//! Identifier types shared across the domain models.

use crate::identity::{normalize_name, normalize_street};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Natural identity of a person: first and last name, upper-cased.
///
/// Two persons are the same person iff their normalized names are equal;
/// the normalized form is an identity key, never a display string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    /// Build the normalized identity from free-text name halves
    #[must_use]
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: normalize_name(first),
            last: normalize_name(last),
        }
    }

    /// Normalized first name
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Normalized last name
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Identity key of an address: the normalized street text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressKey(String);

impl AddressKey {
    /// Derive the key from a free-text street string
    #[must_use]
    pub fn from_street(street: &str) -> Self {
        Self(normalize_street(street))
    }

    /// The normalized street text backing this key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caller-supplied "station id or address" parameter, decided once at the
/// boundary and pattern-matched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// The input parses as a station number
    StationId(u32),
    /// Anything else is treated as address text
    AddressText(String),
}

impl Identifier {
    /// Classify a raw input string.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => Self::StationId(id),
            Err(_) => Self::AddressText(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StationId(id) => write!(f, "firestation {id}"),
            Self::AddressText(street) => write!(f, "address '{street}'"),
        }
    }
}
