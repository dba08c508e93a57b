//! Medical record entity model
//!
//! Exactly one record per person, keyed by the person's name identity. The
//! record owns the birthdate, so every age computation in the crate goes
//! through [`AgeProfile`].

use crate::error::{DispatchError, Result};
use crate::models::core::traits::{AgeProfile, EntityModel};
use crate::models::core::types::PersonName;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by upstream bulk data for birthdates
pub const BIRTH_DATE_FORMAT: &str = "%m/%d/%Y";

/// Medical profile of one resident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    /// First name of the owning person, as given
    pub first_name: String,
    /// Last name of the owning person, as given
    pub last_name: String,
    /// Birthdate; absent means age-dependent computations are undefined
    pub birth_date: Option<NaiveDate>,
    /// Medication names, dosage included in the name text
    pub medications: Vec<String>,
    /// Allergy names
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    /// Create an empty record for a person
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Set the birthdate
    #[must_use]
    pub const fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Set the medication list
    #[must_use]
    pub fn with_medications(mut self, medications: Vec<String>) -> Self {
        self.medications = medications;
        self
    }

    /// Set the allergy list
    #[must_use]
    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }

    /// The name identity of the owning person
    #[must_use]
    pub fn name(&self) -> PersonName {
        PersonName::new(&self.first_name, &self.last_name)
    }

    /// Parse a `MM/dd/yyyy` birthdate as used by upstream bulk data.
    pub fn parse_birth_date(text: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), BIRTH_DATE_FORMAT)
            .map_err(|e| DispatchError::invalid_input(format!("unparsable date '{text}': {e}")))
    }
}

impl EntityModel for MedicalRecord {
    type Id = PersonName;

    fn id(&self) -> Self::Id {
        self.name()
    }

    fn key(&self) -> String {
        self.name().to_string()
    }
}

impl AgeProfile for MedicalRecord {
    fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }
}
