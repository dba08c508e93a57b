//! Resident entity model
//!
//! A person is identified by the normalized (first, last) name pair and owned
//! by whichever address they currently live at. The medical profile lives in
//! a separate [`MedicalRecord`](crate::models::medical::MedicalRecord) keyed
//! by the same name identity.

use crate::models::core::traits::EntityModel;
use crate::models::core::types::{AddressKey, PersonName};
use serde::{Deserialize, Serialize};

/// A resident of the covered district
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// First name, as given (display form)
    pub first_name: String,
    /// Last name, as given (display form)
    pub last_name: String,
    /// Street text of the home address
    pub address: String,
    /// Phone number to auto-dial in an emergency
    pub phone: String,
    /// Contact email
    pub email: String,
}

impl Person {
    /// Create a new person record
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// The normalized name identity of this person
    #[must_use]
    pub fn name(&self) -> PersonName {
        PersonName::new(&self.first_name, &self.last_name)
    }

    /// The identity key of the address this person lives at
    #[must_use]
    pub fn address_key(&self) -> AddressKey {
        AddressKey::from_street(&self.address)
    }

    /// Display name, `"First Last"` as given
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this person lives at the address with the given key
    #[must_use]
    pub fn lives_at(&self, key: &AddressKey) -> bool {
        self.address_key() == *key
    }
}

impl EntityModel for Person {
    type Id = PersonName;

    fn id(&self) -> Self::Id {
        self.name()
    }

    fn key(&self) -> String {
        self.name().to_string()
    }
}
