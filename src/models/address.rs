//! Address entity model
//!
//! An address owns the mapping edge to its firestation: `firestation_id` is a
//! nullable foreign key, so an address is structurally attached to at most
//! one station at any time. The reverse direction (a station's attached
//! addresses) is resolved by scanning, not by a back-pointer collection.

use crate::models::core::traits::EntityModel;
use crate::models::core::types::AddressKey;
use serde::{Deserialize, Serialize};

/// A street address inside the covered district
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street text, as given (display form)
    pub street: String,
    /// Zip code
    pub zip: String,
    /// City name
    pub city: String,
    /// Station this address is attached to, if any
    pub firestation_id: Option<u32>,
}

impl Address {
    /// Create a new, unattached address
    pub fn new(street: impl Into<String>, zip: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            zip: zip.into(),
            city: city.into(),
            firestation_id: None,
        }
    }

    /// Attach this address to a station, replacing any previous attachment
    pub fn attach(&mut self, station_id: u32) {
        self.firestation_id = Some(station_id);
    }

    /// Detach this address from its station, returning the previous station id
    pub fn detach(&mut self) -> Option<u32> {
        self.firestation_id.take()
    }

    /// Whether this address is attached to any station
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.firestation_id.is_some()
    }

    /// Whether the given free-text street denotes this address
    #[must_use]
    pub fn matches_street(&self, street: &str) -> bool {
        self.id() == AddressKey::from_street(street)
    }
}

impl EntityModel for Address {
    type Id = AddressKey;

    fn id(&self) -> Self::Id {
        AddressKey::from_street(&self.street)
    }

    fn key(&self) -> String {
        self.id().as_str().to_string()
    }
}
