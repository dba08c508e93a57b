//! Firestation entity model

use crate::models::core::traits::EntityModel;
use serde::{Deserialize, Serialize};

/// A fire station, identified by its station number.
///
/// The set of addresses a station covers is derived from the
/// `firestation_id` foreign key on [`Address`](crate::models::Address);
/// an empty station (zero attached addresses) is a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firestation {
    /// Unique station number
    pub id: u32,
}

impl Firestation {
    /// Create a station record
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { id }
    }
}

impl EntityModel for Firestation {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}
