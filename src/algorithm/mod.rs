//! Derived emergency reports over the registry
//!
//! The aggregation engine joins persons, addresses, stations and medical
//! records into the report shapes dispatchers consume. Every operation is a
//! pure read: it takes one consistent snapshot of the store at entry and
//! computes from that snapshot only, so a mapping mutation running
//! concurrently can never produce a partial join.
//!
//! Ages are evaluated at request time and never cached. Each operation has
//! an `_at` variant taking an explicit evaluation date; the undated entry
//! points use today's date.

pub mod reports;

mod coverage;
mod household;
mod person_info;

pub use reports::{
    ChildResident, CoveredPerson, HouseholdReport, PersonInfo, ResidentProfile, StationCoverage,
};

use crate::error::{DispatchError, Result};
use crate::models::Person;
use crate::models::core::traits::AgeProfile;
use crate::store::{Store, StoreSnapshot};
use chrono::NaiveDate;
use std::sync::Arc;

/// Read-only report engine over a store handle
#[derive(Debug)]
pub struct AggregationEngine<S> {
    store: Arc<S>,
}

impl<S: Store> AggregationEngine<S> {
    /// Create an engine over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }
}

/// Evaluation date for the undated entry points
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Age of a resident at the evaluation date.
///
/// A resident with no medical record, or whose record carries no usable
/// birthdate, has no defined age: the whole request fails with `NotFound`.
fn resident_age(snapshot: &StoreSnapshot, person: &Person, as_of: NaiveDate) -> Result<i32> {
    let record = snapshot
        .medical_record_of(&person.name())
        .ok_or_else(|| {
            DispatchError::not_found(format!("medical record for {}", person.full_name()))
        })?;
    record.age_at(&as_of).ok_or_else(|| {
        DispatchError::not_found(format!("birthdate for {}", person.full_name()))
    })
}
