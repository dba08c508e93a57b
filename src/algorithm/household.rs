//! Household reports: who lives at an address, and with what risk factors

use super::reports::{ChildResident, HouseholdReport, ResidentProfile};
use super::{AggregationEngine, resident_age, today};
use crate::error::{DispatchError, Result};
use crate::models::Address;
use crate::models::core::traits::{ADULT_AGE_YEARS, AgeProfile, EntityModel};
use crate::store::{Store, StoreSnapshot};
use chrono::NaiveDate;
use rayon::prelude::*;

impl<S: Store> AggregationEngine<S> {
    /// Children living at the given address, each listed with the rest of
    /// their household. An adults-only address yields an empty list.
    pub fn children_at_address(&self, street: &str) -> Result<Vec<ChildResident>> {
        self.children_at_address_at(street, today())
    }

    /// [`children_at_address`](Self::children_at_address) at an explicit date.
    pub fn children_at_address_at(
        &self,
        street: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<ChildResident>> {
        let snapshot = self.snapshot();
        let address = require_address(&snapshot, street)?;
        let residents = snapshot.residents_of(&address.id());

        let mut children = Vec::new();
        for person in &residents {
            let age = resident_age(&snapshot, person, as_of)?;
            if age >= ADULT_AGE_YEARS {
                continue;
            }
            let household_members = residents
                .iter()
                .filter(|other| other.name() != person.name())
                .map(|other| other.full_name())
                .collect();
            children.push(ChildResident {
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                street: address.street.clone(),
                age,
                household_members,
            });
        }
        Ok(children)
    }

    /// The household at an address together with the covering station.
    ///
    /// Fails `NotFound` when the address is unknown or no station covers it.
    pub fn persons_at_address(&self, street: &str) -> Result<HouseholdReport> {
        self.persons_at_address_at(street, today())
    }

    /// [`persons_at_address`](Self::persons_at_address) at an explicit date.
    pub fn persons_at_address_at(&self, street: &str, as_of: NaiveDate) -> Result<HouseholdReport> {
        let snapshot = self.snapshot();
        let address = require_address(&snapshot, street)?;
        household_report(&snapshot, &address, as_of)
    }

    /// Household reports for every address of every given station, in input
    /// station order then address enumeration order. A station with no
    /// addresses contributes nothing.
    pub fn households_by_stations(&self, station_ids: &[u32]) -> Result<Vec<HouseholdReport>> {
        self.households_by_stations_at(station_ids, today())
    }

    /// [`households_by_stations`](Self::households_by_stations) at an
    /// explicit date.
    pub fn households_by_stations_at(
        &self,
        station_ids: &[u32],
        as_of: NaiveDate,
    ) -> Result<Vec<HouseholdReport>> {
        let snapshot = self.snapshot();
        let groups: Vec<Vec<HouseholdReport>> = station_ids
            .par_iter()
            .map(|&station_id| {
                snapshot
                    .addresses_of_station(station_id)
                    .iter()
                    .map(|address| household_report(&snapshot, address, as_of))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(groups.into_iter().flatten().collect())
    }
}

fn require_address(snapshot: &StoreSnapshot, street: &str) -> Result<std::sync::Arc<Address>> {
    snapshot
        .find_street(street)
        .ok_or_else(|| DispatchError::not_found(format!("address '{street}'")))
}

fn household_report(
    snapshot: &StoreSnapshot,
    address: &Address,
    as_of: NaiveDate,
) -> Result<HouseholdReport> {
    let station_id = address.firestation_id.ok_or_else(|| {
        DispatchError::not_found(format!("no firestation covers '{}'", address.street))
    })?;

    let mut residents = Vec::new();
    for person in snapshot.residents_of(&address.id()) {
        let record = snapshot.medical_record_of(&person.name()).ok_or_else(|| {
            DispatchError::not_found(format!("medical record for {}", person.full_name()))
        })?;
        let age = record.age_at(&as_of).ok_or_else(|| {
            DispatchError::not_found(format!("birthdate for {}", person.full_name()))
        })?;
        residents.push(ResidentProfile {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            phone: person.phone.clone(),
            age,
            medications: record.medications.clone(),
            allergies: record.allergies.clone(),
        });
    }
    Ok(HouseholdReport {
        street: address.street.clone(),
        station_id,
        residents,
    })
}
