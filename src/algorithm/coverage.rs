//! Station-zone coverage reports

use super::{AggregationEngine, resident_age, today};
use crate::error::{DispatchError, Result};
use crate::models::core::traits::{ADULT_AGE_YEARS, EntityModel};
use crate::store::{Store, StoreSnapshot};
use chrono::NaiveDate;
use itertools::Itertools;
use log::debug;

use super::reports::{CoveredPerson, StationCoverage};

impl<S: Store> AggregationEngine<S> {
    /// Everyone living in the station's zone, with child/adult counts.
    pub fn coverage_by_station(&self, station_id: u32) -> Result<StationCoverage> {
        self.coverage_by_station_at(station_id, today())
    }

    /// [`coverage_by_station`](Self::coverage_by_station) at an explicit date.
    pub fn coverage_by_station_at(
        &self,
        station_id: u32,
        as_of: NaiveDate,
    ) -> Result<StationCoverage> {
        let snapshot = self.snapshot();
        require_station(&snapshot, station_id)?;

        let mut persons = Vec::new();
        let mut children = 0;
        let mut adults = 0;
        for address in snapshot.addresses_of_station(station_id) {
            for person in snapshot.residents_of(&address.id()) {
                let age = resident_age(&snapshot, &person, as_of)?;
                let is_child = age < ADULT_AGE_YEARS;
                if is_child {
                    children += 1;
                } else {
                    adults += 1;
                }
                persons.push(CoveredPerson {
                    first_name: person.first_name.clone(),
                    last_name: person.last_name.clone(),
                    street: address.street.clone(),
                    phone: person.phone.clone(),
                    is_child,
                });
            }
        }
        debug!("coverage for station {station_id}: {children} children, {adults} adults");
        Ok(StationCoverage {
            station_id,
            children,
            adults,
            persons,
        })
    }

    /// Phone numbers to auto-dial for the station's zone, deduplicated in
    /// order of first appearance. Addresses with no residents contribute
    /// nothing.
    pub fn phone_numbers_by_station(&self, station_id: u32) -> Result<Vec<String>> {
        let snapshot = self.snapshot();
        require_station(&snapshot, station_id)?;

        let numbers = snapshot
            .addresses_of_station(station_id)
            .into_iter()
            .flat_map(|address| snapshot.residents_of(&address.id()))
            .map(|person| person.phone.clone())
            .unique()
            .collect();
        Ok(numbers)
    }
}

fn require_station(snapshot: &StoreSnapshot, station_id: u32) -> Result<()> {
    if !snapshot.station_exists(station_id) {
        return Err(DispatchError::not_found(format!("firestation {station_id}")));
    }
    Ok(())
}
