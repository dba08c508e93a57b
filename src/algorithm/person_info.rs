//! Person-centric lookups: by name, and contact sweeps by city

use super::reports::PersonInfo;
use super::{AggregationEngine, today};
use crate::error::{DispatchError, Result};
use crate::identity::same_city;
use crate::models::core::traits::{AgeProfile, EntityModel};
use crate::models::core::types::PersonName;
use crate::store::Store;
use chrono::NaiveDate;
use rustc_hash::FxHashSet;

impl<S: Store> AggregationEngine<S> {
    /// Every person matching the case-insensitive name, expanded with
    /// address, age and medical profile. An empty list is not an error.
    pub fn person_info_by_name(&self, first_name: &str, last_name: &str) -> Result<Vec<PersonInfo>> {
        self.person_info_by_name_at(first_name, last_name, today())
    }

    /// [`person_info_by_name`](Self::person_info_by_name) at an explicit date.
    pub fn person_info_by_name_at(
        &self,
        first_name: &str,
        last_name: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<PersonInfo>> {
        let snapshot = self.snapshot();
        let wanted = PersonName::new(first_name, last_name);

        let mut results = Vec::new();
        for person in snapshot.persons() {
            if person.name() != wanted {
                continue;
            }
            let record = snapshot.medical_record_of(&wanted).ok_or_else(|| {
                DispatchError::not_found(format!("medical record for {}", person.full_name()))
            })?;
            let age = record.age_at(&as_of).ok_or_else(|| {
                DispatchError::not_found(format!("birthdate for {}", person.full_name()))
            })?;
            let address = snapshot.find_street(&person.address);
            results.push(PersonInfo {
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                street: person.address.clone(),
                zip: address.as_ref().map(|a| a.zip.clone()),
                city: address.as_ref().map(|a| a.city.clone()),
                age,
                phone: person.phone.clone(),
                email: person.email.clone(),
                medications: record.medications.clone(),
                allergies: record.allergies.clone(),
            });
        }
        Ok(results)
    }

    /// Emails of every resident whose address city matches,
    /// case-insensitively, in resident enumeration order. Duplicates are
    /// preserved. An empty list is not an error.
    pub fn emails_by_city(&self, city: &str) -> Result<Vec<String>> {
        let snapshot = self.snapshot();
        let city_addresses: FxHashSet<_> = snapshot
            .addresses()
            .iter()
            .filter(|address| same_city(&address.city, city))
            .map(|address| address.id())
            .collect();

        let emails = snapshot
            .persons()
            .iter()
            .filter(|person| city_addresses.contains(&person.address_key()))
            .map(|person| person.email.clone())
            .collect();
        Ok(emails)
    }
}
