//! Entity store abstraction and in-memory implementation
//!
//! The registry core never owns entity persistence: every component receives
//! a store handle and goes through the [`EntityStore`] operations. The
//! in-process [`InMemoryStore`] is the default backing; a relational or
//! key-value backend would implement the same traits.

use crate::error::{DispatchError, Result};
use crate::models::collections::{KeyedCollection, ModelCollection};
use crate::models::core::traits::EntityModel;
use crate::models::core::types::{AddressKey, PersonName};
use crate::models::{Address, Firestation, MedicalRecord, Person};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Per-entity storage operations.
///
/// `find_all` enumerates in the store's natural (insertion) order; lookup
/// operations that return "the first match" depend on that order being
/// deterministic.
pub trait EntityStore<T: EntityModel> {
    /// All entities, in natural order
    fn find_all(&self) -> Vec<Arc<T>>;

    /// Entity by id, if present
    fn find_by_id(&self, id: &T::Id) -> Option<Arc<T>>;

    /// Insert or replace the entity with the same id
    fn save(&self, entity: T) -> Arc<T>;

    /// Remove the entity with the given id, returning it if present
    fn delete_by_id(&self, id: &T::Id) -> Option<Arc<T>>;

    /// Whether an entity with the given id exists
    fn exists(&self, id: &T::Id) -> bool;
}

/// The full store surface the registry components work against.
///
/// Blanket-implemented for anything that stores all four entity kinds, so
/// components can take one `Arc<S: Store>` handle instead of four.
pub trait Store:
    EntityStore<Person>
    + EntityStore<Address>
    + EntityStore<Firestation>
    + EntityStore<MedicalRecord>
    + Send
    + Sync
{
    /// Take one consistent snapshot of every collection.
    ///
    /// Addresses are read before stations, so a snapshot never contains an
    /// attachment to a station it missed: stations are created before the
    /// address that first references them.
    fn snapshot(&self) -> StoreSnapshot {
        let persons = EntityStore::<Person>::find_all(self);
        let addresses = EntityStore::<Address>::find_all(self);
        let stations = EntityStore::<Firestation>::find_all(self);
        let records = EntityStore::<MedicalRecord>::find_all(self);
        StoreSnapshot::new(persons, addresses, stations, records)
    }

    /// All persons; `EmptyCollection` when there are none.
    fn persons(&self) -> Result<Vec<Arc<Person>>> {
        let persons = EntityStore::<Person>::find_all(self);
        if persons.is_empty() {
            return Err(DispatchError::empty_collection("persons"));
        }
        Ok(persons)
    }

    /// All medical records; `EmptyCollection` when there are none.
    fn medical_records(&self) -> Result<Vec<Arc<MedicalRecord>>> {
        let records = EntityStore::<MedicalRecord>::find_all(self);
        if records.is_empty() {
            return Err(DispatchError::empty_collection("medical records"));
        }
        Ok(records)
    }
}

impl<S> Store for S where
    S: EntityStore<Person>
        + EntityStore<Address>
        + EntityStore<Firestation>
        + EntityStore<MedicalRecord>
        + Send
        + Sync
{
}

/// In-process store backed by insertion-ordered keyed collections.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    persons: RwLock<KeyedCollection<Person>>,
    addresses: RwLock<KeyedCollection<Address>>,
    stations: RwLock<KeyedCollection<Firestation>>,
    records: RwLock<KeyedCollection<MedicalRecord>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! impl_entity_store {
    ($entity:ty, $field:ident) => {
        impl EntityStore<$entity> for InMemoryStore {
            fn find_all(&self) -> Vec<Arc<$entity>> {
                self.$field.read().unwrap().all()
            }

            fn find_by_id(&self, id: &<$entity as EntityModel>::Id) -> Option<Arc<$entity>> {
                self.$field.read().unwrap().get(id)
            }

            fn save(&self, entity: $entity) -> Arc<$entity> {
                self.$field.write().unwrap().add(entity)
            }

            fn delete_by_id(&self, id: &<$entity as EntityModel>::Id) -> Option<Arc<$entity>> {
                self.$field.write().unwrap().remove(id)
            }

            fn exists(&self, id: &<$entity as EntityModel>::Id) -> bool {
                self.$field.read().unwrap().contains(id)
            }
        }
    };
}

impl_entity_store!(Person, persons);
impl_entity_store!(Address, addresses);
impl_entity_store!(Firestation, stations);
impl_entity_store!(MedicalRecord, records);

/// One consistent view of the store, taken at the entry of a read operation.
///
/// Aggregations compute from a snapshot only, so a mapping mutation running
/// concurrently can never produce a partial join.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    persons: Vec<Arc<Person>>,
    addresses: Vec<Arc<Address>>,
    stations: Vec<Arc<Firestation>>,
    records_by_person: FxHashMap<PersonName, Arc<MedicalRecord>>,
}

impl StoreSnapshot {
    /// Build a snapshot from collection clones, indexing records by person
    #[must_use]
    pub fn new(
        persons: Vec<Arc<Person>>,
        addresses: Vec<Arc<Address>>,
        stations: Vec<Arc<Firestation>>,
        records: Vec<Arc<MedicalRecord>>,
    ) -> Self {
        let records_by_person = records
            .into_iter()
            .map(|record| (record.name(), record))
            .collect();
        Self {
            persons,
            addresses,
            stations,
            records_by_person,
        }
    }

    /// All persons in natural order
    #[must_use]
    pub fn persons(&self) -> &[Arc<Person>] {
        &self.persons
    }

    /// All addresses in natural order
    #[must_use]
    pub fn addresses(&self) -> &[Arc<Address>] {
        &self.addresses
    }

    /// All stations in natural order
    #[must_use]
    pub fn stations(&self) -> &[Arc<Firestation>] {
        &self.stations
    }

    /// Whether a station with the given id exists in this snapshot
    #[must_use]
    pub fn station_exists(&self, station_id: u32) -> bool {
        self.stations.iter().any(|station| station.id == station_id)
    }

    /// Addresses attached to the given station, in natural order
    #[must_use]
    pub fn addresses_of_station(&self, station_id: u32) -> Vec<Arc<Address>> {
        self.addresses
            .iter()
            .filter(|address| address.firestation_id == Some(station_id))
            .cloned()
            .collect()
    }

    /// Residents of the address with the given key, in natural order
    #[must_use]
    pub fn residents_of(&self, key: &AddressKey) -> Vec<Arc<Person>> {
        self.persons
            .iter()
            .filter(|person| person.lives_at(key))
            .cloned()
            .collect()
    }

    /// First address whose normalized street matches the given text
    #[must_use]
    pub fn find_street(&self, street: &str) -> Option<Arc<Address>> {
        let wanted = AddressKey::from_street(street);
        self.addresses
            .iter()
            .find(|address| address.id() == wanted)
            .cloned()
    }

    /// Medical record of the named person, if any
    #[must_use]
    pub fn medical_record_of(&self, name: &PersonName) -> Option<Arc<MedicalRecord>> {
        self.records_by_person.get(name).cloned()
    }
}
