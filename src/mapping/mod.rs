//! Address to firestation mapping service
//!
//! Owns the invariant that every address is attached to at most one
//! firestation. The per-address state machine is `Unattached ->
//! Attached(station_id)`, and only the operations here perform transitions.
//!
//! The service holds no entity state of its own: it reads and writes through
//! the store handle, and serializes all mutating operations through one
//! internal mutex so that two concurrent creates for the same normalized
//! address cannot both succeed.

use crate::config::ResolverConfig;
use crate::error::{DispatchError, Result};
use crate::models::core::types::Identifier;
use crate::models::{Address, Firestation};
use crate::resolve::AddressResolver;
use crate::store::{EntityStore, Store};
use log::{debug, info};
use smallvec::SmallVec;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A station together with the addresses currently attached to it
#[derive(Debug, Clone)]
pub struct StationDetail {
    /// The station record
    pub station: Arc<Firestation>,
    /// Attached addresses, in the store's natural order
    pub addresses: Vec<Arc<Address>>,
}

/// Confirmation of a successful create or update, recording what was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Target station of the operation
    pub station_id: u32,
    /// Street that was assigned, `None` for an empty-station create
    pub street: Option<String>,
    /// Whether the station record was newly created
    pub created_station: bool,
    /// Whether the address record was newly created
    pub created_address: bool,
}

impl fmt::Display for MappingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.street {
            None => write!(f, "created firestation {}", self.station_id),
            Some(street) => {
                write!(f, "assigned '{street}' to firestation {}", self.station_id)?;
                let mut new_parts: SmallVec<[&str; 2]> = SmallVec::new();
                if self.created_station {
                    new_parts.push("new firestation");
                }
                if self.created_address {
                    new_parts.push("new address");
                }
                if !new_parts.is_empty() {
                    write!(f, " ({})", new_parts.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Confirmation of a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// An empty station record was removed
    Station {
        /// The removed station's id
        station_id: u32,
    },
    /// An address was detached from its station
    Detached {
        /// Street of the detached address (display form)
        street: String,
        /// Station it was detached from
        station_id: u32,
    },
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Station { station_id } => write!(f, "deleted firestation {station_id}"),
            Self::Detached { street, station_id } => {
                write!(f, "detached '{street}' from firestation {station_id}")
            }
        }
    }
}

/// Service owning the address→station attachment invariant
#[derive(Debug)]
pub struct MappingService<S> {
    store: Arc<S>,
    resolver: AddressResolver<S>,
    write_lock: Mutex<()>,
}

impl<S: Store> MappingService<S> {
    /// Create a service over the given store with default resolver config
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Create a service with an explicit resolver configuration
    pub fn with_config(store: Arc<S>, config: ResolverConfig) -> Self {
        let resolver = AddressResolver::with_config(Arc::clone(&store), config);
        Self {
            store,
            resolver,
            write_lock: Mutex::new(()),
        }
    }

    /// The resolver this service maps addresses through
    #[must_use]
    pub fn resolver(&self) -> &AddressResolver<S> {
        &self.resolver
    }

    /// All stations; `EmptyCollection` when none exist.
    pub fn stations(&self) -> Result<Vec<Arc<Firestation>>> {
        let stations = EntityStore::<Firestation>::find_all(self.store.as_ref());
        if stations.is_empty() {
            return Err(DispatchError::empty_collection("firestations"));
        }
        Ok(stations)
    }

    /// Look up a station by id or by one of its attached addresses.
    pub fn station(&self, identifier: &Identifier) -> Result<StationDetail> {
        match identifier {
            Identifier::StationId(station_id) => {
                let station = EntityStore::<Firestation>::find_by_id(self.store.as_ref(), station_id)
                    .ok_or_else(|| DispatchError::not_found(format!("firestation {station_id}")))?;
                Ok(StationDetail {
                    addresses: self.attached_addresses(station.id),
                    station,
                })
            }
            Identifier::AddressText(street) => {
                let station_id = self
                    .resolver
                    .resolve_street(street)
                    .ok()
                    .and_then(|address| address.firestation_id)
                    .ok_or_else(|| {
                        DispatchError::not_found(format!("no firestation covers '{street}'"))
                    })?;
                self.station(&Identifier::StationId(station_id))
            }
        }
    }

    /// Create a mapping: an empty station when `street` is absent, otherwise
    /// an address→station assignment (creating station and address records
    /// on demand).
    pub fn create_mapping(
        &self,
        station_number: u32,
        street: Option<&str>,
        zip: Option<&str>,
        city: Option<&str>,
    ) -> Result<MappingOutcome> {
        let _guard = self.write_lock.lock().unwrap();
        self.create_locked(station_number, street, zip, city)
    }

    /// Move an address's attachment to the given station.
    ///
    /// The target station must already exist. Detaching from the previous
    /// station is a no-op when the address was unattached or unknown; the
    /// internal `NothingToDelete` is swallowed, not surfaced.
    pub fn update_mapping(
        &self,
        station_number: u32,
        street: &str,
        zip: Option<&str>,
        city: Option<&str>,
    ) -> Result<MappingOutcome> {
        let _guard = self.write_lock.lock().unwrap();
        if !EntityStore::<Firestation>::exists(self.store.as_ref(), &station_number) {
            return Err(DispatchError::not_found(format!(
                "firestation {station_number}"
            )));
        }
        match self.detach_street(street) {
            Ok(outcome) => debug!("update_mapping: {outcome}"),
            Err(DispatchError::NothingToDelete(_)) => {}
            Err(e) => return Err(e),
        }
        self.create_locked(station_number, Some(street), zip, city)
    }

    /// Delete by station id (station must be empty) or detach by address.
    pub fn delete(&self, identifier: &Identifier) -> Result<DeleteOutcome> {
        let _guard = self.write_lock.lock().unwrap();
        match identifier {
            Identifier::StationId(station_id) => self.delete_station(*station_id),
            Identifier::AddressText(street) => self.detach_street(street),
        }
    }

    fn create_locked(
        &self,
        station_number: u32,
        street: Option<&str>,
        zip: Option<&str>,
        city: Option<&str>,
    ) -> Result<MappingOutcome> {
        let Some(street) = street else {
            return self.create_empty_station(station_number);
        };

        // Attachment identity is the normalized street alone; zip and city
        // only matter when a new record has to be built.
        match self.resolver.resolve_street(street) {
            Ok(existing) => match existing.firestation_id {
                Some(current) if current == station_number => Err(DispatchError::already_exists(
                    format!("'{street}' is already assigned to firestation {station_number}"),
                )),
                Some(current) => Err(DispatchError::already_exists(format!(
                    "'{street}' is already assigned to a different firestation ({current})"
                ))),
                None => {
                    let created_station = self.ensure_station(station_number);
                    let mut address = (*existing).clone();
                    address.attach(station_number);
                    self.store.save(address);
                    info!("attached existing address '{street}' to firestation {station_number}");
                    Ok(MappingOutcome {
                        station_id: station_number,
                        street: Some(existing.street.clone()),
                        created_station,
                        created_address: false,
                    })
                }
            },
            Err(_) => {
                let created_station = self.ensure_station(station_number);
                let mut address = self.resolver.new_address(street, zip, city);
                address.attach(station_number);
                let saved = self.store.save(address);
                info!("created address '{}' under firestation {station_number}", saved.street);
                Ok(MappingOutcome {
                    station_id: station_number,
                    street: Some(saved.street.clone()),
                    created_station,
                    created_address: true,
                })
            }
        }
    }

    fn create_empty_station(&self, station_number: u32) -> Result<MappingOutcome> {
        if station_number == 0 {
            return Err(DispatchError::invalid_input(
                "a firestation number must be non-zero",
            ));
        }
        if EntityStore::<Firestation>::exists(self.store.as_ref(), &station_number) {
            return Err(DispatchError::invalid_input(format!(
                "firestation {station_number} already exists"
            )));
        }
        self.store.save(Firestation::new(station_number));
        info!("created empty firestation {station_number}");
        Ok(MappingOutcome {
            station_id: station_number,
            street: None,
            created_station: true,
            created_address: false,
        })
    }

    /// Create the station record if absent; returns whether it was created.
    fn ensure_station(&self, station_number: u32) -> bool {
        if EntityStore::<Firestation>::exists(self.store.as_ref(), &station_number) {
            return false;
        }
        self.store.save(Firestation::new(station_number));
        info!("created firestation {station_number}");
        true
    }

    fn delete_station(&self, station_id: u32) -> Result<DeleteOutcome> {
        if !EntityStore::<Firestation>::exists(self.store.as_ref(), &station_id) {
            return Err(DispatchError::nothing_to_delete(format!(
                "firestation {station_id} does not exist"
            )));
        }
        let attached = self.attached_addresses(station_id);
        if !attached.is_empty() {
            let streets: SmallVec<[String; 8]> =
                attached.iter().map(|address| address.street.clone()).collect();
            return Err(DispatchError::NonEmpty {
                station_id,
                attached: streets.into_vec(),
            });
        }
        EntityStore::<Firestation>::delete_by_id(self.store.as_ref(), &station_id);
        info!("deleted firestation {station_id}");
        Ok(DeleteOutcome::Station { station_id })
    }

    fn detach_street(&self, street: &str) -> Result<DeleteOutcome> {
        let resolved = self.resolver.resolve_street(street).ok();
        let mut updated = match resolved.as_deref() {
            Some(address) if address.is_attached() => address.clone(),
            _ => {
                return Err(DispatchError::nothing_to_delete(format!(
                    "'{street}' is not mapped to any firestation"
                )));
            }
        };
        let Some(station_id) = updated.detach() else {
            return Err(DispatchError::nothing_to_delete(format!(
                "'{street}' is not mapped to any firestation"
            )));
        };
        let saved = self.store.save(updated);
        info!("detached '{}' from firestation {station_id}", saved.street);
        Ok(DeleteOutcome::Detached {
            street: saved.street.clone(),
            station_id,
        })
    }

    fn attached_addresses(&self, station_id: u32) -> Vec<Arc<Address>> {
        EntityStore::<Address>::find_all(self.store.as_ref())
            .into_iter()
            .filter(|address| address.firestation_id == Some(station_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn service() -> MappingService<InMemoryStore> {
        MappingService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn test_create_empty_station_rejects_zero_and_duplicates() {
        let service = service();
        assert!(matches!(
            service.create_mapping(0, None, None, None).unwrap_err(),
            DispatchError::InvalidInput(_)
        ));
        service.create_mapping(3, None, None, None).unwrap();
        assert!(matches!(
            service.create_mapping(3, None, None, None).unwrap_err(),
            DispatchError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_create_mapping_builds_station_and_address() {
        let service = service();
        let outcome = service
            .create_mapping(3, Some("29 rue de Paris"), Some("97451"), Some("Culver"))
            .unwrap();
        assert!(outcome.created_station);
        assert!(outcome.created_address);
        assert_eq!(
            outcome.to_string(),
            "assigned '29 rue de Paris' to firestation 3 (new firestation, new address)"
        );

        let detail = service.station(&Identifier::StationId(3)).unwrap();
        assert_eq!(detail.addresses.len(), 1);
        assert_eq!(detail.addresses[0].street, "29 rue de Paris");
    }

    #[test]
    fn test_create_mapping_defaults_zip_and_city() {
        let service = service();
        service.create_mapping(3, Some("644 Gershwin Cir"), None, None).unwrap();
        let address = service.resolver().resolve_street("644 Gershwin Cir").unwrap();
        assert_eq!(address.zip, "97451");
        assert_eq!(address.city, "Culver");
    }

    #[test]
    fn test_conflicting_create_distinguishes_same_and_different_station() {
        let service = service();
        service
            .create_mapping(3, Some("29 rue de Paris"), Some("97451"), Some("CULVER"))
            .unwrap();

        let same = service
            .create_mapping(3, Some("29 rue de paris "), None, None)
            .unwrap_err();
        let different = service
            .create_mapping(5, Some("29 rue de paris "), None, None)
            .unwrap_err();
        let (DispatchError::AlreadyExists(same_msg), DispatchError::AlreadyExists(diff_msg)) =
            (same, different)
        else {
            panic!("expected AlreadyExists for both conflicts");
        };
        assert!(same_msg.contains("firestation 3"));
        assert!(diff_msg.contains("different firestation (3)"));
    }

    #[test]
    fn test_update_mapping_moves_attachment() {
        let service = service();
        service.create_mapping(3, Some("29 rue de Paris"), None, None).unwrap();
        service.create_mapping(5, None, None, None).unwrap();

        let outcome = service.update_mapping(5, "29 RUE DE PARIS", None, None).unwrap();
        assert!(!outcome.created_station);
        assert!(!outcome.created_address);

        let detail = service.station(&Identifier::StationId(5)).unwrap();
        assert_eq!(detail.addresses.len(), 1);
        assert!(service.station(&Identifier::StationId(3)).unwrap().addresses.is_empty());
    }

    #[test]
    fn test_update_mapping_requires_existing_station() {
        let service = service();
        assert!(matches!(
            service.update_mapping(9, "29 rue de Paris", None, None).unwrap_err(),
            DispatchError::NotFound(_)
        ));
    }

    #[test]
    fn test_update_mapping_attaches_unattached_address() {
        let service = service();
        service.create_mapping(3, None, None, None).unwrap();
        service.store.save(Address::new("5 Ash Ln", "97451", "Culver"));
        // The internal detach is a no-op, not an error.
        let outcome = service.update_mapping(3, "5 Ash Ln", None, None).unwrap();
        assert!(!outcome.created_address);
        assert_eq!(service.station(&Identifier::StationId(3)).unwrap().addresses.len(), 1);
    }

    #[test]
    fn test_delete_station_refuses_when_addresses_attached() {
        let service = service();
        service.create_mapping(3, Some("29 rue de Paris"), None, None).unwrap();
        let err = service.delete(&Identifier::StationId(3)).unwrap_err();
        let DispatchError::NonEmpty { station_id, attached } = err else {
            panic!("expected NonEmpty, got {err:?}");
        };
        assert_eq!(station_id, 3);
        assert_eq!(attached, vec!["29 rue de Paris".to_string()]);
    }

    #[test]
    fn test_delete_by_address_then_station() {
        let service = service();
        service.create_mapping(3, Some("29 rue de Paris"), None, None).unwrap();

        let detached = service
            .delete(&Identifier::AddressText("29 RUE de paris".to_string()))
            .unwrap();
        assert_eq!(
            detached,
            DeleteOutcome::Detached {
                street: "29 rue de Paris".to_string(),
                station_id: 3,
            }
        );

        // Address is now unattached: deleting it again is NothingToDelete.
        assert!(matches!(
            service
                .delete(&Identifier::AddressText("29 rue de Paris".to_string()))
                .unwrap_err(),
            DispatchError::NothingToDelete(_)
        ));

        // The station is empty and can be removed.
        assert_eq!(
            service.delete(&Identifier::StationId(3)).unwrap(),
            DeleteOutcome::Station { station_id: 3 }
        );
        assert!(matches!(
            service.delete(&Identifier::StationId(3)).unwrap_err(),
            DispatchError::NothingToDelete(_)
        ));
    }

    #[test]
    fn test_station_lookup_by_address() {
        let service = service();
        service.create_mapping(3, Some("29 rue de Paris"), None, None).unwrap();
        let detail = service
            .station(&Identifier::parse(" 29 RUE de paris "))
            .unwrap();
        assert_eq!(detail.station.id, 3);
        assert!(matches!(
            service.station(&Identifier::parse("unknown street")).unwrap_err(),
            DispatchError::NotFound(_)
        ));
    }

    #[test]
    fn test_stations_empty_collection() {
        let service = service();
        assert!(matches!(
            service.stations().unwrap_err(),
            DispatchError::EmptyCollection(_)
        ));
        service.create_mapping(1, None, None, None).unwrap();
        assert_eq!(service.stations().unwrap().len(), 1);
    }
}
