//! Fuzzy address resolution
//!
//! Finds existing address records from free-text input, tolerating casing and
//! whitespace differences in the street and casing differences in the city.
//! Resolution is read-only; callers construct new records on `NotFound` via
//! [`AddressResolver::new_address`], which applies the configured defaults.

use crate::config::ResolverConfig;
use crate::error::{DispatchError, Result};
use crate::identity::{normalize_street, same_city};
use crate::models::Address;
use crate::store::{EntityStore, Store};
use log::debug;
use std::sync::Arc;

/// Read-only address lookup over a store handle
#[derive(Debug)]
pub struct AddressResolver<S> {
    store: Arc<S>,
    config: ResolverConfig,
}

impl<S: Store> AddressResolver<S> {
    /// Create a resolver with the default zip/city configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Create a resolver with an explicit defaulting configuration
    pub fn with_config(store: Arc<S>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// The defaulting configuration in use
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Find the first address matching normalized street, exact zip and
    /// case-insensitive city, in the store's natural order.
    pub fn resolve(&self, street: &str, zip: &str, city: &str) -> Result<Arc<Address>> {
        let wanted = normalize_street(street);
        EntityStore::<Address>::find_all(self.store.as_ref())
            .into_iter()
            .find(|address| {
                normalize_street(&address.street) == wanted
                    && address.zip == zip
                    && same_city(&address.city, city)
            })
            .ok_or_else(|| {
                debug!("no address matching '{street}' / {zip} / {city}");
                DispatchError::not_found(format!("address '{street}' ({zip} {city})"))
            })
    }

    /// Find the first address matching the normalized street alone.
    pub fn resolve_street(&self, street: &str) -> Result<Arc<Address>> {
        let wanted = normalize_street(street);
        EntityStore::<Address>::find_all(self.store.as_ref())
            .into_iter()
            .find(|address| normalize_street(&address.street) == wanted)
            .ok_or_else(|| {
                debug!("no address matching '{street}'");
                DispatchError::not_found(format!("address '{street}'"))
            })
    }

    /// Build a new, unattached address from partial input, substituting the
    /// configured defaults for a missing zip or city.
    #[must_use]
    pub fn new_address(&self, street: &str, zip: Option<&str>, city: Option<&str>) -> Address {
        Address::new(
            street,
            zip.unwrap_or(&self.config.default_zip),
            city.unwrap_or(&self.config.default_city),
        )
    }
}
