//! Collection trait and keyed storage for domain models
//!
//! This module defines the trait for collections of domain models and the
//! insertion-ordered keyed collection backing the in-memory store. Lookup
//! queries specify "first match in the store's natural order", so
//! enumeration must be deterministic: a bare hash map is not enough.

use crate::models::core::traits::EntityModel;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A trait for collections of models that can be queried and modified.
///
/// `ModelCollection` provides methods for storing, retrieving, and
/// filtering collections of models.
pub trait ModelCollection<T: EntityModel> {
    /// Add a model to the collection, replacing any model with the same id
    fn add(&mut self, model: T) -> Arc<T>;

    /// Get a model by its identifier
    fn get(&self, id: &T::Id) -> Option<Arc<T>>;

    /// Get all models in insertion order
    fn all(&self) -> Vec<Arc<T>>;

    /// Filter models by a predicate function, preserving insertion order
    fn filter<F>(&self, predicate: F) -> Vec<Arc<T>>
    where
        F: Fn(&T) -> bool;

    /// Remove a model by its identifier, returning it if present
    fn remove(&mut self, id: &T::Id) -> Option<Arc<T>>;

    /// Count the total number of models in the collection
    fn count(&self) -> usize;

    /// Whether a model with the given identifier is present
    fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }
}

/// An insertion-ordered collection indexed by entity id.
///
/// Upserting an existing id replaces the record in place, keeping its
/// original position; removal shifts later entries down one slot.
#[derive(Debug, Clone)]
pub struct KeyedCollection<T: EntityModel> {
    order: Vec<Arc<T>>,
    index: FxHashMap<T::Id, usize>,
}

impl<T: EntityModel> KeyedCollection<T> {
    /// Create a new empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T: EntityModel> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EntityModel> ModelCollection<T> for KeyedCollection<T> {
    fn add(&mut self, model: T) -> Arc<T> {
        let id = model.id();
        let entry = Arc::new(model);
        match self.index.get(&id) {
            Some(&position) => self.order[position] = Arc::clone(&entry),
            None => {
                self.index.insert(id, self.order.len());
                self.order.push(Arc::clone(&entry));
            }
        }
        entry
    }

    fn get(&self, id: &T::Id) -> Option<Arc<T>> {
        self.index.get(id).map(|&position| Arc::clone(&self.order[position]))
    }

    fn all(&self) -> Vec<Arc<T>> {
        self.order.clone()
    }

    fn filter<F>(&self, predicate: F) -> Vec<Arc<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.order
            .iter()
            .filter(|model| predicate(model))
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: &T::Id) -> Option<Arc<T>> {
        let position = self.index.remove(id)?;
        let removed = self.order.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    fn count(&self) -> usize {
        self.order.len()
    }
}
