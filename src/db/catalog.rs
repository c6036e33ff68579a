//! Franchise catalog with nested stores.
//!
//! Franchise and store ids come from two independent counters. Deleting a
//! franchise or store never rewinds them, so retired ids are not reused.

use super::models::{Franchise, FranchiseAdmin, Store};

#[derive(Debug, Clone)]
pub struct FranchiseCatalog {
    franchises: Vec<Franchise>,
    next_franchise_id: u64,
    next_store_id: u64,
}

impl FranchiseCatalog {
    /// Build a catalog from seeded franchises. The counters are bumped past
    /// any seeded id so new records never collide with fixtures.
    pub fn new(franchises: Vec<Franchise>, next_franchise_id: u64, next_store_id: u64) -> Self {
        let max_franchise = franchises.iter().map(|f| f.id).max().unwrap_or(0);
        let max_store = franchises
            .iter()
            .flat_map(|f| f.stores.iter().map(|s| s.id))
            .max()
            .unwrap_or(0);

        Self {
            franchises,
            next_franchise_id: next_franchise_id.max(max_franchise + 1),
            next_store_id: next_store_id.max(max_store + 1),
        }
    }

    pub fn franchises(&self) -> &[Franchise] {
        &self.franchises
    }

    pub fn len(&self) -> usize {
        self.franchises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.franchises.is_empty()
    }

    pub fn get(&self, franchise_id: u64) -> Option<&Franchise> {
        self.franchises.iter().find(|f| f.id == franchise_id)
    }

    pub fn next_franchise_id(&self) -> u64 {
        self.next_franchise_id
    }

    pub fn next_store_id(&self) -> u64 {
        self.next_store_id
    }

    /// Append a new franchise with no stores.
    pub fn create_franchise(&mut self, name: String, admins: Vec<FranchiseAdmin>) -> &Franchise {
        let id = self.next_franchise_id;
        self.next_franchise_id += 1;

        let index = self.franchises.len();
        self.franchises.push(Franchise {
            id,
            name,
            admins,
            stores: Vec::new(),
        });
        &self.franchises[index]
    }

    /// Append a zero-revenue store to a franchise. `None` if the franchise
    /// does not exist, in which case no store id is consumed.
    pub fn create_store(&mut self, franchise_id: u64, name: String) -> Option<Store> {
        let franchise = self.franchises.iter_mut().find(|f| f.id == franchise_id)?;

        let store = Store {
            id: self.next_store_id,
            name,
            total_revenue: 0.0,
        };
        self.next_store_id += 1;
        franchise.stores.push(store.clone());
        Some(store)
    }

    /// Remove a store from its owning franchise only. Returns whether
    /// anything was removed.
    pub fn remove_store(&mut self, franchise_id: u64, store_id: u64) -> bool {
        let Some(franchise) = self.franchises.iter_mut().find(|f| f.id == franchise_id) else {
            return false;
        };
        let before = franchise.stores.len();
        franchise.stores.retain(|s| s.id != store_id);
        franchise.stores.len() != before
    }

    pub fn remove_franchise(&mut self, franchise_id: u64) -> bool {
        let before = self.franchises.len();
        self.franchises.retain(|f| f.id != franchise_id);
        self.franchises.len() != before
    }
}
