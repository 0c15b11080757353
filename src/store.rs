// src/store.rs

use crate::domain::StoredListing;
use std::sync::{Mutex, MutexGuard};

/// In-memory, append-only collection of ingested payloads.
///
/// Nothing here survives a restart.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Mutex<Vec<StoredListing>>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, listing: StoredListing) {
        self.lock().push(listing);
    }

    /// Copy of the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<StoredListing> {
        self.lock().clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A writer that panicked mid-push leaves the Vec intact, so a poisoned
    // lock is still safe to read.
    fn lock(&self) -> MutexGuard<'_, Vec<StoredListing>> {
        self.listings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
