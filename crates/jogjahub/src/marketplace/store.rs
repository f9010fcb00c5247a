use serde::Serialize;

use super::catalog::seed_listings;
use super::domain::{Listing, ListingId, ModerationDecision};

/// In-memory ordered catalog. Newest submissions come first; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("listing {0} not found")]
    NotFound(ListingId),
}

impl ListingStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn seeded() -> Self {
        Self::new(seed_listings())
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| &listing.id == id)
    }

    pub fn prepend(&mut self, listing: Listing) {
        self.listings.insert(0, listing);
    }

    /// Applies a curation decision in place. Reapplying the same decision is a no-op.
    pub fn moderate(
        &mut self,
        id: &ListingId,
        decision: ModerationDecision,
    ) -> Result<&Listing, StoreError> {
        let listing = self
            .listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        listing.apply_decision(decision);
        Ok(listing)
    }
}
