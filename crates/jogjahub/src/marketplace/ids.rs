use std::sync::atomic::{AtomicU64, Ordering};

use super::domain::ListingId;

/// Source of identifiers for newly submitted listings.
pub trait IdSource: Send + Sync {
    fn next_listing_id(&self) -> ListingId;
}

/// Monotonic ids (`lst-000001`, `lst-000002`, ...) for reproducible runs.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for SequentialIds {
    fn next_listing_id(&self) -> ListingId {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        ListingId(format!("lst-{id:06}"))
    }
}

/// Nine-character ids cut from a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_listing_id(&self) -> ListingId {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        ListingId(uuid[..9].to_string())
    }
}
