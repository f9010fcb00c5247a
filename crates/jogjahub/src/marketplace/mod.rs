//! Listing catalog, curation workflow, and the role-based portal session.

pub mod auth;
pub mod catalog;
pub mod domain;
pub mod ids;
pub mod router;
pub mod service;
pub mod session;
pub mod store;
pub mod submission;
pub mod view;

#[cfg(test)]
mod tests;

pub use auth::{IdentityProvider, MockAuthProvider};
pub use catalog::{filter_options, seed_listings, CategoryFilter, FILTER_LABELS};
pub use domain::{
    Category, Department, Listing, ListingId, ModerationDecision, ModerationStatus,
    PaymentMethod, Transaction, TransactionStatus, User, UserRole,
};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use router::marketplace_router;
pub use service::{MarketplaceService, MarketplaceServiceError, SessionView};
pub use session::{AssistantPanel, MarketplaceSession, SessionEnv, SessionError, SessionEvent};
pub use store::{ListingStore, StoreError};
pub use submission::ListingDraft;
pub use view::{owned_listings, visible_listings, CurationSummary, ViewFilter, ViewMode};
