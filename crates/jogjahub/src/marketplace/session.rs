use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::auth::{IdentityProvider, MockAuthProvider};
use super::catalog::CategoryFilter;
use super::domain::{Listing, ListingId, ModerationDecision, Transaction, User, UserRole};
use super::ids::{IdSource, RandomIds};
use super::store::ListingStore;
use super::submission::{ListingDraft, ANONYMOUS_OWNER};
use super::view::{owned_listings, visible_listings, CurationSummary, ViewFilter, ViewMode};
use crate::payment::{PaymentPrompt, PaymentReceipt};

/// Everything a session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SwitchRole(UserRole),
    Logout,
    /// Signs in as the active role when nobody is signed in.
    Login,
    SetQuery(String),
    SetCategory(CategoryFilter),
    SubmitListing(ListingDraft),
    Moderate {
        id: ListingId,
        decision: ModerationDecision,
    },
    SelectListing(ListingId),
    ConfirmPayment {
        at: DateTime<Utc>,
    },
    DismissPayment,
    /// Marks the current search text as sent to the assistant.
    AssistantRequested,
    AssistantAnswered(String),
}

/// Why an event left the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("role {0:?} cannot moderate listings")]
    NotAdmin(UserRole),
    #[error("listing {0} not found")]
    ListingNotFound(ListingId),
    #[error("no payment is awaiting confirmation")]
    NoOpenPayment,
    #[error("assistant question is empty")]
    EmptyQuery,
}

/// Collaborators a session draws identities and randomness from.
///
/// Cloning copies the rng state, so a cloned env (and a cloned session)
/// draws the same payment references and grids as the original. Call
/// [`SessionEnv::reseed`] on a clone that must diverge.
#[derive(Clone)]
pub struct SessionEnv {
    pub ids: Arc<dyn IdSource>,
    pub auth: Arc<dyn IdentityProvider>,
    pub rng: StdRng,
}

impl SessionEnv {
    pub fn new(ids: Arc<dyn IdSource>, auth: Arc<dyn IdentityProvider>, rng: StdRng) -> Self {
        Self { ids, auth, rng }
    }

    /// Replaces the rng with a fresh one seeded from the OS.
    pub fn reseed(&mut self) {
        self.rng = StdRng::from_entropy();
    }
}

impl Default for SessionEnv {
    fn default() -> Self {
        Self::new(
            Arc::new(RandomIds),
            Arc::new(MockAuthProvider::default()),
            StdRng::from_entropy(),
        )
    }
}

/// Last assistant answer and whether a question is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssistantPanel {
    pub answer: String,
    pub pending: bool,
}

/// Application state for one portal session.
#[derive(Clone)]
pub struct MarketplaceSession {
    role: UserRole,
    user: Option<User>,
    store: ListingStore,
    filter: ViewFilter,
    assistant: AssistantPanel,
    payment: Option<PaymentPrompt>,
    last_receipt: Option<PaymentReceipt>,
    transactions: Vec<Transaction>,
    env: SessionEnv,
}

impl MarketplaceSession {
    /// A tourist session over the seeded catalog, already signed in.
    pub fn new(env: SessionEnv) -> Self {
        Self::with_store(ListingStore::seeded(), env)
    }

    pub fn with_store(store: ListingStore, env: SessionEnv) -> Self {
        let role = UserRole::default();
        let user = Some(env.auth.sign_in(role));
        Self {
            role,
            user,
            store,
            filter: ViewFilter::default(),
            assistant: AssistantPanel::default(),
            payment: None,
            last_receipt: None,
            transactions: Vec::new(),
            env,
        }
    }

    /// Reducer form: consumes the state and returns the next one. Rejected
    /// events are logged and leave the state as it was.
    pub fn apply(mut self, event: SessionEvent) -> Self {
        if let Err(err) = self.dispatch(event) {
            warn!(error = %err, "session event ignored");
        }
        self
    }

    /// Applies an event in place, reporting why it was rejected.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::SwitchRole(role) => {
                self.role = role;
                self.user = Some(self.env.auth.sign_in(role));
                debug!(role = role.label(), "role switched");
            }
            SessionEvent::Logout => {
                self.user = None;
            }
            SessionEvent::Login => {
                if self.user.is_none() {
                    self.user = Some(self.env.auth.sign_in(self.role));
                }
            }
            SessionEvent::SetQuery(query) => {
                self.filter.query = query;
            }
            SessionEvent::SetCategory(category) => {
                self.filter.category = category;
            }
            SessionEvent::SubmitListing(draft) => {
                let id = self.env.ids.next_listing_id();
                let listing = draft.into_listing(id, self.user.as_ref());
                info!(listing_id = %listing.id, owner = %listing.owner_id, "listing submitted for curation");
                self.store.prepend(listing);
            }
            SessionEvent::Moderate { id, decision } => {
                if !self.role.is_admin() {
                    return Err(SessionError::NotAdmin(self.role));
                }
                let listing = self
                    .store
                    .moderate(&id, decision)
                    .map_err(|_| SessionError::ListingNotFound(id.clone()))?;
                info!(listing_id = %listing.id, status = listing.status.label(), "curation decision recorded");
            }
            SessionEvent::SelectListing(id) => {
                // Checkout opens from the marketplace grid, which only holds approved listings.
                let listing = visible_listings(
                    self.store.listings(),
                    &ViewFilter::default(),
                    UserRole::Wisatawan,
                )
                .into_iter()
                .find(|listing| listing.id == id)
                .ok_or_else(|| SessionError::ListingNotFound(id.clone()))?;
                self.payment = Some(PaymentPrompt::open(listing, &mut self.env.rng));
            }
            SessionEvent::ConfirmPayment { at } => {
                let prompt = self.payment.take().ok_or(SessionError::NoOpenPayment)?;
                let client_id = self
                    .user
                    .as_ref()
                    .map(|user| user.id.clone())
                    .unwrap_or_else(|| ANONYMOUS_OWNER.to_string());
                let receipt = prompt.confirm(&client_id, at);
                self.transactions.push(receipt.transaction.clone());
                self.last_receipt = Some(receipt);
            }
            SessionEvent::DismissPayment => {
                self.payment = None;
            }
            SessionEvent::AssistantRequested => {
                if self.filter.query.is_empty() {
                    return Err(SessionError::EmptyQuery);
                }
                self.assistant.pending = true;
            }
            SessionEvent::AssistantAnswered(answer) => {
                // Overlapping questions are not deduplicated; the last answer wins.
                self.assistant.answer = answer;
                self.assistant.pending = false;
            }
        }
        Ok(())
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        ViewMode::for_role(self.role)
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn listings(&self) -> &[Listing] {
        self.store.listings()
    }

    pub fn visible(&self) -> Vec<&Listing> {
        visible_listings(self.store.listings(), &self.filter, self.role)
    }

    /// Listings owned by the signed-in user; empty when signed out.
    pub fn my_listings(&self) -> Vec<&Listing> {
        match &self.user {
            Some(user) => owned_listings(self.store.listings(), &user.id),
            None => Vec::new(),
        }
    }

    pub fn curation_summary(&self) -> CurationSummary {
        CurationSummary::from_listings(self.store.listings())
    }

    pub fn assistant(&self) -> &AssistantPanel {
        &self.assistant
    }

    pub fn payment(&self) -> Option<&PaymentPrompt> {
        self.payment.as_ref()
    }

    pub fn last_receipt(&self) -> Option<&PaymentReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl Default for MarketplaceSession {
    fn default() -> Self {
        Self::new(SessionEnv::default())
    }
}

impl std::fmt::Debug for MarketplaceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceSession")
            .field("role", &self.role)
            .field("user", &self.user)
            .field("listings", &self.store.len())
            .field("filter", &self.filter)
            .field("assistant", &self.assistant)
            .field("payment", &self.payment)
            .field("transactions", &self.transactions.len())
            .finish_non_exhaustive()
    }
}
