use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;

use super::catalog::CategoryFilter;
use super::domain::{Listing, ListingId, ModerationDecision, User, UserRole};
use super::session::{AssistantPanel, MarketplaceSession, SessionError, SessionEvent};
use super::submission::ListingDraft;
use super::view::{visible_listings, CurationSummary, ViewFilter, ViewMode};
use crate::assistant::TravelAssistant;
use crate::payment::{PaymentPrompt, PaymentReceipt};

/// Shared portal session plus the assistant gateway, as served over HTTP.
pub struct MarketplaceService {
    session: Mutex<MarketplaceSession>,
    assistant: TravelAssistant,
}

/// Public snapshot of who is browsing and what they see.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub role: UserRole,
    pub role_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub mode: ViewMode,
    pub filter: ViewFilter,
    pub assistant: AssistantPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentPrompt>,
}

impl SessionView {
    fn of(session: &MarketplaceSession) -> Self {
        Self {
            role: session.role(),
            role_label: session.role().label(),
            user: session.user().cloned(),
            mode: session.mode(),
            filter: session.filter().clone(),
            assistant: session.assistant().clone(),
            payment: session.payment().cloned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketplaceServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("session state unavailable")]
    StateUnavailable,
}

impl MarketplaceService {
    pub fn new(session: MarketplaceSession, assistant: TravelAssistant) -> Self {
        Self {
            session: Mutex::new(session),
            assistant,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MarketplaceSession>, MarketplaceServiceError> {
        self.session
            .lock()
            .map_err(|_| MarketplaceServiceError::StateUnavailable)
    }

    pub fn session_view(&self) -> Result<SessionView, MarketplaceServiceError> {
        let session = self.lock()?;
        Ok(SessionView::of(&session))
    }

    pub fn switch_role(&self, role: UserRole) -> Result<SessionView, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::SwitchRole(role))?;
        Ok(SessionView::of(&session))
    }

    pub fn logout(&self) -> Result<SessionView, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::Logout)?;
        Ok(SessionView::of(&session))
    }

    /// Stores the browse controls for later requests.
    pub fn set_filter(&self, filter: ViewFilter) -> Result<SessionView, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::SetQuery(filter.query))?;
        session.dispatch(SessionEvent::SetCategory(filter.category))?;
        Ok(SessionView::of(&session))
    }

    /// Visible listings for the active role. Overrides apply to this call only.
    pub fn browse(
        &self,
        query: Option<String>,
        category: Option<CategoryFilter>,
    ) -> Result<Vec<Listing>, MarketplaceServiceError> {
        let session = self.lock()?;
        let current = session.filter();
        let filter = ViewFilter {
            query: query.unwrap_or_else(|| current.query.clone()),
            category: category.unwrap_or(current.category),
        };
        Ok(visible_listings(session.listings(), &filter, session.role())
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn submit(&self, draft: ListingDraft) -> Result<Listing, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::SubmitListing(draft))?;
        session
            .listings()
            .first()
            .cloned()
            .ok_or(MarketplaceServiceError::StateUnavailable)
    }

    pub fn my_listings(&self) -> Result<Vec<Listing>, MarketplaceServiceError> {
        let session = self.lock()?;
        Ok(session.my_listings().into_iter().cloned().collect())
    }

    pub fn moderate(
        &self,
        id: ListingId,
        decision: ModerationDecision,
    ) -> Result<Listing, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::Moderate {
            id: id.clone(),
            decision,
        })?;
        session
            .store()
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::ListingNotFound(id).into())
    }

    pub fn curation_summary(&self) -> Result<CurationSummary, MarketplaceServiceError> {
        Ok(self.lock()?.curation_summary())
    }

    /// Sends `query` to the assistant and stores the answer.
    ///
    /// The session lock is released while the assistant is working, so
    /// overlapping questions race and the last answer to arrive is kept.
    pub async fn ask(&self, query: String) -> Result<String, MarketplaceServiceError> {
        if query.is_empty() {
            return Err(SessionError::EmptyQuery.into());
        }
        {
            let mut session = self.lock()?;
            session.dispatch(SessionEvent::SetQuery(query.clone()))?;
            session.dispatch(SessionEvent::AssistantRequested)?;
        }

        let answer = self.assistant.respond(&query).await;

        let mut session = self.lock()?;
        session.dispatch(SessionEvent::AssistantAnswered(answer.clone()))?;
        Ok(answer)
    }

    pub fn checkout(&self, id: ListingId) -> Result<PaymentPrompt, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::SelectListing(id))?;
        session
            .payment()
            .cloned()
            .ok_or(MarketplaceServiceError::Session(SessionError::NoOpenPayment))
    }

    pub fn confirm_payment(&self) -> Result<PaymentReceipt, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::ConfirmPayment { at: Utc::now() })?;
        session
            .last_receipt()
            .cloned()
            .ok_or(MarketplaceServiceError::Session(SessionError::NoOpenPayment))
    }

    pub fn dismiss_payment(&self) -> Result<SessionView, MarketplaceServiceError> {
        let mut session = self.lock()?;
        session.dispatch(SessionEvent::DismissPayment)?;
        Ok(SessionView::of(&session))
    }
}
