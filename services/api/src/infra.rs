use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use jogjahub::assistant::TravelAssistant;
use jogjahub::config::AssistantConfig;
use jogjahub::marketplace::{MarketplaceService, MarketplaceSession, SessionEnv, UserRole};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seeded portal session with random listing ids and the configured assistant.
pub(crate) fn portal_service(config: &AssistantConfig) -> MarketplaceService {
    let session = MarketplaceSession::new(SessionEnv::default());
    MarketplaceService::new(session, TravelAssistant::from_config(config))
}

pub(crate) fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse::<UserRole>().map_err(|err| {
        format!("{err}; expected one of wisatawan, pelaku-usaha, admin-dinas, super-admin")
    })
}
