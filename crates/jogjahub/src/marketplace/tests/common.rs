use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::assistant::{GenerationError, GenerationRequest, TextGenerator, TravelAssistant};
use crate::marketplace::auth::MockAuthProvider;
use crate::marketplace::ids::SequentialIds;
use crate::marketplace::service::MarketplaceService;
use crate::marketplace::session::{MarketplaceSession, SessionEnv};

pub(super) fn test_env() -> SessionEnv {
    SessionEnv::new(
        Arc::new(SequentialIds::default()),
        Arc::new(MockAuthProvider::default()),
        StdRng::seed_from_u64(2024),
    )
}

pub(super) fn session() -> MarketplaceSession {
    MarketplaceSession::new(test_env())
}

/// Generator answering every question with a fixed reply and counting calls.
#[derive(Default)]
pub(super) struct CannedGenerator {
    pub(super) reply: String,
    pub(super) calls: AtomicUsize,
}

impl CannedGenerator {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

pub(super) fn build_service(generator: Option<Arc<CannedGenerator>>) -> Arc<MarketplaceService> {
    let assistant = match generator {
        Some(generator) => TravelAssistant::new(generator, "test-model"),
        None => TravelAssistant::unconfigured(),
    };
    Arc::new(MarketplaceService::new(session(), assistant))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
