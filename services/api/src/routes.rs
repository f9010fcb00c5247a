use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use jogjahub::marketplace::{filter_options, marketplace_router, MarketplaceService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_portal_routes(service: Arc<MarketplaceService>) -> axum::Router {
    marketplace_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/categories", axum::routing::get(categories_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Labels for the category filter control.
pub(crate) async fn categories_endpoint() -> Json<serde_json::Value> {
    let labels: Vec<&'static str> = filter_options()
        .iter()
        .map(|filter| filter.label())
        .collect();
    Json(json!({ "categories": labels }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::portal_service;
    use axum::body::Body;
    use axum::http::Request;
    use jogjahub::config::AssistantConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn categories_lists_nine_labels_starting_with_all() {
        let Json(body) = categories_endpoint().await;
        let labels = body["categories"].as_array().expect("array");
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "All");
    }

    #[tokio::test]
    async fn portal_routes_include_marketplace_api() {
        let service = Arc::new(portal_service(&AssistantConfig::default()));
        let response = with_portal_routes(service)
            .oneshot(
                Request::get("/api/v1/listings?q=becak")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body[0]["name"], "Sewa Becak Listrik Malioboro");
    }
}
