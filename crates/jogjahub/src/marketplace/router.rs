use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CategoryFilter;
use super::domain::{ListingId, ModerationDecision, UserRole};
use super::service::{MarketplaceService, MarketplaceServiceError};
use super::submission::ListingDraft;
use super::view::ViewFilter;
use crate::error::AppError;

/// Router builder exposing the portal session over HTTP.
pub fn marketplace_router(service: Arc<MarketplaceService>) -> Router {
    Router::new()
        .route("/api/v1/session", get(session_handler))
        .route("/api/v1/session/role", post(switch_role_handler))
        .route("/api/v1/session/logout", post(logout_handler))
        .route("/api/v1/session/filter", post(filter_handler))
        .route(
            "/api/v1/listings",
            get(browse_handler).post(submit_handler),
        )
        .route("/api/v1/listings/mine", get(my_listings_handler))
        .route(
            "/api/v1/listings/:listing_id/moderation",
            post(moderation_handler),
        )
        .route(
            "/api/v1/listings/:listing_id/checkout",
            post(checkout_handler),
        )
        .route("/api/v1/curation/summary", get(curation_summary_handler))
        .route("/api/v1/assistant", post(assistant_handler))
        .route("/api/v1/payments/confirm", post(confirm_payment_handler))
        .route("/api/v1/payments/dismiss", post(dismiss_payment_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleRequest {
    pub(crate) role: UserRole,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseParams {
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<CategoryFilter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModerationRequest {
    pub(crate) decision: ModerationDecision,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantRequest {
    pub(crate) query: String,
}

fn error_response(error: MarketplaceServiceError) -> Response {
    AppError::from(error).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, MarketplaceServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler(State(service): State<Arc<MarketplaceService>>) -> Response {
    respond(StatusCode::OK, service.session_view())
}

pub(crate) async fn switch_role_handler(
    State(service): State<Arc<MarketplaceService>>,
    Json(request): Json<RoleRequest>,
) -> Response {
    respond(StatusCode::OK, service.switch_role(request.role))
}

pub(crate) async fn logout_handler(State(service): State<Arc<MarketplaceService>>) -> Response {
    respond(StatusCode::OK, service.logout())
}

pub(crate) async fn filter_handler(
    State(service): State<Arc<MarketplaceService>>,
    Json(filter): Json<ViewFilter>,
) -> Response {
    respond(StatusCode::OK, service.set_filter(filter))
}

pub(crate) async fn browse_handler(
    State(service): State<Arc<MarketplaceService>>,
    Query(params): Query<BrowseParams>,
) -> Response {
    respond(StatusCode::OK, service.browse(params.q, params.category))
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<MarketplaceService>>,
    Json(draft): Json<ListingDraft>,
) -> Response {
    respond(StatusCode::CREATED, service.submit(draft))
}

pub(crate) async fn my_listings_handler(
    State(service): State<Arc<MarketplaceService>>,
) -> Response {
    respond(StatusCode::OK, service.my_listings())
}

pub(crate) async fn moderation_handler(
    State(service): State<Arc<MarketplaceService>>,
    Path(listing_id): Path<String>,
    Json(request): Json<ModerationRequest>,
) -> Response {
    respond(
        StatusCode::OK,
        service.moderate(ListingId(listing_id), request.decision),
    )
}

pub(crate) async fn curation_summary_handler(
    State(service): State<Arc<MarketplaceService>>,
) -> Response {
    respond(StatusCode::OK, service.curation_summary())
}

pub(crate) async fn assistant_handler(
    State(service): State<Arc<MarketplaceService>>,
    Json(request): Json<AssistantRequest>,
) -> Response {
    match service.ask(request.query).await {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn checkout_handler(
    State(service): State<Arc<MarketplaceService>>,
    Path(listing_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.checkout(ListingId(listing_id)))
}

pub(crate) async fn confirm_payment_handler(
    State(service): State<Arc<MarketplaceService>>,
) -> Response {
    respond(StatusCode::OK, service.confirm_payment())
}

pub(crate) async fn dismiss_payment_handler(
    State(service): State<Arc<MarketplaceService>>,
) -> Response {
    respond(StatusCode::OK, service.dismiss_payment())
}
