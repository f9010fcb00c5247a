use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::assistant::UNAVAILABLE_MESSAGE;
use crate::marketplace::domain::UserRole;
use crate::marketplace::router::{self, marketplace_router};
use crate::marketplace::service::MarketplaceService;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("json")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

async fn send(service: &Arc<MarketplaceService>, request: Request<Body>) -> (StatusCode, Value) {
    let response = marketplace_router(service.clone())
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

#[tokio::test]
async fn browse_route_filters_by_query_for_tourists() {
    let service = build_service(None);
    let (status, body) = send(&service, get("/api/v1/listings?q=bakpia")).await;

    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().expect("array body");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["name"], "Bakpia Pathok 25 Premium");
    assert_eq!(listings[0]["status"], "APPROVED");
}

#[tokio::test]
async fn browse_route_accepts_category_labels() {
    let service = build_service(None);
    let (status, body) = send(&service, get("/api/v1/listings?category=Museum")).await;

    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().expect("array body");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["category"], "Museum");
}

#[tokio::test]
async fn submit_route_returns_created_pending_listing() {
    let service = build_service(None);
    send(&service, post_json("/api/v1/session/role", json!({ "role": "PELAKU_USAHA" }))).await;

    let (status, body) = send(
        &service,
        post_json(
            "/api/v1/listings",
            json!({ "name": "Tiket Workshop Batik", "category": "Event", "price": 125000 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Tiket Workshop Batik");
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["is_approved"], false);
    assert_eq!(body["owner_id"], "u1");

    let (_, mine) = send(&service, get("/api/v1/listings/mine")).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn moderation_route_is_forbidden_for_tourists() {
    let service = build_service(None);
    let (status, body) = send(
        &service,
        post_json("/api/v1/listings/1/moderation", json!({ "decision": "DISAPPROVED" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn moderation_route_updates_status_for_admins() {
    let service = build_service(None);
    service
        .switch_role(UserRole::AdminDinas)
        .expect("role switch");

    let (status, body) = send(
        &service,
        post_json("/api/v1/listings/2/moderation", json!({ "decision": "CORRECTION" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CORRECTION");
    assert_eq!(body["is_approved"], false);

    let (status, _) = send(
        &service,
        post_json("/api/v1/listings/missing/moderation", json!({ "decision": "APPROVED" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, summary) = send(&service, get("/api/v1/curation/summary")).await;
    assert_eq!(summary["approved"], 3);
    assert_eq!(summary["pending"], 0);
}

#[tokio::test]
async fn assistant_route_falls_back_without_credentials() {
    let service = build_service(None);
    let (status, body) = send(
        &service,
        post_json("/api/v1/assistant", json!({ "query": "apa saja wisata di jogja" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], UNAVAILABLE_MESSAGE);
    let view = service.session_view().expect("session readable");
    assert_eq!(view.assistant.answer, UNAVAILABLE_MESSAGE);
    assert!(!view.assistant.pending);
}

#[tokio::test]
async fn assistant_route_rejects_empty_questions() {
    let generator = Arc::new(CannedGenerator::replying("unused"));
    let service = build_service(Some(generator.clone()));
    let (status, _) = send(
        &service,
        post_json("/api/v1/session/filter", json!({ "query": "bakpia" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&service, post_json("/api/v1/assistant", json!({ "query": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(generator.calls(), 0);
    let (_, view) = send(&service, get("/api/v1/session")).await;
    assert_eq!(view["filter"]["query"], "bakpia");
    assert_eq!(view["assistant"]["pending"], false);
}

#[tokio::test]
async fn assistant_handler_returns_generated_answer() {
    let generator = Arc::new(CannedGenerator::replying("Sugeng rawuh ing Ngayogyakarta!"));
    let service = build_service(Some(generator.clone()));

    let response = router::assistant_handler(
        State(service.clone()),
        axum::Json(router::AssistantRequest {
            query: "halo".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["answer"], "Sugeng rawuh ing Ngayogyakarta!");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn checkout_and_confirm_round_trip() {
    let service = build_service(None);

    let (status, _) = send(&service, post_json("/api/v1/payments/confirm", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, prompt) = send(&service, post_json("/api/v1/listings/4/checkout", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prompt["amount"], 50_000);
    let reference = prompt["reference"].as_str().expect("reference").to_string();
    assert!(reference.starts_with("JH-"));

    let (status, receipt) = send(&service, post_json("/api/v1/payments/confirm", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["transaction"]["transaction_no"], reference.as_str());
    assert_eq!(receipt["transaction"]["status"], "PAID");
    assert_eq!(receipt["transaction"]["payment_method"], "QRIS");

    let (status, _) = send(&service, post_json("/api/v1/listings/nope/checkout", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_route_reports_mode_and_user() {
    let service = build_service(None);
    send(&service, post_json("/api/v1/session/role", json!({ "role": "SUPER_ADMIN" }))).await;

    let (status, body) = send(&service, get("/api/v1/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "SUPER_ADMIN");
    assert_eq!(body["mode"], "curation_dashboard");
    assert_eq!(body["user"]["name"], "Super Admin");

    let (_, body) = send(&service, post_json("/api/v1/session/logout", json!({}))).await;
    assert!(body.get("user").is_none());
}
