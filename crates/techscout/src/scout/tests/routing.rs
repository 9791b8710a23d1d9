use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::scout::router::{scout_router, ScoutState};
use crate::scout::service::CampaignManager;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn build_router() -> (axum::Router, MemoryInvitationStore) {
    let store = MemoryInvitationStore::default();
    let state = ScoutState::new(Arc::new(store.clone()));
    (scout_router(Arc::new(state)), store)
}

fn post_json(uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn bulk_campaign_route_reports_created_and_skipped() {
    let (router, _store) = build_router();

    let payload = json!({
        "company": "company-7",
        "recipients": ["student-a", "student-b"],
        "job_posting": "job-42",
        "message": "come build with us",
    });

    let response = router
        .oneshot(post_json("/api/v1/scout/campaigns", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["created_count"], 2);
    assert!(body["campaign_id"].as_str().is_some());
    assert_eq!(body["skipped"].as_array().expect("skipped array").len(), 0);
}

#[tokio::test]
async fn duplicate_individual_invitation_maps_to_conflict() {
    let (router, store) = build_router();

    let manager = CampaignManager::new(Arc::new(store));
    manager
        .create_individual(company(), student("a"), job_posting(), "hi".to_string())
        .expect("existing invitation");

    let payload = json!({
        "company": "company-7",
        "student": "student-a",
        "job_posting": "job-42",
        "message": "hello again",
    });

    let response = router
        .oneshot(post_json("/api/v1/scout/invitations", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn respond_route_applies_the_decision() {
    let (router, store) = build_router();
    let manager = CampaignManager::new(Arc::new(store));
    let invitation = manager
        .create_individual(company(), student("a"), job_posting(), "hi".to_string())
        .expect("created");

    let payload = json!({ "student": "student-a", "decision": "accept" });
    let uri = format!("/api/v1/scout/invitations/{}/response", invitation.id);

    let response = router
        .oneshot(post_json(&uri, &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "accepted");
    assert!(body["responded_at"].as_str().is_some());
}

#[tokio::test]
async fn respond_route_rejects_the_wrong_student() {
    let (router, store) = build_router();
    let manager = CampaignManager::new(Arc::new(store));
    let invitation = manager
        .create_individual(company(), student("a"), job_posting(), "hi".to_string())
        .expect("created");

    let payload = json!({ "student": "student-z", "decision": "accept" });
    let uri = format!("/api/v1/scout/invitations/{}/response", invitation.id);

    let response = router
        .oneshot(post_json(&uri, &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stats_route_returns_not_found_for_unknown_campaigns() {
    let (router, _store) = build_router();

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/scout/campaigns/cmp-ghost/stats")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_route_deletes_sent_invitations() {
    let (router, store) = build_router();
    let manager = CampaignManager::new(Arc::new(store.clone()));
    let invitation = manager
        .create_individual(company(), student("a"), job_posting(), "hi".to_string())
        .expect("created");

    let payload = json!({ "company": "company-7" });
    let uri = format!("/api/v1/scout/invitations/{}/cancel", invitation.id);

    let response = router
        .oneshot(post_json(&uri, &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.get(&invitation.id).is_none());
}
