//! Matrix JSON API tests, driven in-process through the router
//!
//! Run with: cargo test --features server --test server

#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use permatrix::server::router;

async fn call(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = router().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Read-only routes
// ============================================================================

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = call("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn modules_lists_hr_roots() {
    let (status, body) = call("GET", "/api/modules", None).await;
    assert_eq!(status, StatusCode::OK);
    let roots = body["data"].as_array().unwrap();
    assert_eq!(roots[0]["id"], "dashboard");
    assert!(roots.iter().any(|m| m["id"] == "employees" && m["supportsDownload"] == true));
}

// ============================================================================
// Map actions
// ============================================================================

#[tokio::test]
async fn toggle_cascades_through_subtree() {
    let (status, body) = call(
        "POST",
        "/api/toggle",
        Some(json!({"moduleId": "companies", "field": "edit", "value": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let docs = &body["data"]["permissions"]["companyDocuments"];
    assert_eq!(docs["isView"], true);
    assert_eq!(docs["isCreate"], true);
    assert_eq!(docs["isEdit"], true);
    assert_eq!(docs["isDelete"], false);
    assert_eq!(body["data"]["allFullChecked"], false);
}

#[tokio::test]
async fn toggle_unknown_module_is_not_found() {
    let (status, body) = call(
        "POST",
        "/api/toggle",
        Some(json!({"moduleId": "payroll", "field": "view", "value": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("payroll"));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn full_on_unknown_module_is_not_found() {
    let (status, _) =
        call("POST", "/api/full", Some(json!({"moduleId": "payroll", "value": true}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn select_all_checks_header() {
    let (status, body) = call("POST", "/api/select-all", Some(json!({"value": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allFullChecked"], true);
    assert_eq!(body["data"]["permissions"]["settings"]["isDownload"], false);
    assert_eq!(body["data"]["permissions"]["employees"]["isDownload"], true);
}

#[tokio::test]
async fn rows_hide_children_without_parent_view() {
    let (status, body) = call(
        "POST",
        "/api/rows",
        Some(json!({"permissions": {"settings": {"isView": true}, "users": {"isView": true}}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> =
        body["data"]["rows"].as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&"users"));
    assert!(!ids.contains(&"employeeProfiles"));
}

// ============================================================================
// Normalization
// ============================================================================

#[tokio::test]
async fn normalize_legacy_shape() {
    let (status, body) = call(
        "POST",
        "/api/normalize",
        Some(json!({"permissions": {"employeeLoans": {"full": true}}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let loans = &body["data"]["permissions"]["employeeLoans"];
    assert_eq!(loans["isDelete"], true);
    assert_eq!(loans["isDownload"], false);
}

#[tokio::test]
async fn normalize_non_object_is_bad_request() {
    let (status, body) =
        call("POST", "/api/normalize", Some(json!({"permissions": "everything"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
