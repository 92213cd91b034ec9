//! Matrix JSON API
//!
//! Stateless routes over the built-in HR tree. The client posts its current
//! map with each action and gets the next map (or rows) back.
//!
//! Endpoints:
//!   GET  /health           - Health check
//!   GET  /api/modules      - Module tree
//!   POST /api/toggle       - Toggle one field on a module and its subtree
//!   POST /api/full         - Toggle the row "Full" checkbox
//!   POST /api/select-all   - Grant or clear everything
//!   POST /api/rows         - Visible rows for a map
//!   POST /api/normalize    - Normalize a stored (possibly legacy) map
//!
//! Errors map to status codes: unknown module 404, undecodable input 400,
//! anything else 500.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cascade::{apply_full, apply_toggle, is_all_full_checked, select_all_full};
use crate::error::{PermatrixError, Result};
use crate::grant::Field;
use crate::legacy::normalize_permissions;
use crate::map::PermissionMap;
use crate::matrix::{rows, MatrixRow};
use crate::tree::{Module, ModuleTree};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleReq {
    #[serde(default)]
    permissions: PermissionMap,
    module_id: String,
    field: Field,
    value: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullReq {
    #[serde(default)]
    permissions: PermissionMap,
    module_id: String,
    value: bool,
}

#[derive(Deserialize)]
struct SelectAllReq {
    value: bool,
}

#[derive(Deserialize)]
struct RowsReq {
    #[serde(default)]
    permissions: PermissionMap,
}

#[derive(Deserialize)]
struct NormalizeReq {
    #[serde(default)]
    permissions: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapRes {
    permissions: PermissionMap,
    all_full_checked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowsRes {
    rows: Vec<MatrixRow>,
    all_full_checked: bool,
}

#[derive(Serialize)]
struct HealthRes {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn reply<T>(r: Result<T>) -> Reply<T> {
    match r {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))),
        Err(e) => {
            let status = match e {
                PermatrixError::ModuleNotFound(_) => StatusCode::NOT_FOUND,
                PermatrixError::Decode(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ApiResponse::err(e.to_string())))
        }
    }
}

fn map_res(tree: &ModuleTree, permissions: PermissionMap) -> MapRes {
    MapRes { all_full_checked: is_all_full_checked(tree, &permissions), permissions }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthRes> {
    Json(HealthRes { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

async fn get_modules() -> Json<ApiResponse<&'static [Module]>> {
    Json(ApiResponse::ok(ModuleTree::hr().roots()))
}

async fn post_toggle(Json(r): Json<ToggleReq>) -> Reply<MapRes> {
    let tree = ModuleTree::hr();
    reply(
        apply_toggle(tree, &r.permissions, &r.module_id, r.field, r.value)
            .map(|m| map_res(tree, m)),
    )
}

async fn post_full(Json(r): Json<FullReq>) -> Reply<MapRes> {
    let tree = ModuleTree::hr();
    reply(apply_full(tree, &r.permissions, &r.module_id, r.value).map(|m| map_res(tree, m)))
}

async fn post_select_all(Json(r): Json<SelectAllReq>) -> Reply<MapRes> {
    let tree = ModuleTree::hr();
    reply(Ok(map_res(tree, select_all_full(tree, r.value))))
}

async fn post_rows(Json(r): Json<RowsReq>) -> Reply<RowsRes> {
    let tree = ModuleTree::hr();
    reply(Ok(RowsRes {
        rows: rows(tree, &r.permissions),
        all_full_checked: is_all_full_checked(tree, &r.permissions),
    }))
}

async fn post_normalize(Json(r): Json<NormalizeReq>) -> Reply<MapRes> {
    let tree = ModuleTree::hr();
    reply(normalize_permissions(tree, &r.permissions).map(|m| map_res(tree, m)))
}

/// All routes with CORS and request tracing
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/modules", get(get_modules))
        .route("/api/toggle", post(post_toggle))
        .route("/api/full", post(post_full))
        .route("/api/select-all", post(post_select_all))
        .route("/api/rows", post(post_rows))
        .route("/api/normalize", post(post_normalize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
