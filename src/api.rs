//! ==============================================================================
//! api.rs - HTTP Ingestion & Read API
//! ==============================================================================
//!
//! purpose:
//!     the wire surface the ESP32 and the dashboard script talk to.
//!
//! endpoints:
//!     GET  /api/data  -> current Reading verbatim (zeroed default included)
//!     POST /api/data  -> overwrite the slot, 400 on bad JSON / non-numeric fields
//!     GET  /healthz   -> liveness probe
//!     GET  /          -> dashboard page (dashboard.rs)
//!
//! relationships:
//!     - uses: store.rs (ReadingStore trait object)
//!     - uses: domain.rs (Reading, FillStatus)
//!
//! ==============================================================================

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::MonitorConfig;
use crate::dashboard;
use crate::domain::FillStatus;
use crate::store::ReadingStore;

/// Shared application state: the reading slot plus the site configuration.
pub struct AppState {
    pub store: Arc<dyn ReadingStore>,
    pub config: MonitorConfig,
}

/// Build the full router. Separated from serving so tests can drive it
/// in-process.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::page_handler))
        .route("/api/data", get(get_data).post(post_data))
        .route("/healthz", get(healthz))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// liveness probe
async fn healthz() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// current reading, no side effects
async fn get_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.latest().await)
}

/// ingest a reading
///
/// the body is taken raw so an unparseable payload and a parseable payload
/// with wrong field types produce distinct errors, matching what sensor
/// firmware in the field already expects
async fn post_data(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "rejected unparseable body");
            return bad_request("Invalid JSON");
        }
    };

    // typeof-number check only: range is not validated
    let fill_level = value.get("fillLevel").and_then(Value::as_f64);
    let distance = value.get("distance").and_then(Value::as_f64);
    let (Some(fill_level), Some(distance)) = (fill_level, distance) else {
        warn!(body = %value, "rejected non-numeric fields");
        return bad_request("Invalid data");
    };

    let stored = state.store.replace(fill_level, distance).await;
    info!(
        fill_level,
        distance,
        status = ?FillStatus::from_fill_level(fill_level),
        "reading ingested"
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": stored,
        })),
    )
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(AppState {
            store: MemoryStore::shared(),
            config: MonitorConfig::default(),
        }))
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/data")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn get_before_any_post_returns_zeroed_default() {
        let app = test_router();
        let (status, body) = get_json(&app, "/api/data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"fillLevel": 0.0, "distance": 0.0, "timestamp": null})
        );
    }

    #[tokio::test]
    async fn valid_post_is_stored_and_echoed() {
        let app = test_router();
        let (status, body) = post_raw(&app, r#"{"fillLevel": 42.5, "distance": 57.5}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["data"]["fillLevel"], serde_json::json!(42.5));
        assert_eq!(body["data"]["distance"], serde_json::json!(57.5));
        assert!(body["data"]["timestamp"].is_string());

        let (_, fetched) = get_json(&app, "/api/data").await;
        assert_eq!(fetched, body["data"]);
    }

    #[tokio::test]
    async fn second_post_fully_overwrites_the_first() {
        let app = test_router();
        post_raw(&app, r#"{"fillLevel": 10, "distance": 90}"#).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let (_, second) = post_raw(&app, r#"{"fillLevel": 95, "distance": 5}"#).await;

        let (_, fetched) = get_json(&app, "/api/data").await;
        assert_eq!(fetched, second["data"]);
        assert_eq!(fetched["fillLevel"], serde_json::json!(95.0));
    }

    #[tokio::test]
    async fn timestamps_advance_across_posts() {
        let app = test_router();
        let (_, first) = post_raw(&app, r#"{"fillLevel": 1, "distance": 99}"#).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let (_, second) = post_raw(&app, r#"{"fillLevel": 2, "distance": 98}"#).await;

        // fixed-width RFC 3339, so string order is time order
        let a = first["data"]["timestamp"].as_str().unwrap();
        let b = second["data"]["timestamp"].as_str().unwrap();
        assert!(b > a, "expected {b} newer than {a}");
    }

    #[tokio::test]
    async fn string_field_is_rejected_as_invalid_data() {
        let app = test_router();
        let (status, body) = post_raw(&app, r#"{"fillLevel": "80", "distance": 10}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid data"}));
    }

    #[tokio::test]
    async fn missing_field_is_rejected_as_invalid_data() {
        let app = test_router();
        let (status, body) = post_raw(&app, r#"{"fillLevel": 33}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid data"}));
    }

    #[tokio::test]
    async fn rejected_post_does_not_touch_the_slot() {
        let app = test_router();
        post_raw(&app, r#"{"fillLevel": 55, "distance": 45}"#).await;
        post_raw(&app, r#"{"fillLevel": "99", "distance": 1}"#).await;

        let (_, fetched) = get_json(&app, "/api/data").await;
        assert_eq!(fetched["fillLevel"], serde_json::json!(55.0));
    }

    #[tokio::test]
    async fn unparseable_body_is_rejected_as_invalid_json() {
        let app = test_router();
        let (status, body) = post_raw(&app, "fill=80&distance=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid JSON"}));
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let app = test_router();
        let (status, body) = get_json(&app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], serde_json::json!("ok"));
    }

    #[tokio::test]
    async fn dashboard_page_is_served_at_root() {
        let app = test_router();
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Smart Dustbin Monitor"));
        assert!(html.contains("/api/data"));
    }
}
