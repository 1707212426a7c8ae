//! API route definitions

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::server::AppState;
use super::websocket;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let ws_path = state.config.hub.ws_path.clone();

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/api/status", get(handlers::health::status))
        // Observer feed
        .route(&ws_path, get(websocket::monitoring::monitoring_ws))
        // Producer entry points
        .nest("/api", producer_routes())
        .with_state(state)
}

/// Routes producers call to publish events
fn producer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/dashboard",
            get(handlers::dashboard::get_dashboard).put(handlers::dashboard::publish_dashboard),
        )
        .route(
            "/events/health/:service_id",
            post(handlers::events::publish_health),
        )
        .route(
            "/events/metrics/:service_id",
            post(handlers::events::publish_metrics),
        )
        .route("/events/incidents", post(handlers::events::publish_incident))
        .route("/events/actions", post(handlers::events::publish_action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::config::{ApiServerConfig, Config, HubConfig, LogConfig};
    use crate::hub::{Connection, ConnectionHandler, ConnectionSink, DashboardStore, Frame, NotificationHub};
    use crate::models::DashboardSummary;

    fn test_state() -> AppState {
        let config = Config {
            api: ApiServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_origins: vec![],
            },
            hub: HubConfig {
                ws_path: "/ws/monitoring".to_string(),
                ws_buffer_size: 16,
            },
            log: LogConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };
        let store = Arc::new(DashboardStore::default());
        let hub = NotificationHub::new(store.clone());
        AppState::new(config, hub, store)
    }

    fn observer(state: &AppState, id: &str, subscription: Option<i64>) -> mpsc::Receiver<Frame> {
        let (tx, mut rx) = mpsc::channel(16);
        state.hub.on_connect(Connection::new(id, ConnectionSink::new(tx)));
        state.hub.registry().set_subscription(id, subscription);
        // initial dashboard
        let _ = rx.try_recv();
        rx
    }

    async fn send(app: Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn metrics_body(service_id: i64) -> Value {
        json!({
            "serviceId": service_id,
            "cpuUsage": 12.5,
            "memoryUsage": 40.0,
            "requestRate": 220.0,
            "errorRate": 0.0,
            "avgLatencyMs": 18.0,
            "recordedAt": "2026-05-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_status_reports_connection_count() {
        let state = test_state();
        let _a = observer(&state, "a", None);
        let _b = observer(&state, "b", None);

        let (status, body) = send(create_router(state), Method::GET, "/api/status", Value::Null).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activeConnections"], 2);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_publish_metrics_reaches_subscriber() {
        let state = test_state();
        let mut a = observer(&state, "a", None);
        let mut b = observer(&state, "b", Some(7));

        let (status, body) = send(
            create_router(state),
            Method::POST,
            "/api/events/metrics/7",
            metrics_body(7),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["delivered"], 1);
        assert!(a.try_recv().is_err());
        let frame: Value = serde_json::from_str(&b.try_recv().unwrap()).unwrap();
        assert_eq!(frame["type"], "METRICS_UPDATE");
        assert_eq!(frame["data"]["cpuUsage"], 12.5);
    }

    #[tokio::test]
    async fn test_publish_metrics_rejects_mismatched_service() {
        let state = test_state();
        let mut b = observer(&state, "b", Some(7));

        let (status, body) = send(
            create_router(state),
            Method::POST,
            "/api/events/metrics/7",
            metrics_body(9),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("serviceId"));
        assert!(b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_incident_reaches_everyone() {
        let state = test_state();
        let mut a = observer(&state, "a", None);
        let mut b = observer(&state, "b", Some(3));

        let (status, body) = send(
            create_router(state),
            Method::POST,
            "/api/events/incidents",
            json!({
                "id": 5,
                "serviceId": 3,
                "title": "disk full",
                "severity": "CRITICAL",
                "status": "OPEN",
                "createdAt": "2026-05-01T10:00:00Z"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["delivered"], 2);
        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_publish_dashboard_updates_store_and_broadcasts() {
        let state = test_state();
        let store = state.dashboard.clone();
        let mut a = observer(&state, "a", Some(1));
        let summary = DashboardSummary {
            total_services: 12,
            open_incidents: 2,
            ..Default::default()
        };

        let (status, _) = send(
            create_router(state.clone()),
            Method::PUT,
            "/api/dashboard",
            serde_json::to_value(&summary).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.current().total_services, 12);
        let frame: Value = serde_json::from_str(&a.try_recv().unwrap()).unwrap();
        assert_eq!(frame["type"], "DASHBOARD_UPDATE");
        assert_eq!(frame["data"]["openIncidents"], 2);

        let (status, body) = send(create_router(state), Method::GET, "/api/dashboard", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalServices"], 12);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(create_router(test_state()), Method::GET, "/health", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
