//! Webhook server. Receives platform scam alerts and async feed results.
//!
//! Errors are caught at the handler boundary and converted to a generic
//! JSON error response; screening itself never panics the server.

use crate::adapters::intel::extract::FeedResultsPayload;
use crate::domain::DomainError;
use crate::ports::CallGatewayPort;
use crate::usecases::{IntelligenceService, ScreeningService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub screening: Arc<ScreeningService>,
    pub intel: Arc<IntelligenceService>,
    pub gateway: Arc<dyn CallGatewayPort>,
}

/// Platform scam-alert webhook body.
#[derive(Debug, Deserialize)]
pub struct ScamAlertPayload {
    pub scam: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub call_id: Option<String>,
}

/// Starts the webhook server. Runs until SIGINT (Ctrl+C).
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), DomainError> {
    // All origins/methods/headers allowed; the platform posts cross-origin.
    let cors = CorsLayer::permissive();

    let router = Router::new()
        .route("/health", get(handle_health))
        .route("/scam-alerts", post(handle_scam_alert))
        .route("/collector-results", post(handle_collector_results))
        .route("/calls/{id}", get(handle_get_call))
        .layer(cors)
        .with_state(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::Server(e.to_string()))?;
    info!("Starting webhook server at {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DomainError::Server(e.to_string()))
}

/// Completes when SIGINT (Ctrl+C) is received.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

fn error_response(e: DomainError) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": e.to_string() })),
    )
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "callshield webhook" }))
}

async fn handle_scam_alert(
    State(state): State<AppState>,
    Json(payload): Json<ScamAlertPayload>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(
        scam = payload.scam,
        call_id = ?payload.call_id,
        "scam-alert webhook received"
    );
    let outcome = state
        .screening
        .handle_scam_alert(
            payload.call_id.as_deref(),
            payload.scam,
            &payload.reason,
            &payload.transcript,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(json!({
        "status": "ok",
        "decision": outcome.decision,
    })))
}

async fn handle_collector_results(
    State(state): State<AppState>,
    Json(payload): Json<FeedResultsPayload>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(snapshot_id = ?payload.snapshot_id, "collector webhook received");
    let snapshot_id = payload.snapshot_id.clone();
    let processed = state
        .intel
        .process_feed_results(payload)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Processed {} articles", processed),
        "snapshot_id": snapshot_id,
    })))
}

async fn handle_get_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let call = state.gateway.get_call(&id).await.map_err(error_response)?;
    match call {
        Some(record) => Ok(Json(json!(record))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "error", "message": "call not found" })),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::enhancement::HeuristicEnhancer;
    use crate::adapters::intel::SimFeed;
    use crate::adapters::persistence::{CallLog, PatternStore, SeedData, StateJson};
    use crate::adapters::telephony::SimCallGateway;
    use crate::domain::PatternIndex;
    use crate::usecases::ReportService;
    use tokio::sync::RwLock;

    async fn app_state(dir: &std::path::Path) -> AppState {
        let index = Arc::new(RwLock::new(PatternIndex::new()));
        let store = Arc::new(PatternStore::new(dir.join("patterns.json")));
        let state = Arc::new(StateJson::new(dir.join("state.json")));
        state.load().await.unwrap();

        let gateway: Arc<dyn CallGatewayPort> = Arc::new(SimCallGateway::new(
            "+1-555-0100".to_string(),
            "+1-555-0199".to_string(),
        ));

        let intel = Arc::new(IntelligenceService::new(
            vec![Arc::new(SimFeed::new())],
            store,
            state,
            Arc::clone(&index),
            SeedData::new(dir),
            dir.to_path_buf(),
        ));
        let screening = Arc::new(ScreeningService::new(
            Arc::clone(&gateway),
            Arc::new(HeuristicEnhancer::with_delay(0)),
            None,
            Arc::new(CallLog::new(dir.join("calls"))),
            index,
            Arc::new(ReportService::new(dir.join("reports"))),
            0.7,
            5,
        ));

        AppState {
            screening,
            intel,
            gateway,
        }
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let body = handle_health().await;
        assert_eq!(body.0["status"], "healthy");
    }

    #[tokio::test]
    async fn unknown_call_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path()).await;

        let err = handle_get_call(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn safe_scam_alert_returns_ok_without_decision() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path()).await;

        let payload = ScamAlertPayload {
            scam: false,
            reason: "verified caller".to_string(),
            transcript: "confirming the appointment".to_string(),
            call_id: None,
        };
        let body = handle_scam_alert(State(state), Json(payload))
            .await
            .unwrap();
        assert_eq!(body.0["status"], "ok");
        assert!(body.0["decision"].is_null());
    }

    #[tokio::test]
    async fn collector_results_report_processed_count() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path()).await;

        let payload = FeedResultsPayload {
            snapshot_id: Some("snap_9".to_string()),
            data: Vec::new(),
        };
        let body = handle_collector_results(State(state), Json(payload))
            .await
            .unwrap();
        assert_eq!(body.0["status"], "success");
        assert_eq!(body.0["snapshot_id"], "snap_9");
    }
}
