use crate::service::ingestion_service::WebhookOutcome;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

/// Paddle retries until it sees a 200, and a retry cannot repair an internal
/// fault, so every delivery is acknowledged regardless of outcome.
pub async fn receive(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, bytes = body.len(), "unparseable paddle webhook body");
            return ack();
        }
    };

    tracing::info!(
        event_type = ?crate::domain::webhook::event_type(&event),
        event_id = ?event.get("event_id").and_then(|v| v.as_str()),
        "paddle webhook received"
    );

    match state.ingestion_service.ingest_from_webhook(&event).await {
        WebhookOutcome::Failed { .. } | WebhookOutcome::Rejected { .. } => {
            tracing::warn!("webhook acknowledged despite processing failure");
        }
        _ => {}
    }

    ack()
}

fn ack() -> axum::response::Response {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "received": true })),
    )
        .into_response()
}
