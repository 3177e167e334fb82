use crate::domain::payment::CreatePaymentRequest;
use crate::error::PaymentError;
use crate::http::body::json_or_default;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentError> {
    let req: CreatePaymentRequest = json_or_default(&body)?;
    let record = state.ingestion_service.ingest_from_submission(req).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Payment data saved successfully",
            "data": record,
        })),
    ))
}

pub async fn list_payments(State(state): State<AppState>) -> Result<impl IntoResponse, PaymentError> {
    let records = state.ingestion_service.list().await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "count": records.len(),
            "data": records,
        })),
    ))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, PaymentError> {
    let record = state.ingestion_service.find(&transaction_id).await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": record,
        })),
    ))
}
