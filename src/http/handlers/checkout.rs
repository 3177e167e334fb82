use crate::domain::plan::CheckoutRequest;
use crate::error::PaymentError;
use crate::http::body::json_or_default;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentError> {
    let req: CheckoutRequest = json_or_default(&body)?;
    // a non-string price_id is treated as missing
    let price_id = req
        .price_id
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    let session = state
        .provider
        .create_transaction(price_id, req.success_url.as_deref())
        .await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": session,
        })),
    ))
}
