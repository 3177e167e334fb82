use crate::error::PaymentError;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, PaymentError> {
    let plans = state.provider.list_products_with_prices().await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "count": plans.len(),
            "data": plans,
        })),
    ))
}
