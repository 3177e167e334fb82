use crate::http::handlers::{checkout, ops, payments, plans, webhook};
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(ops::welcome))
        .route("/ops/liveness", get(ops::liveness))
        .route("/ops/readiness", get(ops::readiness))
        .route("/api/plans", get(plans::list_plans))
        .route("/api/checkout", post(checkout::create_checkout))
        // large deliveries must still be acknowledged
        .route(
            "/api/paddle/webhook",
            post(webhook::receive).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/payments",
            post(payments::create_payment).get(payments::list_payments),
        )
        .route("/api/payments/:transaction_id", get(payments::get_payment))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
