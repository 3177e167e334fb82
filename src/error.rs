use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("payment with transaction_id '{0}' already exists")]
    DuplicateKey(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Other(String),
}

/// Provider call that produced an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamCall {
    ListProducts,
    CreateTransaction,
}

impl UpstreamCall {
    pub fn failure_message(&self) -> &'static str {
        match self {
            UpstreamCall::ListProducts => "Failed to fetch Paddle products",
            UpstreamCall::CreateTransaction => "Failed to create checkout session",
        }
    }
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Payment with this transaction ID already exists")]
    Duplicate { transaction_id: String },

    #[error("Payment not found")]
    NotFound,

    #[error("{0}")]
    Configuration(String),

    #[error("{}: provider returned {status}", .call.failure_message())]
    Upstream {
        call: UpstreamCall,
        status: u16,
        body: serde_json::Value,
    },

    #[error("No checkout URL returned")]
    MissingCheckoutUrl,

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl PaymentError {
    pub fn validation(fields: Vec<String>) -> Self {
        PaymentError::Validation {
            message: format!("Missing or invalid fields: {}", fields.join(", ")),
            fields,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Validation { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Duplicate { .. } => StatusCode::CONFLICT,
            PaymentError::NotFound => StatusCode::NOT_FOUND,
            PaymentError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            PaymentError::Configuration(_)
            | PaymentError::MissingCheckoutUrl
            | PaymentError::Transport(_)
            | PaymentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            PaymentError::Validation { message, fields } => json!({
                "error": message,
                "fields": fields,
            }),
            PaymentError::Upstream { call, status, body } => json!({
                "error": call.failure_message(),
                "status": status,
                "details": body,
            }),
            PaymentError::MissingCheckoutUrl => json!({
                "error": self.to_string(),
                "message": "Please configure Paddle Dashboard URLs",
            }),
            PaymentError::Transport(_) | PaymentError::Storage(_) => json!({
                "error": "Internal server error",
                "message": self.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl From<StoreError> for PaymentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(transaction_id) => PaymentError::Duplicate { transaction_id },
            other => PaymentError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
