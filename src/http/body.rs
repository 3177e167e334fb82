use crate::error::PaymentError;
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Parses a JSON body regardless of content type. An empty body yields
/// `T::default()` so field validation reports every required field.
pub fn json_or_default<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, PaymentError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| PaymentError::Validation {
        message: format!("Invalid JSON body: {}", e),
        fields: Vec::new(),
    })
}
