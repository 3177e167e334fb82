use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Raw provider payload kept for audit. Objects are the shape Paddle sends;
/// anything else is preserved untouched as `Raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    Document(serde_json::Map<String, serde_json::Value>),
    Raw(serde_json::Value),
}

impl Default for ProviderPayload {
    fn default() -> Self {
        ProviderPayload::Document(serde_json::Map::new())
    }
}

impl From<serde_json::Value> for ProviderPayload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => ProviderPayload::Document(map),
            serde_json::Value::Null => ProviderPayload::default(),
            other => ProviderPayload::Raw(other),
        }
    }
}

impl ProviderPayload {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ProviderPayload::Document(map) => serde_json::Value::Object(map.clone()),
            ProviderPayload::Raw(v) => v.clone(),
        }
    }
}

/// Candidate record produced by ingestion, before the store stamps `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub transaction_id: String,
    pub price_id: String,
    pub customer_email: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub provider_response: ProviderPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub transaction_id: String,
    pub price_id: String,
    pub customer_email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub provider_response: ProviderPayload,
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn from_new(new: NewPayment, created_at: DateTime<Utc>) -> Self {
        Self {
            transaction_id: new.transaction_id,
            price_id: new.price_id,
            customer_email: new.customer_email,
            amount: new.amount,
            currency: new.currency,
            status: new.status,
            provider_response: new.provider_response,
            created_at,
        }
    }
}

/// Manual submission body. Fields are kept as raw JSON so that validation can
/// report every missing or wrongly typed field at once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreatePaymentRequest {
    pub transaction_id: Option<serde_json::Value>,
    pub price_id: Option<serde_json::Value>,
    pub customer_email: Option<serde_json::Value>,
    pub amount: Option<serde_json::Value>,
    pub currency: Option<serde_json::Value>,
    pub status: Option<serde_json::Value>,
    #[serde(alias = "paddle_response")]
    pub provider_response: Option<serde_json::Value>,
}

/// Accepts a JSON number or a numeric string, which is how Paddle encodes totals.
pub fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
        }
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}
