use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub price_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub interval: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub prices: Vec<PlanPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: Option<serde_json::Value>,
    pub success_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub transaction_id: String,
}
