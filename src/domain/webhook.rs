//! Normalisation of Paddle notification envelopes into candidate payments.
//!
//! Payloads are untrusted and may have any shape. Extraction never fails on a
//! missing optional field; it substitutes a default and records which fields
//! were defaulted so the caller can flag the record as incomplete.

use crate::domain::payment::{decimal_from_json, NewPayment, PaymentStatus, ProviderPayload};
use rust_decimal::Decimal;
use serde_json::Value;

pub const TRANSACTION_COMPLETED: &str = "transaction.completed";
pub const PLACEHOLDER_EMAIL: &str = "unknown@example.com";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedEvent {
    /// Any event type other than a completed transaction.
    Ignored { event_type: Option<String> },
    /// Completed transaction without a usable transaction id.
    Unusable { reason: String },
    Completed(NormalizedPayment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPayment {
    pub payment: NewPayment,
    pub defaulted_fields: Vec<&'static str>,
}

impl NormalizedPayment {
    pub fn is_incomplete(&self) -> bool {
        !self.defaulted_fields.is_empty()
    }
}

pub fn event_type(event: &Value) -> Option<&str> {
    event.get("event_type").and_then(Value::as_str)
}

pub fn parse_event(event: &Value) -> ParsedEvent {
    let kind = event_type(event);
    if kind != Some(TRANSACTION_COMPLETED) {
        return ParsedEvent::Ignored {
            event_type: kind.map(str::to_string),
        };
    }

    let data = match event.get("data") {
        Some(d) if d.is_object() => d,
        _ => {
            return ParsedEvent::Unusable {
                reason: "event has no data object".to_string(),
            }
        }
    };

    let transaction_id = match data.get("id").and_then(Value::as_str).map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return ParsedEvent::Unusable {
                reason: "transaction data has no id".to_string(),
            }
        }
    };

    let mut defaulted_fields = Vec::new();

    let first_item = data.pointer("/items/0");
    let price_id = first_item
        .and_then(|item| {
            item.get("price_id")
                .and_then(Value::as_str)
                .or_else(|| item.pointer("/price/id").and_then(Value::as_str))
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            defaulted_fields.push("price_id");
            String::new()
        });

    let customer_email = data
        .get("customer_email")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            defaulted_fields.push("customer_email");
            PLACEHOLDER_EMAIL.to_string()
        });

    let amount = data
        .pointer("/details/totals/total")
        .and_then(decimal_from_json)
        .unwrap_or_else(|| {
            defaulted_fields.push("amount");
            Decimal::ZERO
        });

    let currency = data
        .pointer("/details/totals/currency_code")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            defaulted_fields.push("currency");
            DEFAULT_CURRENCY.to_string()
        });

    ParsedEvent::Completed(NormalizedPayment {
        payment: NewPayment {
            transaction_id,
            price_id,
            customer_email,
            amount,
            currency,
            status: PaymentStatus::Completed,
            provider_response: ProviderPayload::from(data.clone()),
        },
        defaulted_fields,
    })
}
