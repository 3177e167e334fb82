use crate::domain::payment::{
    decimal_from_json, CreatePaymentRequest, NewPayment, PaymentRecord, PaymentStatus, ProviderPayload,
};
use crate::domain::webhook::{parse_event, ParsedEvent};
use crate::error::{PaymentError, StoreError};
use crate::repo::payments_repo::PaymentStore;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

/// Result of one webhook delivery. Every variant is acknowledged to Paddle.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    Ignored { event_type: Option<String> },
    Inserted(PaymentRecord),
    Duplicate { transaction_id: String },
    Rejected { reason: String },
    Failed { transaction_id: String, message: String },
}

#[derive(Clone)]
pub struct IngestionService {
    pub store: Arc<dyn PaymentStore>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn PaymentStore>) -> Self {
        Self { store }
    }

    pub async fn ingest_from_webhook(&self, event: &serde_json::Value) -> WebhookOutcome {
        let normalized = match parse_event(event) {
            ParsedEvent::Ignored { event_type } => {
                tracing::debug!(event_type = ?event_type, "ignoring paddle event");
                return WebhookOutcome::Ignored { event_type };
            }
            ParsedEvent::Unusable { reason } => {
                tracing::error!(%reason, "completed transaction event could not be normalised");
                return WebhookOutcome::Rejected { reason };
            }
            ParsedEvent::Completed(n) => n,
        };

        if normalized.is_incomplete() {
            tracing::warn!(
                transaction_id = %normalized.payment.transaction_id,
                defaulted = ?normalized.defaulted_fields,
                "webhook payload incomplete, defaults applied"
            );
        }

        if normalized.payment.amount.is_sign_negative() {
            let reason = format!("negative amount {}", normalized.payment.amount);
            tracing::error!(transaction_id = %normalized.payment.transaction_id, %reason, "rejecting webhook payment");
            return WebhookOutcome::Rejected { reason };
        }

        let transaction_id = normalized.payment.transaction_id.clone();
        match self.store.insert(normalized.payment).await {
            Ok(record) => {
                tracing::info!(%transaction_id, "payment saved from webhook");
                WebhookOutcome::Inserted(record)
            }
            Err(StoreError::DuplicateKey(_)) => {
                tracing::info!(%transaction_id, "payment already exists, duplicate delivery");
                WebhookOutcome::Duplicate { transaction_id }
            }
            Err(e) => {
                tracing::error!(%transaction_id, error = %e, "failed to persist webhook payment");
                WebhookOutcome::Failed {
                    transaction_id,
                    message: e.to_string(),
                }
            }
        }
    }

    pub async fn ingest_from_submission(&self, req: CreatePaymentRequest) -> Result<PaymentRecord, PaymentError> {
        let payment = validate_submission(req)?;
        let transaction_id = payment.transaction_id.clone();

        let record = self.store.insert(payment).await.map_err(|e| {
            if !matches!(e, StoreError::DuplicateKey(_)) {
                tracing::error!(%transaction_id, error = %e, "failed to save submitted payment");
            }
            PaymentError::from(e)
        })?;

        tracing::info!(%transaction_id, "payment saved from manual submission");
        Ok(record)
    }

    pub async fn find(&self, transaction_id: &str) -> Result<PaymentRecord, PaymentError> {
        self.store
            .find_by_transaction_id(transaction_id)
            .await?
            .ok_or(PaymentError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<PaymentRecord>, PaymentError> {
        Ok(self.store.list_all().await?)
    }
}

pub fn validate_submission(req: CreatePaymentRequest) -> Result<NewPayment, PaymentError> {
    let mut invalid = Vec::new();

    let transaction_id = required_text(req.transaction_id, "transaction_id", &mut invalid);
    let price_id = required_text(req.price_id, "price_id", &mut invalid);
    let customer_email = required_text(req.customer_email, "customer_email", &mut invalid);
    let currency = required_text(req.currency, "currency", &mut invalid);

    let amount = match req.amount.as_ref().and_then(decimal_from_json) {
        Some(a) if a > Decimal::ZERO => a,
        _ => {
            invalid.push("amount".to_string());
            Decimal::ZERO
        }
    };

    let status = match req.status {
        None | Some(serde_json::Value::Null) => PaymentStatus::Completed,
        Some(v) => v
            .as_str()
            .and_then(|s| PaymentStatus::from_str(s).ok())
            .unwrap_or_else(|| {
                invalid.push("status".to_string());
                PaymentStatus::default()
            }),
    };

    if !invalid.is_empty() {
        return Err(PaymentError::validation(invalid));
    }

    Ok(NewPayment {
        transaction_id,
        price_id,
        customer_email,
        amount,
        currency,
        status,
        provider_response: req
            .provider_response
            .map(ProviderPayload::from)
            .unwrap_or_default(),
    })
}

fn required_text(value: Option<serde_json::Value>, field: &str, invalid: &mut Vec<String>) -> String {
    match value.as_ref().and_then(serde_json::Value::as_str).map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            invalid.push(field.to_string());
            String::new()
        }
    }
}
