use crate::domain::payment::{NewPayment, PaymentRecord, PaymentStatus, ProviderPayload};
use crate::error::StoreError;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;

/// Durable payment storage. `insert` must be a single atomic operation that
/// refuses a second record with the same `transaction_id`.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: NewPayment) -> Result<PaymentRecord, StoreError>;

    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<PaymentRecord>, StoreError>;

    /// Newest first.
    async fn list_all(&self) -> Result<Vec<PaymentRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

const RECORD_COLUMNS: &str =
    "transaction_id, price_id, customer_email, amount, currency, status, provider_response, created_at";

#[async_trait::async_trait]
impl PaymentStore for PaymentsRepo {
    async fn insert(&self, payment: NewPayment) -> Result<PaymentRecord, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payments (
                transaction_id, price_id, customer_email, amount, currency, status, provider_response
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (transaction_id) DO NOTHING
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(&payment.transaction_id)
        .bind(&payment.price_id)
        .bind(&payment.customer_email)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.status.as_str())
        .bind(payment.provider_response.to_json())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => map_row(&r),
            None => Err(StoreError::DuplicateKey(payment.transaction_id)),
        }
    }

    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<PaymentRecord>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE transaction_id = $1",
            RECORD_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments ORDER BY created_at DESC, id DESC",
            RECORD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn map_row(r: &PgRow) -> Result<PaymentRecord, StoreError> {
    let status: String = r.try_get("status")?;
    let provider_response: serde_json::Value = r.try_get("provider_response")?;

    Ok(PaymentRecord {
        transaction_id: r.try_get("transaction_id")?,
        price_id: r.try_get("price_id")?,
        customer_email: r.try_get("customer_email")?,
        amount: r.try_get("amount")?,
        currency: r.try_get("currency")?,
        status: PaymentStatus::from_str(&status).map_err(StoreError::Other)?,
        provider_response: ProviderPayload::from(provider_response),
        created_at: r.try_get("created_at")?,
    })
}
