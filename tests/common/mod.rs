use paddle_payments::domain::payment::{NewPayment, PaymentRecord};
use paddle_payments::error::StoreError;
use paddle_payments::repo::payments_repo::PaymentStore;

/// Store whose every operation fails with a non-duplicate error.
pub struct FailingStore;

#[async_trait::async_trait]
impl PaymentStore for FailingStore {
    async fn insert(&self, _payment: NewPayment) -> Result<PaymentRecord, StoreError> {
        Err(StoreError::Other("connection reset".to_string()))
    }

    async fn find_by_transaction_id(&self, _transaction_id: &str) -> Result<Option<PaymentRecord>, StoreError> {
        Err(StoreError::Other("connection reset".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, StoreError> {
        Err(StoreError::Other("connection reset".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Other("connection reset".to_string()))
    }
}
