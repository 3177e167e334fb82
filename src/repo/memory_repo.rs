use crate::domain::payment::{NewPayment, PaymentRecord};
use crate::error::StoreError;
use crate::repo::payments_repo::PaymentStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store used for local runs and tests. The uniqueness check and
/// the insert happen under a single write lock.
#[derive(Clone, Default)]
pub struct InMemoryPaymentsRepo {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    by_transaction: HashMap<String, (u64, PaymentRecord)>,
    next_seq: u64,
}

impl InMemoryPaymentsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_transaction.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl PaymentStore for InMemoryPaymentsRepo {
    async fn insert(&self, payment: NewPayment) -> Result<PaymentRecord, StoreError> {
        let mut write = self.inner.write().await;
        if write.by_transaction.contains_key(&payment.transaction_id) {
            return Err(StoreError::DuplicateKey(payment.transaction_id));
        }

        let seq = write.next_seq;
        write.next_seq += 1;
        let record = PaymentRecord::from_new(payment, chrono::Utc::now());
        write
            .by_transaction
            .insert(record.transaction_id.clone(), (seq, record.clone()));
        Ok(record)
    }

    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<PaymentRecord>, StoreError> {
        let read = self.inner.read().await;
        Ok(read.by_transaction.get(transaction_id).map(|(_, r)| r.clone()))
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, StoreError> {
        let read = self.inner.read().await;
        let mut items: Vec<&(u64, PaymentRecord)> = read.by_transaction.values().collect();
        items.sort_by(|a, b| {
            b.1.created_at
                .cmp(&a.1.created_at)
                .then_with(|| b.0.cmp(&a.0))
        });
        Ok(items.into_iter().map(|(_, r)| r.clone()).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
