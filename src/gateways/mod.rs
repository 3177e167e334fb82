use crate::domain::plan::{CheckoutSession, Plan};
use crate::error::PaymentError;

pub mod mock;
pub mod paddle;

/// Outbound calls to the billing provider. Implementations are stateless and
/// never retry; the caller is a live request waiting on the answer.
#[async_trait::async_trait]
pub trait BillingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn list_products_with_prices(&self) -> Result<Vec<Plan>, PaymentError>;

    /// Must reject an empty `price_id` before doing any network I/O.
    async fn create_transaction(
        &self,
        price_id: &str,
        success_url: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError>;
}

pub fn require_price_id(price_id: &str) -> Result<&str, PaymentError> {
    let trimmed = price_id.trim();
    if trimmed.is_empty() {
        return Err(PaymentError::Validation {
            message: "Price ID is required".to_string(),
            fields: vec!["price_id".to_string()],
        });
    }
    Ok(trimmed)
}
