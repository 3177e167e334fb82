use crate::domain::plan::{CheckoutSession, Plan, PlanPrice};
use crate::error::{PaymentError, UpstreamCall};
use crate::gateways::{require_price_id, BillingProvider};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Canned provider for local runs and tests. `behavior` mirrors the failure
/// modes of the real client.
#[derive(Clone)]
pub struct MockProvider {
    pub behavior: String,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of calls that would have reached the provider.
    pub fn outbound_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_behavior(&self, call: UpstreamCall) -> Result<(), PaymentError> {
        match self.behavior.as_str() {
            "NO_CREDENTIAL" => Err(PaymentError::Configuration(
                "Paddle API key is not configured".to_string(),
            )),
            "UPSTREAM_ERROR" => Err(PaymentError::Upstream {
                call,
                status: 403,
                body: serde_json::json!({"error": {"code": "forbidden"}}),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl BillingProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_products_with_prices(&self) -> Result<Vec<Plan>, PaymentError> {
        self.check_behavior(UpstreamCall::ListProducts)?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(vec![Plan {
            product_id: "pro_mock_basic".to_string(),
            name: "Basic".to_string(),
            description: "Mock basic plan".to_string(),
            prices: vec![
                PlanPrice {
                    price_id: "pri_mock_monthly".to_string(),
                    amount: Decimal::from(1000),
                    interval: Some("month".to_string()),
                    currency: "USD".to_string(),
                },
                PlanPrice {
                    price_id: "pri_mock_yearly".to_string(),
                    amount: Decimal::from(10000),
                    interval: Some("year".to_string()),
                    currency: "USD".to_string(),
                },
            ],
        }])
    }

    async fn create_transaction(
        &self,
        price_id: &str,
        _success_url: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError> {
        self.check_behavior(UpstreamCall::CreateTransaction)?;
        let price_id = require_price_id(price_id)?;
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.behavior == "NO_CHECKOUT_URL" {
            return Err(PaymentError::MissingCheckoutUrl);
        }

        Ok(CheckoutSession {
            checkout_url: format!("https://sandbox-checkout.paddle.test/{}?txn=txn_mock_{}", price_id, n),
            transaction_id: format!("txn_mock_{}", n),
        })
    }
}
