use crate::domain::payment::decimal_from_json;
use crate::domain::plan::{CheckoutSession, Plan, PlanPrice};
use crate::domain::webhook::DEFAULT_CURRENCY;
use crate::error::{PaymentError, UpstreamCall};
use crate::gateways::{require_price_id, BillingProvider};
use rust_decimal::Decimal;
use serde_json::{json, Value};

pub struct PaddleGateway {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl PaddleGateway {
    fn api_key(&self) -> Result<&str, PaymentError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| PaymentError::Configuration("Paddle API key is not configured".to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, call: UpstreamCall, req: reqwest::RequestBuilder) -> Result<Value, PaymentError> {
        let resp = req
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::Transport("paddle request timed out".to_string())
                } else {
                    PaymentError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            tracing::warn!(status = status.as_u16(), call = ?call, "paddle returned an error response");
            return Err(PaymentError::Upstream {
                call,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<Value>(&text)
            .map_err(|e| PaymentError::Transport(format!("invalid paddle response: {}", e)))
    }
}

#[async_trait::async_trait]
impl BillingProvider for PaddleGateway {
    fn name(&self) -> &'static str {
        "paddle"
    }

    async fn list_products_with_prices(&self) -> Result<Vec<Plan>, PaymentError> {
        let key = self.api_key()?;
        let body = self
            .send(
                UpstreamCall::ListProducts,
                self.client
                    .get(self.url("/products?include=prices"))
                    .bearer_auth(key),
            )
            .await?;

        let plans = map_products(&body);
        tracing::debug!(count = plans.len(), "fetched paddle catalog");
        Ok(plans)
    }

    async fn create_transaction(
        &self,
        price_id: &str,
        success_url: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError> {
        let key = self.api_key()?;
        let price_id = require_price_id(price_id)?;

        let mut payload = json!({
            "items": [{ "price_id": price_id, "quantity": 1 }]
        });
        if let Some(url) = success_url.filter(|u| !u.is_empty()) {
            payload["checkout"] = json!({ "url": url });
        }

        let body = self
            .send(
                UpstreamCall::CreateTransaction,
                self.client
                    .post(self.url("/transactions"))
                    .bearer_auth(key)
                    .json(&payload),
            )
            .await?;

        let session = checkout_from_response(&body)?;
        tracing::info!(
            transaction_id = %session.transaction_id,
            checkout_url = %session.checkout_url,
            "created paddle transaction"
        );
        Ok(session)
    }
}

/// Flattens a Paddle `GET /products?include=prices` body into plans.
pub fn map_products(body: &Value) -> Vec<Plan> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|products| products.iter().map(map_product).collect())
        .unwrap_or_default()
}

fn map_product(product: &Value) -> Plan {
    Plan {
        product_id: str_field(product, "/id").unwrap_or_default(),
        name: str_field(product, "/name").unwrap_or_default(),
        description: str_field(product, "/description").unwrap_or_default(),
        prices: product
            .get("prices")
            .and_then(Value::as_array)
            .map(|prices| prices.iter().map(map_price).collect())
            .unwrap_or_default(),
    }
}

fn map_price(price: &Value) -> PlanPrice {
    PlanPrice {
        price_id: str_field(price, "/id").unwrap_or_default(),
        amount: price
            .pointer("/unit_price/amount")
            .and_then(decimal_from_json)
            .unwrap_or(Decimal::ZERO),
        interval: str_field(price, "/billing_cycle/interval"),
        currency: str_field(price, "/unit_price/currency_code")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    }
}

pub fn checkout_from_response(body: &Value) -> Result<CheckoutSession, PaymentError> {
    let transaction_id = str_field(body, "/data/id").unwrap_or_default();
    let checkout_url = str_field(body, "/data/checkout/url")
        .filter(|u| !u.is_empty())
        .ok_or(PaymentError::MissingCheckoutUrl)?;

    Ok(CheckoutSession {
        checkout_url,
        transaction_id,
    })
}

fn str_field(v: &Value, pointer: &str) -> Option<String> {
    v.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}
