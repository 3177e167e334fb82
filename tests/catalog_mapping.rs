use paddle_payments::error::PaymentError;
use paddle_payments::gateways::paddle::{checkout_from_response, map_products, PaddleGateway};
use paddle_payments::gateways::BillingProvider;
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn price_without_unit_price_defaults_to_zero_usd() {
    let body = json!({
        "data": [{
            "id": "pro_01",
            "name": "Pro",
            "prices": [
                {
                    "id": "pri_monthly",
                    "unit_price": {"amount": "1500", "currency_code": "EUR"},
                    "billing_cycle": {"interval": "month", "frequency": 1}
                },
                {"id": "pri_one_off"}
            ]
        }]
    });

    let plans = map_products(&body);
    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    assert_eq!(plan.product_id, "pro_01");
    assert_eq!(plan.description, "");
    assert_eq!(plan.prices.len(), 2);

    assert_eq!(plan.prices[0].amount, Decimal::from(1500));
    assert_eq!(plan.prices[0].currency, "EUR");
    assert_eq!(plan.prices[0].interval.as_deref(), Some("month"));

    assert_eq!(plan.prices[1].amount, Decimal::ZERO);
    assert_eq!(plan.prices[1].currency, "USD");
    assert_eq!(plan.prices[1].interval, None);
}

#[test]
fn mapped_plan_serializes_amount_as_number() {
    let plans = map_products(&json!({"data": [{"id": "pro_02", "name": "Lite", "prices": [{"id": "pri_x"}]}]}));
    let v = serde_json::to_value(&plans).unwrap();
    assert_eq!(v[0]["prices"][0]["amount"], json!(0.0));
    assert_eq!(v[0]["prices"][0]["interval"], serde_json::Value::Null);
}

#[test]
fn product_without_prices_maps_to_empty_list() {
    let plans = map_products(&json!({"data": [{"id": "pro_03", "name": "Free"}]}));
    assert!(plans[0].prices.is_empty());
    assert!(map_products(&json!({})).is_empty());
}

#[test]
fn checkout_response_requires_url() {
    let ok = checkout_from_response(&json!({"data": {"id": "txn_9", "checkout": {"url": "https://pay.example/txn_9"}}}))
        .unwrap();
    assert_eq!(ok.transaction_id, "txn_9");
    assert_eq!(ok.checkout_url, "https://pay.example/txn_9");

    let missing = checkout_from_response(&json!({"data": {"id": "txn_9", "checkout": null}}));
    assert!(matches!(missing, Err(PaymentError::MissingCheckoutUrl)));
}

fn unreachable_gateway(api_key: Option<&str>) -> PaddleGateway {
    PaddleGateway {
        base_url: "http://127.0.0.1:9".to_string(),
        api_key: api_key.map(str::to_string),
        timeout_ms: 200,
        client: reqwest::Client::new(),
    }
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let gw = unreachable_gateway(None);
    assert!(matches!(
        gw.list_products_with_prices().await,
        Err(PaymentError::Configuration(_))
    ));
    assert!(matches!(
        gw.create_transaction("pri_1", None).await,
        Err(PaymentError::Configuration(_))
    ));
}

#[tokio::test]
async fn empty_price_id_fails_before_any_request() {
    // the base url is unreachable, so reaching the network would yield Transport
    let gw = unreachable_gateway(Some("test_key"));
    let err = gw.create_transaction("  ", None).await.unwrap_err();
    assert!(matches!(err, PaymentError::Validation { .. }));
}
