use paddle_payments::domain::payment::{CreatePaymentRequest, PaymentStatus};
use paddle_payments::error::PaymentError;
use paddle_payments::repo::memory_repo::InMemoryPaymentsRepo;
use paddle_payments::repo::payments_repo::PaymentStore;
use paddle_payments::service::ingestion_service::{validate_submission, IngestionService, WebhookOutcome};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

mod common;

fn service() -> (IngestionService, InMemoryPaymentsRepo) {
    let repo = InMemoryPaymentsRepo::new();
    (IngestionService::new(Arc::new(repo.clone())), repo)
}

fn completed(txn: &str) -> serde_json::Value {
    json!({
        "event_type": "transaction.completed",
        "data": {
            "id": txn,
            "customer_email": "a@b.com",
            "items": [{"price_id": "pri_1"}],
            "details": {"totals": {"total": "1000", "currency_code": "USD"}}
        }
    })
}

fn submission(txn: &str) -> CreatePaymentRequest {
    CreatePaymentRequest {
        transaction_id: Some(json!(txn)),
        price_id: Some(json!("p1")),
        customer_email: Some(json!("a@b.com")),
        amount: Some(json!(10)),
        currency: Some(json!("USD")),
        status: None,
        provider_response: None,
    }
}

#[tokio::test]
async fn sequential_duplicate_webhooks_store_one_record() {
    let (svc, repo) = service();

    let first = svc.ingest_from_webhook(&completed("txn_dup")).await;
    let second = svc.ingest_from_webhook(&completed("txn_dup")).await;

    assert!(matches!(first, WebhookOutcome::Inserted(_)));
    assert_eq!(
        second,
        WebhookOutcome::Duplicate {
            transaction_id: "txn_dup".to_string()
        }
    );
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn concurrent_duplicate_webhooks_store_one_record() {
    let (svc, repo) = service();
    let event = completed("txn_race");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            let event = event.clone();
            tokio::spawn(async move { svc.ingest_from_webhook(&event).await })
        })
        .collect();

    let mut inserted = 0;
    for h in handles {
        if let WebhookOutcome::Inserted(_) = h.await.unwrap() {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn unrelated_event_persists_nothing() {
    let (svc, repo) = service();
    let out = svc
        .ingest_from_webhook(&json!({"event_type": "transaction.other", "data": {"id": "t"}}))
        .await;
    assert!(matches!(out, WebhookOutcome::Ignored { .. }));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn negative_webhook_amount_is_rejected() {
    let (svc, repo) = service();
    let mut event = completed("txn_neg");
    event["data"]["details"]["totals"]["total"] = json!("-5");

    let out = svc.ingest_from_webhook(&event).await;
    assert!(matches!(out, WebhookOutcome::Rejected { .. }));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn submission_defaults_to_completed() {
    let (svc, _) = service();
    let record = svc.ingest_from_submission(submission("txn_m1")).await.unwrap();
    assert_eq!(record.status, PaymentStatus::Completed);
    assert_eq!(record.amount, Decimal::from(10));
}

#[tokio::test]
async fn duplicate_submission_is_reported_and_original_kept() {
    let (svc, repo) = service();
    let original = svc.ingest_from_submission(submission("txn_m2")).await.unwrap();

    let mut again = submission("txn_m2");
    again.amount = Some(json!(99));
    let err = svc.ingest_from_submission(again).await.unwrap_err();
    assert!(matches!(err, PaymentError::Duplicate { .. }));

    let stored = repo.find_by_transaction_id("txn_m2").await.unwrap().unwrap();
    assert_eq!(stored, original);
}

#[test]
fn validation_names_every_missing_field() {
    let err = validate_submission(CreatePaymentRequest::default()).unwrap_err();
    match err {
        PaymentError::Validation { fields, .. } => assert_eq!(
            fields,
            vec!["transaction_id", "price_id", "customer_email", "currency", "amount"]
        ),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn validation_rejects_bad_amounts_and_status() {
    for amount in [json!(0), json!(-1), json!("ten"), json!(null)] {
        let mut req = submission("txn_v");
        req.amount = Some(amount);
        assert!(matches!(validate_submission(req), Err(PaymentError::Validation { .. })));
    }

    let mut req = submission("txn_v");
    req.amount = Some(json!("12.50"));
    assert_eq!(validate_submission(req).unwrap().amount, Decimal::new(1250, 2));

    let mut req = submission("txn_v");
    req.status = Some(json!("refunded"));
    assert!(matches!(validate_submission(req), Err(PaymentError::Validation { .. })));
}

#[tokio::test]
async fn listing_is_newest_first() {
    let (svc, _) = service();
    svc.ingest_from_submission(submission("A")).await.unwrap();
    svc.ingest_from_submission(submission("B")).await.unwrap();

    let ids: Vec<String> = svc.list().await.unwrap().into_iter().map(|r| r.transaction_id).collect();
    assert_eq!(ids, vec!["B", "A"]);
}

#[tokio::test]
async fn storage_failure_on_webhook_is_reported_as_failed() {
    let svc = IngestionService::new(Arc::new(common::FailingStore));
    let out = svc.ingest_from_webhook(&completed("txn_broken")).await;
    assert!(matches!(
        out,
        WebhookOutcome::Failed { ref transaction_id, .. } if transaction_id == "txn_broken"
    ));
}

#[tokio::test]
async fn storage_failure_on_submission_is_a_storage_error() {
    let svc = IngestionService::new(Arc::new(common::FailingStore));
    let err = svc.ingest_from_submission(submission("txn_broken")).await.unwrap_err();
    assert!(matches!(err, PaymentError::Storage(_)));
}

#[test]
fn wrongly_typed_fields_are_named() {
    let mut req = submission("txn_t");
    req.transaction_id = Some(json!(123));
    req.status = Some(json!(true));
    match validate_submission(req).unwrap_err() {
        PaymentError::Validation { fields, .. } => assert_eq!(fields, vec!["transaction_id", "status"]),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn paddle_response_key_is_accepted() {
    let req: CreatePaymentRequest = serde_json::from_value(json!({
        "transaction_id": "txn_alias",
        "price_id": "p1",
        "customer_email": "a@b.com",
        "amount": 10,
        "currency": "USD",
        "paddle_response": {"id": "txn_alias", "origin": "web"}
    }))
    .unwrap();

    let payment = validate_submission(req).unwrap();
    assert_eq!(payment.provider_response.to_json()["origin"], "web");
}
