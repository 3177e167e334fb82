use paddle_payments::config::{parse_origins, AppConfig};

#[test]
fn cors_origins_are_split_and_trimmed() {
    assert_eq!(
        parse_origins(" http://localhost:3001 ,http://localhost:3000,,"),
        vec!["http://localhost:3001", "http://localhost:3000"]
    );
}

#[test]
fn defaults_produce_a_usable_bind_address() {
    let cfg = AppConfig::from_env();
    assert!(cfg.bind_addr.contains(':'));
    assert!(cfg.paddle_timeout_ms > 0);
    assert!(!cfg.paddle_base_url.is_empty());
}
