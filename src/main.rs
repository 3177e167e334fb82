use paddle_payments::config::AppConfig;
use paddle_payments::gateways::mock::MockProvider;
use paddle_payments::gateways::paddle::PaddleGateway;
use paddle_payments::gateways::BillingProvider;
use paddle_payments::http::router::build_router;
use paddle_payments::repo::payments_repo::PaymentsRepo;
use paddle_payments::service::ingestion_service::IngestionService;
use paddle_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database connected and migrated");

    let provider: Arc<dyn BillingProvider> = if cfg.paddle_adapter == "mock" {
        Arc::new(MockProvider::new("ALWAYS_SUCCESS"))
    } else {
        Arc::new(PaddleGateway {
            base_url: cfg.paddle_base_url.clone(),
            api_key: cfg.paddle_api_key.clone(),
            timeout_ms: cfg.paddle_timeout_ms,
            client: reqwest::Client::new(),
        })
    };

    if cfg.paddle_api_key.is_none() && provider.name() == "paddle" {
        tracing::warn!("PADDLE_API_KEY is not set; plan and checkout routes will fail");
    }

    let state = AppState {
        ingestion_service: IngestionService::new(Arc::new(PaymentsRepo { pool: pool.clone() })),
        provider,
        environment: cfg.environment.clone(),
    };

    let app = build_router(state, &cfg.cors_origins);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {} ({})", cfg.bind_addr, cfg.environment);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
