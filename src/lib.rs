pub mod config;
pub mod error;
pub mod domain {
    pub mod payment;
    pub mod plan;
    pub mod webhook;
}
pub mod gateways;
pub mod http {
    pub mod body;
    pub mod handlers {
        pub mod checkout;
        pub mod ops;
        pub mod payments;
        pub mod plans;
        pub mod webhook;
    }
    pub mod router;
}
pub mod repo {
    pub mod memory_repo;
    pub mod payments_repo;
}
pub mod service {
    pub mod ingestion_service;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: service::ingestion_service::IngestionService,
    pub provider: Arc<dyn gateways::BillingProvider>,
    pub environment: String,
}
