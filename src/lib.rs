pub mod config;
pub mod domain {
    pub mod listing;
    pub mod order;
    pub mod payment;
    pub mod ports;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod orders;
        pub mod verify;
    }
}
pub mod repo {
    pub mod listings_repo;
    pub mod memory;
    pub mod orders_repo;
    pub mod payments_repo;
}
pub mod service {
    pub mod order_service;
    pub mod verification_service;
}
pub mod signature;

#[derive(Clone)]
pub struct AppState {
    pub order_service: service::order_service::OrderService,
    pub verification_service: service::verification_service::VerificationService,
}
