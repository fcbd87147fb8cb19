use axum::routing::{get, post};
use axum::Router;
use marketplace_payments::config::AppConfig;
use marketplace_payments::domain::ports::{ListingStore, OrderStore, PaymentStore};
use marketplace_payments::gateways::razorpay::RazorpayGateway;
use marketplace_payments::gateways::PaymentGateway;
use marketplace_payments::repo::listings_repo::ListingsRepo;
use marketplace_payments::repo::orders_repo::OrdersRepo;
use marketplace_payments::repo::payments_repo::PaymentsRepo;
use marketplace_payments::service::order_service::OrderService;
use marketplace_payments::service::verification_service::VerificationService;
use marketplace_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let listings: Arc<dyn ListingStore> = Arc::new(ListingsRepo { pool: pool.clone() });
    let orders: Arc<dyn OrderStore> = Arc::new(OrdersRepo { pool: pool.clone() });
    let payments: Arc<dyn PaymentStore> = Arc::new(PaymentsRepo { pool: pool.clone() });

    let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayGateway {
        base_url: cfg.razorpay_base_url.clone(),
        key_id: cfg.razorpay_key_id.clone(),
        key_secret: cfg.razorpay_key_secret.clone(),
        timeout_ms: cfg.gateway_timeout_ms,
        client: reqwest::Client::new(),
    });

    let state = AppState {
        order_service: OrderService {
            listings,
            orders: orders.clone(),
            gateway,
            currency: cfg.currency.clone(),
            min_price_major: cfg.min_price_major,
        },
        verification_service: VerificationService {
            orders,
            payments,
            key_secret: cfg.razorpay_key_secret.clone(),
        },
    };

    let app = Router::new()
        .route("/health", get(marketplace_payments::http::handlers::orders::health))
        .route(
            "/api/payments/create-order",
            post(marketplace_payments::http::handlers::orders::create_order),
        )
        .route(
            "/api/payments/verify",
            post(marketplace_payments::http::handlers::verify::verify_payment),
        )
        .route(
            "/api/orders/:order_id",
            get(marketplace_payments::http::handlers::orders::get_order),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
