use marketplace_payments::domain::listing::Listing;
use marketplace_payments::domain::order::{CreateOrderRequest, NewOrder, OrderStatus};
use marketplace_payments::domain::ports::OrderStore;
use marketplace_payments::error::CheckoutError;
use marketplace_payments::gateways::mock::MockGateway;
use marketplace_payments::repo::memory::InMemoryStore;
use marketplace_payments::service::order_service::OrderService;
use std::sync::Arc;
use uuid::Uuid;

fn service(store: &Arc<InMemoryStore>, gateway: &Arc<MockGateway>) -> OrderService {
    OrderService {
        listings: store.clone(),
        orders: store.clone(),
        gateway: gateway.clone(),
        currency: "INR".to_string(),
        min_price_major: 1,
    }
}

async fn seed_listing(store: &InMemoryStore, price_major: i64) -> Uuid {
    let id = Uuid::new_v4();
    store
        .insert_listing(Listing {
            id,
            price_major,
            seller_id: Uuid::new_v4(),
        })
        .await;
    id
}

#[tokio::test]
async fn unknown_listing_is_rejected_before_the_gateway() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);

    let err = svc
        .create_order(Uuid::new_v4(), CreateOrderRequest { listing_id: Uuid::new_v4() })
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::NotFound));
    assert_eq!(gateway.request_count(), 0);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn price_below_minimum_commits_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 0).await;

    let err = svc
        .create_order(Uuid::new_v4(), CreateOrderRequest { listing_id })
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::InvalidAmount));
    assert_eq!(gateway.request_count(), 0);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn amount_conversion_is_exact_integer_multiplication() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);

    for price_major in [1i64, 2, 999, 100_000] {
        let listing_id = seed_listing(&store, price_major).await;
        let resp = svc
            .create_order(Uuid::new_v4(), CreateOrderRequest { listing_id })
            .await
            .unwrap();
        assert_eq!(resp.amount, price_major * 100);
    }

    let sent: Vec<i64> = gateway
        .requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.amount_minor)
        .collect();
    assert_eq!(sent, vec![100, 200, 99_900, 10_000_000]);
}

#[tokio::test]
async fn created_order_is_pending_with_gateway_reference() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 999).await;
    let buyer = Uuid::new_v4();

    let resp = svc
        .create_order(buyer, CreateOrderRequest { listing_id })
        .await
        .unwrap();

    assert_eq!(resp.amount, 99_900);
    assert_eq!(resp.currency, "INR");

    let order = store.get(resp.db_order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.amount_minor, 99_900);
    assert_eq!(order.buyer_id, buyer);
    assert_eq!(order.gateway_order_id, resp.order_id);
}

#[tokio::test]
async fn a_successful_purchase_blocks_repurchase() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 50).await;
    let buyer = Uuid::new_v4();

    let owned = store
        .insert_pending(NewOrder {
            buyer_id: buyer,
            listing_id,
            amount_minor: 5_000,
            gateway_order_id: "order_prev".to_string(),
        })
        .await
        .unwrap();
    assert!(store.finalize_pending(owned.id, OrderStatus::Success).await.unwrap());

    let err = svc
        .create_order(buyer, CreateOrderRequest { listing_id })
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::AlreadyOwned));
    assert_eq!(gateway.request_count(), 0);

    // A different buyer is unaffected.
    svc.create_order(Uuid::new_v4(), CreateOrderRequest { listing_id })
        .await
        .unwrap();
}

#[tokio::test]
async fn gateway_failure_leaves_no_local_row() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_UNAVAILABLE"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 10).await;

    let err = svc
        .create_order(Uuid::new_v4(), CreateOrderRequest { listing_id })
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::GatewayUnavailable(_)));
    assert_eq!(gateway.request_count(), 1);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn abandoned_checkout_allows_a_second_pending_order() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 10).await;
    let buyer = Uuid::new_v4();

    let first = svc.create_order(buyer, CreateOrderRequest { listing_id }).await.unwrap();
    let second = svc.create_order(buyer, CreateOrderRequest { listing_id }).await.unwrap();

    assert_ne!(first.db_order_id, second.db_order_id);
    assert_eq!(store.order_count().await, 2);
    for id in [first.db_order_id, second.db_order_id] {
        let order = store.get(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}

#[tokio::test]
async fn order_status_is_scoped_to_its_buyer() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::new("ALWAYS_SUCCESS"));
    let svc = service(&store, &gateway);
    let listing_id = seed_listing(&store, 10).await;
    let buyer = Uuid::new_v4();

    let resp = svc.create_order(buyer, CreateOrderRequest { listing_id }).await.unwrap();

    let order = svc.get_order(buyer, resp.db_order_id).await.unwrap();
    assert_eq!(order.id, resp.db_order_id);

    let err = svc.get_order(Uuid::new_v4(), resp.db_order_id).await.unwrap_err();
    assert!(matches!(err, CheckoutError::NotFound));
}
