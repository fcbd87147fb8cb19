use crate::domain::order::CreateOrderRequest;
use crate::error::unauthorized_envelope;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

/// Buyer identity arrives from the session layer in front of this service.
pub fn buyer_id(headers: &HeaderMap) -> Option<Uuid> {
    headers.get("x-buyer-id")?.to_str().ok()?.parse().ok()
}

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let Some(buyer) = buyer_id(&headers) else {
        return (axum::http::StatusCode::UNAUTHORIZED, Json(unauthorized_envelope())).into_response();
    };

    match state.order_service.create_order(buyer, req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}

pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(buyer) = buyer_id(&headers) else {
        return (axum::http::StatusCode::UNAUTHORIZED, Json(unauthorized_envelope())).into_response();
    };

    match state.order_service.get_order(buyer, order_id).await {
        Ok(order) => (axum::http::StatusCode::OK, Json(order)).into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
