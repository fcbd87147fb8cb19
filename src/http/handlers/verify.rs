use crate::domain::order::VerifyPaymentRequest;
use crate::error::unauthorized_envelope;
use crate::http::handlers::orders::buyer_id;
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

pub async fn verify_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<VerifyPaymentRequest>,
) -> impl IntoResponse {
    if buyer_id(&headers).is_none() {
        return (axum::http::StatusCode::UNAUTHORIZED, Json(unauthorized_envelope())).into_response();
    }

    match state.verification_service.verify_payment(req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}
