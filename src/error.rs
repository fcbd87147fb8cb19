use crate::domain::order::{ErrorEnvelope, ErrorPayload};
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("not found")]
    NotFound,
    #[error("price is below the minimum chargeable amount")]
    InvalidAmount,
    #[error("you already own this listing")]
    AlreadyOwned,
    #[error("payment gateway unavailable")]
    GatewayUnavailable(String),
    #[error("payment verification failed")]
    SignatureInvalid,
    #[error("order is already finalized")]
    AlreadyFinalized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::NotFound => "NOT_FOUND",
            CheckoutError::InvalidAmount => "INVALID_AMOUNT",
            CheckoutError::AlreadyOwned => "ALREADY_OWNED",
            CheckoutError::GatewayUnavailable(_) => "GATEWAY_UNAVAILABLE",
            CheckoutError::SignatureInvalid => "SIGNATURE_INVALID",
            CheckoutError::AlreadyFinalized => "ALREADY_FINALIZED",
            CheckoutError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CheckoutError::NotFound => StatusCode::NOT_FOUND,
            CheckoutError::InvalidAmount
            | CheckoutError::AlreadyOwned
            | CheckoutError::SignatureInvalid => StatusCode::BAD_REQUEST,
            CheckoutError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
            CheckoutError::AlreadyFinalized => StatusCode::CONFLICT,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let details = match self {
            CheckoutError::GatewayUnavailable(detail) => Some(detail.clone()),
            _ => None,
        };
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        }
    }
}

pub fn unauthorized_envelope() -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: "UNAUTHORIZED".to_string(),
            message: "missing or invalid buyer identity".to_string(),
            details: None,
        },
    }
}
