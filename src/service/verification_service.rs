use crate::domain::order::{OrderStatus, VerifyPaymentRequest, VerifyPaymentResponse};
use crate::domain::payment::NewPayment;
use crate::domain::ports::{OrderStore, PaymentStore};
use crate::error::CheckoutError;
use crate::signature;
use std::sync::Arc;

#[derive(Clone)]
pub struct VerificationService {
    pub orders: Arc<dyn OrderStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub key_secret: String,
}

impl VerificationService {
    /// Validates the client-forwarded gateway callback and finalizes the
    /// order exactly once. Concurrent calls for the same order race on a
    /// single conditional update: one wins, the rest see ALREADY_FINALIZED.
    pub async fn verify_payment(
        &self,
        req: VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, CheckoutError> {
        let authentic = signature::verify(
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
            &self.key_secret,
        );

        if !authentic {
            tracing::warn!(
                order_id = %req.db_order_id,
                gateway_order_id = %req.razorpay_order_id,
                "callback signature did not verify"
            );

            if self
                .orders
                .finalize_pending(req.db_order_id, OrderStatus::Failed)
                .await?
            {
                return Err(CheckoutError::SignatureInvalid);
            }

            // Already terminal. Re-failing a FAILED order is a no-op; a
            // forged callback must never touch a SUCCESS order.
            return match self.orders.get(req.db_order_id).await? {
                None => Err(CheckoutError::NotFound),
                Some(order) if order.status == OrderStatus::Failed => {
                    Err(CheckoutError::SignatureInvalid)
                }
                Some(_) => Err(CheckoutError::AlreadyFinalized),
            };
        }

        if !self
            .orders
            .finalize_pending(req.db_order_id, OrderStatus::Success)
            .await?
        {
            return match self.orders.get(req.db_order_id).await? {
                None => Err(CheckoutError::NotFound),
                Some(_) => Err(CheckoutError::AlreadyFinalized),
            };
        }

        let order = self
            .orders
            .get(req.db_order_id)
            .await?
            .ok_or_else(|| {
                CheckoutError::Internal(anyhow::anyhow!("order missing after finalize"))
            })?;

        let payment = self
            .payments
            .insert(NewPayment {
                order_id: order.id,
                gateway_order_id: req.razorpay_order_id,
                gateway_payment_id: req.razorpay_payment_id,
                gateway_signature: req.razorpay_signature,
                amount_minor: order.amount_minor,
            })
            .await
            .map_err(|e| {
                // Order is SUCCESS with no payment row; reconciled out of band.
                tracing::error!(order_id = %order.id, error = %e, "payment insert failed after finalize");
                CheckoutError::Internal(e)
            })?;

        tracing::info!(
            order_id = %order.id,
            payment_id = %payment.id,
            amount_minor = order.amount_minor,
            "payment verified"
        );

        Ok(VerifyPaymentResponse {
            verified: true,
            order_id: order.id,
        })
    }
}
