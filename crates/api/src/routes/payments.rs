//! Payment confirmation route.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{PaymentOutcome, PaymentPoller};

/// Response for a bounded payment confirmation poll.
#[derive(Debug, Serialize)]
pub struct PaymentConfirmationResponse {
    pub payment_id: String,
    pub outcome: PaymentOutcome,
}

/// GET /api/v1/payments/:payment_id/confirmation
///
/// Blocks while polling the payment provider at a fixed interval, up to
/// the configured maximum duration. A `timed_out` outcome is a normal
/// response, not an error; the caller may retry.
pub async fn await_payment_confirmation(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let poller = PaymentPoller::new(state.config.payments.clone())
        .map_err(|e| ApiError::Internal(format!("Payment poller setup failed: {}", e)))?;

    let outcome = poller.poll(&payment_id).await;

    info!(payment_id = %payment_id, outcome = ?outcome, "Payment confirmation poll finished");

    Ok(Json(PaymentConfirmationResponse {
        payment_id,
        outcome,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_response_serialization() {
        let response = PaymentConfirmationResponse {
            payment_id: "pay_123".to_string(),
            outcome: PaymentOutcome::TimedOut,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"payment_id\":\"pay_123\""));
        assert!(json.contains("\"outcome\":\"timed_out\""));
    }
}
