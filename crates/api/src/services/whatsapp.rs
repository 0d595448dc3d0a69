//! WhatsApp gateway delivery.
//!
//! Posts signed JSON payloads to the configured WhatsApp gateway. Delivery
//! is best-effort: failures are logged and counted, never surfaced as
//! request errors.

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::{info, warn};

use domain::services::notification::{
    NotificationResult, NotificationSender, ReservationConfirmedPayload,
    ReservationDecisionPayload,
};

use crate::config::WhatsAppConfig;
use crate::middleware::metrics::record_notification_sent;

/// Signature header attached to every gateway request.
pub const SIGNATURE_HEADER: &str = "X-Bookline-Signature";

/// Production sender that posts to the WhatsApp gateway.
pub struct WhatsAppSender {
    config: WhatsAppConfig,
    client: Client,
}

/// Envelope the gateway accepts: destination phone plus the typed payload.
#[derive(Debug, Serialize)]
struct GatewayEnvelope<T: Serialize> {
    to: String,
    message: T,
}

impl WhatsAppSender {
    /// Create a sender from configuration.
    pub fn new(config: WhatsAppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// HMAC-SHA256 signature of the serialized payload, hex-encoded.
    fn sign_payload(&self, payload: &str) -> Result<String, String> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.config.signing_secret.as_bytes())
            .map_err(|e| format!("Invalid signing secret: {}", e))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    async fn deliver<T: Serialize>(&self, phone: &str, message: T) -> NotificationResult {
        if !self.config.enabled {
            info!(phone = %phone, "WhatsApp disabled; notification skipped");
            return NotificationResult::Skipped;
        }

        let envelope = GatewayEnvelope {
            to: phone.to_string(),
            message,
        };

        let body = match serde_json::to_string(&envelope) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to serialize WhatsApp payload");
                record_notification_sent(false);
                return NotificationResult::Failed(format!("Serialization error: {}", e));
            }
        };

        let signature = match self.sign_payload(&body) {
            Ok(sig) => sig,
            Err(e) => {
                warn!(error = %e, "Failed to sign WhatsApp payload");
                record_notification_sent(false);
                return NotificationResult::Failed(e);
            }
        };

        let result = self
            .client
            .post(&self.config.gateway_url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(phone = %phone, "WhatsApp message accepted by gateway");
                record_notification_sent(true);
                NotificationResult::Sent
            }
            Ok(response) => {
                let status = response.status();
                warn!(phone = %phone, status = %status, "WhatsApp gateway rejected message");
                record_notification_sent(false);
                NotificationResult::Failed(format!("Gateway returned {}", status))
            }
            Err(e) => {
                warn!(phone = %phone, error = %e, "WhatsApp delivery failed");
                record_notification_sent(false);
                NotificationResult::Failed(format!("Request error: {}", e))
            }
        }
    }
}

#[async_trait::async_trait]
impl NotificationSender for WhatsAppSender {
    async fn send_confirmation(
        &self,
        phone: &str,
        payload: ReservationConfirmedPayload,
    ) -> NotificationResult {
        self.deliver(phone, payload).await
    }

    async fn send_decision(
        &self,
        phone: &str,
        payload: ReservationDecisionPayload,
    ) -> NotificationResult {
        self.deliver(phone, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::ReservationStatus;
    use domain::services::notification::NotificationType;
    use uuid::Uuid;

    fn test_config(enabled: bool) -> WhatsAppConfig {
        WhatsAppConfig {
            enabled,
            gateway_url: "http://localhost:9/messages".to_string(),
            signing_secret: "secret".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_sign_payload_deterministic() {
        let sender = WhatsAppSender::new(test_config(true)).unwrap();
        let a = sender.sign_payload("{\"to\":\"+5215512345678\"}").unwrap();
        let b = sender.sign_payload("{\"to\":\"+5215512345678\"}").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // hex-encoded sha256
    }

    #[test]
    fn test_sign_payload_differs_by_content() {
        let sender = WhatsAppSender::new(test_config(true)).unwrap();
        let a = sender.sign_payload("payload-a").unwrap();
        let b = sender.sign_payload("payload-b").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_disabled_sender_skips() {
        let sender = WhatsAppSender::new(test_config(false)).unwrap();
        let payload = ReservationDecisionPayload {
            notification_type: NotificationType::ReservationDecision,
            reservation_id: Uuid::nil(),
            group_id: None,
            status: ReservationStatus::Approved,
            organization_name: "Salon Aurora".to_string(),
            timestamp: Utc::now(),
        };
        let result = sender.send_decision("+5215512345678", payload).await;
        assert!(matches!(result, NotificationResult::Skipped));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_reports_failure() {
        let sender = WhatsAppSender::new(test_config(true)).unwrap();
        let payload = ReservationConfirmedPayload {
            notification_type: NotificationType::ReservationConfirmed,
            reservation_id: Uuid::nil(),
            organization_name: "Salon Aurora".to_string(),
            service_name: "Corte".to_string(),
            starts_at: Utc::now(),
            timestamp: Utc::now(),
        };
        let result = sender.send_confirmation("+5215512345678", payload).await;
        assert!(matches!(result, NotificationResult::Failed(_)));
    }
}
