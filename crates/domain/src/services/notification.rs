//! Outbound notification abstraction.
//!
//! Reservation confirmations and group decisions are delivered to clients
//! over WhatsApp. Delivery is best-effort: failures are reported to the
//! caller for logging and counting, never propagated as request errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ReservationStatus;

/// Notification type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ReservationConfirmed,
    ReservationDecision,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::ReservationConfirmed => write!(f, "reservation_confirmed"),
            NotificationType::ReservationDecision => write!(f, "reservation_decision"),
        }
    }
}

/// Payload for a reservation confirmation (auto-approval path).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReservationConfirmedPayload {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub reservation_id: Uuid,
    pub organization_name: String,
    pub service_name: String,
    pub starts_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

/// Payload for a manual decision on a reservation or group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReservationDecisionPayload {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub reservation_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    pub status: ReservationStatus,
    pub organization_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of a notification send attempt.
#[derive(Debug, Clone)]
pub enum NotificationResult {
    /// Message was accepted by the gateway.
    Sent,
    /// Client has no phone on file.
    NoPhone,
    /// Delivery failed (non-blocking).
    Failed(String),
    /// Suppressed by the caller (skip_notification).
    Skipped,
}

impl NotificationResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationResult::Sent)
    }
}

/// Sender abstraction over the WhatsApp gateway.
#[async_trait::async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a reservation confirmation to the client's phone.
    async fn send_confirmation(
        &self,
        phone: &str,
        payload: ReservationConfirmedPayload,
    ) -> NotificationResult;

    /// Send a decision notification to the client's phone.
    async fn send_decision(
        &self,
        phone: &str,
        payload: ReservationDecisionPayload,
    ) -> NotificationResult;
}

/// Mock sender for development and testing. Logs instead of sending.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationSender {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    /// A mock sender that simulates gateway failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_confirmation(
        &self,
        phone: &str,
        payload: ReservationConfirmedPayload,
    ) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                phone = %phone,
                reservation_id = %payload.reservation_id,
                "Mock sender simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            phone = %phone,
            reservation_id = %payload.reservation_id,
            service = %payload.service_name,
            "Mock: would send reservation_confirmed message"
        );
        NotificationResult::Sent
    }

    async fn send_decision(
        &self,
        phone: &str,
        payload: ReservationDecisionPayload,
    ) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                phone = %phone,
                reservation_id = %payload.reservation_id,
                "Mock sender simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            phone = %phone,
            reservation_id = %payload.reservation_id,
            status = %payload.status,
            "Mock: would send reservation_decision message"
        );
        NotificationResult::Sent
    }
}
