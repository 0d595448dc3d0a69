//! Reservation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use shared::pagination::PageInfo;

/// Lifecycle status of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    AutoApproved,
    CancelledByClient,
    CancelledByBusiness,
}

impl ReservationStatus {
    /// Whether this status occupies the requested slot.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Approved | ReservationStatus::AutoApproved
        )
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "rejected" => Ok(ReservationStatus::Rejected),
            "auto_approved" => Ok(ReservationStatus::AutoApproved),
            "cancelled_by_client" => Ok(ReservationStatus::CancelledByClient),
            "cancelled_by_business" => Ok(ReservationStatus::CancelledByBusiness),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::AutoApproved => "auto_approved",
            ReservationStatus::CancelledByClient => "cancelled_by_client",
            ReservationStatus::CancelledByBusiness => "cancelled_by_business",
        };
        write!(f, "{}", s)
    }
}

/// A booking request made by an end customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Reservation {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: ReservationStatus,
    /// Correlates reservations created together in one booking flow.
    pub group_id: Option<Uuid>,
    pub custom_price_cents: Option<i64>,
    pub total_price_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One service requested in a public booking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct BookingItem {
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
}

/// Public request to create a booking of one or more services.
///
/// When more than one item is submitted the created reservations share a
/// freshly generated `group_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateBookingRequest {
    pub organization_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub client_name: String,
    #[validate(custom(function = "shared::validation::validate_phone_e164"))]
    pub client_phone: Option<String>,
    #[validate(length(min = 1, max = 10, message = "A booking must contain 1-10 services"))]
    #[validate(nested)]
    pub items: Vec<BookingItem>,
}

/// Decision applied to a pending reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationDecision {
    Approve,
    Reject,
}

impl ReservationDecision {
    /// Resulting status for a manual decision.
    pub fn resulting_status(&self) -> ReservationStatus {
        match self {
            ReservationDecision::Approve => ReservationStatus::Approved,
            ReservationDecision::Reject => ReservationStatus::Rejected,
        }
    }
}

/// Request to update the status of a single reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateReservationStatusRequest {
    pub decision: ReservationDecision,
    /// Suppresses the outbound notification for this update. Used by bulk
    /// group updates so only one notification fires per group.
    #[serde(default)]
    pub skip_notification: bool,
}

/// Request to decide a whole reservation group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDecisionRequest {
    pub decision: ReservationDecision,
}

/// Result of a bulk group decision.
///
/// There is no rollback on partial failure; a mismatch between
/// `updated_count` and the group's pending size is surfaced as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDecisionResult {
    pub group_id: Uuid,
    pub decision: ReservationDecision,
    pub updated_count: usize,
    pub notified_count: usize,
    pub failed_ids: Vec<Uuid>,
}

/// A reservation row as rendered in the management screen: one row per
/// group, annotated with the group summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReservationRow {
    pub reservation: Reservation,
    pub is_group: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummary>,
}

/// Synthetic summary shown on the first row of a reservation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupSummary {
    pub group_id: Uuid,
    pub member_ids: Vec<Uuid>,
    pub service_count: usize,
    pub service_names: String,
    pub total_price_cents: i64,
}

/// Response for the grouped reservation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListReservationsResponse {
    pub data: Vec<ReservationRow>,
    pub pagination: PageInfo,
}

/// Query parameters for listing reservations.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListReservationsQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::AutoApproved).unwrap(),
            "\"auto_approved\""
        );
        assert_eq!(
            serde_json::to_string(&ReservationStatus::CancelledByClient).unwrap(),
            "\"cancelled_by_client\""
        );
    }

    #[test]
    fn test_status_is_confirmed() {
        assert!(ReservationStatus::Approved.is_confirmed());
        assert!(ReservationStatus::AutoApproved.is_confirmed());
        assert!(!ReservationStatus::Pending.is_confirmed());
        assert!(!ReservationStatus::Rejected.is_confirmed());
    }

    #[test]
    fn test_decision_resulting_status() {
        assert_eq!(
            ReservationDecision::Approve.resulting_status(),
            ReservationStatus::Approved
        );
        assert_eq!(
            ReservationDecision::Reject.resulting_status(),
            ReservationStatus::Rejected
        );
    }

    #[test]
    fn test_update_status_request_skip_notification_defaults_false() {
        let json = r#"{"decision":"approve"}"#;
        let request: UpdateReservationStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.decision, ReservationDecision::Approve);
        assert!(!request.skip_notification);
    }

    #[test]
    fn test_booking_request_validation() {
        let valid = CreateBookingRequest {
            organization_id: Uuid::nil(),
            client_name: "Ana".to_string(),
            client_phone: Some("+5215512345678".to_string()),
            items: vec![BookingItem {
                service_id: Uuid::nil(),
                employee_id: None,
                starts_at: Utc::now(),
            }],
        };
        assert!(valid.validate().is_ok());

        let empty_items = CreateBookingRequest {
            items: vec![],
            ..valid
        };
        assert!(empty_items.validate().is_err());
    }
}
