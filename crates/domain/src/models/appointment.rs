//! Appointment domain models.
//!
//! An appointment is a confirmed scheduled slot, distinct from a
//! reservation (which is a pending booking request).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a confirmed appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    NoShow,
    Cancelled,
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "no_show" => Ok(AppointmentStatus::NoShow),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
            AppointmentStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// A confirmed scheduled service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Appointment {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub client_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub custom_price_cents: Option<i64>,
    pub total_price_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to schedule an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateAppointmentRequest {
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub client_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    /// Defaults to the service's duration when omitted.
    #[validate(range(min = 5, max = 720, message = "Duration must be 5-720 minutes"))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub total_price_cents: Option<i64>,
}

/// Request to move an appointment through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

/// Query parameters for the appointment calendar listing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListAppointmentsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Completed,
            AppointmentStatus::NoShow,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(
                AppointmentStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"no_show\""
        );
    }
}
