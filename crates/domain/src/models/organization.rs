//! Organization domain models.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use shared::pagination::PageInfo;

/// How incoming reservations are approved for an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationPolicy {
    /// Every reservation waits for staff approval.
    Manual,
    /// Reservations are approved automatically when the slot is free.
    AutoIfAvailable,
}

impl FromStr for ReservationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(ReservationPolicy::Manual),
            "auto_if_available" => Ok(ReservationPolicy::AutoIfAvailable),
            _ => Err(format!("Unknown reservation policy: {}", s)),
        }
    }
}

impl std::fmt::Display for ReservationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationPolicy::Manual => write!(f, "manual"),
            ReservationPolicy::AutoIfAvailable => write!(f, "auto_if_available"),
        }
    }
}

/// Branding settings shown on the organization's public pages.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct Branding {
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub secondary_color: Option<String>,
    #[validate(url(message = "Logo URL must be a valid URL"))]
    pub logo_url: Option<String>,
}

/// Opening hours for a single weekday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct DayHours {
    pub closed: bool,
    pub open: Option<NaiveTime>,
    pub close: Option<NaiveTime>,
}

/// Weekly opening hours.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct WeekSchedule {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

/// Organization domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub branding: Branding,
    pub schedule: WeekSchedule,
    pub reservation_policy: ReservationPolicy,
    pub domains: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: String,
    #[validate(length(min = 3, max = 50, message = "Slug must be 3-50 characters"))]
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: String,
    #[validate(email(message = "Invalid contact email format"))]
    pub contact_email: String,
    #[validate(custom(function = "shared::validation::validate_phone_e164"))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub branding: Option<Branding>,
    pub schedule: Option<WeekSchedule>,
    pub reservation_policy: Option<ReservationPolicy>,
}

/// Request to update an organization (all fields optional).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid contact email format"))]
    pub contact_email: Option<String>,
    #[validate(custom(function = "shared::validation::validate_phone_e164"))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub branding: Option<Branding>,
    pub schedule: Option<WeekSchedule>,
    pub reservation_policy: Option<ReservationPolicy>,
    pub domains: Option<Vec<String>>,
}

impl UpdateOrganizationRequest {
    /// Custom domains are validated separately because validator's collection
    /// support does not cover `Option<Vec<String>>`.
    pub fn validate_domains(&self) -> Result<(), validator::ValidationError> {
        if let Some(ref domains) = self.domains {
            for domain in domains {
                shared::validation::validate_domain(domain)?;
            }
        }
        Ok(())
    }
}

/// Response for organization list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListOrganizationsResponse {
    pub data: Vec<Organization>,
    pub pagination: PageInfo,
}

/// Query parameters for listing organizations.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListOrganizationsQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

/// Query parameters for public org resolution.
///
/// Custom-domain tenants resolve by `domain`; tenants on the shared
/// platform subdomain resolve by `slug`. At least one must be given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolveOrganizationQuery {
    pub domain: Option<String>,
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&ReservationPolicy::AutoIfAvailable).unwrap(),
            "\"auto_if_available\""
        );
        assert_eq!(
            serde_json::to_string(&ReservationPolicy::Manual).unwrap(),
            "\"manual\""
        );
    }

    #[test]
    fn test_reservation_policy_from_str() {
        assert_eq!(
            ReservationPolicy::from_str("manual").unwrap(),
            ReservationPolicy::Manual
        );
        assert_eq!(
            ReservationPolicy::from_str("AUTO_IF_AVAILABLE").unwrap(),
            ReservationPolicy::AutoIfAvailable
        );
        assert!(ReservationPolicy::from_str("whenever").is_err());
    }

    #[test]
    fn test_create_organization_request_validation() {
        let valid = CreateOrganizationRequest {
            name: "Salon Aurora".to_string(),
            slug: "salon-aurora".to_string(),
            contact_email: "hola@salonaurora.mx".to_string(),
            phone: Some("+5215512345678".to_string()),
            branding: None,
            schedule: None,
            reservation_policy: Some(ReservationPolicy::AutoIfAvailable),
        };
        assert!(valid.validate().is_ok());

        let invalid_slug = CreateOrganizationRequest {
            slug: "Salon-Aurora".to_string(),
            ..valid.clone()
        };
        assert!(invalid_slug.validate().is_err());

        let invalid_phone = CreateOrganizationRequest {
            phone: Some("5512345678".to_string()),
            ..valid.clone()
        };
        assert!(invalid_phone.validate().is_err());
    }

    #[test]
    fn test_branding_validation() {
        let valid = Branding {
            primary_color: Some("#1a2b3c".to_string()),
            secondary_color: Some("#fff".to_string()),
            logo_url: Some("https://cdn.example.com/logo.png".to_string()),
        };
        assert!(valid.validate().is_ok());

        let invalid = Branding {
            primary_color: Some("blue".to_string()),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_update_request_domain_validation() {
        let request = UpdateOrganizationRequest {
            name: None,
            contact_email: None,
            phone: None,
            branding: None,
            schedule: None,
            reservation_policy: None,
            domains: Some(vec!["salon.example.com".to_string()]),
        };
        assert!(request.validate_domains().is_ok());

        let bad = UpdateOrganizationRequest {
            domains: Some(vec!["Not A Domain".to_string()]),
            ..request
        };
        assert!(bad.validate_domains().is_err());
    }

    #[test]
    fn test_week_schedule_serialization() {
        let schedule = WeekSchedule {
            monday: DayHours {
                closed: false,
                open: NaiveTime::from_hms_opt(9, 0, 0),
                close: NaiveTime::from_hms_opt(18, 0, 0),
            },
            sunday: DayHours {
                closed: true,
                open: None,
                close: None,
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains("\"monday\""));
        assert!(json.contains("09:00:00"));
        assert!(json.contains("\"closed\":true"));
    }
}
