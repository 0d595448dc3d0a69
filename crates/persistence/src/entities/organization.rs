//! Organization entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::organization::{Branding, WeekSchedule};
use domain::models::ReservationPolicy;

/// Database enum for reservation_policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reservation_policy", rename_all = "snake_case")]
pub enum ReservationPolicyDb {
    Manual,
    AutoIfAvailable,
}

impl From<ReservationPolicyDb> for ReservationPolicy {
    fn from(db: ReservationPolicyDb) -> Self {
        match db {
            ReservationPolicyDb::Manual => Self::Manual,
            ReservationPolicyDb::AutoIfAvailable => Self::AutoIfAvailable,
        }
    }
}

impl From<ReservationPolicy> for ReservationPolicyDb {
    fn from(policy: ReservationPolicy) -> Self {
        match policy {
            ReservationPolicy::Manual => Self::Manual,
            ReservationPolicy::AutoIfAvailable => Self::AutoIfAvailable,
        }
    }
}

/// Database row mapping for the organizations table.
///
/// Branding and schedule are JSONB columns; rows edited outside the API
/// that fail to deserialize fall back to defaults rather than erroring.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub branding: JsonValue,
    pub schedule: JsonValue,
    pub reservation_policy: ReservationPolicyDb,
    pub domains: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrganizationEntity> for domain::models::Organization {
    fn from(entity: OrganizationEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            contact_email: entity.contact_email,
            phone: entity.phone,
            branding: serde_json::from_value::<Branding>(entity.branding).unwrap_or_default(),
            schedule: serde_json::from_value::<WeekSchedule>(entity.schedule).unwrap_or_default(),
            reservation_policy: entity.reservation_policy.into(),
            domains: entity.domains,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_policy_conversion() {
        assert_eq!(
            ReservationPolicy::from(ReservationPolicyDb::Manual),
            ReservationPolicy::Manual
        );
        assert_eq!(
            ReservationPolicyDb::from(ReservationPolicy::AutoIfAvailable),
            ReservationPolicyDb::AutoIfAvailable
        );
    }

    #[test]
    fn test_malformed_branding_falls_back_to_default() {
        let entity = OrganizationEntity {
            id: Uuid::nil(),
            name: "Salon".to_string(),
            slug: "salon".to_string(),
            contact_email: "a@b.mx".to_string(),
            phone: None,
            branding: serde_json::json!("not-an-object"),
            schedule: serde_json::json!({}),
            reservation_policy: ReservationPolicyDb::Manual,
            domains: vec![],
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let org: domain::models::Organization = entity.into();
        assert!(org.branding.primary_color.is_none());
    }
}
