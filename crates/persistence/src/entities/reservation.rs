//! Reservation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ReservationStatus;

/// Database enum for reservation_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
pub enum ReservationStatusDb {
    Pending,
    Approved,
    Rejected,
    AutoApproved,
    CancelledByClient,
    CancelledByBusiness,
}

impl From<ReservationStatusDb> for ReservationStatus {
    fn from(db: ReservationStatusDb) -> Self {
        match db {
            ReservationStatusDb::Pending => Self::Pending,
            ReservationStatusDb::Approved => Self::Approved,
            ReservationStatusDb::Rejected => Self::Rejected,
            ReservationStatusDb::AutoApproved => Self::AutoApproved,
            ReservationStatusDb::CancelledByClient => Self::CancelledByClient,
            ReservationStatusDb::CancelledByBusiness => Self::CancelledByBusiness,
        }
    }
}

impl From<ReservationStatus> for ReservationStatusDb {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Approved => Self::Approved,
            ReservationStatus::Rejected => Self::Rejected,
            ReservationStatus::AutoApproved => Self::AutoApproved,
            ReservationStatus::CancelledByClient => Self::CancelledByClient,
            ReservationStatus::CancelledByBusiness => Self::CancelledByBusiness,
        }
    }
}

/// Database row mapping for the reservations table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: ReservationStatusDb,
    pub group_id: Option<Uuid>,
    pub custom_price_cents: Option<i64>,
    pub total_price_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReservationEntity> for domain::models::Reservation {
    fn from(entity: ReservationEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            service_id: entity.service_id,
            employee_id: entity.employee_id,
            client_name: entity.client_name,
            client_phone: entity.client_phone,
            starts_at: entity.starts_at,
            duration_minutes: entity.duration_minutes,
            status: entity.status.into(),
            group_id: entity.group_id,
            custom_price_cents: entity.custom_price_cents,
            total_price_cents: entity.total_price_cents,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_roundtrip() {
        for db in [
            ReservationStatusDb::Pending,
            ReservationStatusDb::Approved,
            ReservationStatusDb::Rejected,
            ReservationStatusDb::AutoApproved,
            ReservationStatusDb::CancelledByClient,
            ReservationStatusDb::CancelledByBusiness,
        ] {
            assert_eq!(ReservationStatusDb::from(ReservationStatus::from(db)), db);
        }
    }
}
