//! Appointment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::AppointmentStatus;

/// Database enum for appointment_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
pub enum AppointmentStatusDb {
    Scheduled,
    Completed,
    NoShow,
    Cancelled,
}

impl From<AppointmentStatusDb> for AppointmentStatus {
    fn from(db: AppointmentStatusDb) -> Self {
        match db {
            AppointmentStatusDb::Scheduled => Self::Scheduled,
            AppointmentStatusDb::Completed => Self::Completed,
            AppointmentStatusDb::NoShow => Self::NoShow,
            AppointmentStatusDb::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AppointmentStatus> for AppointmentStatusDb {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Scheduled => Self::Scheduled,
            AppointmentStatus::Completed => Self::Completed,
            AppointmentStatus::NoShow => Self::NoShow,
            AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Database row mapping for the appointments table.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub client_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatusDb,
    pub custom_price_cents: Option<i64>,
    pub total_price_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AppointmentEntity> for domain::models::Appointment {
    fn from(entity: AppointmentEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            service_id: entity.service_id,
            employee_id: entity.employee_id,
            client_id: entity.client_id,
            starts_at: entity.starts_at,
            duration_minutes: entity.duration_minutes,
            status: entity.status.into(),
            custom_price_cents: entity.custom_price_cents,
            total_price_cents: entity.total_price_cents,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
