//! Service entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the services table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceEntity> for domain::models::Service {
    fn from(entity: ServiceEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            name: entity.name,
            description: entity.description,
            duration_minutes: entity.duration_minutes,
            price_cents: entity.price_cents,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
