//! Plan entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the plans table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub monthly_price_cents: i64,
    pub currency: String,
    pub tier: i16,
    pub max_employees: i32,
    pub max_services: i32,
    pub monthly_reservation_cap: i32,
    pub whatsapp_message_quota: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlanEntity> for domain::models::Plan {
    fn from(entity: PlanEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            monthly_price_cents: entity.monthly_price_cents,
            currency: entity.currency,
            tier: entity.tier,
            max_employees: entity.max_employees,
            max_services: entity.max_services,
            monthly_reservation_cap: entity.monthly_reservation_cap,
            whatsapp_message_quota: entity.whatsapp_message_quota,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
