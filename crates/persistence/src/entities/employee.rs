//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the employees table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeEntity> for domain::models::Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            display_name: entity.display_name,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
