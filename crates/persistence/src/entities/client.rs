//! Client entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the clients table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientEntity> for domain::models::Client {
    fn from(entity: ClientEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
