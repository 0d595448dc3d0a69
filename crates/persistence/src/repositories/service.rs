//! Service catalog repository.

use domain::models::Service;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::service::ServiceEntity;

/// Repository for service catalog database operations.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a service for an organization.
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        description: Option<&str>,
        duration_minutes: i32,
        price_cents: i64,
    ) -> Result<Service, sqlx::Error> {
        let entity = sqlx::query_as::<_, ServiceEntity>(
            r#"
            INSERT INTO services (organization_id, name, description, duration_minutes, price_cents)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, name, description, duration_minutes, price_cents, is_active, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(description)
        .bind(duration_minutes)
        .bind(price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find service by ID within an organization.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Service>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ServiceEntity>(
            r#"
            SELECT id, organization_id, name, description, duration_minutes, price_cents, is_active, created_at, updated_at
            FROM services
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List active services for an organization.
    pub async fn list_active(&self, organization_id: Uuid) -> Result<Vec<Service>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ServiceEntity>(
            r#"
            SELECT id, organization_id, name, description, duration_minutes, price_cents, is_active, created_at, updated_at
            FROM services
            WHERE organization_id = $1 AND is_active = true
            ORDER BY name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Count active services for an organization. Used for plan limits.
    pub async fn count_active(&self, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM services
            WHERE organization_id = $1 AND is_active = true
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Fetch several services by ID within an organization. Used when a
    /// booking references multiple services at once.
    pub async fn find_many(
        &self,
        organization_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Service>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ServiceEntity>(
            r#"
            SELECT id, organization_id, name, description, duration_minutes, price_cents, is_active, created_at, updated_at
            FROM services
            WHERE organization_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(organization_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Soft delete a service.
    pub async fn soft_delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2 AND is_active = true
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
