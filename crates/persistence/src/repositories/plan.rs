//! Plan repository for database operations.

use domain::models::Plan;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::plan::PlanEntity;

/// Repository for subscription plan lookups.
#[derive(Clone)]
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active plans ordered by tier.
    pub async fn list_active(&self) -> Result<Vec<Plan>, sqlx::Error> {
        let entities = sqlx::query_as::<_, PlanEntity>(
            r#"
            SELECT id, code, name, monthly_price_cents, currency, tier, max_employees, max_services, monthly_reservation_cap, whatsapp_message_quota, is_active, created_at, updated_at
            FROM plans
            WHERE is_active = true
            ORDER BY tier ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Find plan by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, sqlx::Error> {
        let entity = sqlx::query_as::<_, PlanEntity>(
            r#"
            SELECT id, code, name, monthly_price_cents, currency, tier, max_employees, max_services, monthly_reservation_cap, whatsapp_message_quota, is_active, created_at, updated_at
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find plan by code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Plan>, sqlx::Error> {
        let entity = sqlx::query_as::<_, PlanEntity>(
            r#"
            SELECT id, code, name, monthly_price_cents, currency, tier, max_employees, max_services, monthly_reservation_cap, whatsapp_message_quota, is_active, created_at, updated_at
            FROM plans
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Highest tier among active plans. Drives the upgrade-button rule.
    pub async fn top_tier(&self) -> Result<Option<i16>, sqlx::Error> {
        let tier = sqlx::query_scalar::<_, Option<i16>>(
            r#"
            SELECT MAX(tier) FROM plans WHERE is_active = true
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(tier)
    }
}
