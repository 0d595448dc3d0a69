//! Membership repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{Membership, MembershipStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::membership::{MembershipEntity, MembershipStatusDb};

/// Repository for membership database operations.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a membership for an organization.
    pub async fn create(
        &self,
        organization_id: Uuid,
        plan_id: Uuid,
        status: MembershipStatus,
        current_period_start: DateTime<Utc>,
        current_period_end: DateTime<Utc>,
    ) -> Result<Membership, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            INSERT INTO memberships (organization_id, plan_id, status, current_period_start, current_period_end)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, plan_id, status, current_period_start, current_period_end, cancel_at_period_end, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(plan_id)
        .bind(MembershipStatusDb::from(status))
        .bind(current_period_start)
        .bind(current_period_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find the membership for an organization. One membership per org.
    pub async fn find_by_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, organization_id, plan_id, status, current_period_start, current_period_end, cancel_at_period_end, created_at, updated_at
            FROM memberships
            WHERE organization_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Update membership status.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: MembershipStatus,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            UPDATE memberships
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, organization_id, plan_id, status, current_period_start, current_period_end, cancel_at_period_end, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(MembershipStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Renew a membership into a new billing period.
    pub async fn renew(
        &self,
        id: Uuid,
        current_period_start: DateTime<Utc>,
        current_period_end: DateTime<Utc>,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let entity = sqlx::query_as::<_, MembershipEntity>(
            r#"
            UPDATE memberships
            SET status = 'active',
                current_period_start = $2,
                current_period_end = $3,
                cancel_at_period_end = false,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, organization_id, plan_id, status, current_period_start, current_period_end, cancel_at_period_end, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(current_period_start)
        .bind(current_period_end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Move overdue active/trial memberships to expired. Returns the number
    /// of rows updated. Used by the periodic sweep job.
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET status = 'expired', updated_at = NOW()
            WHERE current_period_end < $1
              AND status IN ('active', 'trial', 'grace_period', 'past_due')
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
