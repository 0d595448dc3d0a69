//! Employee repository.

use domain::models::Employee;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::employee::EmployeeEntity;

/// Repository for employee database operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an employee for an organization.
    pub async fn create(
        &self,
        organization_id: Uuid,
        display_name: &str,
    ) -> Result<Employee, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            INSERT INTO employees (organization_id, display_name)
            VALUES ($1, $2)
            RETURNING id, organization_id, display_name, is_active, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find employee by ID within an organization.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT id, organization_id, display_name, is_active, created_at, updated_at
            FROM employees
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List active employees for an organization.
    pub async fn list_active(&self, organization_id: Uuid) -> Result<Vec<Employee>, sqlx::Error> {
        let entities = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT id, organization_id, display_name, is_active, created_at, updated_at
            FROM employees
            WHERE organization_id = $1 AND is_active = true
            ORDER BY display_name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Count active employees for an organization. Used for plan limits.
    pub async fn count_active(&self, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM employees
            WHERE organization_id = $1 AND is_active = true
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
