//! Appointment repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{Appointment, AppointmentStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::appointment::{AppointmentEntity, AppointmentStatusDb};

/// Repository for appointment database operations.
#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an appointment.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        employee_id: Uuid,
        client_id: Option<Uuid>,
        starts_at: DateTime<Utc>,
        duration_minutes: i32,
        total_price_cents: Option<i64>,
    ) -> Result<Appointment, sqlx::Error> {
        let entity = sqlx::query_as::<_, AppointmentEntity>(
            r#"
            INSERT INTO appointments (organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, total_price_cents)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, status, custom_price_cents, total_price_cents, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(service_id)
        .bind(employee_id)
        .bind(client_id)
        .bind(starts_at)
        .bind(duration_minutes)
        .bind(total_price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find appointment by ID within an organization.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AppointmentEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, status, custom_price_cents, total_price_cents, created_at, updated_at
            FROM appointments
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Update appointment status.
    pub async fn update_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AppointmentEntity>(
            r#"
            UPDATE appointments
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, status, custom_price_cents, total_price_cents, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(AppointmentStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Appointments starting inside a window, oldest first. Feeds the
    /// analytics aggregation.
    pub async fn list_between(
        &self,
        organization_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let entities = sqlx::query_as::<_, AppointmentEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, status, custom_price_cents, total_price_cents, created_at, updated_at
            FROM appointments
            WHERE organization_id = $1 AND starts_at >= $2 AND starts_at < $3
            ORDER BY starts_at ASC
            "#,
        )
        .bind(organization_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Scheduled appointments overlapping a time window. Feeds the
    /// availability check for auto-approval.
    pub async fn find_scheduled_overlapping(
        &self,
        organization_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let entities = sqlx::query_as::<_, AppointmentEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_id, starts_at, duration_minutes, status, custom_price_cents, total_price_cents, created_at, updated_at
            FROM appointments
            WHERE organization_id = $1
              AND status = 'scheduled'
              AND starts_at < $3
              AND starts_at + (duration_minutes || ' minutes')::interval > $2
            "#,
        )
        .bind(organization_id)
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
