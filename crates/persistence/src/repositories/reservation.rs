//! Reservation repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{ListReservationsQuery, Reservation, ReservationStatus};
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::reservation::{ReservationEntity, ReservationStatusDb};

/// One reservation-to-be within a booking.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: ReservationStatus,
    pub total_price_cents: Option<i64>,
}

/// Repository for reservation database operations.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the reservations for one booking atomically.
    ///
    /// When `items` has more than one entry, all rows share a freshly
    /// generated group ID; a single-item booking gets no group.
    pub async fn create_booking(
        &self,
        organization_id: Uuid,
        client_name: &str,
        client_phone: Option<&str>,
        items: &[NewReservation],
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let group_id = if items.len() > 1 {
            Some(Uuid::new_v4())
        } else {
            None
        };

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let entity = sqlx::query_as::<_, ReservationEntity>(
                r#"
                INSERT INTO reservations (organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, total_price_cents)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
                "#,
            )
            .bind(organization_id)
            .bind(item.service_id)
            .bind(item.employee_id)
            .bind(client_name)
            .bind(client_phone)
            .bind(item.starts_at)
            .bind(item.duration_minutes)
            .bind(ReservationStatusDb::from(item.status))
            .bind(group_id)
            .bind(item.total_price_cents)
            .fetch_one(&mut *tx)
            .await?;

            created.push(entity.into());
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Find reservation by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReservationEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// All members of a reservation group, oldest first.
    pub async fn find_group_members(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ReservationEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
            FROM reservations
            WHERE group_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Update reservation status.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReservationEntity>(
            r#"
            UPDATE reservations
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(ReservationStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List reservations with pagination and filtering. Grouping into rows
    /// happens in the domain layer; this returns raw reservations.
    pub async fn list(
        &self,
        organization_id: Uuid,
        query: &ListReservationsQuery,
    ) -> Result<(Vec<Reservation>, i64), sqlx::Error> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };

        // Build dynamic query based on filters
        let mut conditions = vec!["organization_id = $1".to_string()];

        if let Some(status) = query.status {
            conditions.push(format!("status = '{}'", status));
        }

        if let Some(from) = query.from {
            conditions.push(format!("starts_at >= '{}'", from.to_rfc3339()));
        }

        if let Some(to) = query.to {
            conditions.push(format!("starts_at < '{}'", to.to_rfc3339()));
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        // Get total count
        let count_query = format!("SELECT COUNT(*) FROM reservations {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(organization_id)
            .fetch_one(&self.pool)
            .await?;

        // Get reservations
        let list_query = format!(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
            FROM reservations
            {}
            ORDER BY starts_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            where_clause
        );

        let entities = sqlx::query_as::<_, ReservationEntity>(&list_query)
            .bind(organization_id)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

        let reservations = entities.into_iter().map(Into::into).collect();

        Ok((reservations, total))
    }

    /// Confirmed reservations overlapping a time window. Feeds the
    /// availability check for auto-approval.
    pub async fn find_confirmed_overlapping(
        &self,
        organization_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ReservationEntity>(
            r#"
            SELECT id, organization_id, service_id, employee_id, client_name, client_phone, starts_at, duration_minutes, status, group_id, custom_price_cents, total_price_cents, created_at, updated_at
            FROM reservations
            WHERE organization_id = $1
              AND status IN ('approved', 'auto_approved')
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

    /// Number of reservations created in a period. Drives the monthly
    /// reservation cap.
    pub async fn count_created_between(
        &self,
        organization_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reservations
            WHERE organization_id = $1 AND created_at >= $2 AND created_at < $3
            "#,
        )
        .bind(organization_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
