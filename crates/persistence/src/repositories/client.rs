//! Client repository.

use std::collections::HashMap;

use chrono::NaiveDate;
use domain::models::Client;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::client::ClientEntity;

/// Repository for client database operations.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a client record for an organization.
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Client, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClientEntity>(
            r#"
            INSERT INTO clients (organization_id, name, phone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, organization_id, name, phone, email, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find client by ID within an organization.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Client>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClientEntity>(
            r#"
            SELECT id, organization_id, name, phone, email, created_at, updated_at
            FROM clients
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List clients for an organization.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Client>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClientEntity>(
            r#"
            SELECT id, organization_id, name, phone, email, created_at, updated_at
            FROM clients
            WHERE organization_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Date of each client's most recent appointment, keyed by client ID.
    /// Clients with no appointments are absent from the map. Feeds the
    /// inactive-client insight.
    pub async fn last_seen_dates(
        &self,
        organization_id: Uuid,
    ) -> Result<HashMap<Uuid, NaiveDate>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Uuid, NaiveDate)>(
            r#"
            SELECT a.client_id, MAX(a.starts_at)::date
            FROM appointments a
            WHERE a.organization_id = $1 AND a.client_id IS NOT NULL
            GROUP BY a.client_id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
