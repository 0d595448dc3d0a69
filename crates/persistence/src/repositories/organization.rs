//! Organization repository for database operations.

use domain::models::{ListOrganizationsQuery, Organization, ReservationPolicy};
use serde_json::Value as JsonValue;
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::organization::{OrganizationEntity, ReservationPolicyDb};

/// Repository for organization database operations.
#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new organization.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        contact_email: &str,
        phone: Option<&str>,
        branding: &JsonValue,
        schedule: &JsonValue,
        reservation_policy: ReservationPolicy,
    ) -> Result<Organization, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            INSERT INTO organizations (name, slug, contact_email, phone, branding, schedule, reservation_policy)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(contact_email)
        .bind(phone)
        .bind(branding)
        .bind(schedule)
        .bind(ReservationPolicyDb::from(reservation_policy))
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find organization by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            SELECT id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find organization by slug. Only active organizations resolve.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            SELECT id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            FROM organizations
            WHERE slug = $1 AND is_active = true
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Resolve an organization by one of its custom domains.
    pub async fn resolve_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            SELECT id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            FROM organizations
            WHERE $1 = ANY(domains) AND is_active = true
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Check if slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Update organization. Only provided fields are changed.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_email: Option<&str>,
        phone: Option<&str>,
        branding: Option<&JsonValue>,
        schedule: Option<&JsonValue>,
        reservation_policy: Option<ReservationPolicy>,
        domains: Option<&[String]>,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let entity = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            UPDATE organizations
            SET
                name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                phone = COALESCE($4, phone),
                branding = COALESCE($5, branding),
                schedule = COALESCE($6, schedule),
                reservation_policy = COALESCE($7, reservation_policy),
                domains = COALESCE($8, domains),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_email)
        .bind(phone)
        .bind(branding)
        .bind(schedule)
        .bind(reservation_policy.map(ReservationPolicyDb::from))
        .bind(domains)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Soft delete organization (set is_active = false).
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List organizations with pagination and filtering.
    pub async fn list(
        &self,
        query: &ListOrganizationsQuery,
    ) -> Result<(Vec<Organization>, i64), sqlx::Error> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };

        // Build dynamic query based on filters
        let mut conditions = Vec::new();

        if let Some(is_active) = query.is_active {
            conditions.push(format!("is_active = {}", is_active));
        }

        if let Some(ref search) = query.search {
            let search_escaped = search.replace('\'', "''");
            conditions.push(format!(
                "(name ILIKE '%{}%' OR slug ILIKE '%{}%')",
                search_escaped, search_escaped
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Get total count
        let count_query = format!("SELECT COUNT(*) FROM organizations {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        // Get organizations
        let list_query = format!(
            r#"
            SELECT id, name, slug, contact_email, phone, branding, schedule, reservation_policy, domains, is_active, created_at, updated_at
            FROM organizations
            {}
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            where_clause
        );

        let entities = sqlx::query_as::<_, OrganizationEntity>(&list_query)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

        let organizations = entities.into_iter().map(Into::into).collect();

        Ok((organizations, total))
    }
}
