//! Organization admin API routes.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{
    CreateOrganizationRequest, ListOrganizationsQuery, ListOrganizationsResponse,
    ReservationPolicy, UpdateOrganizationRequest,
};
use shared::pagination::{PageInfo, PageParams};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;
use persistence::repositories::OrganizationRepository;

/// POST /api/v1/organizations
///
/// Create a new organization. Requires a platform admin key.
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = OrganizationRepository::new(state.pool.clone());

    if repo.slug_exists(&request.slug).await? {
        return Err(ApiError::Conflict(format!(
            "Organization with slug '{}' already exists",
            request.slug
        )));
    }

    let branding = serde_json::to_value(request.branding.unwrap_or_default())
        .map_err(|e| ApiError::Internal(format!("Branding serialization failed: {}", e)))?;
    let schedule = serde_json::to_value(request.schedule.unwrap_or_default())
        .map_err(|e| ApiError::Internal(format!("Schedule serialization failed: {}", e)))?;
    let policy = request.reservation_policy.unwrap_or(ReservationPolicy::Manual);

    let organization = repo
        .create(
            &request.name,
            &request.slug,
            &request.contact_email,
            request.phone.as_deref(),
            &branding,
            &schedule,
            policy,
        )
        .await?;

    info!(
        admin_key_id = auth.api_key_id,
        organization_id = %organization.id,
        slug = %organization.slug,
        "Created new organization"
    );

    Ok((StatusCode::CREATED, Json(organization)))
}

/// GET /api/v1/organizations
///
/// List organizations with pagination and filtering.
pub async fn list_organizations(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Query(query): Query<ListOrganizationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrganizationRepository::new(state.pool.clone());

    let (organizations, total) = repo.list(&query).await?;

    let params = PageParams {
        page: query.page,
        per_page: query.per_page,
    };

    info!(
        admin_key_id = auth.api_key_id,
        count = organizations.len(),
        total = total,
        "Listed organizations"
    );

    Ok(Json(ListOrganizationsResponse {
        data: organizations,
        pagination: PageInfo::new(&params, total),
    }))
}

/// GET /api/v1/organizations/:org_id
///
/// Get organization details.
pub async fn get_organization(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrganizationRepository::new(state.pool.clone());

    let organization = repo
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    Ok(Json(organization))
}

/// PUT /api/v1/organizations/:org_id
///
/// Partial update: only provided fields change.
pub async fn update_organization(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<UpdateOrganizationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    request
        .validate_domains()
        .map_err(|e| ApiError::Validation(format!("domains: {}", e.code)))?;

    let branding = request
        .branding
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal(format!("Branding serialization failed: {}", e)))?;
    let schedule = request
        .schedule
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal(format!("Schedule serialization failed: {}", e)))?;

    let repo = OrganizationRepository::new(state.pool.clone());

    let organization = repo
        .update(
            org_id,
            request.name.as_deref(),
            request.contact_email.as_deref(),
            request.phone.as_deref(),
            branding.as_ref(),
            schedule.as_ref(),
            request.reservation_policy,
            request.domains.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    info!(organization_id = %org_id, "Updated organization");

    Ok(Json(organization))
}

/// DELETE /api/v1/organizations/:org_id
///
/// Soft delete. Requires a platform admin key.
pub async fn delete_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrganizationRepository::new(state.pool.clone());

    let deleted = repo.soft_delete(org_id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!(
            "Organization {} not found",
            org_id
        )));
    }

    info!(
        admin_key_id = auth.api_key_id,
        organization_id = %org_id,
        "Deactivated organization"
    );

    Ok(StatusCode::NO_CONTENT)
}
