//! Service catalog management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::CreateServiceRequest;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{OrganizationRepository, ServiceRepository};

/// POST /api/v1/organizations/:org_id/services
pub async fn create_service(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    ensure_organization(&state, org_id).await?;

    let repo = ServiceRepository::new(state.pool.clone());

    if let Some(plan) = super::plans::organization_plan(&state, org_id).await? {
        if plan.max_services > 0 {
            let current = repo.count_active(org_id).await?;
            if current >= i64::from(plan.max_services) {
                return Err(ApiError::Conflict(format!(
                    "Plan limit of {} services reached",
                    plan.max_services
                )));
            }
        }
    }

    let service = repo
        .create(
            org_id,
            &request.name,
            request.description.as_deref(),
            request.duration_minutes,
            request.price_cents,
        )
        .await?;

    info!(organization_id = %org_id, service_id = %service.id, "Created service");

    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/v1/organizations/:org_id/services
pub async fn list_services(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_organization(&state, org_id).await?;

    let services = ServiceRepository::new(state.pool.clone())
        .list_active(org_id)
        .await?;

    Ok(Json(services))
}

/// DELETE /api/v1/organizations/:org_id/services/:service_id
///
/// Soft delete: the service disappears from listings but existing bookings
/// keep referencing it.
pub async fn delete_service(
    State(state): State<AppState>,
    Path((org_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = ServiceRepository::new(state.pool.clone())
        .soft_delete(org_id, service_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound(format!(
            "Service {} not found",
            service_id
        )));
    }

    info!(organization_id = %org_id, service_id = %service_id, "Deactivated service");

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_organization(state: &AppState, org_id: Uuid) -> Result<(), ApiError> {
    OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;
    Ok(())
}
