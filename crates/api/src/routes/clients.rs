//! Client registry routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::CreateClientRequest;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{ClientRepository, OrganizationRepository};

/// POST /api/v1/organizations/:org_id/clients
pub async fn create_client(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    let client = ClientRepository::new(state.pool.clone())
        .create(
            org_id,
            &request.name,
            request.phone.as_deref(),
            request.email.as_deref(),
        )
        .await?;

    info!(organization_id = %org_id, client_id = %client.id, "Registered client");

    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/organizations/:org_id/clients
pub async fn list_clients(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = ClientRepository::new(state.pool.clone())
        .list(org_id)
        .await?;

    Ok(Json(clients))
}

/// GET /api/v1/organizations/:org_id/clients/:client_id
pub async fn get_client(
    State(state): State<AppState>,
    Path((org_id, client_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let client = ClientRepository::new(state.pool.clone())
        .find_by_id(org_id, client_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Client {} not found", client_id)))?;

    Ok(Json(client))
}
