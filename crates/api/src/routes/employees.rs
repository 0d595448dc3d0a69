//! Staff management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::CreateEmployeeRequest;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{EmployeeRepository, OrganizationRepository};

/// POST /api/v1/organizations/:org_id/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    let repo = EmployeeRepository::new(state.pool.clone());

    if let Some(plan) = super::plans::organization_plan(&state, org_id).await? {
        if plan.max_employees > 0 {
            let current = repo.count_active(org_id).await?;
            if current >= i64::from(plan.max_employees) {
                return Err(ApiError::Conflict(format!(
                    "Plan limit of {} employees reached",
                    plan.max_employees
                )));
            }
        }
    }

    let employee = repo.create(org_id, &request.display_name).await?;

    info!(organization_id = %org_id, employee_id = %employee.id, "Created employee");

    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /api/v1/organizations/:org_id/employees
pub async fn list_employees(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = EmployeeRepository::new(state.pool.clone())
        .list_active(org_id)
        .await?;

    Ok(Json(employees))
}
