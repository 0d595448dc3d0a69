//! Appointment calendar routes.
//!
//! Appointments are confirmed scheduled slots created by staff, distinct
//! from reservations (pending booking requests from the public site).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    CreateAppointmentRequest, ListAppointmentsQuery, UpdateAppointmentStatusRequest,
};
use domain::services::availability::{slot_has_conflict, RequestedSlot};

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{
    AppointmentRepository, EmployeeRepository, OrganizationRepository, ServiceRepository,
};

/// Default calendar window length when the query supplies no bounds.
const DEFAULT_CALENDAR_DAYS: i64 = 7;

/// POST /api/v1/organizations/:org_id/appointments
///
/// Schedule an appointment. The employee's calendar is checked: an overlap
/// with another scheduled appointment is a conflict.
pub async fn create_appointment(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    let service = ServiceRepository::new(state.pool.clone())
        .find_by_id(org_id, request.service_id)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(format!(
                "Service {} does not exist for this organization",
                request.service_id
            ))
        })?;

    EmployeeRepository::new(state.pool.clone())
        .find_by_id(org_id, request.employee_id)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(format!(
                "Employee {} does not exist for this organization",
                request.employee_id
            ))
        })?;

    let duration_minutes = request.duration_minutes.unwrap_or(service.duration_minutes);
    let slot_end = request.starts_at + Duration::minutes(duration_minutes as i64);

    let repo = AppointmentRepository::new(state.pool.clone());

    let scheduled = repo
        .find_scheduled_overlapping(org_id, request.starts_at, slot_end)
        .await?;
    let slot = RequestedSlot {
        service_id: request.service_id,
        employee_id: Some(request.employee_id),
        starts_at: request.starts_at,
        duration_minutes,
    };
    if slot_has_conflict(&slot, &[], &scheduled) {
        return Err(ApiError::Conflict(format!(
            "Employee {} already has an appointment in that slot",
            request.employee_id
        )));
    }

    let appointment = repo
        .create(
            org_id,
            request.service_id,
            request.employee_id,
            request.client_id,
            request.starts_at,
            duration_minutes,
            request.total_price_cents,
        )
        .await?;

    info!(
        organization_id = %org_id,
        appointment_id = %appointment.id,
        employee_id = %request.employee_id,
        "Scheduled appointment"
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/organizations/:org_id/appointments
///
/// Calendar listing for a time window, oldest first. Defaults to the next
/// seven days.
pub async fn list_appointments(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let from = query.from.unwrap_or_else(Utc::now);
    let to = query
        .to
        .unwrap_or_else(|| from + Duration::days(DEFAULT_CALENDAR_DAYS));

    if from >= to {
        return Err(ApiError::Validation("from must be before to".to_string()));
    }

    let appointments = AppointmentRepository::new(state.pool.clone())
        .list_between(org_id, from, to)
        .await?;

    Ok(Json(appointments))
}

/// GET /api/v1/organizations/:org_id/appointments/:appointment_id
pub async fn get_appointment(
    State(state): State<AppState>,
    Path((org_id, appointment_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let appointment = AppointmentRepository::new(state.pool.clone())
        .find_by_id(org_id, appointment_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Appointment {} not found", appointment_id))
        })?;

    Ok(Json(appointment))
}

/// POST /api/v1/organizations/:org_id/appointments/:appointment_id/status
///
/// Move an appointment through its lifecycle (completed, no_show,
/// cancelled).
pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path((org_id, appointment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let appointment = AppointmentRepository::new(state.pool.clone())
        .update_status(org_id, appointment_id, request.status)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Appointment {} not found", appointment_id))
        })?;

    info!(
        organization_id = %org_id,
        appointment_id = %appointment_id,
        status = %appointment.status,
        "Updated appointment status"
    );

    Ok(Json(appointment))
}
