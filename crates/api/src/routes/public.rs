//! Public booking-site routes (unauthenticated).
//!
//! These back the customer-facing booking pages: resolving the organization
//! from a custom domain, listing its bookable services, and submitting a
//! booking of one or more services.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    CreateBookingRequest, Organization, Reservation, ReservationPolicy, ReservationStatus,
    ResolveOrganizationQuery, Service,
};
use domain::services::availability::{slot_has_conflict, RequestedSlot};
use domain::services::notification::{
    NotificationResult, NotificationSender, NotificationType, ReservationConfirmedPayload,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_booking_created;
use persistence::repositories::{
    AppointmentRepository, MembershipRepository, NewReservation, OrganizationRepository,
    PlanRepository, ReservationRepository, ServiceRepository,
};

/// GET /api/public/organizations/resolve?domain=... | ?slug=...
///
/// Resolve the organization serving a custom domain, or a slug on the
/// shared platform subdomain. Drives the multi-tenant booking frontend:
/// the browser's hostname maps to exactly one organization.
pub async fn resolve_organization(
    State(state): State<AppState>,
    Query(query): Query<ResolveOrganizationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OrganizationRepository::new(state.pool.clone());

    let organization = if let Some(domain) = query.domain.as_deref() {
        repo.resolve_by_domain(domain).await?.ok_or_else(|| {
            ApiError::NotFound(format!("No organization serves domain '{}'", domain))
        })?
    } else if let Some(slug) = query.slug.as_deref() {
        repo.find_by_slug(slug).await?.ok_or_else(|| {
            ApiError::NotFound(format!("No organization with slug '{}'", slug))
        })?
    } else {
        return Err(ApiError::Validation(
            "Either 'domain' or 'slug' must be provided".to_string(),
        ));
    };

    Ok(Json(organization))
}

/// GET /api/public/organizations/:org_id/services
///
/// Active services of an active organization, for the public booking page.
pub async fn list_services(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let organization = active_organization(&state, org_id).await?;

    let services = ServiceRepository::new(state.pool.clone())
        .list_active(organization.id)
        .await?;

    Ok(Json(services))
}

/// POST /api/public/reservations
///
/// Create a booking of one or more services. All reservations of a
/// multi-service booking share a group_id and are created atomically. Each
/// item's status follows the organization's reservation policy: `manual`
/// always yields `pending`, `auto_if_available` yields `auto_approved` when
/// the requested slot is free. Auto-approved items trigger a confirmation
/// notification when the client left a phone number.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let organization = active_organization(&state, request.organization_id).await?;

    let service_ids: Vec<Uuid> = {
        let mut ids: Vec<Uuid> = request.items.iter().map(|i| i.service_id).collect();
        ids.sort();
        ids.dedup();
        ids
    };
    let services = ServiceRepository::new(state.pool.clone())
        .find_many(organization.id, &service_ids)
        .await?;
    let services_by_id: HashMap<Uuid, &Service> = services.iter().map(|s| (s.id, s)).collect();

    for item in &request.items {
        if !services_by_id.contains_key(&item.service_id) {
            return Err(ApiError::Validation(format!(
                "Service {} does not exist for this organization",
                item.service_id
            )));
        }
    }

    let reservation_repo = ReservationRepository::new(state.pool.clone());

    enforce_reservation_cap(&state, &reservation_repo, organization.id, request.items.len())
        .await?;

    let appointment_repo = AppointmentRepository::new(state.pool.clone());

    // Decide each item's starting status per the organization's policy.
    let mut items = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let service = services_by_id[&item.service_id];

        let status = match organization.reservation_policy {
            ReservationPolicy::Manual => ReservationStatus::Pending,
            ReservationPolicy::AutoIfAvailable => {
                let slot = RequestedSlot {
                    service_id: item.service_id,
                    employee_id: item.employee_id,
                    starts_at: item.starts_at,
                    duration_minutes: service.duration_minutes,
                };
                let slot_end =
                    item.starts_at + Duration::minutes(service.duration_minutes as i64);

                let confirmed = reservation_repo
                    .find_confirmed_overlapping(organization.id, item.starts_at, slot_end)
                    .await?;
                let scheduled = appointment_repo
                    .find_scheduled_overlapping(organization.id, item.starts_at, slot_end)
                    .await?;

                if slot_has_conflict(&slot, &confirmed, &scheduled) {
                    ReservationStatus::Pending
                } else {
                    ReservationStatus::AutoApproved
                }
            }
        };

        items.push(NewReservation {
            service_id: item.service_id,
            employee_id: item.employee_id,
            starts_at: item.starts_at,
            duration_minutes: service.duration_minutes,
            status,
            total_price_cents: None,
        });
    }

    let created = reservation_repo
        .create_booking(
            organization.id,
            &request.client_name,
            request.client_phone.as_deref(),
            &items,
        )
        .await?;

    record_booking_created(created.len());

    info!(
        organization_id = %organization.id,
        reservation_count = created.len(),
        group_id = ?created.first().and_then(|r| r.group_id),
        "Created booking"
    );

    if let Some(phone) = request.client_phone.as_deref() {
        for reservation in created.iter().filter(|r| r.status == ReservationStatus::AutoApproved) {
            notify_confirmation(&state, phone, reservation, &organization, &services_by_id).await;
        }
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// Loads an organization that exists and is active, or 404s.
async fn active_organization(
    state: &AppState,
    org_id: Uuid,
) -> Result<Organization, ApiError> {
    let organization = OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .filter(|o| o.is_active)
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    Ok(organization)
}

/// Rejects the booking when the organization's plan caps monthly
/// reservations and this booking would exceed the cap. Organizations with no
/// membership or an uncapped plan pass through.
async fn enforce_reservation_cap(
    state: &AppState,
    reservation_repo: &ReservationRepository,
    org_id: Uuid,
    new_count: usize,
) -> Result<(), ApiError> {
    let membership = MembershipRepository::new(state.pool.clone())
        .find_by_organization(org_id)
        .await?;
    let membership = match membership {
        Some(m) => m,
        None => return Ok(()),
    };

    let plan = PlanRepository::new(state.pool.clone())
        .find_by_id(membership.plan_id)
        .await?;
    let cap = match plan {
        Some(p) if p.monthly_reservation_cap > 0 => i64::from(p.monthly_reservation_cap),
        _ => return Ok(()),
    };

    let now = Utc::now();
    let month_start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap_or_else(|| now.date_naive());
    let from = Utc.from_utc_datetime(&month_start.and_time(NaiveTime::MIN));

    let used = reservation_repo
        .count_created_between(org_id, from, now)
        .await?;

    if used + new_count as i64 > cap {
        return Err(ApiError::Conflict(format!(
            "Monthly reservation cap of {} reached",
            cap
        )));
    }

    Ok(())
}

/// Best-effort confirmation notification for an auto-approved reservation.
async fn notify_confirmation(
    state: &AppState,
    phone: &str,
    reservation: &Reservation,
    organization: &Organization,
    services_by_id: &HashMap<Uuid, &Service>,
) {
    let service_name = services_by_id
        .get(&reservation.service_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Unknown service".to_string());

    let payload = ReservationConfirmedPayload {
        notification_type: NotificationType::ReservationConfirmed,
        reservation_id: reservation.id,
        organization_name: organization.name.clone(),
        service_name,
        starts_at: reservation.starts_at,
        timestamp: Utc::now(),
    };

    if let NotificationResult::Failed(reason) = state.notifier.send_confirmation(phone, payload).await
    {
        warn!(
            reservation_id = %reservation.id,
            reason = %reason,
            "Confirmation notification failed"
        );
    }
}
