//! Membership routes: subscription lifecycle and the derived status view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use domain::models::{MembershipStatus, SubscribeRequest};
use domain::services::derive_membership_status;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{MembershipRepository, OrganizationRepository, PlanRepository};

/// Length of a paid billing period.
const BILLING_PERIOD_DAYS: i64 = 30;

/// Length of a trial period.
const TRIAL_PERIOD_DAYS: i64 = 14;

/// GET /api/v1/organizations/:org_id/membership
///
/// Derived membership status view-model for the management UI: color,
/// message, and which action buttons to show.
pub async fn get_membership_status(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_organization(&state, org_id).await?;

    let membership_repo = MembershipRepository::new(state.pool.clone());
    let plan_repo = PlanRepository::new(state.pool.clone());

    let membership = membership_repo.find_by_organization(org_id).await?;

    let plan = match membership.as_ref() {
        Some(m) => plan_repo.find_by_id(m.plan_id).await?,
        None => None,
    };
    let top_tier = plan_repo.top_tier().await?;

    let view = derive_membership_status(
        membership.as_ref(),
        plan.as_ref(),
        top_tier,
        Utc::now(),
    );

    Ok(Json(view))
}

/// POST /api/v1/organizations/:org_id/membership
///
/// Subscribe the organization to a plan. One membership per organization;
/// subscribing again is a conflict (renew instead).
pub async fn subscribe(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(request): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_organization(&state, org_id).await?;

    let membership_repo = MembershipRepository::new(state.pool.clone());

    if membership_repo.find_by_organization(org_id).await?.is_some() {
        return Err(ApiError::Conflict(
            "Organization already has a membership".to_string(),
        ));
    }

    let plan = PlanRepository::new(state.pool.clone())
        .find_by_code(&request.plan_code)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| {
            ApiError::Validation(format!("Unknown plan code '{}'", request.plan_code))
        })?;

    let now = Utc::now();
    let (status, period_days) = if request.trial {
        (MembershipStatus::Trial, TRIAL_PERIOD_DAYS)
    } else {
        (MembershipStatus::Active, BILLING_PERIOD_DAYS)
    };

    let membership = membership_repo
        .create(org_id, plan.id, status, now, now + Duration::days(period_days))
        .await?;

    info!(
        organization_id = %org_id,
        plan_code = %plan.code,
        status = %membership.status,
        "Created membership"
    );

    Ok((StatusCode::CREATED, Json(membership)))
}

/// POST /api/v1/organizations/:org_id/membership/renew
///
/// Start a new billing period. Renewing before the current period ends
/// extends from the period end; renewing after it ends restarts from now.
pub async fn renew_membership(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let membership_repo = MembershipRepository::new(state.pool.clone());

    let membership = membership_repo
        .find_by_organization(org_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Organization {} has no membership", org_id))
        })?;

    let now = Utc::now();
    let start = if membership.current_period_end > now {
        membership.current_period_end
    } else {
        now
    };

    let renewed = membership_repo
        .renew(membership.id, start, start + Duration::days(BILLING_PERIOD_DAYS))
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Organization {} has no membership", org_id))
        })?;

    info!(
        organization_id = %org_id,
        membership_id = %renewed.id,
        period_end = %renewed.current_period_end,
        "Renewed membership"
    );

    Ok(Json(renewed))
}

/// POST /api/v1/organizations/:org_id/membership/cancel
pub async fn cancel_membership(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let membership_repo = MembershipRepository::new(state.pool.clone());

    let membership = membership_repo
        .find_by_organization(org_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Organization {} has no membership", org_id))
        })?;

    let cancelled = membership_repo
        .update_status(membership.id, MembershipStatus::Cancelled)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Organization {} has no membership", org_id))
        })?;

    info!(
        organization_id = %org_id,
        membership_id = %cancelled.id,
        "Cancelled membership"
    );

    Ok(Json(cancelled))
}

async fn ensure_organization(state: &AppState, org_id: Uuid) -> Result<(), ApiError> {
    OrganizationRepository::new(state.pool.clone())
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;
    Ok(())
}
