//! Subscription plan routes.

use axum::{extract::State, response::IntoResponse, Json};
use uuid::Uuid;

use domain::models::{ListPlansResponse, Plan};

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{MembershipRepository, PlanRepository};

/// GET /api/v1/plans
///
/// List active plans ordered by tier.
pub async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = PlanRepository::new(state.pool.clone());
    let plans = repo.list_active().await?;

    Ok(Json(ListPlansResponse { data: plans }))
}

/// The plan behind an organization's membership, if it has one.
///
/// Catalog routes use this to enforce per-plan limits; organizations
/// without a membership are unrestricted.
pub(crate) async fn organization_plan(
    state: &AppState,
    org_id: Uuid,
) -> Result<Option<Plan>, ApiError> {
    let membership = MembershipRepository::new(state.pool.clone())
        .find_by_organization(org_id)
        .await?;

    let membership = match membership {
        Some(m) => m,
        None => return Ok(None),
    };

    let plan = PlanRepository::new(state.pool.clone())
        .find_by_id(membership.plan_id)
        .await?;

    Ok(plan)
}
