//! Dashboard analytics route.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use domain::models::{AnalyticsPeriod, AnalyticsQuery};
use domain::services::analytics::{aggregate, AnalyticsInput};

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{
    AppointmentRepository, ClientRepository, EmployeeRepository, OrganizationRepository,
    ServiceRepository,
};

/// Default window length when the query supplies no bounds.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// GET /api/v1/organizations/:org_id/analytics
///
/// Aggregates the organization's appointments for a date window into a
/// time series, rollups, a demand heatmap, and rule-based insights. All
/// computation happens in memory over the rows fetched for the window.
pub async fn get_analytics(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let org_repo = OrganizationRepository::new(state.pool.clone());
    org_repo
        .find_by_id(org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Organization {} not found", org_id)))?;

    let now = Utc::now();
    let end = query.to.unwrap_or_else(|| now.date_naive());
    let start = query
        .from
        .unwrap_or_else(|| end - Duration::days(DEFAULT_WINDOW_DAYS - 1));

    if start > end {
        return Err(ApiError::Validation(
            "from must not be after to".to_string(),
        ));
    }

    let period = AnalyticsPeriod { start, end };
    let group_by = query.group_by.unwrap_or_default();

    // The window is inclusive of `end`, so fetch up to the following midnight.
    let window_start = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
    let window_end = Utc.from_utc_datetime(&(end + Duration::days(1)).and_time(NaiveTime::MIN));

    let appointments = AppointmentRepository::new(state.pool.clone())
        .list_between(org_id, window_start, window_end)
        .await?;
    let services = ServiceRepository::new(state.pool.clone())
        .list_active(org_id)
        .await?;
    let employees = EmployeeRepository::new(state.pool.clone())
        .list_active(org_id)
        .await?;
    let client_last_seen = ClientRepository::new(state.pool.clone())
        .last_seen_dates(org_id)
        .await?;

    let response = aggregate(&AnalyticsInput {
        organization_id: org_id,
        period,
        group_by,
        appointments: &appointments,
        services: &services,
        employees: &employees,
        client_last_seen: &client_last_seen,
        now,
    });

    Ok(Json(response))
}
