//! Dashboard analytics aggregation.
//!
//! Pure map/reduce passes over appointments already fetched for the
//! requested window, plus the employee/service catalogs. Buckets are
//! generated for the whole window so empty periods appear as zeros.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::analytics::{
    AnalyticsGroupBy, AnalyticsPeriod, AnalyticsResponse, AnalyticsSummary, DemandHeatmap,
    EmployeeRollup, Insight, SeriesPoint, ServiceRollup,
};
use crate::models::{Appointment, AppointmentStatus, Employee, Service};
use crate::services::pricing::Priced;

/// Clients with no appointment for this many days are flagged inactive.
const INACTIVE_CLIENT_DAYS: i64 = 60;

/// Services with fewer appointments than this in the window are flagged.
const LOW_DEMAND_THRESHOLD: i64 = 3;

/// Everything the aggregation needs, fetched up front.
pub struct AnalyticsInput<'a> {
    pub organization_id: Uuid,
    pub period: AnalyticsPeriod,
    pub group_by: AnalyticsGroupBy,
    /// Appointments whose start falls inside the window.
    pub appointments: &'a [Appointment],
    pub services: &'a [Service],
    pub employees: &'a [Employee],
    /// Most recent appointment date per client, across all time.
    pub client_last_seen: &'a HashMap<Uuid, NaiveDate>,
    pub now: DateTime<Utc>,
}

/// Start of the bucket containing `date`.
fn bucket_start(date: NaiveDate, group_by: AnalyticsGroupBy) -> NaiveDate {
    match group_by {
        AnalyticsGroupBy::Day => date,
        AnalyticsGroupBy::Week => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        AnalyticsGroupBy::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Start of the bucket after the one containing `date`.
fn next_bucket(bucket: NaiveDate, group_by: AnalyticsGroupBy) -> NaiveDate {
    match group_by {
        AnalyticsGroupBy::Day => bucket + Duration::days(1),
        AnalyticsGroupBy::Week => bucket + Duration::days(7),
        AnalyticsGroupBy::Month => {
            let (year, month) = if bucket.month() == 12 {
                (bucket.year() + 1, 1)
            } else {
                (bucket.year(), bucket.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(bucket)
        }
    }
}

/// Fixed bucket starts covering the whole window, in order.
fn generate_buckets(period: AnalyticsPeriod, group_by: AnalyticsGroupBy) -> Vec<NaiveDate> {
    let mut buckets = Vec::new();
    let mut cursor = bucket_start(period.start, group_by);
    while cursor <= period.end {
        buckets.push(cursor);
        cursor = next_bucket(cursor, group_by);
    }
    buckets
}

/// Runs the full aggregation pass.
pub fn aggregate(input: &AnalyticsInput<'_>) -> AnalyticsResponse {
    let price_by_service: HashMap<Uuid, i64> = input
        .services
        .iter()
        .map(|s| (s.id, s.price_cents))
        .collect();

    let revenue_of = |a: &Appointment| -> i64 {
        a.effective_price_cents(price_by_service.get(&a.service_id).copied())
    };

    // Summary.
    let mut summary = AnalyticsSummary::default();
    for a in input.appointments {
        summary.total_appointments += 1;
        if a.status == AppointmentStatus::Completed {
            summary.completed_appointments += 1;
        }
        summary.total_revenue_cents += revenue_of(a);
    }

    // Time series with fixed buckets.
    let buckets = generate_buckets(input.period, input.group_by);
    let mut by_bucket: HashMap<NaiveDate, (i64, i64)> = HashMap::new();
    for a in input.appointments {
        let bucket = bucket_start(a.starts_at.date_naive(), input.group_by);
        let entry = by_bucket.entry(bucket).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += revenue_of(a);
    }
    let series: Vec<SeriesPoint> = buckets
        .iter()
        .map(|b| {
            let (count, revenue) = by_bucket.get(b).copied().unwrap_or((0, 0));
            SeriesPoint {
                bucket_start: *b,
                appointment_count: count,
                revenue_cents: revenue,
            }
        })
        .collect();

    // Per-employee rollup.
    let mut employee_totals: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for a in input.appointments {
        let entry = employee_totals.entry(a.employee_id).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += revenue_of(a);
    }
    let mut by_employee: Vec<EmployeeRollup> = input
        .employees
        .iter()
        .map(|e| {
            let (count, revenue) = employee_totals.get(&e.id).copied().unwrap_or((0, 0));
            EmployeeRollup {
                employee_id: e.id,
                display_name: e.display_name.clone(),
                appointment_count: count,
                revenue_cents: revenue,
            }
        })
        .collect();
    by_employee.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));

    // Per-service rollup.
    let mut service_totals: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for a in input.appointments {
        let entry = service_totals.entry(a.service_id).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += revenue_of(a);
    }
    let mut by_service: Vec<ServiceRollup> = input
        .services
        .iter()
        .map(|s| {
            let (count, revenue) = service_totals.get(&s.id).copied().unwrap_or((0, 0));
            ServiceRollup {
                service_id: s.id,
                name: s.name.clone(),
                appointment_count: count,
                revenue_cents: revenue,
            }
        })
        .collect();
    by_service.sort_by(|a, b| b.appointment_count.cmp(&a.appointment_count));

    // Demand heatmap: weekday (Monday first) by hour of day.
    let mut heatmap = DemandHeatmap::default();
    for a in input.appointments {
        let day = a.starts_at.weekday().num_days_from_monday() as usize;
        let hour = a.starts_at.hour() as usize;
        heatmap.counts[day][hour] += 1;
    }

    let insights = build_insights(input, &by_service, &revenue_of);

    AnalyticsResponse {
        organization_id: input.organization_id,
        period: input.period,
        group_by: input.group_by,
        summary,
        series,
        by_employee,
        by_service,
        heatmap,
        insights,
    }
}

fn build_insights(
    input: &AnalyticsInput<'_>,
    by_service: &[ServiceRollup],
    revenue_of: &dyn Fn(&Appointment) -> i64,
) -> Vec<Insight> {
    let mut insights = Vec::new();
    let today = input.now.date_naive();

    // Clients with no visit in the inactivity window.
    let cutoff = today - Duration::days(INACTIVE_CLIENT_DAYS);
    let inactive: Vec<Uuid> = input
        .client_last_seen
        .iter()
        .filter(|(_, last)| **last < cutoff)
        .map(|(id, _)| *id)
        .collect();
    if !inactive.is_empty() {
        insights.push(Insight::InactiveClients {
            count: inactive.len(),
            message: format!(
                "{} client{} had no appointment in the last {} days",
                inactive.len(),
                if inactive.len() == 1 { "" } else { "s" },
                INACTIVE_CLIENT_DAYS
            ),
            client_ids: inactive,
        });
    }

    // Active services with weak demand in the window.
    let active_ids: Vec<Uuid> = input
        .services
        .iter()
        .filter(|s| s.is_active)
        .map(|s| s.id)
        .collect();
    for rollup in by_service {
        if active_ids.contains(&rollup.service_id)
            && rollup.appointment_count < LOW_DEMAND_THRESHOLD
        {
            insights.push(Insight::LowDemandService {
                service_id: rollup.service_id,
                name: rollup.name.clone(),
                appointment_count: rollup.appointment_count,
                message: format!(
                    "\"{}\" was booked {} time{} in this period",
                    rollup.name,
                    rollup.appointment_count,
                    if rollup.appointment_count == 1 { "" } else { "s" }
                ),
            });
        }
    }

    // Month-end revenue projection: linear extrapolation of the per-day
    // average over the elapsed portion of the current month.
    let month_start = today.with_day(1).unwrap_or(today);
    let days_elapsed = (today - month_start).num_days() + 1;
    let month_revenue: i64 = input
        .appointments
        .iter()
        .filter(|a| {
            let d = a.starts_at.date_naive();
            d >= month_start && d <= today
        })
        .map(revenue_of)
        .sum();
    if days_elapsed > 0 && month_revenue > 0 {
        let days_in_month = days_in_month(today) as i64;
        let projected = month_revenue * days_in_month / days_elapsed;
        insights.push(Insight::RevenueProjection {
            projected_month_revenue_cents: projected,
            message: format!(
                "On pace for ${:.2} this month",
                projected as f64 / 100.0
            ),
        });
    }

    insights
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let next = next_bucket(first, AnalyticsGroupBy::Month);
    (next - first).num_days() as u32
}
