//! Analytics domain models.
//!
//! All analytics are computed in memory from appointments already fetched
//! for the requested window; there is no incremental computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bucket size for time series aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsGroupBy {
    #[default]
    Day,
    Week,
    Month,
}

/// Query parameters for the analytics endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct AnalyticsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub group_by: Option<AnalyticsGroupBy>,
}

/// Analytics window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyticsPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Top-line totals for the window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyticsSummary {
    pub total_appointments: i64,
    pub completed_appointments: i64,
    pub total_revenue_cents: i64,
}

/// One bucket of the revenue/count time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeriesPoint {
    pub bucket_start: NaiveDate,
    pub appointment_count: i64,
    pub revenue_cents: i64,
}

/// Per-employee rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmployeeRollup {
    pub employee_id: Uuid,
    pub display_name: String,
    pub appointment_count: i64,
    pub revenue_cents: i64,
}

/// Per-service rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceRollup {
    pub service_id: Uuid,
    pub name: String,
    pub appointment_count: i64,
    pub revenue_cents: i64,
}

/// Day-of-week by hour-of-day demand heatmap.
///
/// `counts[0]` is Monday; each row holds 24 hourly counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DemandHeatmap {
    pub counts: Vec<Vec<i64>>,
}

impl Default for DemandHeatmap {
    fn default() -> Self {
        Self {
            counts: vec![vec![0; 24]; 7],
        }
    }
}

/// Rule-based insight derived from the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    InactiveClients {
        count: usize,
        client_ids: Vec<Uuid>,
        message: String,
    },
    LowDemandService {
        service_id: Uuid,
        name: String,
        appointment_count: i64,
        message: String,
    },
    RevenueProjection {
        projected_month_revenue_cents: i64,
        message: String,
    },
}

/// Complete analytics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyticsResponse {
    pub organization_id: Uuid,
    pub period: AnalyticsPeriod,
    pub group_by: AnalyticsGroupBy,
    pub summary: AnalyticsSummary,
    pub series: Vec<SeriesPoint>,
    pub by_employee: Vec<EmployeeRollup>,
    pub by_service: Vec<ServiceRollup>,
    pub heatmap: DemandHeatmap,
    pub insights: Vec<Insight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_deserialization() {
        let q: AnalyticsQuery = serde_json::from_str(r#"{"group_by":"week"}"#).unwrap();
        assert_eq!(q.group_by, Some(AnalyticsGroupBy::Week));
    }

    #[test]
    fn test_heatmap_default_shape() {
        let heatmap = DemandHeatmap::default();
        assert_eq!(heatmap.counts.len(), 7);
        assert!(heatmap.counts.iter().all(|row| row.len() == 24));
    }

    #[test]
    fn test_insight_tagged_serialization() {
        let insight = Insight::RevenueProjection {
            projected_month_revenue_cents: 120_000,
            message: "On pace for $1,200.00 this month".to_string(),
        };
        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"kind\":\"revenue_projection\""));
        assert!(json.contains("120000"));
    }
}
