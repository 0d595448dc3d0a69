//! Subscription plan domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing and limits template referenced by memberships.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Plan {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub monthly_price_cents: i64,
    pub currency: String,
    /// Ordering for upgrade decisions; higher tier means a bigger plan.
    pub tier: i16,
    pub max_employees: i32,
    pub max_services: i32,
    pub monthly_reservation_cap: i32,
    pub whatsapp_message_quota: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for plan listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListPlansResponse {
    pub data: Vec<Plan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan(tier: i16) -> Plan {
        Plan {
            id: Uuid::nil(),
            code: "pro".to_string(),
            name: "Pro".to_string(),
            monthly_price_cents: 49900,
            currency: "MXN".to_string(),
            tier,
            max_employees: 10,
            max_services: 50,
            monthly_reservation_cap: 1000,
            whatsapp_message_quota: 500,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_serialization() {
        let plan = sample_plan(2);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"code\":\"pro\""));
        assert!(json.contains("\"monthly_price_cents\":49900"));
        assert!(json.contains("\"tier\":2"));
    }
}
