//! Service offering domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A bookable service offered by an organization (e.g. a haircut).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Service {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateServiceRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 5, max = 720, message = "Duration must be 5-720 minutes"))]
    pub duration_minutes: i32,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_service_request_validation() {
        let valid = CreateServiceRequest {
            name: "Corte de cabello".to_string(),
            description: None,
            duration_minutes: 45,
            price_cents: 25000,
        };
        assert!(valid.validate().is_ok());

        let bad_duration = CreateServiceRequest {
            duration_minutes: 0,
            ..valid.clone()
        };
        assert!(bad_duration.validate().is_err());

        let negative_price = CreateServiceRequest {
            price_cents: -1,
            ..valid
        };
        assert!(negative_price.validate().is_err());
    }
}
