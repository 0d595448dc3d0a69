//! Employee domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A staff member who performs services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Employee {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to add a staff member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 2, max = 255, message = "Display name must be 2-255 characters"))]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_employee_request_validation() {
        let valid = CreateEmployeeRequest {
            display_name: "Marisol".to_string(),
        };
        assert!(valid.validate().is_ok());

        let too_short = CreateEmployeeRequest {
            display_name: "M".to_string(),
        };
        assert!(too_short.validate().is_err());
    }
}
