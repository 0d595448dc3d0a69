//! Client (end customer) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An end customer of an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Client {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_phone_e164"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_request_validation() {
        let valid = CreateClientRequest {
            name: "Ana Torres".to_string(),
            phone: Some("+5215512345678".to_string()),
            email: Some("ana@example.com".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_phone = CreateClientRequest {
            phone: Some("555-1234".to_string()),
            ..valid.clone()
        };
        assert!(bad_phone.validate().is_err());

        let bad_email = CreateClientRequest {
            email: Some("not-an-email".to_string()),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }
}
