//! API key domain models.
//!
//! Keys are stored hashed; the raw key is only ever visible in the
//! creation response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to provision a new API key.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Admin keys can manage the organization lifecycle.
    #[serde(default)]
    pub is_admin: bool,
    /// Optional expiry, in days from creation.
    #[validate(range(min = 1, max = 365, message = "Expiry must be between 1 and 365 days"))]
    pub expires_in_days: Option<i64>,
}

/// Creation response carrying the raw key. Returned exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateApiKeyResponse {
    pub id: i64,
    /// The full secret. Not recoverable after this response.
    pub key: String,
    pub key_prefix: String,
    pub name: String,
    pub is_admin: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Key metadata for listings. Never contains the secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiKeySummary {
    pub id: i64,
    pub key_prefix: String,
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Query parameters for key listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListApiKeysQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Response for key listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListApiKeysResponse {
    pub data: Vec<ApiKeySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_valid() {
        let request = CreateApiKeyRequest {
            name: "CI deploy key".to_string(),
            is_admin: false,
            expires_in_days: Some(90),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_empty_name() {
        let request = CreateApiKeyRequest {
            name: String::new(),
            is_admin: false,
            expires_in_days: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_expiry_too_long() {
        let request = CreateApiKeyRequest {
            name: "Long-lived key".to_string(),
            is_admin: true,
            expires_in_days: Some(400),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateApiKeyRequest = serde_json::from_str(r#"{"name":"ops"}"#).unwrap();
        assert!(!request.is_admin);
        assert!(request.expires_in_days.is_none());
    }

    #[test]
    fn test_response_never_reveals_hash() {
        let summary = ApiKeySummary {
            id: 7,
            key_prefix: "bl_aBcDefGh".to_string(),
            name: "Dashboard".to_string(),
            is_active: true,
            is_admin: false,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"key_prefix\":\"bl_aBcDefGh\""));
        assert!(!json.contains("key_hash"));
    }
}
