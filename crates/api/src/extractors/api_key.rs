//! API key authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{sha256_hex, API_KEY_PREFIX};

/// Header clients send their key in.
const API_KEY_HEADER: &str = "X-API-Key";

/// Identity of the caller, resolved from the `X-API-Key` header.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    /// Database ID of the authenticated API key.
    pub api_key_id: i64,
    /// Key prefix for identification (e.g., "bl_aBcDefGh").
    pub key_prefix: String,
    /// Whether this is a platform admin key.
    pub is_admin: bool,
}

/// Generic rejection. Deliberately does not distinguish unknown keys
/// from malformed or revoked ones.
fn bad_key() -> ApiError {
    ApiError::Unauthorized("Invalid or missing API key".to_string())
}

/// Syntactic plausibility check, done before touching the database.
fn looks_like_key(candidate: &str) -> bool {
    candidate.starts_with(API_KEY_PREFIX) && candidate.len() >= API_KEY_PREFIX.len() + 8
}

/// Records key usage off the request path.
fn touch_last_used(pool: PgPool, key_id: i64) {
    tokio::spawn(async move {
        let repo = ApiKeyRepository::new(pool);
        if let Err(e) = repo.update_last_used(key_id).await {
            tracing::warn!("Failed to update API key last_used_at: {}", e);
        }
    });
}

impl ApiKeyAuth {
    /// Resolves a raw key to its stored identity.
    ///
    /// Separated from the extractor so auth can be tested without a request.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !looks_like_key(api_key) {
            return Err(bad_key());
        }

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&sha256_hex(api_key))
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::Internal("Authentication service unavailable".to_string())
            })?
            .ok_or_else(bad_key)?;

        if !key.is_usable() {
            // An active-but-expired key gets a distinct message; a revoked
            // key is indistinguishable from an unknown one.
            if key.is_active {
                return Err(ApiError::Unauthorized("API key has expired".to_string()));
            }
            return Err(bad_key());
        }

        touch_last_used(pool.clone(), key.id);

        Ok(ApiKeyAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            is_admin: key.is_admin,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(bad_key)?;

        Self::validate(&state.pool, api_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_key_shapes() {
        assert!(looks_like_key("bl_aBcDefGh1234"));
        assert!(looks_like_key("bl_12345678"));
    }

    #[test]
    fn test_implausible_key_shapes() {
        assert!(!looks_like_key(""));
        assert!(!looks_like_key("bl_short"));
        assert!(!looks_like_key("pm_12345678"));
        assert!(!looks_like_key("12345678bl_"));
    }

    #[test]
    fn test_rejection_does_not_leak_detail() {
        let message = format!("{}", bad_key());
        assert_eq!(message, "Unauthorized: Invalid or missing API key");
    }

    #[test]
    fn test_auth_identity_fields() {
        let auth = ApiKeyAuth {
            api_key_id: 42,
            key_prefix: "bl_AdminKey".to_string(),
            is_admin: true,
        };
        let cloned = auth.clone();
        assert_eq!(cloned.api_key_id, 42);
        assert!(cloned.is_admin);
    }
}
