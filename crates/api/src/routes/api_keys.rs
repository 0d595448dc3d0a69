//! Platform API key management routes.
//!
//! Keys are provisioned by an admin, stored as a SHA-256 hash, and the
//! raw secret is returned exactly once at creation time.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use domain::models::{
    ApiKeySummary, CreateApiKeyRequest, CreateApiKeyResponse, ListApiKeysQuery,
    ListApiKeysResponse,
};
use shared::crypto::{extract_key_prefix, generate_api_key, sha256_hex, API_KEY_PREFIX};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;
use persistence::entities::ApiKeyEntity;
use persistence::repositories::ApiKeyRepository;

fn displayed_prefix(key_prefix: &str) -> String {
    format!("{}{}", API_KEY_PREFIX, key_prefix)
}

fn to_summary(entity: ApiKeyEntity) -> ApiKeySummary {
    ApiKeySummary {
        id: entity.id,
        key_prefix: displayed_prefix(&entity.key_prefix),
        name: entity.name,
        is_active: entity.is_active,
        is_admin: entity.is_admin,
        last_used_at: entity.last_used_at,
        created_at: entity.created_at,
        expires_at: entity.expires_at,
    }
}

/// POST /api/v1/api-keys
///
/// Provision a new API key. The full key appears only in this response.
pub async fn create_api_key(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let raw_key = generate_api_key();
    let key_prefix = extract_key_prefix(&raw_key)
        .ok_or_else(|| ApiError::Internal("Generated key has malformed prefix".to_string()))?;
    let key_hash = sha256_hex(&raw_key);

    let expires_at = request
        .expires_in_days
        .map(|days| Utc::now() + Duration::days(days));

    let repo = ApiKeyRepository::new(state.pool.clone());
    let entity = repo
        .create(&key_hash, key_prefix, &request.name, request.is_admin, expires_at)
        .await?;

    info!(
        admin_key_id = auth.api_key_id,
        api_key_id = entity.id,
        key_prefix = %key_prefix,
        is_admin = entity.is_admin,
        "Provisioned API key"
    );

    let response = CreateApiKeyResponse {
        id: entity.id,
        key: raw_key,
        key_prefix: displayed_prefix(&entity.key_prefix),
        name: entity.name,
        is_admin: entity.is_admin,
        expires_at: entity.expires_at,
        created_at: entity.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/api-keys
///
/// List provisioned keys. Only prefixes are exposed, never the secret.
pub async fn list_api_keys(
    State(state): State<AppState>,
    Query(query): Query<ListApiKeysQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ApiKeyRepository::new(state.pool.clone());
    let entities = repo.list(query.include_inactive).await?;

    let data = entities.into_iter().map(to_summary).collect();

    Ok(Json(ListApiKeysResponse { data }))
}

/// DELETE /api/v1/api-keys/:key_id
///
/// Revoke a key. The record stays in the database for audit, deactivated.
pub async fn revoke_api_key(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(key_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if auth.api_key_id == key_id {
        return Err(ApiError::Conflict(
            "Cannot revoke the key used for this request".to_string(),
        ));
    }

    let repo = ApiKeyRepository::new(state.pool.clone());
    let revoked = repo.revoke(key_id).await?;

    if !revoked {
        warn!(
            admin_key_id = auth.api_key_id,
            api_key_id = key_id,
            "Attempted to revoke missing or already revoked API key"
        );
        return Err(ApiError::NotFound(
            "API key not found or already revoked".to_string(),
        ));
    }

    info!(
        admin_key_id = auth.api_key_id,
        api_key_id = key_id,
        "Revoked API key"
    );

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entity(is_admin: bool) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 42,
            key_hash: "deadbeef".to_string(),
            key_prefix: "aBcDefGh".to_string(),
            name: "Dashboard".to_string(),
            is_active: true,
            is_admin,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    #[test]
    fn test_displayed_prefix_carries_scheme() {
        assert_eq!(displayed_prefix("aBcDefGh"), "bl_aBcDefGh");
    }

    #[test]
    fn test_summary_drops_hash() {
        let summary = to_summary(sample_entity(true));
        assert_eq!(summary.id, 42);
        assert_eq!(summary.key_prefix, "bl_aBcDefGh");
        assert!(summary.is_admin);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn test_generated_key_prefix_is_extractable() {
        let raw = generate_api_key();
        let prefix = extract_key_prefix(&raw).unwrap();
        assert_eq!(prefix.len(), 8);
        assert!(raw.starts_with(API_KEY_PREFIX));
    }
}
