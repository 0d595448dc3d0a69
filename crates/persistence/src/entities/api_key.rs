//! API key entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row in the api_keys table.
///
/// Only the SHA-256 hash of a key is stored; `key_prefix` keeps the short
/// `bl_`-prefixed fragment shown in listings. Revocation flips `is_active`
/// rather than deleting the row, so usage history survives.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyEntity {
    pub id: i64,
    pub key_hash: String,
    pub key_prefix: String,
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeyEntity {
    /// Whether the key authenticates right now.
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Whether the key authenticates at `at`: active and not expired.
    /// The `expires_at` instant itself is still inside the validity window.
    pub fn is_usable_at(&self, at: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|expires_at| expires_at >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn key_row(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 1,
            key_hash: "test_hash".to_string(),
            key_prefix: "bl_aBcDefGh".to_string(),
            name: "Test Key".to_string(),
            is_active,
            is_admin: false,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_active_key_without_expiry_is_usable() {
        assert!(key_row(true, None).is_usable());
    }

    #[test]
    fn test_active_key_with_future_expiry_is_usable() {
        assert!(key_row(true, Some(Utc::now() + Duration::days(30))).is_usable());
    }

    #[test]
    fn test_expired_key_is_not_usable() {
        assert!(!key_row(true, Some(Utc::now() - Duration::days(1))).is_usable());
    }

    #[test]
    fn test_revoked_key_is_not_usable_even_before_expiry() {
        assert!(!key_row(false, None).is_usable());
        assert!(!key_row(false, Some(Utc::now() + Duration::days(30))).is_usable());
    }

    #[test]
    fn test_expiry_instant_is_inside_the_window() {
        let at = Utc::now();
        let key = key_row(true, Some(at));
        assert!(key.is_usable_at(at));
        assert!(!key.is_usable_at(at + Duration::seconds(1)));
    }
}
