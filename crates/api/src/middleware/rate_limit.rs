//! Per-key request rate limiting.
//!
//! Each API key gets its own token bucket, backed by `governor`'s keyed
//! limiter. Runs after authentication so the key id is in extensions.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use std::num::NonZeroU32;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;

/// Used when the configured limit is zero or otherwise unusable. The
/// middleware is normally not installed at all in that case.
const FALLBACK_LIMIT: u32 = 100;

type KeyedLimiter = RateLimiter<i64, DefaultKeyedStateStore<i64>, DefaultClock>;

/// Shared across all requests; buckets are created on first sight of a key.
pub struct RateLimiterState {
    limiter: KeyedLimiter,
    clock: DefaultClock,
}

impl RateLimiterState {
    pub fn new(per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(per_minute)
            .or_else(|| NonZeroU32::new(FALLBACK_LIMIT))
            .unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
        }
    }

    /// Whether a request for this key fits in its bucket. On rejection
    /// returns the number of seconds until the next request would fit.
    pub fn check(&self, key_id: i64) -> Result<(), u64> {
        self.limiter.check_key(&key_id).map_err(|not_until| {
            not_until.wait_time_from(self.clock.now()).as_secs().max(1)
        })
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState").finish_non_exhaustive()
    }
}

/// Rejects requests exceeding the per-key budget with 429 + Retry-After.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Without auth info the request is about to fail auth anyway
    let key_id = match req.extensions().get::<ApiKeyAuth>() {
        Some(auth) => auth.api_key_id,
        None => return next.run(req).await,
    };

    if let Some(ref limiter) = state.rate_limiter {
        if let Err(retry_after) = limiter.check(key_id) {
            let mut response = ApiError::RateLimited.into_response();
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            return response;
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_within_budget() {
        let state = RateLimiterState::new(5);
        for i in 0..5 {
            assert!(state.check(42).is_ok(), "request {} should pass", i);
        }
    }

    #[test]
    fn test_rejects_over_budget_with_retry_hint() {
        let state = RateLimiterState::new(1);
        assert!(state.check(7).is_ok());

        let retry_after = state.check(7).unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_keys_have_independent_buckets() {
        let state = RateLimiterState::new(1);

        assert!(state.check(1).is_ok());
        assert!(state.check(2).is_ok());
        assert!(state.check(1).is_err());
        assert!(state.check(2).is_err());
    }

    #[test]
    fn test_zero_limit_falls_back() {
        // A zero limit must not panic; it degrades to the fallback budget
        let state = RateLimiterState::new(0);
        assert!(state.check(1).is_ok());
    }
}
