//! Membership expiry sweep.
//!
//! Marks memberships whose billing period ended (past the configured grace
//! window) as expired.

use std::time::Duration;

use anyhow::Context;
use chrono::{Duration as ChronoDuration, Utc};
use persistence::repositories::MembershipRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::Job;

/// Periodic job that expires overdue memberships.
pub struct MembershipSweepJob {
    pool: PgPool,
    sweep_minutes: u64,
    grace_hours: i64,
}

impl MembershipSweepJob {
    pub fn new(pool: PgPool, sweep_minutes: u64, grace_hours: i64) -> Self {
        Self {
            pool,
            sweep_minutes,
            grace_hours,
        }
    }
}

#[async_trait::async_trait]
impl Job for MembershipSweepJob {
    fn name(&self) -> &'static str {
        "membership_sweep"
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(self.sweep_minutes.max(1) * 60)
    }

    async fn run(&self) -> anyhow::Result<()> {
        // Memberships stay in their current status for the grace window
        let cutoff = Utc::now() - ChronoDuration::hours(self.grace_hours.max(0));

        let expired = MembershipRepository::new(self.pool.clone())
            .expire_overdue(cutoff)
            .await
            .context("membership sweep query failed")?;

        if expired > 0 {
            info!(expired, "Expired overdue memberships");
        }

        Ok(())
    }
}
