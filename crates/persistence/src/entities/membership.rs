//! Membership entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::MembershipStatus;

/// Database enum for membership_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "snake_case")]
pub enum MembershipStatusDb {
    Active,
    Trial,
    GracePeriod,
    PastDue,
    Suspended,
    Pending,
    Cancelled,
    Expired,
}

impl From<MembershipStatusDb> for MembershipStatus {
    fn from(db: MembershipStatusDb) -> Self {
        match db {
            MembershipStatusDb::Active => Self::Active,
            MembershipStatusDb::Trial => Self::Trial,
            MembershipStatusDb::GracePeriod => Self::GracePeriod,
            MembershipStatusDb::PastDue => Self::PastDue,
            MembershipStatusDb::Suspended => Self::Suspended,
            MembershipStatusDb::Pending => Self::Pending,
            MembershipStatusDb::Cancelled => Self::Cancelled,
            MembershipStatusDb::Expired => Self::Expired,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDb {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Active => Self::Active,
            MembershipStatus::Trial => Self::Trial,
            MembershipStatus::GracePeriod => Self::GracePeriod,
            MembershipStatus::PastDue => Self::PastDue,
            MembershipStatus::Suspended => Self::Suspended,
            MembershipStatus::Pending => Self::Pending,
            MembershipStatus::Cancelled => Self::Cancelled,
            MembershipStatus::Expired => Self::Expired,
        }
    }
}

/// Database row mapping for the memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipEntity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub plan_id: Uuid,
    pub status: MembershipStatusDb,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MembershipEntity> for domain::models::Membership {
    fn from(entity: MembershipEntity) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            plan_id: entity.plan_id,
            status: entity.status.into(),
            current_period_start: entity.current_period_start,
            current_period_end: entity.current_period_end,
            cancel_at_period_end: entity.cancel_at_period_end,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_roundtrip() {
        for db in [
            MembershipStatusDb::Active,
            MembershipStatusDb::Trial,
            MembershipStatusDb::GracePeriod,
            MembershipStatusDb::PastDue,
            MembershipStatusDb::Suspended,
            MembershipStatusDb::Pending,
            MembershipStatusDb::Cancelled,
            MembershipStatusDb::Expired,
        ] {
            assert_eq!(MembershipStatusDb::from(MembershipStatus::from(db)), db);
        }
    }
}
