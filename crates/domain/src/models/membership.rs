//! Membership domain models and the derived status view-model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Subscription status as stored by billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Trial,
    GracePeriod,
    PastDue,
    Suspended,
    Pending,
    Cancelled,
    Expired,
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "trial" => Ok(MembershipStatus::Trial),
            "grace_period" => Ok(MembershipStatus::GracePeriod),
            "past_due" => Ok(MembershipStatus::PastDue),
            "suspended" => Ok(MembershipStatus::Suspended),
            "pending" => Ok(MembershipStatus::Pending),
            "cancelled" => Ok(MembershipStatus::Cancelled),
            "expired" => Ok(MembershipStatus::Expired),
            _ => Err(format!("Unknown membership status: {}", s)),
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Trial => "trial",
            MembershipStatus::GracePeriod => "grace_period",
            MembershipStatus::PastDue => "past_due",
            MembershipStatus::Suspended => "suspended",
            MembershipStatus::Pending => "pending",
            MembershipStatus::Cancelled => "cancelled",
            MembershipStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// Subscription record for an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Membership {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub plan_id: Uuid,
    pub status: MembershipStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to subscribe an organization to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubscribeRequest {
    pub plan_code: String,
    /// Start in a trial period instead of a paid one.
    #[serde(default)]
    pub trial: bool,
}

/// Traffic-light color for membership status banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// UI hints derived from the membership snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipUi {
    pub status_color: StatusColor,
    pub status_message: String,
    pub show_renewal_button: bool,
    pub show_upgrade_button: bool,
}

/// Summary of the membership embedded in the status view-model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipSummary {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: Option<String>,
    pub status: MembershipStatus,
    pub current_period_end: DateTime<Utc>,
    pub days_until_expiration: i64,
}

/// View-model returned by the membership status endpoint.
///
/// Pure and re-derivable at any time from the membership snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipStatusView {
    pub has_active_membership: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<MembershipSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<MembershipUi>,
}

impl MembershipStatusView {
    /// View-model for an organization with no membership record.
    pub fn none() -> Self {
        Self {
            has_active_membership: false,
            membership: None,
            ui: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&MembershipStatus::GracePeriod).unwrap(),
            "\"grace_period\""
        );
        assert_eq!(
            serde_json::to_string(&MembershipStatus::PastDue).unwrap(),
            "\"past_due\""
        );
    }

    #[test]
    fn test_status_from_str_roundtrip() {
        for status in [
            MembershipStatus::Active,
            MembershipStatus::Trial,
            MembershipStatus::GracePeriod,
            MembershipStatus::PastDue,
            MembershipStatus::Suspended,
            MembershipStatus::Pending,
            MembershipStatus::Cancelled,
            MembershipStatus::Expired,
        ] {
            assert_eq!(
                MembershipStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
        assert!(MembershipStatus::from_str("unknown").is_err());
    }

    #[test]
    fn test_none_view_omits_optional_blocks() {
        let view = MembershipStatusView::none();
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(json, "{\"has_active_membership\":false}");
    }
}
