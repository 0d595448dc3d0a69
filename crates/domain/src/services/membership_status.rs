//! Membership status derivation.
//!
//! A total function over the membership snapshot: branch by stored status
//! and days remaining in the billing period. Pure, synchronous and
//! idempotent; the caller passes `now` so tests can pin the clock.

use chrono::{DateTime, Utc};

use crate::models::membership::{MembershipSummary, MembershipUi};
use crate::models::{Membership, MembershipStatus, MembershipStatusView, Plan, StatusColor};

/// Days remaining before the banner switches to a yellow warning.
const EXPIRY_WARNING_DAYS: i64 = 3;

/// Days remaining before the renewal button is offered.
const RENEWAL_OFFER_DAYS: i64 = 7;

/// Days until the current period ends, rounded up.
pub fn days_until_expiration(membership: &Membership, now: DateTime<Utc>) -> i64 {
    let remaining = membership.current_period_end - now;
    let secs = remaining.num_seconds();
    // Ceiling division; a period ending later today still counts as 1 day.
    secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0)
}

/// Derives the status view-model from a membership snapshot.
///
/// `plan` enriches the summary and drives the upgrade button; it may be
/// absent when the plan record was not fetched.
pub fn derive_membership_status(
    membership: Option<&Membership>,
    plan: Option<&Plan>,
    top_tier: Option<i16>,
    now: DateTime<Utc>,
) -> MembershipStatusView {
    let membership = match membership {
        Some(m) => m,
        None => return MembershipStatusView::none(),
    };

    let days = days_until_expiration(membership, now);

    let (status_color, status_message) = if days <= 0 {
        // Expiration wins over whatever status billing last stored.
        (StatusColor::Red, "Membership has expired".to_string())
    } else {
        match membership.status {
            MembershipStatus::Suspended => {
                (StatusColor::Red, "Membership is suspended".to_string())
            }
            MembershipStatus::PastDue | MembershipStatus::GracePeriod => (
                StatusColor::Orange,
                "Payment is overdue; service will be limited soon".to_string(),
            ),
            _ if days <= EXPIRY_WARNING_DAYS => (
                StatusColor::Yellow,
                format!(
                    "Membership expires in {} day{}",
                    days,
                    if days == 1 { "" } else { "s" }
                ),
            ),
            _ => (StatusColor::Green, "Membership is active".to_string()),
        }
    };

    let show_renewal_button =
        days <= RENEWAL_OFFER_DAYS || membership.status != MembershipStatus::Active;

    let show_upgrade_button = match (plan, top_tier) {
        (Some(p), Some(top)) => p.tier < top,
        _ => true,
    };

    let has_active_membership = days > 0
        && matches!(
            membership.status,
            MembershipStatus::Active | MembershipStatus::Trial | MembershipStatus::GracePeriod
        );

    MembershipStatusView {
        has_active_membership,
        membership: Some(MembershipSummary {
            id: membership.id,
            plan_id: membership.plan_id,
            plan_name: plan.map(|p| p.name.clone()),
            status: membership.status,
            current_period_end: membership.current_period_end,
            days_until_expiration: days,
        }),
        ui: Some(MembershipUi {
            status_color,
            status_message,
            show_renewal_button,
            show_upgrade_button,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn membership(status: MembershipStatus, days_left: i64, now: DateTime<Utc>) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            status,
            current_period_start: now - Duration::days(30),
            current_period_end: now + Duration::days(days_left),
            cancel_at_period_end: false,
            created_at: now - Duration::days(90),
            updated_at: now,
        }
    }

    fn all_statuses() -> [MembershipStatus; 8] {
        [
            MembershipStatus::Active,
            MembershipStatus::Trial,
            MembershipStatus::GracePeriod,
            MembershipStatus::PastDue,
            MembershipStatus::Suspended,
            MembershipStatus::Pending,
            MembershipStatus::Cancelled,
            MembershipStatus::Expired,
        ]
    }

    #[test]
    fn test_null_membership() {
        let view = derive_membership_status(None, None, None, Utc::now());
        assert!(!view.has_active_membership);
        assert!(view.membership.is_none());
        assert!(view.ui.is_none());
    }

    #[test]
    fn test_expired_is_red_regardless_of_status() {
        let now = Utc::now();
        for status in all_statuses() {
            let m = membership(status, -1, now);
            let view = derive_membership_status(Some(&m), None, None, now);
            let ui = view.ui.unwrap();
            assert_eq!(ui.status_color, StatusColor::Red, "status {}", status);
            assert!(!view.has_active_membership);
        }
    }

    #[test]
    fn test_active_far_from_expiry_is_green() {
        let now = Utc::now();
        let m = membership(MembershipStatus::Active, 20, now);
        let view = derive_membership_status(Some(&m), None, None, now);
        let ui = view.ui.unwrap();
        assert_eq!(ui.status_color, StatusColor::Green);
        assert!(!ui.show_renewal_button);
        assert!(view.has_active_membership);
    }

    #[test]
    fn test_expiring_soon_is_yellow() {
        let now = Utc::now();
        let m = membership(MembershipStatus::Active, 2, now);
        let view = derive_membership_status(Some(&m), None, None, now);
        let ui = view.ui.unwrap();
        assert_eq!(ui.status_color, StatusColor::Yellow);
        assert!(ui.show_renewal_button);
    }

    #[test]
    fn test_suspended_is_red() {
        let now = Utc::now();
        let m = membership(MembershipStatus::Suspended, 20, now);
        let view = derive_membership_status(Some(&m), None, None, now);
        assert_eq!(view.ui.unwrap().status_color, StatusColor::Red);
        assert!(!view.has_active_membership);
    }

    #[test]
    fn test_past_due_is_orange() {
        let now = Utc::now();
        let m = membership(MembershipStatus::PastDue, 20, now);
        let view = derive_membership_status(Some(&m), None, None, now);
        let ui = view.ui.unwrap();
        assert_eq!(ui.status_color, StatusColor::Orange);
        assert!(ui.show_renewal_button);
    }

    #[test]
    fn test_renewal_button_rule_over_status_and_days() {
        let now = Utc::now();
        for status in all_statuses() {
            for days in [1, 5, 7, 8, 30] {
                let m = membership(status, days, now);
                let view = derive_membership_status(Some(&m), None, None, now);
                let expected = days <= 7 || status != MembershipStatus::Active;
                assert_eq!(
                    view.ui.unwrap().show_renewal_button,
                    expected,
                    "status {} days {}",
                    status,
                    days
                );
            }
        }
    }

    #[test]
    fn test_days_until_expiration_ceiling() {
        let now = Utc::now();
        let mut m = membership(MembershipStatus::Active, 0, now);

        // Ends in 1 hour: still 1 day left.
        m.current_period_end = now + Duration::hours(1);
        assert_eq!(days_until_expiration(&m, now), 1);

        // Ends exactly now: 0 days.
        m.current_period_end = now;
        assert_eq!(days_until_expiration(&m, now), 0);

        // Ended an hour ago: 0 days.
        m.current_period_end = now - Duration::hours(1);
        assert_eq!(days_until_expiration(&m, now), 0);

        // Ends in 25 hours: 2 days.
        m.current_period_end = now + Duration::hours(25);
        assert_eq!(days_until_expiration(&m, now), 2);
    }

    #[test]
    fn test_upgrade_button_hidden_on_top_tier() {
        let now = Utc::now();
        let m = membership(MembershipStatus::Active, 20, now);
        let mut plan = Plan {
            id: m.plan_id,
            code: "max".to_string(),
            name: "Max".to_string(),
            monthly_price_cents: 99900,
            currency: "MXN".to_string(),
            tier: 3,
            max_employees: 100,
            max_services: 500,
            monthly_reservation_cap: 100_000,
            whatsapp_message_quota: 10_000,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let view = derive_membership_status(Some(&m), Some(&plan), Some(3), now);
        assert!(!view.ui.unwrap().show_upgrade_button);

        plan.tier = 1;
        let view = derive_membership_status(Some(&m), Some(&plan), Some(3), now);
        assert!(view.ui.unwrap().show_upgrade_button);
    }
}
