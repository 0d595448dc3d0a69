//! Reservation grouping and bulk decision planning.
//!
//! Reservations created in one multi-service booking share a `group_id`.
//! The management listing shows one row per group; bulk decisions update
//! the group's pending members sequentially with the notification
//! suppressed on all but the last member.

use std::collections::HashMap;
use uuid::Uuid;

use crate::models::reservation::{GroupSummary, Reservation, ReservationRow, ReservationStatus};
use crate::services::pricing::Priced;

/// Projects a list of reservations into display rows: one row per group
/// (the group's first reservation, annotated with a summary) and one row
/// per singleton. Input order is preserved for lead rows.
///
/// `service_names` maps service ids to display names for the synthetic
/// group summary; unknown services fall back to a placeholder.
pub fn group_reservations(
    reservations: &[Reservation],
    service_names: &HashMap<Uuid, String>,
    service_prices: &HashMap<Uuid, i64>,
) -> Vec<ReservationRow> {
    // Count members per group first so size-1 groups render as singletons.
    let mut group_sizes: HashMap<Uuid, usize> = HashMap::new();
    for r in reservations {
        if let Some(gid) = r.group_id {
            *group_sizes.entry(gid).or_insert(0) += 1;
        }
    }

    let mut seen_groups: HashMap<Uuid, bool> = HashMap::new();
    let mut rows = Vec::new();

    for r in reservations {
        match r.group_id {
            Some(gid) if group_sizes.get(&gid).copied().unwrap_or(0) > 1 => {
                if seen_groups.insert(gid, true).is_some() {
                    continue; // not the first of its group
                }

                let members: Vec<&Reservation> = reservations
                    .iter()
                    .filter(|m| m.group_id == Some(gid))
                    .collect();

                let names: Vec<String> = members
                    .iter()
                    .map(|m| {
                        service_names
                            .get(&m.service_id)
                            .cloned()
                            .unwrap_or_else(|| "Unknown service".to_string())
                    })
                    .collect();

                let total_price_cents = members
                    .iter()
                    .map(|m| m.effective_price_cents(service_prices.get(&m.service_id).copied()))
                    .sum();

                rows.push(ReservationRow {
                    reservation: r.clone(),
                    is_group: true,
                    group: Some(GroupSummary {
                        group_id: gid,
                        member_ids: members.iter().map(|m| m.id).collect(),
                        service_count: members.len(),
                        service_names: names.join(", "),
                        total_price_cents,
                    }),
                });
            }
            _ => rows.push(ReservationRow {
                reservation: r.clone(),
                is_group: false,
                group: None,
            }),
        }
    }

    rows
}

/// One status update to issue as part of a bulk group decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateCommand {
    pub reservation_id: Uuid,
    pub new_status: ReservationStatus,
    /// True on every command except the last, so a group decision produces
    /// a single outbound notification instead of one per member.
    pub skip_notification: bool,
}

/// Plans the sequential updates for a bulk group decision.
///
/// Only pending members are touched; input order is preserved. Returns an
/// empty plan when the group has no pending members.
pub fn plan_group_decision(
    members: &[Reservation],
    new_status: ReservationStatus,
) -> Vec<StatusUpdateCommand> {
    let pending: Vec<&Reservation> = members
        .iter()
        .filter(|r| r.status == ReservationStatus::Pending)
        .collect();

    let last = pending.len().saturating_sub(1);
    pending
        .iter()
        .enumerate()
        .map(|(i, r)| StatusUpdateCommand {
            reservation_id: r.id,
            new_status,
            skip_notification: i != last,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reservation(group_id: Option<Uuid>, status: ReservationStatus) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            service_id: Uuid::new_v4(),
            employee_id: None,
            client_name: "Ana".to_string(),
            client_phone: None,
            starts_at: Utc::now(),
            duration_minutes: 30,
            status,
            group_id,
            custom_price_cents: None,
            total_price_cents: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_singletons_render_one_row_each() {
        let reservations = vec![
            reservation(None, ReservationStatus::Pending),
            reservation(None, ReservationStatus::Pending),
        ];
        let rows = group_reservations(&reservations, &HashMap::new(), &HashMap::new());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_group && r.group.is_none()));
    }

    #[test]
    fn test_group_renders_single_row_with_summary() {
        let gid = Uuid::new_v4();
        let reservations = vec![
            reservation(Some(gid), ReservationStatus::Pending),
            reservation(Some(gid), ReservationStatus::Pending),
            reservation(Some(gid), ReservationStatus::Pending),
            reservation(None, ReservationStatus::Pending),
        ];

        let mut names = HashMap::new();
        let mut prices = HashMap::new();
        for r in &reservations {
            names.insert(r.service_id, format!("svc-{}", &r.id.to_string()[..4]));
            prices.insert(r.service_id, 10_000);
        }

        let rows = group_reservations(&reservations, &names, &prices);
        assert_eq!(rows.len(), 2); // one group row + one singleton

        let group_row = rows.iter().find(|r| r.is_group).unwrap();
        let summary = group_row.group.as_ref().unwrap();
        assert_eq!(summary.service_count, 3);
        assert_eq!(summary.member_ids.len(), 3);
        assert_eq!(summary.total_price_cents, 30_000);
        assert_eq!(summary.service_names.matches(", ").count(), 2);
        // Lead row is the first member of the group.
        assert_eq!(group_row.reservation.id, reservations[0].id);
    }

    #[test]
    fn test_size_one_group_is_singleton() {
        let gid = Uuid::new_v4();
        let reservations = vec![reservation(Some(gid), ReservationStatus::Pending)];
        let rows = group_reservations(&reservations, &HashMap::new(), &HashMap::new());
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_group);
    }

    #[test]
    fn test_row_count_for_known_group_sizes() {
        // 2 groups of 3 and 4 singletons: exactly 6 visible rows.
        let g1 = Uuid::new_v4();
        let g2 = Uuid::new_v4();
        let mut reservations = Vec::new();
        for _ in 0..3 {
            reservations.push(reservation(Some(g1), ReservationStatus::Pending));
        }
        for _ in 0..3 {
            reservations.push(reservation(Some(g2), ReservationStatus::Pending));
        }
        for _ in 0..4 {
            reservations.push(reservation(None, ReservationStatus::Pending));
        }

        let rows = group_reservations(&reservations, &HashMap::new(), &HashMap::new());
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn test_group_price_uses_effective_price_precedence() {
        let gid = Uuid::new_v4();
        let mut with_custom = reservation(Some(gid), ReservationStatus::Pending);
        with_custom.custom_price_cents = Some(500);
        with_custom.total_price_cents = Some(9_999);
        let plain = reservation(Some(gid), ReservationStatus::Pending);

        let mut prices = HashMap::new();
        prices.insert(with_custom.service_id, 20_000);
        prices.insert(plain.service_id, 7_000);

        let rows = group_reservations(&[with_custom, plain], &HashMap::new(), &prices);
        let summary = rows[0].group.as_ref().unwrap();
        assert_eq!(summary.total_price_cents, 500 + 7_000);
    }

    #[test]
    fn test_plan_skips_notification_on_all_but_last() {
        let gid = Uuid::new_v4();
        let members: Vec<Reservation> = (0..5)
            .map(|_| reservation(Some(gid), ReservationStatus::Pending))
            .collect();

        let plan = plan_group_decision(&members, ReservationStatus::Approved);
        assert_eq!(plan.len(), 5);
        for cmd in &plan[..4] {
            assert!(cmd.skip_notification);
        }
        assert!(!plan[4].skip_notification);
        // Sequential order matches input order.
        let planned: Vec<Uuid> = plan.iter().map(|c| c.reservation_id).collect();
        let expected: Vec<Uuid> = members.iter().map(|m| m.id).collect();
        assert_eq!(planned, expected);
    }

    #[test]
    fn test_plan_only_touches_pending_members() {
        let gid = Uuid::new_v4();
        let members = vec![
            reservation(Some(gid), ReservationStatus::Approved),
            reservation(Some(gid), ReservationStatus::Pending),
            reservation(Some(gid), ReservationStatus::Rejected),
        ];

        let plan = plan_group_decision(&members, ReservationStatus::Approved);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].reservation_id, members[1].id);
        assert!(!plan[0].skip_notification);
    }

    #[test]
    fn test_plan_empty_for_no_pending() {
        let gid = Uuid::new_v4();
        let members = vec![
            reservation(Some(gid), ReservationStatus::Approved),
            reservation(Some(gid), ReservationStatus::Approved),
        ];
        assert!(plan_group_decision(&members, ReservationStatus::Approved).is_empty());
    }

    #[test]
    fn test_plan_single_member_gets_notification() {
        let gid = Uuid::new_v4();
        let members = vec![reservation(Some(gid), ReservationStatus::Pending)];
        let plan = plan_group_decision(&members, ReservationStatus::Rejected);
        assert_eq!(plan.len(), 1);
        assert!(!plan[0].skip_notification);
        assert_eq!(plan[0].new_status, ReservationStatus::Rejected);
    }
}
