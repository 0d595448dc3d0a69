//! Slot availability checks for the auto-approval policy.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, Reservation};

/// A slot someone is asking to book.
#[derive(Debug, Clone, Copy)]
pub struct RequestedSlot {
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
}

impl RequestedSlot {
    fn end(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(self.duration_minutes as i64)
    }
}

fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether the requested slot collides with an existing confirmed booking.
///
/// When the request names an employee, only that employee's bookings
/// conflict. When it does not, any confirmed booking for the same service
/// blocks auto-approval (staff must assign someone by hand).
pub fn slot_has_conflict(
    slot: &RequestedSlot,
    confirmed_reservations: &[Reservation],
    appointments: &[Appointment],
) -> bool {
    let slot_end = slot.end();

    let reservation_conflict = confirmed_reservations.iter().any(|r| {
        if !r.status.is_confirmed() {
            return false;
        }
        let matches_target = match slot.employee_id {
            Some(emp) => r.employee_id == Some(emp),
            None => r.service_id == slot.service_id,
        };
        matches_target
            && intervals_overlap(
                slot.starts_at,
                slot_end,
                r.starts_at,
                r.starts_at + Duration::minutes(r.duration_minutes as i64),
            )
    });
    if reservation_conflict {
        return true;
    }

    appointments.iter().any(|a| {
        if a.status != AppointmentStatus::Scheduled {
            return false;
        }
        let matches_target = match slot.employee_id {
            Some(emp) => a.employee_id == emp,
            None => a.service_id == slot.service_id,
        };
        matches_target
            && intervals_overlap(
                slot.starts_at,
                slot_end,
                a.starts_at,
                a.starts_at + Duration::minutes(a.duration_minutes as i64),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    fn confirmed_reservation(
        employee_id: Option<Uuid>,
        service_id: Uuid,
        starts_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            service_id,
            employee_id,
            client_name: "Ana".to_string(),
            client_phone: None,
            starts_at,
            duration_minutes,
            status: ReservationStatus::Approved,
            group_id: None,
            custom_price_cents: None,
            total_price_cents: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_conflict_when_empty() {
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(Uuid::new_v4()),
            starts_at: Utc::now(),
            duration_minutes: 30,
        };
        assert!(!slot_has_conflict(&slot, &[], &[]));
    }

    #[test]
    fn test_same_employee_overlap_conflicts() {
        let emp = Uuid::new_v4();
        let now = Utc::now();
        let existing = confirmed_reservation(Some(emp), Uuid::new_v4(), now, 60);
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(emp),
            starts_at: now + Duration::minutes(30),
            duration_minutes: 30,
        };
        assert!(slot_has_conflict(&slot, &[existing], &[]));
    }

    #[test]
    fn test_different_employee_does_not_conflict() {
        let now = Utc::now();
        let existing = confirmed_reservation(Some(Uuid::new_v4()), Uuid::new_v4(), now, 60);
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(Uuid::new_v4()),
            starts_at: now,
            duration_minutes: 30,
        };
        assert!(!slot_has_conflict(&slot, &[existing], &[]));
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let emp = Uuid::new_v4();
        let now = Utc::now();
        let existing = confirmed_reservation(Some(emp), Uuid::new_v4(), now, 30);
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(emp),
            starts_at: now + Duration::minutes(30),
            duration_minutes: 30,
        };
        assert!(!slot_has_conflict(&slot, &[existing], &[]));
    }

    #[test]
    fn test_pending_reservations_do_not_block() {
        let emp = Uuid::new_v4();
        let now = Utc::now();
        let mut existing = confirmed_reservation(Some(emp), Uuid::new_v4(), now, 60);
        existing.status = ReservationStatus::Pending;
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(emp),
            starts_at: now,
            duration_minutes: 30,
        };
        assert!(!slot_has_conflict(&slot, &[existing], &[]));
    }

    #[test]
    fn test_no_employee_falls_back_to_service_match() {
        let service = Uuid::new_v4();
        let now = Utc::now();
        let existing = confirmed_reservation(Some(Uuid::new_v4()), service, now, 60);
        let slot = RequestedSlot {
            service_id: service,
            employee_id: None,
            starts_at: now,
            duration_minutes: 30,
        };
        assert!(slot_has_conflict(&slot, &[existing], &[]));
    }

    #[test]
    fn test_scheduled_appointment_conflicts() {
        let emp = Uuid::new_v4();
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            service_id: Uuid::new_v4(),
            employee_id: emp,
            client_id: None,
            starts_at: now,
            duration_minutes: 45,
            status: AppointmentStatus::Scheduled,
            custom_price_cents: None,
            total_price_cents: None,
            created_at: now,
            updated_at: now,
        };
        let slot = RequestedSlot {
            service_id: Uuid::new_v4(),
            employee_id: Some(emp),
            starts_at: now + Duration::minutes(15),
            duration_minutes: 30,
        };
        assert!(slot_has_conflict(&slot, &[], &[appointment.clone()]));

        let cancelled = Appointment {
            status: AppointmentStatus::Cancelled,
            ..appointment
        };
        assert!(!slot_has_conflict(&slot, &[], &[cancelled]));
    }
}
