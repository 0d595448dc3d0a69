//! Effective price resolution.
//!
//! The same precedence is used everywhere a price is computed (cashbox
//! totals, analytics revenue, detail responses): custom price, then total
//! price, then the linked service's list price, then zero. Every call site
//! must go through this module so the precedence cannot drift.

use crate::models::{Appointment, Reservation};

/// Resolves the effective price from the override fields and the linked
/// service's list price.
pub fn effective_price_cents(
    custom_price_cents: Option<i64>,
    total_price_cents: Option<i64>,
    service_price_cents: Option<i64>,
) -> i64 {
    custom_price_cents
        .or(total_price_cents)
        .or(service_price_cents)
        .unwrap_or(0)
}

/// Records that carry price override fields and resolve an effective price
/// against their linked service.
pub trait Priced {
    fn custom_price_cents(&self) -> Option<i64>;
    fn total_price_cents(&self) -> Option<i64>;

    /// Effective price given the linked service's list price.
    fn effective_price_cents(&self, service_price_cents: Option<i64>) -> i64 {
        effective_price_cents(
            self.custom_price_cents(),
            self.total_price_cents(),
            service_price_cents,
        )
    }
}

impl Priced for Reservation {
    fn custom_price_cents(&self) -> Option<i64> {
        self.custom_price_cents
    }

    fn total_price_cents(&self) -> Option<i64> {
        self.total_price_cents
    }
}

impl Priced for Appointment {
    fn custom_price_cents(&self) -> Option<i64> {
        self.custom_price_cents
    }

    fn total_price_cents(&self) -> Option<i64> {
        self.total_price_cents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_price_wins() {
        assert_eq!(
            effective_price_cents(Some(1000), Some(2000), Some(3000)),
            1000
        );
    }

    #[test]
    fn test_total_price_next() {
        assert_eq!(effective_price_cents(None, Some(2000), Some(3000)), 2000);
    }

    #[test]
    fn test_service_price_fallback() {
        assert_eq!(effective_price_cents(None, None, Some(3000)), 3000);
    }

    #[test]
    fn test_zero_when_nothing_set() {
        assert_eq!(effective_price_cents(None, None, None), 0);
    }

    #[test]
    fn test_custom_zero_is_still_a_price() {
        // An explicit zero custom price is honored, not skipped.
        assert_eq!(effective_price_cents(Some(0), Some(2000), Some(3000)), 0);
    }
}
