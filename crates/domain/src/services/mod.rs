//! Pure business services.

pub mod analytics;
pub mod availability;
pub mod grouping;
pub mod membership_status;
pub mod notification;
pub mod pricing;

pub use grouping::{group_reservations, plan_group_decision, StatusUpdateCommand};
pub use membership_status::derive_membership_status;
pub use pricing::{effective_price_cents, Priced};
