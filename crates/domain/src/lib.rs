//! Domain layer for the Bookline backend.
//!
//! This crate contains:
//! - Domain models (Organization, Membership, Reservation, Appointment)
//! - Pure business services (status derivation, grouping, pricing, analytics)
//! - The outbound notification abstraction

pub mod models;
pub mod services;
