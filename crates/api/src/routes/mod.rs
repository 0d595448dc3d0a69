//! HTTP route handlers.

pub mod analytics;
pub mod api_keys;
pub mod appointments;
pub mod clients;
pub mod employees;
pub mod health;
pub mod memberships;
pub mod organizations;
pub mod payments;
pub mod plans;
pub mod public;
pub mod reservations;
pub mod services;
