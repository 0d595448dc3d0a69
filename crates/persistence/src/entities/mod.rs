//! Entity definitions (database row mappings).

pub mod api_key;
pub mod appointment;
pub mod client;
pub mod employee;
pub mod membership;
pub mod organization;
pub mod plan;
pub mod reservation;
pub mod service;

pub use api_key::ApiKeyEntity;
pub use appointment::{AppointmentEntity, AppointmentStatusDb};
pub use client::ClientEntity;
pub use employee::EmployeeEntity;
pub use membership::{MembershipEntity, MembershipStatusDb};
pub use organization::{OrganizationEntity, ReservationPolicyDb};
pub use plan::PlanEntity;
pub use reservation::{ReservationEntity, ReservationStatusDb};
pub use service::ServiceEntity;
