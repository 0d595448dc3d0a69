//! Repository implementations.

pub mod api_key;
pub mod appointment;
pub mod client;
pub mod employee;
pub mod membership;
pub mod organization;
pub mod plan;
pub mod reservation;
pub mod service;

pub use api_key::ApiKeyRepository;
pub use appointment::AppointmentRepository;
pub use client::ClientRepository;
pub use employee::EmployeeRepository;
pub use membership::MembershipRepository;
pub use organization::OrganizationRepository;
pub use plan::PlanRepository;
pub use reservation::{NewReservation, ReservationRepository};
pub use service::ServiceRepository;
