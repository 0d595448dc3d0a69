//! Background job scheduler and job implementations.

mod membership_sweep;
mod scheduler;

pub use membership_sweep::MembershipSweepJob;
pub use scheduler::{Job, JobScheduler};
