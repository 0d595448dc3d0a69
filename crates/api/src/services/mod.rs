//! External service clients.

pub mod payments;
pub mod whatsapp;

pub use payments::{PaymentOutcome, PaymentPoller};
pub use whatsapp::WhatsAppSender;
