//! Table-scoped repositories.

pub mod appointment_repo;
pub mod lead_repo;

pub use appointment_repo::AppointmentRepo;
pub use lead_repo::LeadRepo;
