//! Row types, DTOs, and the enumerations they reference.

pub mod appointment;
pub mod lead;
pub mod status;
