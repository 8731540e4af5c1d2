pub mod appointments;
pub mod leads;
pub mod voice;
pub mod webhook;
