//! Shared domain primitives for the voyagent platform.
//!
//! Holds the types, errors, and pure logic that every other crate builds
//! on: ID/timestamp aliases, the core error taxonomy, and the calendar
//! arithmetic used by the appointments dashboard.

pub mod calendar;
pub mod error;
pub mod types;
