//! WebSocket infrastructure for real-time dashboard refresh.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Dashboards hold one connection
//! each and treat every pushed message as a cue to re-fetch.

mod handler;
pub mod manager;

pub use handler::ws_handler;
pub use manager::{start_heartbeat, WsManager};
