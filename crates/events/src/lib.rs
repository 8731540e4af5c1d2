//! Realtime change-notification infrastructure.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying one [`TableChange`] per row
//!   insert/update/delete.
//! - [`ChangeListener`] -- background service consuming PostgreSQL
//!   `LISTEN/NOTIFY` payloads (emitted by the row triggers installed in
//!   `db/migrations`) and republishing them on the bus.
//!
//! Dashboards treat every change as an invalidation: whatever the event
//! says, the affected view re-fetches its full row set.

pub mod bus;
pub mod listener;

pub use bus::{ChangeAction, EventBus, TableChange};
pub use listener::ChangeListener;
