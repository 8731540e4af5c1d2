//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`TableChange`] events out to every subscriber. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use voyagent_core::types::DbId;

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// A single row change on a watched table.
///
/// Consumers never patch state from this event; it only tells them which
/// table to re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableChange {
    /// Table the change occurred on (`leads` or `appointments`).
    pub table: String,
    /// Insert, update, or delete.
    pub action: ChangeAction,
    /// ID of the changed row, when the trigger could supply one.
    pub row_id: Option<DbId>,
    /// When the change was observed by this process (UTC).
    pub observed_at: DateTime<Utc>,
}

impl TableChange {
    /// Create a change event observed now.
    pub fn new(table: impl Into<String>, action: ChangeAction, row_id: Option<DbId>) -> Self {
        Self {
            table: table.into(),
            action,
            row_id,
            observed_at: Utc::now(),
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`TableChange`].
pub struct EventBus {
    sender: broadcast::Sender<TableChange>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`. Lag is harmless
    /// here: any later change triggers the same full re-fetch.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped.
    pub fn publish(&self, change: TableChange) {
        let _ = self.sender.send(change);
    }

    /// Subscribe to all changes published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let id = uuid::Uuid::new_v4();
        bus.publish(TableChange::new("leads", ChangeAction::Insert, Some(id)));

        let received = rx.recv().await.expect("should receive the change");
        assert_eq!(received.table, "leads");
        assert_eq!(received.action, ChangeAction::Insert);
        assert_eq!(received.row_id, Some(id));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_change() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(TableChange::new("appointments", ChangeAction::Update, None));

        assert_eq!(rx1.recv().await.unwrap().table, "appointments");
        assert_eq!(rx2.recv().await.unwrap().table, "appointments");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(TableChange::new("leads", ChangeAction::Delete, None));
    }
}
