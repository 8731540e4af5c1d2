//! PostgreSQL `LISTEN/NOTIFY` consumer.
//!
//! [`ChangeListener`] subscribes to the `record_changes` channel that the
//! row triggers (see `db/migrations/0002_change_notifications.sql`) emit
//! on, decodes each payload, and republishes it on the [`EventBus`].

use std::sync::Arc;

use serde::Deserialize;
use sqlx::postgres::PgListener;
use tokio_util::sync::CancellationToken;
use voyagent_core::types::DbId;

use crate::bus::{ChangeAction, EventBus, TableChange};

/// Notification channel the row triggers publish on.
const CHANNEL: &str = "record_changes";

/// JSON payload shape produced by `notify_record_change()`.
#[derive(Debug, Deserialize)]
struct NotificationPayload {
    table: String,
    action: ChangeAction,
    id: Option<DbId>,
}

/// Decode a trigger payload into a [`TableChange`].
fn parse_notification(payload: &str) -> Result<TableChange, serde_json::Error> {
    let decoded: NotificationPayload = serde_json::from_str(payload)?;
    Ok(TableChange::new(decoded.table, decoded.action, decoded.id))
}

/// Long-running service relaying database change notifications to the bus.
pub struct ChangeListener {
    pool: sqlx::PgPool,
    bus: Arc<EventBus>,
}

impl ChangeListener {
    /// Create a listener over the shared connection pool.
    pub fn new(pool: sqlx::PgPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Run until the cancellation token fires.
    ///
    /// `PgListener::recv` transparently re-establishes its connection
    /// after a drop, so a lost connection surfaces as one logged error
    /// followed by resumed delivery. Notifications sent while the
    /// connection was down are lost, which the invalidate-and-reload
    /// contract tolerates.
    pub async fn run(self, cancel: CancellationToken) {
        let mut listener = match PgListener::connect_with(&self.pool).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create change listener");
                return;
            }
        };
        if let Err(e) = listener.listen(CHANNEL).await {
            tracing::error!(error = %e, channel = CHANNEL, "LISTEN failed");
            return;
        }
        tracing::info!(channel = CHANNEL, "Change listener started");

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Change listener shutting down");
                    return;
                }
                notification = listener.recv() => match notification {
                    Ok(n) => match parse_notification(n.payload()) {
                        Ok(change) => {
                            tracing::debug!(
                                table = %change.table,
                                action = ?change.action,
                                "Row change notification",
                            );
                            self.bus.publish(change);
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                payload = n.payload(),
                                "Undecodable change notification",
                            );
                        }
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Change listener receive error");
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trigger_payload_with_row_id() {
        let change = parse_notification(
            r#"{"table":"leads","action":"insert","id":"7f2c1f6e-9f4b-4a57-a3a0-1c2d3e4f5a6b"}"#,
        )
        .unwrap();
        assert_eq!(change.table, "leads");
        assert_eq!(change.action, ChangeAction::Insert);
        assert_eq!(
            change.row_id.unwrap().to_string(),
            "7f2c1f6e-9f4b-4a57-a3a0-1c2d3e4f5a6b"
        );
    }

    #[test]
    fn parses_delete_payload_with_null_id() {
        let change =
            parse_notification(r#"{"table":"appointments","action":"delete","id":null}"#).unwrap();
        assert_eq!(change.action, ChangeAction::Delete);
        assert_eq!(change.row_id, None);
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(parse_notification(r#"{"table":"leads","action":"truncate","id":null}"#).is_err());
    }
}
