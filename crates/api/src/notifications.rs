//! Fan-out of server-side events to WebSocket dashboard clients.
//!
//! Two independent forwarders run for the lifetime of the process:
//! [`ChangeRouter`] relays row-change notifications (the cue to re-fetch
//! a view), and [`forward_voice_events`] relays voice session events so
//! the landing page can mirror call state and transcript live.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::broadcast;
use voyagent_events::TableChange;
use voyagent_voice::SessionEvent;

use crate::ws::WsManager;

/// Relays table-change events from the bus to all connected clients.
///
/// Clients never receive row data here; the message only names the table
/// that changed, and the client responds by re-fetching that view in
/// full. Delivery order relative to the initiating write is not
/// guaranteed, which the full re-fetch makes harmless.
pub struct ChangeRouter {
    ws_manager: Arc<WsManager>,
}

impl ChangeRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Exits when the channel closes (the `EventBus` was dropped during
    /// shutdown).
    pub async fn run(self, mut receiver: broadcast::Receiver<TableChange>) {
        loop {
            match receiver.recv().await {
                Ok(change) => {
                    let payload = json!({
                        "type": "table_change",
                        "table": change.table,
                        "action": change.action,
                        "id": change.row_id,
                    });
                    self.ws_manager
                        .broadcast(Message::Text(payload.to_string().into()))
                        .await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change router shutting down");
                    break;
                }
            }
        }
    }
}

/// Relay voice session events to all connected clients.
///
/// Exits when the voice controller's event channel closes.
pub async fn forward_voice_events(
    ws_manager: Arc<WsManager>,
    mut receiver: broadcast::Receiver<SessionEvent>,
) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                let payload = json!({
                    "type": "voice_event",
                    "data": event,
                });
                ws_manager
                    .broadcast(Message::Text(payload.to_string().into()))
                    .await;
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Voice event forwarder lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("Voice event channel closed, forwarder shutting down");
                break;
            }
        }
    }
}
