use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// HTTP handler that upgrades the connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_connection(socket, state.ws_manager))
}

/// Drive one dashboard connection until either side closes it.
///
/// Dashboard clients are listen-only: everything they receive is a cue
/// to re-fetch, and the only inbound traffic is pongs and the eventual
/// close. One select loop therefore serves both directions, forwarding
/// queued broadcasts out and draining the inbound stream.
async fn serve_connection(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let client_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(client_id = %client_id, "Dashboard client connected");

    let mut outbound = ws_manager.add(client_id.clone()).await;
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            queued = outbound.recv() => match queued {
                Some(msg) => {
                    if sink.send(msg).await.is_err() {
                        tracing::debug!(client_id = %client_id, "WebSocket sink closed");
                        break;
                    }
                }
                // Channel gone: the manager already dropped this connection.
                None => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(client_id = %client_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
        }
    }

    ws_manager.remove(&client_id).await;
    tracing::info!(client_id = %client_id, "Dashboard client disconnected");
}
