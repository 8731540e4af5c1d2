//! Owner of the single live voice session.
//!
//! [`VoiceController`] enforces the session guards (start only from
//! idle, stop only when not idle), runs the connection's read loop, and
//! exposes a snapshot for the API. Created once at startup; when the
//! voice service is not configured the controller exists in a disabled
//! state and every operation reports that.

use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::client::VoiceClient;
use crate::events::SessionEvent;
use crate::messages::parse_message;
use crate::session::{CallStatus, TranscriptLine, VoiceSession};

/// Broadcast channel capacity for session events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Point-in-time view of the session, serialized for the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// False when no voice service credentials are configured.
    pub enabled: bool,
    pub status: CallStatus,
    pub is_speaking: bool,
    pub transcript: Vec<TranscriptLine>,
}

/// Errors surfaced to callers of start/stop.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// The voice service is not configured; the controller is disabled.
    #[error("Voice service is not configured")]
    Disabled,

    /// The connection to the voice service could not be established.
    #[error("Failed to start call: {0}")]
    StartFailed(String),
}

/// Manages the one voice session this service fronts.
pub struct VoiceController {
    inner: Option<Inner>,
}

struct Inner {
    client: VoiceClient,
    session: Arc<RwLock<VoiceSession>>,
    event_tx: broadcast::Sender<SessionEvent>,
    /// The read-loop task of the current call, if one is running.
    active: Mutex<Option<ActiveCall>>,
}

struct ActiveCall {
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl VoiceController {
    /// Create an enabled controller for the given client.
    pub fn new(client: VoiceClient) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            inner: Some(Inner {
                client,
                session: Arc::new(RwLock::new(VoiceSession::new())),
                event_tx,
                active: Mutex::new(None),
            }),
        })
    }

    /// Create a disabled controller (no voice credentials configured).
    pub fn disabled() -> Arc<Self> {
        Arc::new(Self { inner: None })
    }

    /// Whether a voice service is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Subscribe to session events (used to push them to dashboards).
    ///
    /// Returns `None` when the controller is disabled.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<SessionEvent>> {
        self.inner.as_ref().map(|i| i.event_tx.subscribe())
    }

    /// Start a call.
    ///
    /// Returns `Ok(false)` when the session is not idle (the request is
    /// a guarded no-op: no transition, no connection attempt). A connect
    /// failure resets the session to idle and surfaces the error.
    pub async fn start(&self) -> Result<bool, VoiceError> {
        let inner = self.inner.as_ref().ok_or(VoiceError::Disabled)?;

        if !inner.session.write().await.request_start() {
            tracing::debug!("Start request ignored, session not idle");
            return Ok(false);
        }

        let conn = match inner.client.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(error = %e, "Failed to start call");
                inner.session.write().await.start_failed();
                return Err(VoiceError::StartFailed(e.to_string()));
            }
        };

        let mut session = inner.session.write().await;
        if session.status() == CallStatus::Ending {
            // A stop request arrived while the connection was being
            // established: the pending start is cancelled outright.
            tracing::info!(session_id = %conn.session_id, "Start cancelled by stop request");
            let mut ws_stream = conn.ws_stream;
            let _ = ws_stream.close(None).await;
            session.apply(SessionEvent::CallEnd);
            return Ok(true);
        }
        drop(session);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_call(
            conn.ws_stream,
            conn.session_id,
            Arc::clone(&inner.session),
            inner.event_tx.clone(),
            cancel.clone(),
        ));
        *inner.active.lock().await = Some(ActiveCall {
            cancel: cancel.clone(),
            handle,
        });

        // A stop landing between the Ending re-check above and the call
        // registration finds the active slot empty and cancels nothing,
        // so re-check the session now that the call is registered.
        if inner.session.read().await.status() == CallStatus::Ending {
            tracing::info!("Stop raced the call registration, cancelling");
            cancel.cancel();
        }
        Ok(true)
    }

    /// Stop the current call.
    ///
    /// Returns `Ok(false)` when the session is already idle. Otherwise
    /// the session moves to ending and the connection task is cancelled;
    /// the transition back to idle happens when the stream closes.
    pub async fn stop(&self) -> Result<bool, VoiceError> {
        let inner = self.inner.as_ref().ok_or(VoiceError::Disabled)?;

        if !inner.session.write().await.request_stop() {
            tracing::debug!("Stop request ignored, session already idle");
            return Ok(false);
        }

        if let Some(call) = inner.active.lock().await.take() {
            call.cancel.cancel();
        }
        Ok(true)
    }

    /// Current state of the session for the API.
    pub async fn snapshot(&self) -> SessionSnapshot {
        match &self.inner {
            None => SessionSnapshot {
                enabled: false,
                status: CallStatus::Idle,
                is_speaking: false,
                transcript: Vec::new(),
            },
            Some(inner) => {
                let session = inner.session.read().await;
                SessionSnapshot {
                    enabled: true,
                    status: session.status(),
                    is_speaking: session.is_speaking(),
                    transcript: session.transcript().to_vec(),
                }
            }
        }
    }

    /// Tear down any live call during graceful shutdown.
    pub async fn shutdown(&self) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };
        if let Some(call) = inner.active.lock().await.take() {
            tracing::info!("Stopping voice session task");
            call.cancel.cancel();
            let _ = tokio::time::timeout(std::time::Duration::from_secs(5), call.handle).await;
        }
    }
}

/// Read-loop for one call: parse frames, apply them to the session, and
/// rebroadcast the resulting events.
///
/// Runs until the stream closes, a receive error occurs, or the
/// cancellation token fires (stop request). If the service never
/// delivered `call-end`, one is synthesized on exit so the state machine
/// cannot be left stranded outside idle.
async fn run_call(
    mut ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    session_id: String,
    session: Arc<RwLock<VoiceSession>>,
    event_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::info!(session_id = %session_id, "Call cancelled, closing stream");
                let _ = ws_stream.close(None).await;
                break;
            }
            frame = ws_stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match parse_message(&text) {
                        Ok(msg) => {
                            let event = msg.into_event();
                            session.write().await.apply(event.clone());
                            let _ = event_tx.send(event);
                        }
                        Err(e) => {
                            tracing::warn!(
                                session_id = %session_id,
                                error = %e,
                                raw_message = %text,
                                "Failed to parse voice service message",
                            );
                        }
                    }
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                    // Handled automatically by tungstenite.
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(session_id = %session_id, ?frame, "Voice service closed stream");
                    break;
                }
                Some(Ok(_)) => {
                    // Binary frames carry audio previews; not consumed here.
                }
                Some(Err(e)) => {
                    tracing::error!(session_id = %session_id, error = %e, "Stream receive error");
                    let event = SessionEvent::Error { detail: e.to_string() };
                    session.write().await.apply(event.clone());
                    let _ = event_tx.send(event);
                    break;
                }
                None => {
                    tracing::info!(session_id = %session_id, "Voice service stream ended");
                    break;
                }
            },
        }
    }

    let mut session = session.write().await;
    if session.status() != CallStatus::Idle {
        session.apply(SessionEvent::CallEnd);
        let _ = event_tx.send(SessionEvent::CallEnd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn disabled_controller_reports_disabled() {
        let controller = VoiceController::disabled();
        assert!(!controller.is_enabled());

        let snapshot = controller.snapshot().await;
        assert!(!snapshot.enabled);
        assert_eq!(snapshot.status, CallStatus::Idle);

        assert_matches!(controller.start().await, Err(VoiceError::Disabled));
        assert_matches!(controller.stop().await, Err(VoiceError::Disabled));
    }

    #[tokio::test]
    async fn stop_on_idle_enabled_controller_is_a_no_op() {
        let client = VoiceClient::new(
            "ws://127.0.0.1:1".to_string(),
            "pk_test".to_string(),
            "assistant-1".to_string(),
        );
        let controller = VoiceController::new(client);
        assert_matches!(controller.stop().await, Ok(false));
        assert_eq!(controller.snapshot().await.status, CallStatus::Idle);
    }

    #[tokio::test]
    async fn stop_after_start_always_settles_back_to_idle() {
        use futures::SinkExt;

        // A local stand-in for the voice service: accept one connection,
        // immediately claim the call is live, then hold the stream open
        // until the client closes it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                if let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await {
                    let _ = ws
                        .send(Message::Text(r#"{"type":"call-start"}"#.to_string()))
                        .await;
                    while let Some(Ok(_)) = ws.next().await {}
                }
            }
        });

        let client = VoiceClient::new(
            format!("ws://{addr}"),
            "pk_test".to_string(),
            "assistant-1".to_string(),
        );
        let controller = VoiceController::new(client);

        assert_matches!(controller.start().await, Ok(true));
        assert_matches!(controller.stop().await, Ok(true));

        // However the stop interleaves with the call task's registration
        // and the in-flight call-start frame, the cancelled call must
        // come to rest idle, never active.
        for _ in 0..50 {
            if controller.snapshot().await.status == CallStatus::Idle {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(controller.snapshot().await.status, CallStatus::Idle);
        controller.shutdown().await;
    }

    #[tokio::test]
    async fn failed_connect_resets_session_to_idle() {
        // Port 1 refuses connections, so the start attempt fails fast.
        let client = VoiceClient::new(
            "ws://127.0.0.1:1".to_string(),
            "pk_test".to_string(),
            "assistant-1".to_string(),
        );
        let controller = VoiceController::new(client);

        assert_matches!(controller.start().await, Err(VoiceError::StartFailed(_)));
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.status, CallStatus::Idle);
        assert!(snapshot.enabled);
    }
}
