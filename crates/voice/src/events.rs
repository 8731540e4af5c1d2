//! Session-level events produced by the voice transport.
//!
//! A single tagged type consumed by
//! [`VoiceSession::apply`](crate::session::VoiceSession::apply); tests
//! drive the state machine by constructing these directly.

use serde::Serialize;

/// A high-level event in the life of one voice call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The call was established; the session becomes active.
    CallStart,

    /// The call terminated (normally or otherwise).
    CallEnd,

    /// The remote party started speaking.
    SpeechStart,

    /// The remote party stopped speaking.
    SpeechEnd,

    /// A transcript fragment. Only finalized fragments are retained.
    TranscriptMessage {
        /// Who spoke (`assistant` or `user`, as reported by the service).
        role: String,
        text: String,
        is_final: bool,
    },

    /// A transport error, fatal to the session.
    Error { detail: String },
}
