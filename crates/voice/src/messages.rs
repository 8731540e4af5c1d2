//! Voice service WebSocket message types and parser.
//!
//! The service sends JSON messages tagged by a `"type"` field. This
//! module deserializes them into a strongly-typed [`ServerMessage`] and
//! maps each to the [`SessionEvent`] the state machine consumes.

use serde::Deserialize;

use crate::events::SessionEvent;

/// All known voice service WebSocket message types.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// The call is established and audio is flowing.
    #[serde(rename = "call-start")]
    CallStart,

    /// The call has ended.
    #[serde(rename = "call-end")]
    CallEnd,

    /// The remote party started speaking.
    #[serde(rename = "speech-start")]
    SpeechStart,

    /// The remote party stopped speaking.
    #[serde(rename = "speech-end")]
    SpeechEnd,

    /// A transcript fragment, partial or final.
    #[serde(rename = "transcript")]
    Transcript {
        role: String,
        #[serde(rename = "transcriptType")]
        transcript_type: TranscriptType,
        transcript: String,
    },

    /// The service reported an error on the call.
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        error: String,
    },
}

/// Whether a transcript fragment is still being revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptType {
    Partial,
    Final,
}

/// Parse one text frame into a [`ServerMessage`].
pub fn parse_message(text: &str) -> Result<ServerMessage, serde_json::Error> {
    serde_json::from_str(text)
}

impl ServerMessage {
    /// Map a wire message onto the session event it represents.
    pub fn into_event(self) -> SessionEvent {
        match self {
            ServerMessage::CallStart => SessionEvent::CallStart,
            ServerMessage::CallEnd => SessionEvent::CallEnd,
            ServerMessage::SpeechStart => SessionEvent::SpeechStart,
            ServerMessage::SpeechEnd => SessionEvent::SpeechEnd,
            ServerMessage::Transcript {
                role,
                transcript_type,
                transcript,
            } => SessionEvent::TranscriptMessage {
                role,
                text: transcript,
                is_final: transcript_type == TranscriptType::Final,
            },
            ServerMessage::Error { error } => SessionEvent::Error { detail: error },
        }
    }
}
