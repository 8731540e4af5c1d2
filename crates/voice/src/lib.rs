//! Voice session bridge for the hosted voice service.
//!
//! The hosted service owns the audio call, speech recognition, and
//! dialogue; this crate owns the session's local shadow. Raw WebSocket
//! frames are parsed into tagged [`SessionEvent`]s and applied to a pure
//! [`VoiceSession`] state machine, so every transition is unit-testable
//! without a live transport.
//!
//! Layering mirrors the connection handling elsewhere in the workspace:
//! [`client`] establishes the socket, [`messages`] decodes frames,
//! [`controller`] owns the single live session and its read-loop task.

pub mod client;
pub mod controller;
pub mod events;
pub mod messages;
pub mod session;

pub use controller::{SessionSnapshot, VoiceController, VoiceError};
pub use events::SessionEvent;
pub use session::{CallStatus, TranscriptLine, VoiceSession};
