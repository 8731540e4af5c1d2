//! The voice call state machine.
//!
//! [`VoiceSession`] is a pure shadow of the remote call: a four-state
//! status, a speaking flag, and the accumulated transcript. It never
//! touches the network; callers feed it [`SessionEvent`]s.

use serde::Serialize;

use crate::events::SessionEvent;

/// Where the call currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// No call. The only state a start request is honored in.
    Idle,
    /// Start requested, waiting for the service to establish the call.
    Connecting,
    /// Call established; transcript and speech events are live.
    Active,
    /// Stop requested, waiting for the service to confirm termination.
    Ending,
}

/// One finalized transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub role: String,
    pub text: String,
}

/// Local state of the (at most one) voice call.
#[derive(Debug)]
pub struct VoiceSession {
    status: CallStatus,
    is_speaking: bool,
    transcript: Vec<TranscriptLine>,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self {
            status: CallStatus::Idle,
            is_speaking: false,
            transcript: Vec::new(),
        }
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    /// Whether the remote party is currently speaking.
    ///
    /// Only meaningful while the status is [`CallStatus::Active`].
    pub fn is_speaking(&self) -> bool {
        self.is_speaking
    }

    /// Finalized transcript lines in arrival order.
    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    /// Record a start request.
    ///
    /// Returns `true` and moves to `Connecting` only from `Idle`; in any
    /// other state this is a no-op and the caller must not touch the
    /// transport.
    pub fn request_start(&mut self) -> bool {
        if self.status == CallStatus::Idle {
            self.status = CallStatus::Connecting;
            true
        } else {
            false
        }
    }

    /// Record a stop request.
    ///
    /// A no-op from `Idle`. From `Connecting` it is honored: the pending
    /// start is abandoned (see the controller for how the in-flight
    /// connection is torn down).
    pub fn request_stop(&mut self) -> bool {
        if self.status == CallStatus::Idle {
            false
        } else {
            self.status = CallStatus::Ending;
            true
        }
    }

    /// Record that the start attempt failed before the call existed.
    pub fn start_failed(&mut self) {
        self.status = CallStatus::Idle;
    }

    /// Apply one transport event.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::CallStart => {
                self.status = CallStatus::Active;
                self.transcript.clear();
            }
            SessionEvent::CallEnd => {
                self.status = CallStatus::Idle;
                // Call end always clears the speaking flag, whatever
                // order the service delivered its last events in.
                self.is_speaking = false;
            }
            SessionEvent::SpeechStart => {
                self.is_speaking = true;
            }
            SessionEvent::SpeechEnd => {
                self.is_speaking = false;
            }
            SessionEvent::TranscriptMessage {
                role,
                text,
                is_final,
            } => {
                if is_final && self.status != CallStatus::Idle {
                    self.transcript.push(TranscriptLine { role, text });
                }
            }
            SessionEvent::Error { detail } => {
                tracing::error!(detail = %detail, "Voice transport error, resetting session");
                self.status = CallStatus::Idle;
            }
        }
    }
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(role: &str, text: &str) -> SessionEvent {
        SessionEvent::TranscriptMessage {
            role: role.to_string(),
            text: text.to_string(),
            is_final: true,
        }
    }

    #[test]
    fn start_is_only_honored_from_idle() {
        let mut s = VoiceSession::new();
        assert!(s.request_start());
        assert_eq!(s.status(), CallStatus::Connecting);

        // Connecting, Active, Ending: all no-ops.
        assert!(!s.request_start());
        s.apply(SessionEvent::CallStart);
        assert!(!s.request_start());
        assert!(s.request_stop());
        assert!(!s.request_start());
        assert_eq!(s.status(), CallStatus::Ending);
    }

    #[test]
    fn stop_from_idle_is_a_no_op() {
        let mut s = VoiceSession::new();
        assert!(!s.request_stop());
        assert_eq!(s.status(), CallStatus::Idle);
    }

    #[test]
    fn stop_during_connecting_is_honored() {
        let mut s = VoiceSession::new();
        s.request_start();
        assert!(s.request_stop());
        assert_eq!(s.status(), CallStatus::Ending);
    }

    #[test]
    fn call_start_activates_and_resets_transcript() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.apply(SessionEvent::CallStart);
        s.apply(line("user", "first call"));
        s.apply(SessionEvent::CallEnd);

        // Old transcript survives until the next call starts.
        assert_eq!(s.transcript().len(), 1);
        s.request_start();
        s.apply(SessionEvent::CallStart);
        assert_eq!(s.status(), CallStatus::Active);
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn call_end_always_clears_speaking_flag() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.apply(SessionEvent::CallStart);
        s.apply(SessionEvent::SpeechStart);
        assert!(s.is_speaking());

        s.apply(SessionEvent::CallEnd);
        assert_eq!(s.status(), CallStatus::Idle);
        assert!(!s.is_speaking());
    }

    #[test]
    fn speech_events_toggle_the_flag() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.apply(SessionEvent::CallStart);
        s.apply(SessionEvent::SpeechStart);
        s.apply(SessionEvent::SpeechEnd);
        assert!(!s.is_speaking());
    }

    #[test]
    fn transcript_preserves_arrival_order() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.apply(SessionEvent::CallStart);
        s.apply(line("assistant", "Bonjour!"));
        s.apply(line("user", "Je veux une croisière"));
        s.apply(line("assistant", "Quelle destination?"));

        let texts: Vec<&str> = s.transcript().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Bonjour!", "Je veux une croisière", "Quelle destination?"]
        );
    }

    #[test]
    fn partial_transcripts_are_not_retained() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.apply(SessionEvent::CallStart);
        s.apply(SessionEvent::TranscriptMessage {
            role: "user".to_string(),
            text: "bon".to_string(),
            is_final: false,
        });
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn transcripts_while_idle_are_dropped() {
        let mut s = VoiceSession::new();
        s.apply(line("assistant", "stray"));
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn transport_error_resets_to_idle_from_any_state() {
        for setup in [
            |_s: &mut VoiceSession| {},
            |s: &mut VoiceSession| {
                s.request_start();
            },
            |s: &mut VoiceSession| {
                s.request_start();
                s.apply(SessionEvent::CallStart);
            },
            |s: &mut VoiceSession| {
                s.request_start();
                s.apply(SessionEvent::CallStart);
                s.request_stop();
            },
        ] {
            let mut s = VoiceSession::new();
            setup(&mut s);
            s.apply(SessionEvent::Error {
                detail: "boom".to_string(),
            });
            assert_eq!(s.status(), CallStatus::Idle);
        }
    }

    #[test]
    fn start_failure_returns_to_idle() {
        let mut s = VoiceSession::new();
        s.request_start();
        s.start_failed();
        assert_eq!(s.status(), CallStatus::Idle);
    }
}
