use chrono::{DateTime, SecondsFormat, Utc};

use crate::api::models::Message;
use crate::session::history::Transcript;

pub const DEFAULT_SESSION_ID: &str = "default";
pub const SESSION_ID_PREFIX: &str = "session-";

/// The single active session and what is shown for it.
///
/// Owned by the controller and handed to every directory and sync operation,
/// so there is exactly one current session per client.
#[derive(Debug, Clone)]
pub struct SessionContext {
    current: String,
    transcript: Transcript,
}

impl SessionContext {
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        let transcript = Transcript::new(current.clone());
        Self { current, transcript }
    }

    pub fn current(&self) -> &str { &self.current }

    pub fn transcript(&self) -> &Transcript { &self.transcript }

    pub fn set_current(&mut self, id: &str) {
        self.current = id.to_string();
    }

    /// Empty the transcript and bind it to the current session.
    pub fn clear_transcript(&mut self) {
        self.transcript.reset(&self.current);
    }

    pub(crate) fn record(&mut self, message: Message) {
        if self.transcript.session_id() != self.current {
            self.transcript.reset(&self.current);
        }
        self.transcript.push(message);
    }
}

impl Default for SessionContext {
    fn default() -> Self { Self::new(DEFAULT_SESSION_ID) }
}

/// `session-` followed by the UTC timestamp in millisecond ISO-8601 form
/// with `:` and `.` replaced by `-`, e.g. `session-2025-03-01T09-15-30-123Z`.
pub fn new_session_id(now: DateTime<Utc>) -> String {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true).replace([':', '.'], "-");
    format!("{}{}", SESSION_ID_PREFIX, stamp)
}
