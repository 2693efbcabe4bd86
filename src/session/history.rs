use crate::api::models::Message;

/// Messages currently shown, all belonging to one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    session_id: String,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self { session_id: session_id.into(), messages: Vec::new() }
    }

    pub fn session_id(&self) -> &str { &self.session_id }

    pub fn messages(&self) -> &[Message] { &self.messages }

    pub fn len(&self) -> usize { self.messages.len() }

    pub fn is_empty(&self) -> bool { self.messages.is_empty() }

    /// Drop everything and start over for `session_id`.
    pub fn reset(&mut self, session_id: &str) {
        self.session_id.clear();
        self.session_id.push_str(session_id);
        self.messages.clear();
    }

    pub fn push(&mut self, message: Message) { self.messages.push(message); }
}
