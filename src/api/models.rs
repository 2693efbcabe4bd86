use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Row id assigned by the backend; never reconciled against local echoes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub role: Role,
    pub content: String,
    /// ISO-8601 timestamp, absent for messages not yet stored server-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, created_at: Option<String>) -> Self {
        Self { id: None, role, content: content.into(), created_at }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub error: Option<String>,
    pub session_id: Option<String>,
}

/// Result of a chat call that reached the server and got a 2xx back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply { text: String, session_id: Option<String> },
    /// The server answered but reported an application-level failure
    Rejected(String),
}

impl From<ChatResponse> for ChatOutcome {
    fn from(body: ChatResponse) -> Self {
        match body.error {
            Some(error) if !error.is_empty() => Self::Rejected(error),
            _ => Self::Reply { text: body.response.unwrap_or_default(), session_id: body.session_id },
        }
    }
}
