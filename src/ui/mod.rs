//! Rendering adapters. The sync layer only talks to [`Renderer`].

pub mod memory;
pub mod terminal;

pub use memory::{MemoryRenderer, RenderedMessage, ViewEvent};
pub use terminal::TerminalRenderer;

use crate::api::models::Role;
use crate::config::Theme;

/// What the session directory shows instead of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPlaceholder {
    NoSessions,
    Unreachable,
}

/// Value of the session picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Existing(String),
    /// A freshly generated session the server does not know about yet
    New(String),
}

pub trait Renderer {
    fn clear_messages(&mut self);

    /// Show one message bubble and bring it into view.
    fn append_message(&mut self, role: Role, content: &str, time_label: Option<&str>);

    /// Diagnostic shown in place of the conversation.
    fn show_notice(&mut self, title: &str, body: &str);

    fn render_sessions(&mut self, sessions: &[String], current: &str);

    fn render_session_placeholder(&mut self, placeholder: SessionPlaceholder);

    fn select_session(&mut self, selection: &Selection);

    fn set_busy(&mut self, busy: bool);

    fn set_theme(&mut self, theme: Theme);
}
