use crate::api::models::Role;
use crate::config::Theme;
use crate::ui::{Renderer, Selection, SessionPlaceholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: Role,
    pub content: String,
    pub time_label: Option<String>,
}

/// Everything a renderer was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Cleared,
    Appended(Role),
    Notice,
    Sessions,
    Placeholder(SessionPlaceholder),
    Selected(Selection),
    Busy(bool),
    Theme(Theme),
}

/// Headless renderer that keeps the view as plain data.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    pub messages: Vec<RenderedMessage>,
    pub notices: Vec<(String, String)>,
    pub sessions: Vec<String>,
    pub active_session: Option<String>,
    pub placeholder: Option<SessionPlaceholder>,
    pub selection: Option<Selection>,
    pub busy: bool,
    pub theme: Theme,
    pub events: Vec<ViewEvent>,
}

impl MemoryRenderer {
    pub fn new() -> Self { Self::default() }

    /// `(role, content)` pairs of the visible messages.
    pub fn transcript(&self) -> Vec<(Role, &str)> {
        self.messages.iter().map(|m| (m.role, m.content.as_str())).collect()
    }
}

impl Renderer for MemoryRenderer {
    fn clear_messages(&mut self) {
        self.messages.clear();
        self.events.push(ViewEvent::Cleared);
    }

    fn append_message(&mut self, role: Role, content: &str, time_label: Option<&str>) {
        self.messages.push(RenderedMessage {
            role,
            content: content.to_string(),
            time_label: time_label.map(str::to_string),
        });
        self.events.push(ViewEvent::Appended(role));
    }

    fn show_notice(&mut self, title: &str, body: &str) {
        self.notices.push((title.to_string(), body.to_string()));
        self.events.push(ViewEvent::Notice);
    }

    fn render_sessions(&mut self, sessions: &[String], current: &str) {
        self.sessions = sessions.to_vec();
        self.active_session = sessions.iter().find(|s| *s == current).cloned();
        self.placeholder = None;
        self.events.push(ViewEvent::Sessions);
    }

    fn render_session_placeholder(&mut self, placeholder: SessionPlaceholder) {
        self.sessions.clear();
        self.active_session = None;
        self.placeholder = Some(placeholder);
        self.events.push(ViewEvent::Placeholder(placeholder));
    }

    fn select_session(&mut self, selection: &Selection) {
        if let Selection::Existing(id) = selection {
            self.active_session = self.sessions.iter().find(|s| *s == id).cloned();
        }
        self.selection = Some(selection.clone());
        self.events.push(ViewEvent::Selected(selection.clone()));
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.events.push(ViewEvent::Busy(busy));
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.events.push(ViewEvent::Theme(theme));
    }
}
