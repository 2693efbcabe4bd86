use console::{style, Color};
use indicatif::ProgressBar;

use crate::api::models::Role;
use crate::config::Theme;
use crate::ui::{Renderer, Selection, SessionPlaceholder};
use crate::utils::format::spinner;

struct Palette {
    user: Color,
    assistant: Color,
    accent: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette { user: Color::Blue, assistant: Color::Green, accent: Color::Color256(136) },
        Theme::Dark => Palette { user: Color::Cyan, assistant: Color::Magenta, accent: Color::Yellow },
    }
}

/// Draws the conversation to stdout.
pub struct TerminalRenderer {
    theme: Theme,
    spinner: Option<ProgressBar>,
}

impl TerminalRenderer {
    pub fn new(theme: Theme) -> Self { Self { theme, spinner: None } }

    /// Print without tearing a running spinner: it is hidden while `f` runs.
    fn emit(&self, f: impl FnOnce()) {
        match &self.spinner {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn clear_messages(&mut self) {
        self.emit(|| println!("{}", style("─".repeat(40)).dim()));
    }

    fn append_message(&mut self, role: Role, content: &str, time_label: Option<&str>) {
        let colors = palette(self.theme);
        let (name, color) = match role {
            Role::User => ("you", colors.user),
            Role::Assistant => ("assistant", colors.assistant),
        };
        let time = time_label.map(|t| format!("[{}] ", t)).unwrap_or_default();
        self.emit(|| println!("{}{} {}", style(time).dim(), style(name).fg(color).bold(), content));
    }

    fn show_notice(&mut self, title: &str, body: &str) {
        let accent = palette(self.theme).accent;
        self.emit(|| {
            println!("{}", style(format!("⚠ {}", title)).fg(accent).bold());
            for line in body.lines() {
                println!("  {}", style(line).fg(accent));
            }
        });
    }

    fn render_sessions(&mut self, sessions: &[String], current: &str) {
        let accent = palette(self.theme).accent;
        self.emit(|| {
            println!("{}", style("Sessions").bold());
            for id in sessions {
                if id == current {
                    println!("* {}", style(id).fg(accent).bold());
                } else {
                    println!("  {}", id);
                }
            }
        });
    }

    fn render_session_placeholder(&mut self, placeholder: SessionPlaceholder) {
        self.emit(|| match placeholder {
            SessionPlaceholder::NoSessions => println!("{}", style("No sessions yet").dim()),
            SessionPlaceholder::Unreachable => println!("{}", style("Cannot connect to server").red()),
        });
    }

    fn select_session(&mut self, selection: &Selection) {
        let line = match selection {
            Selection::Existing(id) => format!("Session: {}", id),
            Selection::New(id) => format!("New session: {}", id),
        };
        self.emit(|| println!("{}", style(line).dim()));
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            if self.spinner.is_none() {
                self.spinner = Some(spinner("Waiting for reply..."));
            }
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.emit(|| println!("Theme: {}", style(theme).fg(palette(theme).accent)));
    }
}
