/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    New,
    Switch(String),
    Sessions,
    Reload,
    Theme,
    Health,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
/new            start a new session
/switch <id>    switch to an existing session
/sessions       list sessions
/reload         reload the current session
/theme          toggle light/dark theme
/health         check the backend
/help           show this help
/quit           exit";

impl ReplCommand {
    /// `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Self::Send(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let cmd = match (name, arg) {
            ("new", "") => Self::New,
            ("switch", "") => Self::Invalid("usage: /switch <id>".into()),
            ("switch", id) => Self::Switch(id.to_string()),
            ("sessions", "") => Self::Sessions,
            ("reload", "") => Self::Reload,
            ("theme", "") => Self::Theme,
            ("health", "") => Self::Health,
            ("help", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            _ => Self::Invalid(format!("unknown command: {}", line)),
        };
        Some(cmd)
    }
}
