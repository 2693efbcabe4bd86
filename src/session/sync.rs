//! Keeps the rendered conversation in line with the server's history.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, ChatOutcome, Message, Role};
use crate::session::directory::refresh_session_list;
use crate::session::manager::SessionContext;
use crate::ui::Renderer;
use crate::utils::format::time_label;

pub const ERROR_PREFIX: &str = "Error: ";

/// How a send ended, for callers that need more than the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// Blank input, nothing happened
    Skipped,
    Replied,
    Rejected,
    Unreachable,
}

/// Replace the view with the current session's history.
///
/// A missing session renders empty. Any other failure is logged and leaves
/// the view as it was.
pub async fn load_current_session<R: Renderer>(api: &ApiClient, ctx: &mut SessionContext, view: &mut R) {
    let messages = match api.get_messages(ctx.current()).await {
        Ok(messages) => messages,
        Err(err) => {
            warn!(session = ctx.current(), error = %err, "failed to load session history");
            return;
        }
    };
    debug!(session = ctx.current(), count = messages.len(), "history loaded");
    ctx.clear_transcript();
    view.clear_messages();
    for msg in messages {
        append_message(ctx, view, msg.role, &msg.content, msg.created_at.as_deref());
    }
}

pub fn append_message<R: Renderer>(
    ctx: &mut SessionContext,
    view: &mut R,
    role: Role,
    content: &str,
    timestamp: Option<&str>,
) {
    let label = timestamp.and_then(time_label);
    view.append_message(role, content, label.as_deref());
    ctx.record(Message::new(role, content, timestamp.map(str::to_string)));
}

pub async fn send_message<R: Renderer>(
    api: &ApiClient,
    ctx: &mut SessionContext,
    view: &mut R,
    text: &str,
) -> SendStatus {
    let text = text.trim();
    if text.is_empty() {
        return SendStatus::Skipped;
    }

    append_message(ctx, view, Role::User, text, None);
    view.set_busy(true);

    let session_id = ctx.current().to_string();
    let (reply, status) = match api.post_chat(&session_id, text).await {
        Ok(ChatOutcome::Reply { text, .. }) => (text, SendStatus::Replied),
        Ok(ChatOutcome::Rejected(error)) => (format!("{}{}", ERROR_PREFIX, error), SendStatus::Rejected),
        Err(err) => {
            warn!(session = %session_id, error = %err, "chat request failed");
            (connection_error(api, &err), SendStatus::Unreachable)
        }
    };
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    append_message(ctx, view, Role::Assistant, &reply, Some(&now));

    view.set_busy(false);
    refresh_session_list(api, ctx, view).await;
    status
}

fn connection_error(api: &ApiClient, err: &ApiError) -> String {
    if err.is_network() {
        format!("Cannot connect to server. Make sure the backend is running on {}", api.base_url())
    } else {
        format!("Connection Error: {}", err)
    }
}
