//! Session directory: which sessions exist and which one is current.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::session::manager::{new_session_id, SessionContext};
use crate::session::sync::load_current_session;
use crate::ui::{Renderer, Selection, SessionPlaceholder};

/// Re-render the session list. Failures end in a placeholder, never an error.
pub async fn refresh_session_list<R: Renderer>(api: &ApiClient, ctx: &SessionContext, view: &mut R) {
    match api.list_sessions().await {
        Ok(sessions) if sessions.is_empty() => view.render_session_placeholder(SessionPlaceholder::NoSessions),
        Ok(sessions) => view.render_sessions(&sessions, ctx.current()),
        Err(err) => {
            warn!(error = %err, "failed to load sessions");
            view.render_session_placeholder(SessionPlaceholder::Unreachable);
        }
    }
}

/// Start a session the server has not seen yet. It is stored once the first
/// message is sent under it.
pub async fn create_session<R: Renderer>(
    api: &ApiClient,
    ctx: &mut SessionContext,
    view: &mut R,
    now: DateTime<Utc>,
) -> String {
    let id = new_session_id(now);
    info!(session = %id, "new session");
    ctx.set_current(&id);
    view.select_session(&Selection::New(id.clone()));
    ctx.clear_transcript();
    view.clear_messages();
    refresh_session_list(api, ctx, view).await;
    id
}

/// Make `id` current and reload its history, even if it already was current.
pub async fn switch_session<R: Renderer>(api: &ApiClient, ctx: &mut SessionContext, view: &mut R, id: &str) {
    info!(session = id, "switching session");
    ctx.set_current(id);
    view.select_session(&Selection::Existing(id.to_string()));
    ctx.clear_transcript();
    view.clear_messages();
    load_current_session(api, ctx, view).await;
}
