use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::{Settings, Theme};
use crate::session::directory;
use crate::session::sync::{self, SendStatus};
use crate::session::SessionContext;
use crate::ui::Renderer;

/// Owns the session context and the view, and runs every user action
/// against them one at a time.
pub struct App<R: Renderer> {
    api: ApiClient,
    ctx: SessionContext,
    settings: Settings,
    config_path: Option<PathBuf>,
    view: R,
}

impl<R: Renderer> App<R> {
    pub fn new(api: ApiClient, settings: Settings, session: impl Into<String>, view: R) -> Self {
        Self { api, ctx: SessionContext::new(session), settings, config_path: None, view }
    }

    /// Persist preference changes to this file instead of the default location.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn view(&self) -> &R { &self.view }

    pub fn context(&self) -> &SessionContext { &self.ctx }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn current_session(&self) -> &str { self.ctx.current() }

    /// Health probe, session list, then the current session's history.
    pub async fn start(&mut self) {
        self.check_health().await;
        self.refresh_sessions().await;
        self.load_current_session().await;
    }

    pub async fn check_health(&mut self) -> bool {
        match self.api.check_health().await {
            Ok(()) => {
                info!(base_url = self.api.base_url(), "server is running");
                true
            }
            Err(err) => {
                warn!(error = %err, "server health check failed");
                let body = format!(
                    "Cannot connect to the backend server at {base}.\n\n\
                     To fix this:\n\
                     1. Make sure the backend server is running\n\
                     2. It should be listening on {base}\n\
                     3. Run /health or restart once it is up",
                    base = self.api.base_url()
                );
                self.view.show_notice("Server Connection Error", &body);
                false
            }
        }
    }

    pub async fn refresh_sessions(&mut self) {
        directory::refresh_session_list(&self.api, &self.ctx, &mut self.view).await;
    }

    pub async fn load_current_session(&mut self) {
        sync::load_current_session(&self.api, &mut self.ctx, &mut self.view).await;
    }

    pub async fn switch_session(&mut self, id: &str) {
        directory::switch_session(&self.api, &mut self.ctx, &mut self.view, id).await;
    }

    pub async fn create_session(&mut self) -> String {
        directory::create_session(&self.api, &mut self.ctx, &mut self.view, Utc::now()).await
    }

    pub async fn send_message(&mut self, text: &str) -> SendStatus {
        sync::send_message(&self.api, &mut self.ctx, &mut self.view, text).await
    }

    /// Flip between light and dark and write the choice back to the config file.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.settings.theme.toggled();
        self.settings.theme = theme;
        self.view.set_theme(theme);
        self.settings.save_with(None, self.config_path.as_deref())?;
        Ok(theme)
    }
}
