use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use console::style;

use crate::api::ApiClient;
use crate::app::App;
use crate::cli::args::RuntimeArgs;
use crate::cli::repl::{ReplCommand, HELP};
use crate::config::Settings;
use crate::session::sync::SendStatus;
use crate::ui::{MemoryRenderer, Renderer, Selection, TerminalRenderer};
use crate::utils::format;

fn config_path(runtime: &RuntimeArgs) -> Option<PathBuf> { runtime.config.as_ref().map(PathBuf::from) }

fn build_app<R: Renderer>(settings: &Settings, runtime: &RuntimeArgs, view: R) -> Result<App<R>> {
    let api = ApiClient::new(&settings.resolve_base_url(runtime.base_url.as_deref()))?;
    let session = runtime
        .session
        .clone()
        .unwrap_or_else(|| settings.default_session.clone());
    Ok(App::new(api, settings.clone(), session, view).with_config_path(config_path(runtime)))
}

pub async fn handle_interactive(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    use dialoguer::Input;

    let mut app = build_app(settings, runtime, TerminalRenderer::new(settings.theme))?;
    println!("{}", style("Interactive mode. /help for commands, /quit to exit.").cyan());
    app.start().await;
    loop {
        let line: String = Input::new()
            .with_prompt(format!("You ({})", app.current_session()))
            .allow_empty(true)
            .interact_text()?;
        let Some(cmd) = ReplCommand::parse(&line) else { continue };
        match cmd {
            ReplCommand::Send(text) => { app.send_message(&text).await; }
            ReplCommand::New => { app.create_session().await; }
            ReplCommand::Switch(id) => app.switch_session(&id).await,
            ReplCommand::Sessions => app.refresh_sessions().await,
            ReplCommand::Reload => app.load_current_session().await,
            ReplCommand::Theme => {
                if let Err(err) = app.toggle_theme() {
                    println!("{}", format::warn(&format!("Theme not saved: {:#}", err)));
                }
            }
            ReplCommand::Health => {
                if app.check_health().await {
                    println!("{}", format::success("Server is running"));
                }
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => return Ok(()),
            ReplCommand::Invalid(msg) => println!("{}", format::warn(&msg)),
        }
    }
}

pub async fn handle_send(settings: &Settings, runtime: &RuntimeArgs, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(anyhow!("Message is empty. Provide text or use interactive mode."));
    }
    let mut app = build_app(settings, runtime, MemoryRenderer::new())?;

    let pb = format::spinner("Waiting for reply...");
    let status = app.send_message(text).await;
    pb.finish_and_clear();

    let reply = app
        .view()
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    match status {
        SendStatus::Replied => {
            println!("{}", reply);
            Ok(())
        }
        SendStatus::Skipped => Ok(()),
        SendStatus::Rejected | SendStatus::Unreachable => Err(anyhow!(reply)),
    }
}

pub async fn handle_sessions(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    let mut app = build_app(settings, runtime, TerminalRenderer::new(settings.theme))?;
    app.refresh_sessions().await;
    Ok(())
}

/// Print a session's history. Unlike the interactive view this does not fail
/// soft: an unreachable backend is an error, only a 404 means "no messages".
pub async fn handle_history(settings: &Settings, runtime: &RuntimeArgs, id: Option<&str>) -> Result<()> {
    let api = ApiClient::new(&settings.resolve_base_url(runtime.base_url.as_deref()))?;
    let id = id
        .map(str::to_owned)
        .or_else(|| runtime.session.clone())
        .unwrap_or_else(|| settings.default_session.clone());
    let messages = api
        .get_messages(&id)
        .await
        .with_context(|| format!("Failed to load history of session {} from {}", id, api.base_url()))?;

    let mut view = TerminalRenderer::new(settings.theme);
    view.select_session(&Selection::Existing(id));
    if messages.is_empty() {
        println!("{}", style("No messages").dim());
    }
    for msg in &messages {
        let label = msg.created_at.as_deref().and_then(format::time_label);
        view.append_message(msg.role, &msg.content, label.as_deref());
    }
    Ok(())
}

pub async fn handle_health(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    let base = settings.resolve_base_url(runtime.base_url.as_deref());
    let api = ApiClient::new(&base)?;
    match api.check_health().await {
        Ok(()) => {
            println!("{}", format::success(&format!("Server is running at {}", api.base_url())));
            Ok(())
        }
        Err(err) => Err(anyhow!("Cannot reach {}: {}", api.base_url(), err)),
    }
}

pub async fn handle_theme_toggle(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    let mut app = build_app(settings, runtime, TerminalRenderer::new(settings.theme))?;
    app.toggle_theme()?;
    Ok(())
}

pub async fn handle_config_init(force: bool, scope: Option<&str>, runtime: &RuntimeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let project_root: Option<&Path> = match scope {
        Some("project") => Some(cwd.as_path()),
        _ => None,
    };
    let explicit = config_path(runtime);
    let file = Settings::init_scoped(force, project_root, explicit.as_deref())?;
    println!("{}", format::success(&format!("Wrote {}", file.display())));
    Ok(())
}

pub async fn handle_config_list(settings: &Settings) -> Result<()> {
    println!("Base URL: {}", settings.base_url);
    println!("Default session: {}", settings.default_session);
    println!("Theme: {}", settings.theme);
    Ok(())
}

pub async fn handle_config_set(settings: &mut Settings, runtime: &RuntimeArgs, key: &str, value: &str) -> Result<()> {
    settings.set(key, value)?;
    settings.save_with(None, config_path(runtime).as_deref())?;
    Ok(())
}
