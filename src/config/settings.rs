use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::session::DEFAULT_SESSION_ID;

const APP_DIR_NAME: &str = ".deskchat";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const BASE_URL_ENV: &str = "DESKCHAT_BASE_URL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow!("Unknown theme `{}` (expected light or dark)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend API root, e.g. http://localhost:5000/api
    pub base_url: String,
    /// Session selected on start-up
    pub default_session: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_session: DEFAULT_SESSION_ID.to_string(),
            theme: Theme::Light,
        }
    }
}

impl Settings {
    pub fn load_with(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(project_root, explicit)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let value: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))?;
        Ok(value)
    }

    pub fn save_with(&self, project_root: Option<&Path>, explicit: Option<&Path>) -> Result<()> {
        let (dir, path) = resolve_config_dir_and_file(project_root, explicit)?;
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| format!(
                "Failed to create config directory at {}",
                dir.display()
            ))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn init_scoped(force: bool, project_root: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
        let (_, file) = resolve_config_dir_and_file(project_root, explicit)?;
        if file.exists() && !force {
            anyhow::bail!("Config already exists at {} (use --force to overwrite)", file.display());
        }
        Self::default().save_with(project_root, explicit)?;
        Ok(file)
    }

    /// Apply a `config set` key. Unknown keys are an error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" | "base_url" => self.base_url = value.trim().to_owned(),
            "default-session" | "default_session" => self.default_session = value.trim().to_owned(),
            "theme" => self.theme = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Backend URL by precedence: command line, then environment, then config file.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_owned)
            .or_else(|| std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.base_url.clone())
    }
}

fn config_dir_path() -> Result<PathBuf> {
    let home = home_dir().context("Cannot resolve home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir_path()?.join(CONFIG_FILE_NAME))
}

fn resolve_config_path(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit { return Ok(p.to_path_buf()); }
    if let Some(root) = project_root { return Ok(root.join(CONFIG_FILE_NAME)); }
    config_file_path()
}

fn resolve_config_dir_and_file(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    if let Some(p) = explicit {
        let dir = p.parent().unwrap_or_else(|| Path::new("."));
        return Ok((dir.to_path_buf(), p.to_path_buf()));
    }
    if let Some(root) = project_root {
        return Ok((root.to_path_buf(), root.join(CONFIG_FILE_NAME)));
    }
    let dir = config_dir_path()?;
    Ok((dir.clone(), dir.join(CONFIG_FILE_NAME)))
}
