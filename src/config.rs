use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_PER_PAGE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub pagination: PaginationConfig,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL every path is joined onto, e.g. `https://hr.example.com/api`
  pub base_url: String,
  /// Per-request timeout. A request never leaves a store loading forever.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  pub user_agent: Option<String>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8000/api".to_string(),
      timeout_secs: default_timeout_secs(),
      user_agent: None,
    }
  }
}

fn default_timeout_secs() -> u64 {
  30
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
  #[serde(default = "default_per_page")]
  pub per_page: u64,
}

impl Default for PaginationConfig {
  fn default() -> Self {
    Self {
      per_page: default_per_page(),
    }
  }
}

fn default_per_page() -> u64 {
  DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// Filter used when RUST_LOG is not set
  #[serde(default = "default_log_level")]
  pub level: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}

/// How the CLI authenticates against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
  Token(String),
  Login { email: String, password: String },
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./hrdesk.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/hrdesk/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/hrdesk/config.yaml\n\
                 with at least `api: {{ base_url: ... }}`."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("hrdesk.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("hrdesk").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  pub fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    if config.api.base_url.trim().is_empty() {
      return Err(eyre!("api.base_url must not be empty in {}", path.display()));
    }

    Ok(config)
  }

  /// Resolve credentials from environment variables.
  ///
  /// HRDESK_API_TOKEN wins; otherwise HRDESK_EMAIL and HRDESK_PASSWORD are
  /// used to log in.
  pub fn credentials() -> Result<Credentials> {
    Self::credentials_from(|key| std::env::var(key).ok())
  }

  fn credentials_from(get: impl Fn(&str) -> Option<String>) -> Result<Credentials> {
    if let Some(token) = get("HRDESK_API_TOKEN").filter(|t| !t.is_empty()) {
      return Ok(Credentials::Token(token));
    }

    match (get("HRDESK_EMAIL"), get("HRDESK_PASSWORD")) {
      (Some(email), Some(password)) => Ok(Credentials::Login { email, password }),
      _ => Err(eyre!(
        "No credentials found. Set HRDESK_API_TOKEN, or HRDESK_EMAIL and HRDESK_PASSWORD."
      )),
    }
  }
}
