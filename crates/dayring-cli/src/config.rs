//! Configuration file management for dayring.
//!
//! Provides a TOML-based config file at `~/.config/dayring/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use dayring_core::assistant::{RemoteAssistant, RemoteConfig, TaskPlanner};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub assistant: AssistantSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Data directory override. Defaults to the XDG data dir when unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSection {
    /// Chat-completions endpoint for the remote assistant.
    pub endpoint: String,
    /// API key; also settable via `DAYRING_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    /// When false, every chat is answered by the scripted assistant.
    pub use_api: bool,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            endpoint: "https://api.example.com/v1/chat/completions".to_owned(),
            api_key: None,
            model: RemoteConfig::DEFAULT_MODEL.to_owned(),
            use_api: false,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the dayring config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/dayring` or `~/.config/dayring`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("dayring");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dayring")
}

/// Return the path to the dayring config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since the file may hold an API key.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct DayringConfig {
    pub data_dir: PathBuf,
    pub assistant: AssistantSection,
}

impl DayringConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Data dir: `cli_data_dir` > `DAYRING_DATA_DIR` env >
    ///   `config_file.storage.data_dir` > XDG data dir.
    /// - API key: `DAYRING_API_KEY` env > `config_file.assistant.api_key`.
    pub fn resolve(cli_data_dir: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let data_dir = if let Some(dir) = cli_data_dir {
            PathBuf::from(dir)
        } else if let Ok(dir) = std::env::var("DAYRING_DATA_DIR") {
            PathBuf::from(dir)
        } else if let Some(dir) = file_config
            .as_ref()
            .and_then(|cfg| cfg.storage.data_dir.clone())
        {
            dir
        } else {
            dayring_store::paths::data_dir()
        };

        let mut assistant = file_config
            .map(|cfg| cfg.assistant)
            .unwrap_or_default();
        if let Ok(key) = std::env::var("DAYRING_API_KEY") {
            assistant.api_key = Some(key);
        }

        Ok(Self {
            data_dir,
            assistant,
        })
    }

    pub fn plans_path(&self) -> PathBuf {
        dayring_store::paths::plans_path(&self.data_dir)
    }

    pub fn activity_path(&self) -> PathBuf {
        dayring_store::paths::activity_path(&self.data_dir)
    }

    pub fn sweep_marker_path(&self) -> PathBuf {
        dayring_store::paths::sweep_marker_path(&self.data_dir)
    }

    /// Build the assistant facade from the resolved settings.
    ///
    /// A remote backend is only attached when `use_api` is set and a key is
    /// present; a misconfigured remote degrades to the scripted planner with
    /// a warning rather than failing the chat command.
    pub fn planner(&self) -> TaskPlanner {
        if !self.assistant.use_api {
            return TaskPlanner::offline();
        }
        let Some(key) = self.assistant.api_key.as_deref() else {
            warn!("assistant.use_api is set but no API key is configured; staying offline");
            return TaskPlanner::offline();
        };

        let remote_config = RemoteConfig {
            endpoint: self.assistant.endpoint.clone(),
            api_key: key.to_owned(),
            model: self.assistant.model.clone(),
            timeout: Duration::from_secs(30),
            max_retries: RemoteConfig::DEFAULT_MAX_RETRIES,
        };
        match RemoteAssistant::new(remote_config) {
            Ok(remote) => TaskPlanner::with_remote(remote),
            Err(e) => {
                warn!(error = %e, "remote assistant unavailable; staying offline");
                TaskPlanner::offline()
            }
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
