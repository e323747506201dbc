use crate::models::SubOrDub;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://aniwatchtv.to";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Which AJAX route the site serves episode links from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceEndpoint {
    /// `/ajax/server/{serverId}`
    #[default]
    Server,
    /// `/ajax/v2/episode/sources?id={serverId}`
    EpisodeSources,
}

impl SourceEndpoint {
    pub fn path(&self, server_id: &str) -> String {
        match self {
            SourceEndpoint::Server => format!("/ajax/server/{}", urlencoding::encode(server_id)),
            SourceEndpoint::EpisodeSources => format!(
                "/ajax/v2/episode/sources?id={}",
                urlencoding::encode(server_id)
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub source_endpoint: SourceEndpoint,
    pub default_sub_or_dub: SubOrDub,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            user_agent: USER_AGENT.to_string(),
            source_endpoint: SourceEndpoint::default(),
            default_sub_or_dub: SubOrDub::Sub,
        }
    }
}

impl ProviderConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
}

pub struct ConfigManager {
    pub config_path: PathBuf,
    pub config: Config,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "sleepy-foundry", "aniwatch")
            .context("Could not determine config directory")?;

        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Self::load(config_dir.join("config.toml"))
    }

    /// Reads `config_path`, writing the defaults there first if it does not exist.
    /// A file that fails to parse falls back to the defaults.
    pub fn load(config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            toml::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid config {:?}: {}", config_path, e);
                Config::default()
            })
        } else {
            let default_config = Config::default();
            let toml_str = toml::to_string_pretty(&default_config)?;
            fs::write(&config_path, toml_str)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }
}
