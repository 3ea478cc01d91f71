use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

/// Settings for the Stack Exchange API fetch phase.
///
/// Defaults match the reference import: 100 pages of 100 questions tagged
/// `servicestack`, throttled to one page every 100ms.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default = "default_tagged")]
    pub tagged: String,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site: default_site(),
            tagged: default_tagged(),
            pages: default_pages(),
            page_size: default_page_size(),
            throttle_ms: default_throttle_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.stackexchange.com/2.2".to_string()
}
fn default_site() -> String {
    "stackoverflow".to_string()
}
fn default_tagged() -> String {
    "servicestack".to_string()
}
fn default_pages() -> u32 {
    100
}
fn default_page_size() -> u32 {
    100
}
fn default_throttle_ms() -> u64 {
    100
}
fn default_timeout_secs() -> u64 {
    30
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.api.pages == 0 {
        anyhow::bail!("api.pages must be > 0");
    }

    // The Stack Exchange API caps pagesize at 100
    if config.api.page_size == 0 || config.api.page_size > 100 {
        anyhow::bail!("api.page_size must be in [1, 100]");
    }

    if config.api.base_url.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }

    if config.api.site.is_empty() {
        anyhow::bail!("api.site must not be empty");
    }

    Ok(config)
}
