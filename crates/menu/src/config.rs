//! Configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::menu::MenuMap;
use crate::store::{DEFAULT_CACHE_TTL_SECS, DEFAULT_LOCALE, StoreOptions};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shop base URL the sales-channel API lives under.
    pub api_base_url: String,

    /// Sales-channel access key (`sw-access-key` header).
    pub api_access_key: Option<String>,

    /// HTTP timeout for API calls (default: 30s).
    pub api_timeout: Duration,

    /// Locale stamped on committed menus (default: "de").
    pub api_locale: String,

    /// Global cache TTL in seconds (default: 300).
    pub cache_ttl_secs: u64,

    /// Menu-specific TTL override in seconds.
    pub menu_cache_ttl_secs: Option<u64>,

    /// Whether committed menus get cache stamps (default: true).
    pub menu_cacheable: bool,

    /// Optional YAML file with menu slot overrides.
    pub menu_config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            env::var("API_BASE_URL").context("API_BASE_URL environment variable is required")?;

        let api_access_key = env::var("API_SW_ACCESS_KEY").ok().filter(|k| !k.is_empty());

        let api_timeout = env::var("API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("API_TIMEOUT_SECS must be a valid u64")?;

        let api_locale = env::var("API_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());

        let cache_ttl_secs = env::var("CACHE_TTL")
            .unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string())
            .parse()
            .context("CACHE_TTL must be a valid u64")?;

        let menu_cache_ttl_secs = env::var("MENU_CACHE_TTL")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("MENU_CACHE_TTL must be a valid u64")?;

        let menu_cacheable = parse_bool(env::var("MENU_CACHEABLE").ok().as_deref(), true)
            .context("MENU_CACHEABLE must be true or false")?;

        let menu_config_path = env::var("MENU_CONFIG").ok().map(PathBuf::from);

        Ok(Self {
            api_base_url,
            api_access_key,
            api_timeout,
            api_locale,
            cache_ttl_secs,
            menu_cache_ttl_secs,
            menu_cacheable,
            menu_config_path,
        })
    }

    /// Build store options, loading the menu map if one is configured.
    pub fn store_options(&self) -> Result<StoreOptions> {
        let menu_map = self.menu_config_path.as_deref().map(load_menu_map).transpose()?;

        Ok(StoreOptions {
            cacheable: self.menu_cacheable,
            menu_ttl_secs: self.menu_cache_ttl_secs,
            cache_ttl_secs: self.cache_ttl_secs,
            api_locale: self.api_locale.clone(),
            menu_map,
        })
    }
}

/// Read a YAML menu map from disk.
pub fn load_menu_map(path: &Path) -> Result<MenuMap> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read menu config {}", path.display()))?;
    let map = MenuMap::from_yaml(&yaml)
        .with_context(|| format!("failed to parse menu config {}", path.display()))?;

    info!(path = %path.display(), slots = map.len(), "menu config loaded");
    Ok(map)
}

fn parse_bool(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => anyhow::bail!("unrecognized boolean '{other}'"),
    }
}
