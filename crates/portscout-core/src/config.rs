use portscout_api::FeedUrls;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from a TOML file in the platform config directory; absent file
/// means defaults. Mostly exists so the feed URLs can point at a mirror.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub feeds: FeedsConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// no file exists yet.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// XDG config dir on Unix-like systems, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("Could not find config directory".into()))?
            .join("portscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_devices_url")]
    pub devices_url: String,

    #[serde(default = "default_ports_url")]
    pub ports_url: String,

    #[serde(default = "default_stats_url")]
    pub stats_url: String,
}

impl FeedsConfig {
    pub fn to_urls(&self) -> FeedUrls {
        FeedUrls {
            devices: self.devices_url.clone(),
            ports: self.ports_url.clone(),
            stats: self.stats_url.clone(),
        }
    }
}

fn default_devices_url() -> String {
    FeedUrls::default().devices
}

fn default_ports_url() -> String {
    FeedUrls::default().ports
}

fn default_stats_url() -> String {
    FeedUrls::default().stats
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            devices_url: default_devices_url(),
            ports_url: default_ports_url(),
            stats_url: default_stats_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable mouse support in TUI
    #[serde(default = "default_mouse")]
    pub mouse_enabled: bool,
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: default_mouse(),
        }
    }
}
