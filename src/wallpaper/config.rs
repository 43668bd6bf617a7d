use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use super::error::WallpaperError;
use crate::common::paths;
use crate::common::poll::RetryPolicy;

pub const DEFAULT_FALLBACK_MONITORS: [&str; 2] = ["DP-1", "HDMI-A-1"];

fn default_wallpaper_dir() -> String {
    "~/Pictures/wallpapers".to_string()
}

fn default_animated_dir_name() -> String {
    "animated".to_string()
}

fn default_animated_chance() -> u8 {
    10
}

fn default_fallback_monitors() -> Vec<String> {
    DEFAULT_FALLBACK_MONITORS.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WallpaperConfig {
    #[serde(default = "default_wallpaper_dir")]
    pub wallpaper_dir: String,
    /// Subdirectory of `wallpaper_dir` whose files are animated wallpapers
    #[serde(default = "default_animated_dir_name")]
    pub animated_dir_name: String,
    /// Percent chance that one monitor gets an animated wallpaper
    #[serde(default = "default_animated_chance")]
    pub animated_chance: u8,
    #[serde(default = "default_fallback_monitors")]
    pub fallback_monitors: Vec<String>,
    #[serde(default = "default_true")]
    pub notify: bool,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub toggle: ToggleConfig,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            wallpaper_dir: default_wallpaper_dir(),
            animated_dir_name: default_animated_dir_name(),
            animated_chance: default_animated_chance(),
            fallback_monitors: default_fallback_monitors(),
            notify: true,
            player: PlayerConfig::default(),
            daemon: DaemonConfig::default(),
            toggle: ToggleConfig::default(),
        }
    }
}

/// Looping video player used for animated wallpapers
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub command: String,
    /// Extra arguments, split like a shell would
    pub options: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpvpaper".to_string(),
            options: "-o \"no-audio --loop\"".to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn option_args(&self) -> Result<Vec<String>> {
        shell_words::split(&self.options)
            .with_context(|| format!("parsing player options '{}'", self.options))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DaemonConfig {
    /// Start hyprpaper when it does not answer
    pub start: bool,
    pub attempts: u32,
    pub interval_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            start: true,
            attempts: 10,
            interval_ms: 200,
        }
    }
}

impl DaemonConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            interval: std::time::Duration::from_millis(self.interval_ms),
        }
    }
}

/// The two fixed sets the toggle command alternates between
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ToggleConfig {
    #[serde(default)]
    pub first: Vec<String>,
    #[serde(default)]
    pub second: Vec<String>,
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

impl WallpaperConfig {
    pub fn config_file_path() -> Result<PathBuf> {
        paths::config_file()
    }

    pub fn load() -> Result<Self> {
        let cfg_path = Self::config_file_path()?;
        if !cfg_path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        Self::parse(&s).map_err(|e| {
            WallpaperError::Config {
                path: cfg_path,
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.animated_chance = self.animated_chance.min(100);
        if self.fallback_monitors.is_empty() {
            self.fallback_monitors = default_fallback_monitors();
        }
    }

    /// Write the default config unless one already exists
    pub fn init() -> Result<PathBuf> {
        let cfg_path = Self::config_file_path()?;
        if cfg_path.exists() {
            anyhow::bail!("Config already exists at {}", cfg_path.display());
        }
        Self::default().save_to(&cfg_path)?;
        Ok(cfg_path)
    }

    pub fn save_to(&self, cfg_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = cfg_path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        let toml = self.to_toml()?;
        fs::write(cfg_path, toml).context("writing config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing config to toml")
    }

    pub fn wallpaper_root(&self) -> PathBuf {
        expand_path(&self.wallpaper_dir)
    }

    pub fn set_paths(&self, second: bool) -> Vec<PathBuf> {
        let set = if second {
            &self.toggle.second
        } else {
            &self.toggle.first
        };
        set.iter().map(|p| expand_path(p)).collect()
    }
}
