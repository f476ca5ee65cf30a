use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::lang::Lang;

pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 20;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Language code, "ko-KR" or "en-US". Korean when unset.
    pub lang: Option<String>,

    /// Minutes between refresh cycles.
    pub update_interval_minutes: Option<u64>,

    /// Directory holding the downloaded payload files.
    pub payload_dir: Option<PathBuf>,

    /// Directory holding `<lang>.json` translation files.
    pub translations_dir: Option<PathBuf>,
}

impl Config {
    /// Configured language as a strongly-typed Lang.
    pub fn lang(&self) -> Result<Lang> {
        match &self.lang {
            Some(s) => Lang::try_from(s.as_str()),
            None => Ok(Lang::default()),
        }
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = Some(lang.as_str().to_string());
    }

    pub fn update_interval(&self) -> Duration {
        let minutes = self
            .update_interval_minutes
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_UPDATE_INTERVAL_MINUTES);
        Duration::from_secs(minutes * 60)
    }

    pub fn payload_dir(&self) -> Result<&Path> {
        self.payload_dir.as_deref().ok_or_else(|| {
            anyhow!(
                "No payload directory configured.\n\
                 Hint: pass `--dir <path>` or run `weathernews configure`."
            )
        })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.lang()
            .with_context(|| format!("Invalid language in config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathernews", "weathernews")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
