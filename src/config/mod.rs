mod api;
mod store;
mod theme;
mod watcher;

pub use api::{ApiConfiguration, ConfigKey, Mode, ModeFieldKeys};
pub use store::{ChangeOrigin, ConfigChange, ConfigStore};
pub use theme::Theme;
pub use watcher::{ConfigEvent, ConfigWatcherMode};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PanelError, Result};

const CONFIG_DIR: &str = "provider-panel";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";
const PROVIDER_CONFIG_FILE: &str = "provider.toml";
const LOG_FILE: &str = "provider-panel.log";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub theme: String,
    pub watch_config: bool,
    pub config_watch_debounce_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            log_level: "info".to_string(),
            log_file: None,
            theme: "default".to_string(),
            watch_config: true,
            config_watch_debounce_ms: 200,
        }
    }
}

/// Resolved config directory plus the settings loaded from it
pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme: Theme,
    /// Problems found while loading, kept until logging is up
    load_warnings: Vec<String>,
}

impl ConfigManager {
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => Self::default_config_dir()?,
        };

        let mut load_warnings = Vec::new();
        let app_config: AppConfig = Self::load_toml_file(&config_dir.join(MAIN_CONFIG_FILE))
            .unwrap_or_else(|e| {
                load_warnings.push(e);
                None
            })
            .unwrap_or_default();
        let theme = Self::load_theme(&config_dir, &app_config.general.theme)
            .unwrap_or_else(|e| {
                load_warnings.push(e);
                Theme::by_name(&app_config.general.theme)
            });

        Ok(Self {
            config_dir,
            app_config,
            theme,
            load_warnings,
        })
    }

    /// Log the problems met by [`Self::new`]. Call once the subscriber is
    /// installed.
    pub fn report_load_warnings(&mut self) -> usize {
        let warnings = std::mem::take(&mut self.load_warnings);
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        warnings.len()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn provider_config_path(&self) -> PathBuf {
        self.config_dir.join(PROVIDER_CONFIG_FILE)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.app_config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| self.config_dir.join(LOG_FILE))
    }

    pub fn is_provider_config(&self, path: &Path) -> bool {
        path.file_name().and_then(|n| n.to_str()) == Some(PROVIDER_CONFIG_FILE)
    }

    /// Reload whichever settings file changed. The provider file is owned by
    /// the [`ConfigStore`] and ignored here.
    pub fn reload_file(&mut self, path: &Path) {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(MAIN_CONFIG_FILE) => {
                match Self::load_toml_file::<AppConfig>(path) {
                    Ok(config) => self.app_config = config.unwrap_or_default(),
                    Err(e) => tracing::warn!("{}", e),
                }
                self.reload_theme();
            }
            Some(THEME_FILE) => self.reload_theme(),
            _ => {}
        }
    }

    fn reload_theme(&mut self) {
        match Self::load_theme(&self.config_dir, &self.app_config.general.theme) {
            Ok(theme) => self.theme = theme,
            Err(e) => tracing::warn!("{}", e),
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| PanelError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| PanelError::Config("Could not determine config directory".to_string()))
    }

    /// `theme.toml` when present, otherwise the built-in theme named in
    /// `config.toml`
    fn load_theme(config_dir: &Path, fallback: &str) -> std::result::Result<Theme, String> {
        Ok(Self::load_toml_file(&config_dir.join(THEME_FILE))?
            .unwrap_or_else(|| Theme::by_name(fallback)))
    }

    /// `Ok(None)` for a missing file, `Err` with a loggable message when it
    /// cannot be read or parsed
    fn load_toml_file<T: for<'de> Deserialize<'de>>(
        path: &Path,
    ) -> std::result::Result<Option<T>, String> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }
}
