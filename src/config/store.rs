//! Write-through configuration store
//!
//! Holds the canonical [`ApiConfiguration`]. Every write is applied and
//! persisted before returning, so a read that follows always observes it.
//! Interested views subscribe to [`ConfigChange`] notifications instead of
//! polling.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use super::api::{ApiConfiguration, ConfigKey, Mode, ModeFieldKeys};
use crate::error::{PanelError, Result};

/// Who produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Written through this store
    Local,
    /// Picked up from the backing file
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    pub key: ConfigKey,
    pub value: String,
    pub origin: ChangeOrigin,
}

pub struct ConfigStore {
    config: ApiConfiguration,
    path: Option<PathBuf>,
    subscribers: Vec<Sender<ConfigChange>>,
    /// The file on disk failed to parse; move it aside before overwriting
    backup_pending: bool,
}

impl ConfigStore {
    /// Store without a backing file
    pub fn in_memory(config: ApiConfiguration) -> Self {
        Self {
            config,
            path: None,
            subscribers: Vec::new(),
            backup_pending: false,
        }
    }

    /// Open a file-backed store. A missing file starts from defaults, and so
    /// does one that fails to parse; the latter is renamed to
    /// [`Self::backup_path`] before the first write replaces it.
    pub fn open(path: &Path) -> Result<Self> {
        let (config, backup_pending) = match Self::load(path) {
            Ok(config) => (config.unwrap_or_default(), false),
            Err(PanelError::Config(msg)) => {
                tracing::warn!("{}; starting from defaults", msg);
                (ApiConfiguration::default(), true)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
            subscribers: Vec::new(),
            backup_pending,
        })
    }

    /// Where an unparseable provider file is kept, e.g. `provider.toml.bak`
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &ApiConfiguration {
        &self.config
    }

    pub fn read(&self, key: ConfigKey) -> Option<&str> {
        self.config.get(key)
    }

    /// Apply a value and persist it. Never fails from the caller's view;
    /// persistence problems are logged.
    pub fn write(&mut self, key: ConfigKey, value: &str) {
        if self.config.get(key) == Some(value) {
            return;
        }

        self.config.set(key, value);
        if key.is_secret() {
            tracing::debug!(%key, "config write (redacted)");
        } else {
            tracing::debug!(%key, value, "config write");
        }

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }

        self.notify(ConfigChange {
            key,
            value: value.to_string(),
            origin: ChangeOrigin::Local,
        });
    }

    pub fn handle_field_change(&mut self, key: ConfigKey, value: &str) {
        self.write(key, value);
    }

    /// Write a mode-scoped field. With shared plan/act models both keys are
    /// written.
    pub fn handle_mode_field_change(&mut self, keys: ModeFieldKeys, value: &str, mode: Mode) {
        if self.config.plan_act_separate_models {
            self.write(keys.for_mode(mode), value);
        } else {
            self.write(keys.plan, value);
            self.write(keys.act, value);
        }
    }

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<ConfigChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Re-read the backing file and report every key whose value moved.
    /// Returns the number of changed keys.
    pub fn reload(&mut self) -> Result<usize> {
        let Some(path) = self.path.clone() else {
            return Ok(0);
        };

        let fresh = Self::load(&path)?.ok_or(PanelError::ConfigNotFound { path })?;
        Ok(self.replace(fresh))
    }

    /// Swap in a whole configuration from outside, notifying per changed key
    pub fn replace(&mut self, fresh: ApiConfiguration) -> usize {
        let changed: Vec<ConfigKey> = ConfigKey::ALL
            .iter()
            .copied()
            .filter(|key| self.config.get(*key) != fresh.get(*key))
            .collect();

        self.config = fresh;

        for key in &changed {
            let value = self.config.get(*key).unwrap_or_default().to_string();
            self.notify(ConfigChange {
                key: *key,
                value,
                origin: ChangeOrigin::External,
            });
        }

        if !changed.is_empty() {
            tracing::info!("Reloaded provider config: {} key(s) changed", changed.len());
        }
        changed.len()
    }

    fn notify(&mut self, change: ConfigChange) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    fn persist(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if self.backup_pending && path.exists() {
            let backup = Self::backup_path(path);
            std::fs::rename(path, &backup)?;
            tracing::warn!("Moved unreadable {} to {}", path.display(), backup.display());
        }
        self.backup_pending = false;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PanelError::Config(format!("Failed to create config dir: {}", e)))?;
            }
        }

        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| PanelError::Config(format!("Failed to serialize provider config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Option<ApiConfiguration>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| PanelError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}
