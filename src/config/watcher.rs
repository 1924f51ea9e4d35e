//! Detects edits to the TOML files in the config directory, either through
//! filesystem events or by polling modification times.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer};

use crate::error::{PanelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Changed(PathBuf),
    Error(String),
}

fn is_config_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("toml"))
}

/// Translate one debounced batch, keeping only TOML files
fn config_events(result: DebounceEventResult) -> Vec<ConfigEvent> {
    match result {
        Ok(events) => events
            .into_iter()
            .map(|DebouncedEvent { path, .. }| path)
            .filter(|path| is_config_file(path))
            .map(ConfigEvent::Changed)
            .collect(),
        Err(e) => vec![ConfigEvent::Error(e.to_string())],
    }
}

/// Filesystem-event watcher; bursts of writes to a file arrive as one event
/// once the debounce interval has passed.
pub struct ConfigWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebounceEventResult>,
}

impl ConfigWatcher {
    pub fn new(config_dir: &Path, debounce_ms: u64) -> Result<Self> {
        let (tx, rx) = channel::<DebounceEventResult>();
        let mut debouncer = new_debouncer(Duration::from_millis(debounce_ms), tx)
            .map_err(|e| PanelError::Config(format!("Failed to create watcher: {}", e)))?;

        if config_dir.exists() {
            debouncer
                .watcher()
                .watch(config_dir, RecursiveMode::NonRecursive)
                .map_err(|e| PanelError::Config(format!("Failed to watch config dir: {}", e)))?;
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        self.rx.try_iter().flat_map(config_events).collect()
    }
}

pub struct TickBasedWatcher {
    config_dir: PathBuf,
    last_check: Instant,
    check_interval: Duration,
    file_mtimes: HashMap<PathBuf, SystemTime>,
}

impl TickBasedWatcher {
    pub fn new(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        let mut watcher = Self {
            config_dir,
            last_check: Instant::now(),
            check_interval: Duration::from_millis(check_interval_ms),
            file_mtimes: HashMap::new(),
        };
        for (path, mtime) in watcher.scan_files() {
            watcher.file_mtimes.insert(path, mtime);
        }
        watcher
    }

    fn scan_files(&self) -> Vec<(PathBuf, SystemTime)> {
        let Ok(entries) = std::fs::read_dir(&self.config_dir) else {
            return Vec::new();
        };

        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_config_file(path))
            .filter_map(|path| {
                let mtime = std::fs::metadata(&path).ok()?.modified().ok()?;
                Some((path, mtime))
            })
            .collect()
    }

    pub fn check(&mut self) -> Vec<ConfigEvent> {
        if self.last_check.elapsed() < self.check_interval {
            return Vec::new();
        }
        self.last_check = Instant::now();

        let mut events = Vec::new();
        for (path, mtime) in self.scan_files() {
            let changed = self
                .file_mtimes
                .get(&path)
                .map(|&old| old != mtime)
                .unwrap_or(true);

            if changed {
                self.file_mtimes.insert(path.clone(), mtime);
                events.push(ConfigEvent::Changed(path));
            }
        }
        events
    }
}

pub enum ConfigWatcherMode {
    Notify(ConfigWatcher),
    Tick(TickBasedWatcher),
}

impl ConfigWatcherMode {
    pub fn notify(config_dir: &Path, debounce_ms: u64) -> Result<Self> {
        Ok(Self::Notify(ConfigWatcher::new(config_dir, debounce_ms)?))
    }

    pub fn tick(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        Self::Tick(TickBasedWatcher::new(config_dir, check_interval_ms))
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        match self {
            Self::Notify(watcher) => watcher.poll_events(),
            Self::Tick(watcher) => watcher.check(),
        }
    }
}
