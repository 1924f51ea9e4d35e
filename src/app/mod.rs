// App module
// - mod.rs: App struct, constructor, action dispatch
// - event_loop.rs: main run() loop and config polling
// - rendering.rs: draw method

mod event_loop;
mod rendering;

use std::io::{self, Stdout};
use std::sync::mpsc::Receiver;
use std::time::Instant;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::action::Action;
use crate::cli::Cli;
use crate::components::{Component, ProviderPanel};
use crate::config::{ConfigChange, ConfigManager, ConfigStore, ConfigWatcherMode};
use crate::error::{PanelError, Result};

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    last_tick: Instant,
    config_manager: ConfigManager,
    store: ConfigStore,
    store_rx: Receiver<ConfigChange>,
    config_watcher: Option<ConfigWatcherMode>,
    panel: ProviderPanel,
}

impl App {
    pub fn with_cli(cli: &Cli, config_manager: ConfigManager) -> Result<Self> {
        let mut store = ConfigStore::open(&config_manager.provider_config_path())?;
        let store_rx = store.subscribe();

        let general = &config_manager.app_config().general;
        let config_watcher = if !general.watch_config {
            None
        } else if cli.tick_watcher {
            Some(ConfigWatcherMode::tick(
                config_manager.config_dir().to_path_buf(),
                general.tick_interval_ms,
            ))
        } else {
            match ConfigWatcherMode::notify(config_manager.config_dir(), general.config_watch_debounce_ms) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::warn!("File watcher unavailable, falling back to polling: {}", e);
                    Some(ConfigWatcherMode::tick(
                        config_manager.config_dir().to_path_buf(),
                        general.tick_interval_ms,
                    ))
                }
            }
        };

        let mut panel = ProviderPanel::new(&store, cli.mode, !cli.hide_model_options);
        panel.set_theme(config_manager.theme().clone());

        tracing::info!(
            config = %config_manager.provider_config_path().display(),
            mode = cli.mode.as_str(),
            "provider panel starting"
        );

        let terminal = Self::init_terminal()?;

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            last_tick: Instant::now(),
            config_manager,
            store,
            store_rx,
            config_watcher,
            panel,
        })
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| PanelError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| PanelError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(|e| PanelError::Terminal(e.to_string()))
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub(super) fn dispatch(&mut self, action: Action) {
        match &action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {}
            Action::ConfigFileChanged(path) => {
                if self.config_manager.is_provider_config(path) {
                    if let Err(e) = self.store.reload() {
                        tracing::warn!("Failed to reload {}: {}", path.display(), e);
                    }
                } else {
                    self.config_manager.reload_file(path);
                    self.panel.set_theme(self.config_manager.theme().clone());
                }
            }
            _ => {
                self.panel.update(&action);
                self.panel.apply(&action, &mut self.store);
            }
        }
    }

    /// Feed pending store notifications to the panel
    fn drain_store_changes(&mut self) -> bool {
        let changes: Vec<ConfigChange> = self.store_rx.try_iter().collect();
        for change in &changes {
            self.panel.on_config_change(change, self.store.config());
        }
        !changes.is_empty()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    }
}
