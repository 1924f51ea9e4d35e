// Event loop - main run() method and config polling

use std::time::{Duration, Instant};

use crossterm::event;

use super::App;
use crate::action::Action;
use crate::components::Component;
use crate::config::ConfigEvent;
use crate::error::{PanelError, Result};

impl App {
    /// Poll the config watcher. Returns true if anything changed.
    fn poll_config_events(&mut self) -> bool {
        let events = match self.config_watcher.as_mut() {
            Some(watcher) => watcher.poll_events(),
            None => Vec::new(),
        };

        let mut changed = false;
        for event in events {
            match event {
                ConfigEvent::Changed(path) => {
                    self.dispatch(Action::ConfigFileChanged(path));
                    changed = true;
                }
                ConfigEvent::Error(msg) => {
                    tracing::warn!("Config watcher error: {}", msg);
                }
            }
        }
        changed
    }

    pub fn run(&mut self) -> Result<()> {
        let tick_interval =
            Duration::from_millis(self.config_manager.app_config().general.tick_interval_ms);

        loop {
            // ---- 1. Poll non-input sources ----

            if self.poll_config_events() {
                self.mark_dirty();
            }

            if self.drain_store_changes() {
                self.mark_dirty();
            }

            if self.last_tick.elapsed() >= tick_interval {
                self.dispatch(Action::Tick);
                self.last_tick = Instant::now();
            }

            // ---- 2. Poll user input ----

            if event::poll(Duration::from_millis(16)).map_err(|e| PanelError::Terminal(e.to_string()))? {
                let event = event::read().map_err(|e| PanelError::Terminal(e.to_string()))?;

                // Any user input implies we want to give UI feedback
                self.mark_dirty();

                if let Some(action) = self.panel.handle_event(&event) {
                    self.dispatch(action);
                }

                // Writes made by the action are visible to the panel before the next draw
                self.drain_store_changes();
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        tracing::info!("provider panel exiting");
        Ok(())
    }
}
