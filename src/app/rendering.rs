// Rendering - draw() method and layout

use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::App;
use crate::components::Component;
use crate::error::{PanelError, Result};

impl App {
    pub(super) fn draw(&mut self) -> Result<()> {
        let panel = &self.panel;
        let theme = self.config_manager.theme();
        let status = format!(
            " {} ",
            self.store
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(in memory)".to_string())
        );

        self.terminal
            .draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(frame.area());

                panel.render(frame, chunks[0], true);

                let status_line = Line::from(vec![Span::styled(status, theme.muted_style())]);
                frame.render_widget(Paragraph::new(status_line), chunks[1]);
            })
            .map_err(|e| PanelError::Terminal(e.to_string()))?;

        Ok(())
    }
}
