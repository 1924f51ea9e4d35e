//! Provider settings panel
//!
//! Provides UI for editing:
//! - Entrypoint (region preset or custom URL)
//! - API key (masked input)
//! - Model (catalog preset or custom id) for the current plan/act mode
//!
//! Every edit is written through to the [`ConfigStore`] immediately.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::api_key_field::ApiKeyField;
use super::model_info_view::model_info_lines;
use crate::action::Action;
use crate::components::Component;
use crate::config::{
    ApiConfiguration, ChangeOrigin, ConfigChange, ConfigKey, ConfigStore, Mode, ModeFieldKeys,
    Theme,
};
use crate::provider::{minimax, normalize_api_configuration, ModelCatalog};
use crate::reconciler::{ModeReconciler, CUSTOM_SENTINEL};

const HINT_INDENT: &str = "      ";

/// Focusable row within the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Entrypoint,
    EntrypointCustom,
    ApiKey,
    Model,
    ModelCustom,
}

impl PanelRow {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            PanelRow::EntrypointCustom | PanelRow::ApiKey | PanelRow::ModelCustom
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelRow::Entrypoint => "Entrypoint",
            PanelRow::EntrypointCustom => "Custom URL",
            PanelRow::ApiKey => "API Key",
            PanelRow::Model => "Model",
            PanelRow::ModelCustom => "Custom ID",
        }
    }
}

/// Host part of a custom endpoint, when it parses as a URL
fn endpoint_host(endpoint: &str) -> Option<String> {
    url::Url::parse(endpoint)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

pub struct ProviderPanel {
    mode: Mode,
    show_model_options: bool,
    catalog: ModelCatalog,
    entrypoint: ModeReconciler,
    model: ModeReconciler,
    api_key: ApiKeyField,
    /// Store contents as of the last write or notification
    snapshot: ApiConfiguration,
    focused_row: PanelRow,
    theme: Theme,
}

impl ProviderPanel {
    pub fn new(store: &ConfigStore, mode: Mode, show_model_options: bool) -> Self {
        let catalog = minimax::model_catalog();
        let config = store.config();

        let entrypoint = ModeReconciler::new(
            minimax::entrypoint_reconciler_config(),
            config.get(ConfigKey::MinimaxApiLine).unwrap_or_default(),
        );
        let model = ModeReconciler::new(
            minimax::model_reconciler_config(&catalog),
            config.model_id_for(mode),
        );
        let api_key = ApiKeyField::new(config.get(ConfigKey::MinimaxApiKey).unwrap_or_default());

        Self {
            mode,
            show_model_options,
            catalog,
            entrypoint,
            model,
            api_key,
            snapshot: config.clone(),
            focused_row: PanelRow::Entrypoint,
            theme: Theme::default(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focused_row(&self) -> PanelRow {
        self.focused_row
    }

    pub fn entrypoint(&self) -> &ModeReconciler {
        &self.entrypoint
    }

    pub fn model(&self) -> &ModeReconciler {
        &self.model
    }

    pub fn api_key(&self) -> &ApiKeyField {
        &self.api_key
    }

    /// Rows currently shown, in navigation order
    pub fn visible_rows(&self) -> Vec<PanelRow> {
        let mut rows = vec![PanelRow::Entrypoint];
        if self.entrypoint.is_custom() {
            rows.push(PanelRow::EntrypointCustom);
        }
        rows.push(PanelRow::ApiKey);
        if self.show_model_options {
            rows.push(PanelRow::Model);
            if self.model.is_custom() {
                rows.push(PanelRow::ModelCustom);
            }
        }
        rows
    }

    pub fn focus_next(&mut self) {
        let rows = self.visible_rows();
        let idx = rows.iter().position(|r| *r == self.focused_row).unwrap_or(0);
        self.focused_row = rows[(idx + 1) % rows.len()];
    }

    pub fn focus_prev(&mut self) {
        let rows = self.visible_rows();
        let idx = rows.iter().position(|r| *r == self.focused_row).unwrap_or(0);
        self.focused_row = if idx == 0 {
            rows[rows.len() - 1]
        } else {
            rows[idx - 1]
        };
    }

    /// Move focus off a row that has just been hidden
    fn normalize_focus(&mut self) {
        let rows = self.visible_rows();
        if rows.contains(&self.focused_row) {
            return;
        }
        let parent = match self.focused_row {
            PanelRow::EntrypointCustom => PanelRow::Entrypoint,
            PanelRow::ModelCustom => PanelRow::Model,
            other => other,
        };
        self.focused_row = if rows.contains(&parent) { parent } else { rows[0] };
    }

    /// Apply a field action, writing through to the store
    pub fn apply(&mut self, action: &Action, store: &mut ConfigStore) {
        let mode = self.mode;
        match action {
            Action::EntrypointSelected(selection) => {
                self.entrypoint.on_preset_selector_change(selection, &mut |v: &str| {
                    store.handle_field_change(ConfigKey::MinimaxApiLine, v)
                });
            }
            Action::EntrypointInput(text) => {
                self.entrypoint.on_draft_text_input(text, &mut |v: &str| {
                    store.handle_field_change(ConfigKey::MinimaxApiLine, v)
                });
            }
            Action::ApiKeyInput(text) => {
                self.api_key.set(text);
                store.handle_field_change(ConfigKey::MinimaxApiKey, text);
            }
            Action::ModelSelected(selection) => {
                self.model.on_preset_selector_change(selection, &mut |v: &str| {
                    store.handle_mode_field_change(ModeFieldKeys::API_MODEL_ID, v, mode)
                });
            }
            Action::ModelInput(text) => {
                self.model.on_draft_text_input(text, &mut |v: &str| {
                    store.handle_mode_field_change(ModeFieldKeys::API_MODEL_ID, v, mode)
                });
            }
            Action::TogglePlanActMode => self.set_mode(mode.toggled(), store.config()),
            _ => return,
        }

        self.snapshot = store.config().clone();
        self.normalize_focus();
    }

    /// Switch plan/act; the model field follows that mode's stored id
    pub fn set_mode(&mut self, mode: Mode, config: &ApiConfiguration) {
        self.mode = mode;
        self.model.on_external_change(config.model_id_for(mode));
        tracing::info!(mode = mode.as_str(), "switched plan/act mode");
    }

    /// Resynchronize with a store notification. Only external changes
    /// re-derive field modes; local ones were produced by this panel.
    pub fn on_config_change(&mut self, change: &ConfigChange, config: &ApiConfiguration) {
        self.snapshot = config.clone();
        if change.origin == ChangeOrigin::Local {
            return;
        }

        match change.key {
            ConfigKey::MinimaxApiLine => self.entrypoint.on_external_change(&change.value),
            ConfigKey::MinimaxApiKey => self.api_key.set(&change.value),
            key if key == ModeFieldKeys::API_MODEL_ID.for_mode(self.mode) => {
                self.model.on_external_change(&change.value)
            }
            _ => {}
        }
        self.normalize_focus();
    }

    fn text_value(&self, row: PanelRow) -> &str {
        match row {
            PanelRow::EntrypointCustom => self.entrypoint.draft(),
            PanelRow::ApiKey => self.api_key.value(),
            PanelRow::ModelCustom => self.model.draft(),
            PanelRow::Entrypoint | PanelRow::Model => "",
        }
    }

    fn input_action(&self, text: String) -> Option<Action> {
        match self.focused_row {
            PanelRow::EntrypointCustom => Some(Action::EntrypointInput(text)),
            PanelRow::ApiKey => Some(Action::ApiKeyInput(text)),
            PanelRow::ModelCustom => Some(Action::ModelInput(text)),
            PanelRow::Entrypoint | PanelRow::Model => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab | KeyCode::Down => return Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up => return Some(Action::FocusPrev),
            KeyCode::Char('p') if ctrl => return Some(Action::TogglePlanActMode),
            KeyCode::Char('u') if ctrl => return Some(Action::ToggleApiKeyVisibility),
            _ => {}
        }

        if self.focused_row.is_text() {
            self.handle_text_key(key)
        } else {
            self.handle_selector_key(key)
        }
    }

    fn handle_selector_key(&self, key: KeyEvent) -> Option<Action> {
        let reconciler = match self.focused_row {
            PanelRow::Entrypoint => &self.entrypoint,
            PanelRow::Model => &self.model,
            _ => return None,
        };

        let selection = match key.code {
            KeyCode::Left | KeyCode::Char('h') => reconciler.cycle_option(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => {
                reconciler.cycle_option(true)
            }
            KeyCode::Char('q') => return Some(Action::Quit),
            _ => return None,
        };

        match self.focused_row {
            PanelRow::Entrypoint => Some(Action::EntrypointSelected(selection)),
            _ => Some(Action::ModelSelected(selection)),
        }
    }

    fn handle_text_key(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut text = self.text_value(self.focused_row).to_string();

        match key.code {
            KeyCode::Enter => return Some(Action::FocusNext),
            KeyCode::Backspace => {
                text.pop()?;
            }
            KeyCode::Char('k') if ctrl => text.clear(),
            KeyCode::Char(c) if !ctrl => text.push(c),
            _ => return None,
        }

        self.input_action(text)
    }

    /// Text rows are single-line, so pasted line breaks and other control
    /// characters are left out.
    fn handle_paste(&self, pasted: &str) -> Option<Action> {
        if !self.focused_row.is_text() {
            return None;
        }
        let mut text = self.text_value(self.focused_row).to_string();
        text.extend(pasted.chars().filter(|c| !c.is_control()));
        self.input_action(text)
    }

    fn option_label(&self, row: PanelRow, value: &str) -> String {
        if value == CUSTOM_SENTINEL {
            return "Custom...".to_string();
        }
        match row {
            PanelRow::Entrypoint => minimax::entrypoint(value)
                .map(|e| e.host.to_string())
                .unwrap_or_else(|| value.to_string()),
            PanelRow::Model if value.is_empty() => "Select a model...".to_string(),
            _ => value.to_string(),
        }
    }

    fn row_line(&self, row: PanelRow) -> Line<'static> {
        let theme = &self.theme;
        let selected = row == self.focused_row;
        let marker = if selected {
            theme.panel.selector_marker.clone()
        } else {
            " ".to_string()
        };
        let accent = Style::default().fg(theme.colors.accent.to_color());
        let value_style = Style::default().fg(theme.colors.value.to_color());

        let mut spans = vec![
            Span::styled(format!(" {} ", marker), accent),
            Span::styled(
                format!("{:width$} ", row.label(), width = theme.panel.label_width),
                theme.label_style(selected),
            ),
        ];

        match row {
            PanelRow::Entrypoint | PanelRow::Model => {
                let reconciler = if row == PanelRow::Entrypoint {
                    &self.entrypoint
                } else {
                    &self.model
                };
                let label = self.option_label(row, reconciler.selector_value());
                spans.push(Span::styled("◂ ", theme.muted_style()));
                spans.push(Span::styled(label, value_style.add_modifier(Modifier::BOLD)));
                spans.push(Span::styled(" ▸", theme.muted_style()));
                if selected {
                    spans.push(Span::styled("  ←/→ change", theme.muted_style()));
                }
            }
            PanelRow::ApiKey => {
                spans.push(Span::styled("[", theme.muted_style()));
                spans.push(Span::styled(self.api_key.display(theme.panel.mask_char), value_style));
                if selected {
                    spans.push(Span::styled("█", accent));
                }
                spans.push(Span::styled("]", theme.muted_style()));
                let vis_icon = if self.api_key.is_visible() { "👁" } else { "🔒" };
                spans.push(Span::styled(
                    format!(" {} ({} chars)", vis_icon, self.api_key.char_count()),
                    theme.muted_style(),
                ));
            }
            PanelRow::EntrypointCustom | PanelRow::ModelCustom => {
                let text = self.text_value(row).to_string();
                let host = if row == PanelRow::EntrypointCustom {
                    endpoint_host(&text)
                } else {
                    None
                };
                spans.push(Span::styled("[", theme.muted_style()));
                spans.push(Span::styled(text, value_style));
                if selected {
                    spans.push(Span::styled("█", accent));
                }
                spans.push(Span::styled("]", theme.muted_style()));
                if let Some(host) = host {
                    spans.push(Span::styled(format!(" → {}", host), theme.muted_style()));
                }
            }
        }

        Line::from(spans)
    }

    fn hint_line(&self, text: String) -> Line<'static> {
        Line::from(vec![
            Span::raw(HINT_INDENT),
            Span::styled(text, self.theme.muted_style()),
        ])
    }

    fn entrypoint_hints(&self) -> Vec<Line<'static>> {
        let hosts: Vec<&str> = minimax::ENTRYPOINTS.iter().map(|e| e.host).collect();
        vec![
            self.hint_line(format!(
                "Select the API endpoint for your region ({}), or enter a custom endpoint.",
                hosts.join(" / ")
            )),
            self.hint_line(format!(
                "Requests go to {}",
                minimax::resolve_base_url(self.snapshot.get(ConfigKey::MinimaxApiLine))
            )),
        ]
    }

    fn model_hints(&self) -> Vec<Line<'static>> {
        let selection = normalize_api_configuration(&self.snapshot, self.mode, &self.catalog);
        let Some(info) = selection.model_info else {
            return vec![self.hint_line("No model information available".to_string())];
        };

        let mut lines = Vec::new();
        if selection.model_id.is_empty() {
            lines.push(self.hint_line(format!("No model selected, showing {}", info.name)));
        } else if selection.model_id != info.name {
            lines.push(self.hint_line(format!(
                "{} is not in the catalog, showing {}",
                selection.model_id, info.name
            )));
        }
        lines.extend(model_info_lines(info, &self.theme));
        lines
    }

    /// All content lines, top to bottom
    pub fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for row in self.visible_rows() {
            lines.push(self.row_line(row));

            match row {
                PanelRow::Entrypoint if !self.entrypoint.is_custom() => {
                    lines.extend(self.entrypoint_hints())
                }
                PanelRow::EntrypointCustom => lines.extend(self.entrypoint_hints()),
                PanelRow::ApiKey => lines.push(self.hint_line(format!(
                    "Get a {} API key: {}",
                    minimax::PROVIDER_NAME,
                    minimax::signup_url(self.snapshot.get(ConfigKey::MinimaxApiLine))
                ))),
                PanelRow::Model if !self.model.is_custom() => lines.extend(self.model_hints()),
                PanelRow::ModelCustom => lines.extend(self.model_hints()),
                _ => continue,
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(vec![Span::styled(
            " Tab/↑↓ move  ←/→ select  ^U show key  ^P plan/act  Esc quit",
            self.theme.muted_style(),
        )]));
        lines
    }
}

impl Component for ProviderPanel {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Paste(text) => self.handle_paste(text),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::ToggleApiKeyVisibility => self.api_key.toggle_visibility(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = format!(
            " {} Provider [{}] ",
            minimax::PROVIDER_NAME,
            self.mode.as_str()
        );

        let block = Block::default()
            .title(title)
            .title_style(self.theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(focused));

        let paragraph = Paragraph::new(self.build_lines())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::InputMode;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Route an event through the panel the way the app does
    fn send(panel: &mut ProviderPanel, store: &mut ConfigStore, event: Event) -> Option<Action> {
        let action = panel.handle_event(&event)?;
        panel.update(&action);
        panel.apply(&action, store);
        Some(action)
    }

    fn store_with(line: Option<&str>, act_model: Option<&str>) -> ConfigStore {
        let mut config = ApiConfiguration::default();
        if let Some(line) = line {
            config.set(ConfigKey::MinimaxApiLine, line);
        }
        if let Some(model) = act_model {
            config.set(ConfigKey::ActModeApiModelId, model);
        }
        ConfigStore::in_memory(config)
    }

    #[test]
    fn test_new_with_empty_store() {
        let store = store_with(None, None);
        let panel = ProviderPanel::new(&store, Mode::Act, true);

        assert_eq!(panel.entrypoint().mode(), InputMode::Preset);
        assert_eq!(panel.entrypoint().selector_value(), "international");
        assert_eq!(panel.model().selector_value(), "");
        assert_eq!(
            panel.visible_rows(),
            vec![PanelRow::Entrypoint, PanelRow::ApiKey, PanelRow::Model]
        );
    }

    #[test]
    fn test_new_with_custom_values() {
        let store = store_with(Some("https://my.proxy.example"), Some("my-model"));
        let panel = ProviderPanel::new(&store, Mode::Act, true);

        assert_eq!(panel.entrypoint().draft(), "https://my.proxy.example");
        assert_eq!(panel.model().draft(), "my-model");
        assert_eq!(
            panel.visible_rows(),
            vec![
                PanelRow::Entrypoint,
                PanelRow::EntrypointCustom,
                PanelRow::ApiKey,
                PanelRow::Model,
                PanelRow::ModelCustom,
            ]
        );
    }

    #[test]
    fn test_hide_model_options() {
        let store = store_with(None, None);
        let panel = ProviderPanel::new(&store, Mode::Act, false);
        assert_eq!(panel.visible_rows(), vec![PanelRow::Entrypoint, PanelRow::ApiKey]);
    }

    #[test]
    fn test_select_preset_writes_through() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        let action = send(&mut panel, &mut store, key(KeyCode::Right));
        assert_eq!(action, Some(Action::EntrypointSelected("china".to_string())));
        assert_eq!(store.read(ConfigKey::MinimaxApiLine), Some("china"));
        assert_eq!(panel.entrypoint().selector_value(), "china");
    }

    #[test]
    fn test_custom_endpoint_with_empty_draft_leaves_store() {
        let mut store = store_with(Some("international"), None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        send(&mut panel, &mut store, key(KeyCode::Left));

        assert_eq!(panel.entrypoint().mode(), InputMode::Custom);
        assert_eq!(store.read(ConfigKey::MinimaxApiLine), Some("international"));
        assert!(panel.visible_rows().contains(&PanelRow::EntrypointCustom));
    }

    #[test]
    fn test_typing_custom_endpoint() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        send(&mut panel, &mut store, key(KeyCode::Left));
        send(&mut panel, &mut store, key(KeyCode::Tab));
        assert_eq!(panel.focused_row(), PanelRow::EntrypointCustom);

        for c in "https://x.io".chars() {
            send(&mut panel, &mut store, key(KeyCode::Char(c)));
        }
        assert_eq!(store.read(ConfigKey::MinimaxApiLine), Some("https://x.io"));

        send(&mut panel, &mut store, key(KeyCode::Backspace));
        assert_eq!(store.read(ConfigKey::MinimaxApiLine), Some("https://x.i"));
        assert_eq!(panel.entrypoint().draft(), "https://x.i");
    }

    #[test]
    fn test_backspace_on_empty_text_is_ignored() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        send(&mut panel, &mut store, key(KeyCode::Tab));
        assert_eq!(panel.focused_row(), PanelRow::ApiKey);

        assert_eq!(send(&mut panel, &mut store, key(KeyCode::Backspace)), None);
        assert_eq!(store.read(ConfigKey::MinimaxApiKey), None);
    }

    #[test]
    fn test_custom_model_keystrokes_each_write() {
        let mut store = store_with(None, Some("MiniMax-M2"));
        let rx = store.subscribe();
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        // Focus the model selector and step past the last preset to custom
        send(&mut panel, &mut store, key(KeyCode::BackTab));
        assert_eq!(panel.focused_row(), PanelRow::Model);
        send(&mut panel, &mut store, key(KeyCode::Right));
        send(&mut panel, &mut store, key(KeyCode::Right));
        assert_eq!(panel.model().mode(), InputMode::Custom);
        assert_eq!(store.read(ConfigKey::ActModeApiModelId), Some(""));

        send(&mut panel, &mut store, key(KeyCode::Tab));
        assert_eq!(panel.focused_row(), PanelRow::ModelCustom);
        send(&mut panel, &mut store, key(KeyCode::Char('m')));
        assert_eq!(store.read(ConfigKey::ActModeApiModelId), Some("m"));
        send(&mut panel, &mut store, Event::Paste("y-model".to_string()));
        assert_eq!(store.read(ConfigKey::ActModeApiModelId), Some("my-model"));

        let values: Vec<String> = rx.try_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["MiniMax-M2-Stable", "", "m", "my-model"]);
    }

    #[test]
    fn test_local_echo_keeps_custom_mode() {
        let mut store = store_with(None, Some("MiniMax-M2"));
        let rx = store.subscribe();
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        panel.apply(&Action::ModelSelected(CUSTOM_SENTINEL.to_string()), &mut store);
        for change in rx.try_iter() {
            panel.on_config_change(&change, store.config());
        }

        assert_eq!(panel.model().mode(), InputMode::Custom);
    }

    #[test]
    fn test_external_change_resyncs() {
        let mut store = store_with(Some("china"), None);
        let rx = store.subscribe();
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        let mut fresh = store.config().clone();
        fresh.set(ConfigKey::MinimaxApiLine, "https://my.proxy.example");
        fresh.set(ConfigKey::MinimaxApiKey, "sk-new");
        store.replace(fresh);

        for change in rx.try_iter() {
            panel.on_config_change(&change, store.config());
        }

        assert_eq!(panel.entrypoint().mode(), InputMode::Custom);
        assert_eq!(panel.entrypoint().draft(), "https://my.proxy.example");
        assert_eq!(panel.api_key().value(), "sk-new");
    }

    #[test]
    fn test_external_change_for_other_mode_is_ignored() {
        let mut store = store_with(None, Some("MiniMax-M2"));
        let rx = store.subscribe();
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);

        let mut fresh = store.config().clone();
        fresh.set(ConfigKey::PlanModeApiModelId, "plan-only-model");
        store.replace(fresh);
        for change in rx.try_iter() {
            panel.on_config_change(&change, store.config());
        }

        assert_eq!(panel.model().mode(), InputMode::Preset);
        assert_eq!(panel.model().selector_value(), "MiniMax-M2");
    }

    #[test]
    fn test_toggle_plan_act_rederives_model() {
        let mut config = ApiConfiguration::default();
        config.set(ConfigKey::PlanModeApiModelId, "plan-custom");
        config.set(ConfigKey::ActModeApiModelId, "MiniMax-M2");
        let mut store = ConfigStore::in_memory(config);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        assert_eq!(panel.model().mode(), InputMode::Preset);

        let action = send(&mut panel, &mut store, ctrl('p'));
        assert_eq!(action, Some(Action::TogglePlanActMode));
        assert_eq!(panel.mode(), Mode::Plan);
        assert_eq!(panel.model().mode(), InputMode::Custom);
        assert_eq!(panel.model().draft(), "plan-custom");
    }

    #[test]
    fn test_focus_returns_to_selector_when_custom_row_hides() {
        let mut store = store_with(Some("https://my.proxy.example"), None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        send(&mut panel, &mut store, key(KeyCode::Tab));
        assert_eq!(panel.focused_row(), PanelRow::EntrypointCustom);

        panel.apply(&Action::EntrypointSelected("china".to_string()), &mut store);

        assert_eq!(panel.focused_row(), PanelRow::Entrypoint);
        // Draft survives the switch back to a preset
        assert_eq!(panel.entrypoint().draft(), "https://my.proxy.example");
    }

    #[test]
    fn test_focus_wraps() {
        let store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        panel.focus_prev();
        assert_eq!(panel.focused_row(), PanelRow::Model);
        panel.focus_next();
        assert_eq!(panel.focused_row(), PanelRow::Entrypoint);
    }

    #[test]
    fn test_api_key_entry_and_visibility() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        send(&mut panel, &mut store, key(KeyCode::Tab));
        send(&mut panel, &mut store, key(KeyCode::Char('s')));
        send(&mut panel, &mut store, key(KeyCode::Char('k')));
        assert_eq!(store.read(ConfigKey::MinimaxApiKey), Some("sk"));

        let rendered = text(&panel.build_lines());
        assert!(rendered.contains("[••█]"));
        assert!(!rendered.contains("[sk█]"));

        send(&mut panel, &mut store, ctrl('u'));
        assert!(text(&panel.build_lines()).contains("[sk█]"));

        send(&mut panel, &mut store, ctrl('k'));
        assert_eq!(store.read(ConfigKey::MinimaxApiKey), Some(""));
    }

    #[test]
    fn test_q_quits_only_on_selector_rows() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        assert_eq!(panel.handle_event(&key(KeyCode::Char('q'))), Some(Action::Quit));

        send(&mut panel, &mut store, key(KeyCode::Tab));
        assert_eq!(
            panel.handle_event(&key(KeyCode::Char('q'))),
            Some(Action::ApiKeyInput("q".to_string()))
        );
        assert_eq!(panel.handle_event(&key(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_lines_show_presets_and_links() {
        let store = store_with(Some("china"), None);
        let panel = ProviderPanel::new(&store, Mode::Act, true);
        let rendered = text(&panel.build_lines());

        assert!(rendered.contains("◂ api.minimaxi.com ▸"));
        assert!(rendered.contains("Requests go to https://api.minimaxi.com/anthropic"));
        assert!(rendered.contains("platform.minimaxi.com"));
        assert!(rendered.contains("Select a model..."));
        assert!(rendered.contains("Context: 192K"));
        assert!(rendered.contains("No model selected, showing MiniMax-M2"));
    }

    #[test]
    fn test_known_model_has_no_fallback_note() {
        let store = store_with(None, Some("MiniMax-M2-Stable"));
        let panel = ProviderPanel::new(&store, Mode::Act, true);
        let rendered = text(&panel.build_lines());

        assert!(!rendered.contains("showing"));
        assert!(rendered.contains("Context: 192K"));
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut store = store_with(None, None);
        let mut panel = ProviderPanel::new(&store, Mode::Act, true);
        send(&mut panel, &mut store, key(KeyCode::Tab));

        send(&mut panel, &mut store, Event::Paste("sk-one\r\ntwo\t".to_string()));
        assert_eq!(store.read(ConfigKey::MinimaxApiKey), Some("sk-onetwo"));
    }

    #[test]
    fn test_lines_show_custom_endpoint_host() {
        let store = store_with(Some("https://my.proxy.example/v1"), Some("my-model"));
        let panel = ProviderPanel::new(&store, Mode::Act, true);
        let rendered = text(&panel.build_lines());

        assert!(rendered.contains("◂ Custom... ▸"));
        assert!(rendered.contains("→ my.proxy.example"));
        assert!(rendered.contains("[my-model]"));
        // Unknown model falls back to the default model's info
        assert!(rendered.contains("Max output: 128K"));
        assert!(rendered.contains("my-model is not in the catalog, showing MiniMax-M2"));
    }

    #[test]
    fn test_endpoint_host() {
        assert_eq!(endpoint_host("https://a.example/v1"), Some("a.example".to_string()));
        assert_eq!(endpoint_host("not a url"), None);
    }
}
