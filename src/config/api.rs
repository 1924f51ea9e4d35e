//! Provider API configuration
//!
//! Stored in `~/.config/provider-panel/provider.toml`

use serde::{Deserialize, Serialize};

/// Plan/act context the model selection applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Plan,
    #[default]
    Act,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Plan => Mode::Act,
            Mode::Act => Mode::Plan,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Plan => "plan",
            Mode::Act => "act",
        }
    }
}

/// String-valued configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    MinimaxApiLine,
    MinimaxApiKey,
    PlanModeApiModelId,
    ActModeApiModelId,
}

impl ConfigKey {
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::MinimaxApiLine,
        ConfigKey::MinimaxApiKey,
        ConfigKey::PlanModeApiModelId,
        ConfigKey::ActModeApiModelId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::MinimaxApiLine => "minimaxApiLine",
            ConfigKey::MinimaxApiKey => "minimaxApiKey",
            ConfigKey::PlanModeApiModelId => "planModeApiModelId",
            ConfigKey::ActModeApiModelId => "actModeApiModelId",
        }
    }

    /// Whether the value must be kept out of logs
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::MinimaxApiKey)
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys a mode-scoped field writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFieldKeys {
    pub plan: ConfigKey,
    pub act: ConfigKey,
}

impl ModeFieldKeys {
    pub const API_MODEL_ID: ModeFieldKeys = ModeFieldKeys {
        plan: ConfigKey::PlanModeApiModelId,
        act: ConfigKey::ActModeApiModelId,
    };

    pub fn for_mode(&self, mode: Mode) -> ConfigKey {
        match mode {
            Mode::Plan => self.plan,
            Mode::Act => self.act,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfiguration {
    /// Entrypoint preset id or a custom endpoint URL
    pub minimax_api_line: Option<String>,
    pub minimax_api_key: Option<String>,
    pub plan_mode_api_model_id: Option<String>,
    pub act_mode_api_model_id: Option<String>,
    /// When false, a model pick applies to both plan and act
    pub plan_act_separate_models: bool,
}

impl Default for ApiConfiguration {
    fn default() -> Self {
        Self {
            minimax_api_line: None,
            minimax_api_key: None,
            plan_mode_api_model_id: None,
            act_mode_api_model_id: None,
            plan_act_separate_models: true,
        }
    }
}

impl std::fmt::Debug for ApiConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfiguration")
            .field("minimax_api_line", &self.minimax_api_line)
            .field(
                "minimax_api_key",
                &self.minimax_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("plan_mode_api_model_id", &self.plan_mode_api_model_id)
            .field("act_mode_api_model_id", &self.act_mode_api_model_id)
            .field("plan_act_separate_models", &self.plan_act_separate_models)
            .finish()
    }
}

impl ApiConfiguration {
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        *self.slot_mut(key) = Some(value.to_string());
    }

    /// Model id for a plan/act mode, empty when unset
    pub fn model_id_for(&self, mode: Mode) -> &str {
        self.get(ModeFieldKeys::API_MODEL_ID.for_mode(mode))
            .unwrap_or_default()
    }

    fn slot(&self, key: ConfigKey) -> &Option<String> {
        match key {
            ConfigKey::MinimaxApiLine => &self.minimax_api_line,
            ConfigKey::MinimaxApiKey => &self.minimax_api_key,
            ConfigKey::PlanModeApiModelId => &self.plan_mode_api_model_id,
            ConfigKey::ActModeApiModelId => &self.act_mode_api_model_id,
        }
    }

    fn slot_mut(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::MinimaxApiLine => &mut self.minimax_api_line,
            ConfigKey::MinimaxApiKey => &mut self.minimax_api_key,
            ConfigKey::PlanModeApiModelId => &mut self.plan_mode_api_model_id,
            ConfigKey::ActModeApiModelId => &mut self.act_mode_api_model_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_configuration() {
        let config = ApiConfiguration::default();
        assert!(config.minimax_api_line.is_none());
        assert!(config.plan_act_separate_models);
        assert_eq!(config.model_id_for(Mode::Act), "");
    }

    #[test]
    fn test_get_and_set() {
        let mut config = ApiConfiguration::default();
        config.set(ConfigKey::MinimaxApiLine, "china");
        config.set(ConfigKey::PlanModeApiModelId, "MiniMax-M2");

        assert_eq!(config.get(ConfigKey::MinimaxApiLine), Some("china"));
        assert_eq!(config.model_id_for(Mode::Plan), "MiniMax-M2");
        assert_eq!(config.model_id_for(Mode::Act), "");
    }

    #[test]
    fn test_set_empty_string_is_kept() {
        let mut config = ApiConfiguration::default();
        config.set(ConfigKey::ActModeApiModelId, "");
        assert_eq!(config.get(ConfigKey::ActModeApiModelId), Some(""));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = ApiConfiguration::default();
        config.set(ConfigKey::MinimaxApiKey, "sk-very-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_toml() {
        let toml_content = r#"
minimax_api_line = "https://my.proxy.example"
plan_mode_api_model_id = "MiniMax-M2"
plan_act_separate_models = false
"#;
        let config: ApiConfiguration = toml::from_str(toml_content).unwrap();
        assert_eq!(config.get(ConfigKey::MinimaxApiLine), Some("https://my.proxy.example"));
        assert_eq!(config.model_id_for(Mode::Plan), "MiniMax-M2");
        assert!(!config.plan_act_separate_models);
        assert!(config.minimax_api_key.is_none());
    }

    #[test]
    fn test_mode_field_keys() {
        let keys = ModeFieldKeys::API_MODEL_ID;
        assert_eq!(keys.for_mode(Mode::Plan), ConfigKey::PlanModeApiModelId);
        assert_eq!(keys.for_mode(Mode::Act), ConfigKey::ActModeApiModelId);
        assert_eq!(Mode::Plan.toggled(), Mode::Act);
    }

    #[test]
    fn test_config_key_names() {
        assert_eq!(ConfigKey::MinimaxApiLine.to_string(), "minimaxApiLine");
        assert_eq!(ConfigKey::ActModeApiModelId.as_str(), "actModeApiModelId");
        assert!(ConfigKey::MinimaxApiKey.is_secret());
        assert!(!ConfigKey::MinimaxApiLine.is_secret());
    }
}
