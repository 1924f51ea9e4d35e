use super::models::{ModelCatalog, ModelInfo};
use crate::config::{ApiConfiguration, Mode};

/// Model selection resolved for a plan/act mode
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSelection<'a> {
    /// Stored id, empty when nothing has been picked
    pub model_id: &'a str,
    /// Info to display; the default model's when the id is unknown
    pub model_info: Option<&'a ModelInfo>,
}

pub fn normalize_api_configuration<'a>(
    config: &'a ApiConfiguration,
    mode: Mode,
    catalog: &'a ModelCatalog,
) -> NormalizedSelection<'a> {
    let model_id = config.model_id_for(mode);
    NormalizedSelection {
        model_id,
        model_info: catalog.info_for(model_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;
    use crate::provider::minimax::{model_catalog, DEFAULT_MODEL_ID};

    #[test]
    fn test_unset_model_shows_default_info() {
        let config = ApiConfiguration::default();
        let catalog = model_catalog();
        let selection = normalize_api_configuration(&config, Mode::Act, &catalog);

        assert_eq!(selection.model_id, "");
        assert_eq!(selection.model_info.unwrap().name, DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_selection_follows_mode() {
        let mut config = ApiConfiguration::default();
        config.set(ConfigKey::PlanModeApiModelId, "MiniMax-M2-Stable");
        config.set(ConfigKey::ActModeApiModelId, "my-finetune");
        let catalog = model_catalog();

        let plan = normalize_api_configuration(&config, Mode::Plan, &catalog);
        assert_eq!(plan.model_id, "MiniMax-M2-Stable");
        assert_eq!(plan.model_info.unwrap().name, "MiniMax-M2-Stable");

        let act = normalize_api_configuration(&config, Mode::Act, &catalog);
        assert_eq!(act.model_id, "my-finetune");
        assert_eq!(act.model_info.unwrap().name, DEFAULT_MODEL_ID);
    }
}
