//! MiniMax provider profile: entrypoints, model catalog, signup links

use super::models::{ModelCatalog, ModelInfo};
use crate::reconciler::{PresetSet, ReconcilerConfig};

pub const PROVIDER_NAME: &str = "MiniMax";

/// Entrypoint used when none is configured
pub const DEFAULT_API_LINE: &str = "international";
pub const DEFAULT_MODEL_ID: &str = "MiniMax-M2";

const SIGNUP_URL_INTERNATIONAL: &str =
    "https://www.minimax.io/platform/user-center/basic-information/interface-key";
const SIGNUP_URL_CHINA: &str =
    "https://platform.minimaxi.com/user-center/basic-information/interface-key";

/// A regional API entrypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrypoint {
    pub id: &'static str,
    pub host: &'static str,
}

pub const ENTRYPOINTS: &[Entrypoint] = &[
    Entrypoint {
        id: "international",
        host: "api.minimax.io",
    },
    Entrypoint {
        id: "china",
        host: "api.minimaxi.com",
    },
];

pub fn entrypoint(id: &str) -> Option<&'static Entrypoint> {
    ENTRYPOINTS.iter().find(|e| e.id == id)
}

/// Base URL requests go to. Presets resolve to their host; anything else
/// is taken verbatim.
pub fn resolve_base_url(api_line: Option<&str>) -> String {
    let line = api_line.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_API_LINE);
    match entrypoint(line) {
        Some(e) => format!("https://{}/anthropic", e.host),
        None => line.to_string(),
    }
}

/// Where to obtain an API key for the configured entrypoint
pub fn signup_url(api_line: Option<&str>) -> &'static str {
    if api_line == Some("china") {
        SIGNUP_URL_CHINA
    } else {
        SIGNUP_URL_INTERNATIONAL
    }
}

pub fn model_catalog() -> ModelCatalog {
    let mut catalog = ModelCatalog::new(DEFAULT_MODEL_ID);
    catalog.register(
        ModelInfo::new("MiniMax-M2", 128_000, 192_000)
            .with_prices(0.3, 1.2)
            .with_prompt_cache(0.375, 0.03)
            .with_description(
                "Agentic coding model with interleaved thinking, built for end-to-end tool use",
            ),
    );
    catalog.register(
        ModelInfo::new("MiniMax-M2-Stable", 128_000, 192_000)
            .with_prices(0.3, 1.2)
            .with_prompt_cache(0.375, 0.03)
            .with_description("MiniMax-M2 served with higher rate limits for sustained workloads"),
    );
    catalog
}

/// Entrypoint field: region presets, empty means the default region, and
/// an empty custom draft leaves the stored line alone.
pub fn entrypoint_reconciler_config() -> ReconcilerConfig {
    ReconcilerConfig {
        name: "entrypoint",
        presets: PresetSet::new(ENTRYPOINTS.iter().map(|e| e.id)),
        empty_fallback: Some(DEFAULT_API_LINE.to_string()),
        none_option: false,
        write_empty_custom: false,
    }
}

/// Model field: catalog ids, empty is "no selection", and switching to
/// custom always records the draft.
pub fn model_reconciler_config(catalog: &ModelCatalog) -> ReconcilerConfig {
    ReconcilerConfig {
        name: "model",
        presets: PresetSet::new(catalog.ids()),
        empty_fallback: None,
        none_option: true,
        write_empty_custom: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(None), "https://api.minimax.io/anthropic");
        assert_eq!(resolve_base_url(Some("")), "https://api.minimax.io/anthropic");
        assert_eq!(resolve_base_url(Some("china")), "https://api.minimaxi.com/anthropic");
        assert_eq!(
            resolve_base_url(Some("https://my.proxy.example")),
            "https://my.proxy.example"
        );
    }

    #[test]
    fn test_signup_url() {
        assert_eq!(signup_url(Some("china")), SIGNUP_URL_CHINA);
        assert_eq!(signup_url(Some("international")), SIGNUP_URL_INTERNATIONAL);
        assert_eq!(signup_url(None), SIGNUP_URL_INTERNATIONAL);
        assert_eq!(signup_url(Some("https://x.example")), SIGNUP_URL_INTERNATIONAL);
    }

    #[test]
    fn test_catalog_has_default() {
        let catalog = model_catalog();
        assert!(catalog.contains(DEFAULT_MODEL_ID));
        assert_eq!(catalog.default_model(), DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_reconciler_configs() {
        let endpoint = entrypoint_reconciler_config();
        assert_eq!(endpoint.presets.iter().collect::<Vec<_>>(), vec!["international", "china"]);
        assert!(!endpoint.write_empty_custom);

        let model = model_reconciler_config(&model_catalog());
        assert!(model.presets.contains("MiniMax-M2"));
        assert!(model.write_empty_custom);
        assert!(model.none_option);
    }
}
