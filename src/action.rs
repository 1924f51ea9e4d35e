use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    FocusNext,
    FocusPrev,

    // Entrypoint field
    EntrypointSelected(String),
    EntrypointInput(String),

    // API key field
    ApiKeyInput(String),
    ToggleApiKeyVisibility,

    // Model field
    ModelSelected(String),
    ModelInput(String),

    /// Switch between plan and act model selection
    TogglePlanActMode,

    ConfigFileChanged(PathBuf),
}
