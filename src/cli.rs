use clap::Parser;
use std::path::PathBuf;

use crate::config::Mode;

/// Provider-Panel: terminal settings panel for the MiniMax provider
#[derive(Parser, Debug, Clone)]
#[command(name = "provider-panel")]
#[command(author = "RidgetopAI")]
#[command(version)]
#[command(about = "Configure the MiniMax endpoint, API key and model", long_about = None)]
pub struct Cli {
    /// Directory holding config.toml, theme.toml and provider.toml
    #[arg(short = 'C', long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Plan/act context whose model selection is edited
    #[arg(long, value_enum, default_value_t = Mode::Act)]
    pub mode: Mode,

    /// Log level (trace, debug, info, warn, error). Overrides config.toml.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Show only the entrypoint and API key fields
    #[arg(long, default_value_t = false)]
    pub hide_model_options: bool,

    /// Detect config file edits by polling mtimes instead of filesystem events
    #[arg(long, default_value_t = false)]
    pub tick_watcher: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
