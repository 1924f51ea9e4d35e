mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod logging;
mod provider;
mod reconciler;

use color_eyre::eyre::Result;
use cli::Cli;
use config::ConfigManager;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    let mut config_manager = ConfigManager::new(cli.config_dir.clone())?;
    config_manager.ensure_config_dir()?;

    let level = logging::resolve_level(
        cli.log_level.as_deref(),
        &config_manager.app_config().general.log_level,
    )
    .to_string();
    let _log_guard = logging::init(&config_manager.log_file_path(), &level)?;
    config_manager.report_load_warnings();

    let mut app = app::App::with_cli(&cli, config_manager)?;
    app.run()?;

    Ok(())
}
