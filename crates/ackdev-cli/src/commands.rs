use super::args::{Cli, Commands};
use super::handlers;
use crate::logging;
use ackdev_runtime::{Settings, resolve_settings_path};
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level, cli.log_file.as_deref())?;

    let settings_path = resolve_settings_path(cli.config.as_deref())?;
    let settings = Settings::load_from(&settings_path)?;
    tracing::debug!("Loaded settings from {}", settings_path.display());

    match cli.command {
        Commands::Generate(args) => handlers::generate::handle(args, &settings),
    }
}
