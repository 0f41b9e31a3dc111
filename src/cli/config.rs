//! `todo-cards config` subcommands

use anyhow::Result;
use clap::Subcommand;

use super::GlobalArgs;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print where the config file is read from
    Path,

    /// Print the effective configuration as TOML
    Show,
}

pub async fn run(global: &GlobalArgs, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let path = match &global.config {
                Some(path) => path.clone(),
                None => crate::config::config_path()?,
            };
            let note = if path.exists() { "" } else { " (not found, using defaults)" };
            println!("{}{}", path.display(), note);
        }
        ConfigCommands::Show => {
            let config = super::resolve_config(global)?;
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
