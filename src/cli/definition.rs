//! Command line definition

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::config::ConfigCommands;
use super::list::ListArgs;
use crate::tui::AVAILABLE_THEMES;

#[derive(Parser)]
#[command(name = "todo-cards")]
#[command(about = "Terminal to-do list with expandable task cards")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, env = "TODO_CARDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Color theme
    #[arg(long, global = true, value_parser = PossibleValuesParser::new(AVAILABLE_THEMES))]
    pub theme: Option<String>,

    /// Start with an empty list instead of the starting tasks
    #[arg(long, global = true)]
    pub empty: bool,

    /// Skip expand/collapse animations
    #[arg(long, global = true)]
    pub no_animations: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the starting task list and exit
    List(ListArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
