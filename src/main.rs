//! todo-cards - Terminal to-do list with expandable task cards

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use todo_cards::cli::{self, Cli, Commands};
use todo_cards::tui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TODO_CARDS_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("todo_cards=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "todo-cards", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::List(args)) => cli::list::run(&cli.global, args).await,
        Some(Commands::Config { command }) => cli::config::run(&cli.global, command).await,
        None => {
            let config = cli::resolve_config(&cli.global)?;
            tui::run(config).await
        }
    }
}
