//! xtask - Development tasks for todo-cards
//!
//! `cargo xtask gen-docs` regenerates `docs/cli/reference.md` from the clap
//! definitions in `todo_cards::cli`, so the reference never drifts from the
//! flags the binary accepts.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DOCS_DIR: &str = "docs/cli";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for todo-cards")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs {
        /// Directory the reference is written to
        #[arg(long, default_value = DEFAULT_DOCS_DIR)]
        out_dir: PathBuf,
    },
}

fn main() {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs { out_dir } => generate_cli_docs(&out_dir),
    }
}

fn cli_reference() -> String {
    clap_markdown::help_markdown::<todo_cards::cli::Cli>()
}

fn generate_cli_docs(docs_dir: &Path) {
    fs::create_dir_all(docs_dir).expect("Failed to create docs directory");

    let output_path = docs_dir.join("reference.md");
    fs::write(&output_path, cli_reference()).expect("Failed to write CLI reference");

    println!("Generated CLI reference at {}", output_path.display());
}
