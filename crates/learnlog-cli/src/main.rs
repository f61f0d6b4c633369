//! learnlog CLI
//!
//! Command-line front end for the learning journal

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use learnlog_core::logging_facility;

mod commands;
mod settings;

use commands::{CommandContext, CommandResult};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "learnlog")]
#[command(about = "learnlog - a personal learning journal", long_about = None)]
struct Cli {
    /// Journal database path (overrides configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Account operations
    User(commands::user::UserArgs),
    /// Journal entry operations
    Entry(commands::entry::EntryArgs),
    /// Tag operations
    Tag(commands::tag::TagArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CommandResult {
    let mut settings = Settings::load()?;
    if let Some(db) = cli.db {
        settings.database_path = db;
    }
    logging_facility::init(settings.profile()?);

    let ctx = CommandContext::open(settings)?;
    tracing::debug!(
        request_id = %ctx.request.request_id,
        db = %ctx.db.path().display(),
        "command start"
    );

    match cli.command {
        Commands::User(args) => commands::user::execute(&ctx, args),
        Commands::Entry(args) => commands::entry::execute(&ctx, args),
        Commands::Tag(args) => commands::tag::execute(&ctx, args),
    }
}
