use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod render;

#[derive(Parser)]
#[command(name = "drift", version, about = "DRIFT - postcards from the unexpected")]
struct Cli {
    /// Load prompts from this JSON file instead of the bundled catalog
    #[arg(long, global = true, env = "DRIFT_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a card
    Draw(commands::draw::DrawArgs),
    /// List prompts matching a filter
    List(commands::list::ListArgs),
    /// Saved prompts
    Saved {
        #[command(subcommand)]
        action: commands::saved::SavedAction,
    },
    /// Share a prompt (the last drawn card by default)
    Share {
        /// Prompt id
        id: Option<String>,
    },
    /// Show the last drawn card and deck totals
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe categories and effort levels
    Categories,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DRIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();
    let result = match cli.command {
        Commands::Draw(args) => commands::draw::run(args, catalog),
        Commands::List(args) => commands::list::run(args, catalog),
        Commands::Saved { action } => commands::saved::run(action, catalog),
        Commands::Share { id } => commands::share::run(id, catalog),
        Commands::Status { json } => commands::status::run(json, catalog),
        Commands::Categories => commands::categories::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
