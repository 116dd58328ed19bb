//! Verso CLI
//!
//! Command-line interface for the commit ledger

use clap::{Parser, Subcommand};
use verso_core::logging_facility::{self, Profile};
use verso_core_types::RequestId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "verso")]
#[command(about = "Verso - append-only commit metadata ledger", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    /// Enable logging to stderr with the given profile (development, production)
    #[arg(long, global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the ledger tables
    Init,
    /// Record a new commit
    Commit(commands::commit::CommitArgs),
    /// Print the highest commit id
    Head,
    /// Print one commit with its properties
    Show(commands::show::ShowArgs),
    /// List commits, highest id first
    Log(commands::log::LogArgs),
}

fn main() {
    let cli = Cli::parse();
    if let Some(profile) = cli.log {
        logging_facility::init(profile);
    }

    let request_id = RequestId::new();
    let span = tracing::info_span!("verso_cli", request_id = %request_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli.global),
        Commands::Commit(args) => commands::commit::execute(&cli.global, args),
        Commands::Head => commands::head::execute(&cli.global),
        Commands::Show(args) => commands::show::execute(&cli.global, args),
        Commands::Log(args) => commands::log::execute(&cli.global, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.with_request_id(request_id));
        std::process::exit(1);
    }
}
