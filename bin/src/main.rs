//! partnertap CLI - Incremental Shopify Partners transaction extractor.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "partnertap")]
#[command(about = "Incremental Shopify Partners transaction extractor", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress and log output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records day by day and write them to stdout
    Sync {
        /// Config file (JSON) with organization_id and shopify_partners_access_token
        #[arg(short, long)]
        config: PathBuf,

        /// State file (JSON) with bookmarks from a previous run
        #[arg(long)]
        state: Option<PathBuf>,

        /// Write updated bookmarks to this file as days complete
        #[arg(long)]
        state_output: Option<PathBuf>,

        /// Stream to extract
        #[arg(long, default_value = "transactions")]
        stream: String,

        /// Start date (YYYY-MM-DD). Overrides the bookmark and the config file.
        #[arg(short = 'd', long)]
        start_date: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "singer")]
        format: Format,
    },

    /// Print the catalog of supported streams
    Discover {
        /// Pretty-print the catalog
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("partnertap={level},partnertap_fetch={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Sync {
            config,
            state,
            state_output,
            stream,
            start_date,
            format,
        } => {
            commands::sync::sync(
                commands::sync::SyncArgs {
                    config,
                    state,
                    state_output,
                    stream,
                    start_date,
                    format,
                },
                cli.quiet,
            )
            .await
        }
        Commands::Discover { pretty } => commands::discover::discover(pretty),
    }
}
