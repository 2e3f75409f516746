//! slotter CLI
//!
//! Command-line interface for scheduling mentor/fellow meetings from a
//! request CSV.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::OutputFormat;

/// slotter - greedy mentor/fellow meeting slot scheduler
#[derive(Parser, Debug)]
#[command(name = "slotter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Schedule every time block in a request CSV
    Schedule {
        /// Request CSV (mentor, day, period, requested companies...)
        csv: PathBuf,

        /// Number of meeting slots per time block
        #[arg(long)]
        slots: Option<usize>,

        /// Number of request columns per mentor
        #[arg(long)]
        request_columns: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Schedule time blocks concurrently
        #[arg(long)]
        parallel: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref())?;

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        match config.logging.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.command {
        Commands::Schedule {
            csv,
            slots,
            request_columns,
            format,
            parallel,
        } => {
            commands::apply_overrides(&mut config, slots, request_columns)?;
            commands::schedule(&config, &csv, format, parallel).await?;
        }
        Commands::Config => {
            commands::show_config(&config)?;
        }
    }

    Ok(())
}
