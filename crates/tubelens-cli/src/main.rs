mod analyze;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tubelens")]
#[command(about = "YouTube channel performance analysis and recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyse a single channel; any failure aborts the run
    Analyze {
        /// Channel handle, with or without the leading `@`
        handle: String,
        /// Skip writing the markdown report
        #[arg(long)]
        no_report: bool,
        /// Print the analysis as JSON instead of the console summary
        #[arg(long)]
        json: bool,
    },
    /// Analyse every configured channel, isolating per-channel failures
    Batch {
        /// Channel list YAML (defaults to `TUBELENS_CHANNELS_PATH`)
        #[arg(long)]
        channels: Option<PathBuf>,
        /// Analyse these handles instead of the channel list (repeatable)
        #[arg(long = "channel")]
        channel: Vec<String>,
        /// Skip writing markdown reports
        #[arg(long)]
        no_report: bool,
    },
    /// List the channels in the channel list
    Channels {
        #[arg(
            long,
            env = "TUBELENS_CHANNELS_PATH",
            default_value = "./config/channels.yaml"
        )]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Channels { path } => {
            init_tracing(&std::env::var("TUBELENS_LOG_LEVEL").unwrap_or_else(|_| "info".into()))?;
            analyze::run_list_channels(&path)
        }
        Commands::Analyze {
            handle,
            no_report,
            json,
        } => {
            let config = tubelens_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            analyze::run_analyze(&config, &handle, no_report, json).await
        }
        Commands::Batch {
            channels,
            channel,
            no_report,
        } => {
            let config = tubelens_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            analyze::run_batch(&config, channels.as_deref(), &channel, no_report).await
        }
    }
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
