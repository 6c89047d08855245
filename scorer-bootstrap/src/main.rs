use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use scorer_infrastructure::CONFIG_PATH_ENV;

#[derive(Parser, Debug)]
#[command(name = "activity-scorer")]
#[command(about = "Wallet activity and trust scoring service", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Also write daily-rotated logs into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server and scheduled recompute (default)
    Serve,
    /// Score the given wallets once, or every known wallet when none are given
    Recompute { wallets: Vec<String> },
}

fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "activity-scorer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_dir.as_ref());

    if let Some(config) = args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => scorer_bootstrap::run_standalone().await,
        Command::Recompute { wallets } => scorer_bootstrap::run_recompute_once(wallets).await,
    }
}
