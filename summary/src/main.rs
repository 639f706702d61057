// File: summary/src/main.rs
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use mongodb_summary::config::manager::ConfigOverrides;
use mongodb_summary::{
    collect_summary, report, ConfigManager, MongoConnectionFactory, SystemProcessInspector,
};

/// Print a diagnostic summary of a MongoDB deployment
#[derive(Debug, Parser)]
#[command(name = "mongodb-summary", version)]
struct Cli {
    /// Seed host (host:port or a full mongodb:// URI)
    #[arg(long, env = "MONGODB_SUMMARY_HOST")]
    host: Option<String>,

    /// Log the raw server replies
    #[arg(long)]
    debug: bool,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of serverStatus readings for the operation counters
    #[arg(long)]
    samples: Option<u32>,

    /// Seconds between two readings
    #[arg(long)]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("Cannot initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("mongodb_summary={}", level).parse()?)
        .add_directive("mongodb=warn".parse()?);

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        seed_host: cli.host,
        debug: cli.debug,
        sample_count: cli.samples,
        sample_interval_seconds: cli.interval_secs,
    };
    let config = ConfigManager::load(cli.config.as_deref(), overrides).await?;
    info!("Summarizing deployment behind {}", config.seed_host);

    let factory = MongoConnectionFactory::new(&config);
    let summary = collect_summary(&factory, &SystemProcessInspector, &config).await?;

    print!("{}", report::render(&summary));
    Ok(())
}
