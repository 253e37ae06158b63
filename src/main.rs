mod interface;

use std::io;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interface::cli::{self, Cli};
use nanokeep::Config;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nanokeep={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    debug!("nanokeep v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = cli::run(&args, &config, &mut stdin.lock(), &mut stdout.lock()) {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
