//! Car rental terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local broker
//! carrental-tui --server 127.0.0.1:61613
//!
//! # Authenticate and log protocol detail
//! carrental-tui --login guest --passcode guest --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Arc};

use carrental_tui::{ClientConfig, config};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Car rental reservation client
#[derive(Parser, Debug)]
#[command(name = "carrental-tui")]
#[command(about = "Terminal client for reserving and looking up rental cars")]
#[command(version)]
struct Args {
    /// Broker address (host:port)
    #[arg(short, long, default_value = config::DEFAULT_SERVER_ADDR)]
    server: String,

    /// Virtual host sent in the CONNECT frame
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Broker login
    #[arg(long)]
    login: Option<String>,

    /// Broker passcode
    #[arg(long)]
    passcode: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file path
    #[arg(long, default_value = config::DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            server_addr: args.server,
            host: args.host,
            login: args.login,
            passcode: args.passcode,
            log_level: args.log_level,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from(Args::parse());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let log_file = File::create(&config.log_file)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!("Car rental client starting");
    tracing::info!("Broker at {}", config.server_addr);

    carrental_tui::run(config).await?;

    tracing::info!("Car rental client stopped");
    Ok(())
}
