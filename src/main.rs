//! Cellar Dump CLI application
//!
//! Command-line interface for exporting CellarTracker tables to CSV files.

use std::process;

use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use cellar_dump::auth::CredentialStore;
use cellar_dump::cli::{exit_code, handle_dump, handle_login, handle_logout, Cli, Commands};
use cellar_dump::config::AppConfig;
use cellar_dump::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = &result {
        tracing::debug!("Failed with {} error", e.category());
        eprintln!("Error: {}", e);
        process::exit(exit_code(&result));
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await;

    // Logging comes up before the config error is reported
    let configured_level = config
        .as_ref()
        .ok()
        .and_then(|c| c.logging.level.parse::<Level>().ok());
    init_logging(&cli, configured_level);
    let config = config?;

    info!("Cellar Dump v{} starting", env!("CARGO_PKG_VERSION"));

    let quiet = cli.global.quiet;
    let store = CredentialStore::keyring(config.service.service_name.as_str());
    match cli.command {
        Commands::Login => {
            info!("Executing login command");
            handle_login(&store)
        }
        Commands::Logout => {
            info!("Executing logout command");
            handle_logout(&store, quiet)
        }
        Commands::Dump(args) => {
            info!("Executing dump command");
            handle_dump(args, &config, &store, quiet).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli, configured_level: Option<Level>) {
    let log_level = cli
        .log_level()
        .or(configured_level)
        .unwrap_or(Level::WARN);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("cellar_dump={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
