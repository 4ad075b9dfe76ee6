//! token-lookup - Token market data CLI
//!
//! Normalized price, liquidity and volume from DexScreener with Defined.fi fallback.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use token_lookup::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (DEFINED_API_KEY goes here, not in the config file)
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config = cli::resolve_config(&app)?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    let found = cli::execute(app, &config).await?;
    if !found {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    // Logs go to stderr so stdout stays pure JSON
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}
