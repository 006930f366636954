// src/main.rs

//! immich-sync CLI
//!
//! Single entry point: configuration comes entirely from the environment
//! (plus the optional settings file), so there are no functional flags.

use std::path::Path;

use clap::Parser;

use immich_sync::config::{Config, SETTINGS_FILE, UploaderSettings};
use immich_sync::error::Result;
use immich_sync::{logging, pipeline};

/// immich-sync - Screenshots to Immich album synchronizer
#[derive(Parser, Debug)]
#[command(
    name = "immich-sync",
    version,
    about = "Synchronizes a local screenshots folder to an Immich server album"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        if log::log_enabled!(log::Level::Error) {
            log::error!("{}", error);
        } else {
            // Logger never came up; still surface the failure.
            eprintln!("Error: {error}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = UploaderSettings::load_or_default(Path::new(SETTINGS_FILE));
    logging::init(Path::new(&settings.log_file), cli.verbose)?;

    log::info!("immich-sync starting...");

    let config = Config::from_env(settings)?;
    config.validate()?;

    pipeline::run(&config).await?;

    Ok(())
}
