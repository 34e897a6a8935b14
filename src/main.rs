mod authz;
mod claims;
mod settings;
mod web;

use clap::Parser;
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "palisade", version, about = "Zero Trust Document Gateway")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    // load the resource catalog (immutable for the process lifetime)
    let catalog = authz::catalog::load(&settings.catalog.path)?;

    // start web server
    web::serve(settings, catalog).await?;
    Ok(())
}
