#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

use cli::commands::Cli;
use content_router::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; credentials may come from the real environment.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    app::dispatch::dispatch(cli, config).await
}
