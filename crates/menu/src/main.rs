//! Storefront menu CLI.
//!
//! Fetches the category menu once and prints it as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use storefront_menu::config::load_menu_map;
use storefront_menu::{Config, HttpDispatcher, MenuModule};

#[derive(Debug, Parser)]
#[command(name = "storefront-menu", about = "Fetch and print the storefront navigation menu")]
struct Cli {
    /// Menu slot config (overrides MENU_CONFIG).
    #[arg(long)]
    menu_config: Option<PathBuf>,

    /// Locale stamped on the menu (overrides API_LOCALE).
    #[arg(long)]
    locale: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(locale) = cli.locale {
        config.api_locale = locale;
    }

    let mut options = config.store_options()?;
    if let Some(path) = cli.menu_config.as_deref() {
        options.menu_map = Some(load_menu_map(path)?);
    }

    info!(base_url = %config.api_base_url, locale = %config.api_locale, "fetching menu");

    let dispatcher = HttpDispatcher::new(
        &config.api_base_url,
        config.api_access_key.clone(),
        config.api_timeout,
    )
    .context("failed to build API client")?;
    let module = MenuModule::new(Arc::new(dispatcher), options);

    module.sw_get_menu().await?;

    let menu = module.data_menu();
    let json = if cli.pretty {
        serde_json::to_string_pretty(&menu)
    } else {
        serde_json::to_string(&menu)
    }
    .context("failed to serialize menu")?;

    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_menu=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
