pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod parser;
pub mod services;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
pub use config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    debug!(catalog_enabled = config.catalog.enabled, "Dispatching command");

    match command {
        Commands::ImportTitle { title } => {
            let title = title.join(" ");
            cli::cmd_import_title(&config, &title).await
        }
        Commands::ImportYear { year } => cli::cmd_import_year(&config, year).await,
        Commands::Search { query } => {
            let query = query.join(" ");
            cli::cmd_search(&config, &query).await
        }
        Commands::Genre { name } => cli::cmd_list_by_genre(&config, &name).await,
        Commands::Year { year } => cli::cmd_list_by_year(&config, year).await,
        Commands::Info { id } => cli::cmd_anime_info(&config, &id).await,
        Commands::Categories { id: None } => cli::cmd_categories(&config).await,
        Commands::Categories { id: Some(id) } => cli::cmd_category_info(&config, id).await,
        Commands::Watch { anime_id, status } => cli::cmd_watch(&config, anime_id, status).await,
        Commands::UpdateEntry {
            entry_id,
            status,
            score,
            episodes,
        } => {
            let update = models::WatchUpdate {
                status,
                score,
                episodes_watched: episodes,
            };
            cli::cmd_update_entry(&config, entry_id, update).await
        }
        Commands::Unwatch { entry_id } => cli::cmd_unwatch(&config, entry_id).await,
        Commands::Watchlist { status } => cli::cmd_watchlist(&config, status).await,
        Commands::WatchStats => cli::cmd_watch_stats(&config).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
