//! Catalog import command handlers

use super::print_anime_line;
use crate::clients::JikanClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{DefaultImportService, ImportService};
use std::sync::Arc;

async fn build_service(config: &Config) -> anyhow::Result<DefaultImportService> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let catalog = Arc::new(JikanClient::from_config(&config.catalog)?);
    Ok(DefaultImportService::new(store, catalog, &config.catalog))
}

pub async fn cmd_import_title(config: &Config, title: &str) -> anyhow::Result<()> {
    let service = build_service(config).await?;

    println!("Importing: {title}");
    match service.import_by_title(title).await? {
        Some(anime) => {
            println!();
            print_anime_line(&anime);
            if !anime.categories.is_empty() {
                let names: Vec<&str> = anime.categories.iter().map(|c| c.name.as_str()).collect();
                println!("    Categories: {}", names.join(", "));
            }
        }
        None => println!("Catalog returned no results for '{title}'"),
    }

    Ok(())
}

pub async fn cmd_import_year(config: &Config, year: i32) -> anyhow::Result<()> {
    let service = build_service(config).await?;

    println!("Importing anime that started airing in {year}...");
    let outcome = service.import_year_batch(year).await?;

    println!();
    println!(
        "Imported {} of {} records",
        outcome.imported.len(),
        outcome.total()
    );
    println!("{:-<60}", "");
    for anime in &outcome.imported {
        print_anime_line(anime);
    }

    if !outcome.skipped.is_empty() {
        println!();
        println!("Skipped ({}):", outcome.skipped.len());
        for skipped in &outcome.skipped {
            let id = skipped
                .mal_id
                .map_or_else(|| "?".to_string(), |id| id.to_string());
            println!(
                "  #{} MAL {} {}: {}",
                skipped.position + 1,
                id,
                skipped.title.as_deref().unwrap_or("<untitled>"),
                skipped.reason
            );
        }
    }

    Ok(())
}
