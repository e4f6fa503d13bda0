//! Local library listing command handlers

use super::print_anime_line;
use crate::config::Config;
use crate::db::Store;
use crate::models::Anime;

fn print_results(header: &str, anime_list: &[Anime]) {
    if anime_list.is_empty() {
        println!("No anime found for {header}.");
        return;
    }

    println!("Anime for {header} ({} total)", anime_list.len());
    println!("{:-<60}", "");
    for anime in anime_list {
        print_anime_line(anime);
    }
}

pub async fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let results = store.find_anime_by_title_containing(query).await?;
    print_results(&format!("'{query}'"), &results);
    Ok(())
}

pub async fn cmd_list_by_genre(config: &Config, genre: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let results = store.list_anime_by_category(genre).await?;
    print_results(&format!("genre '{genre}'"), &results);
    Ok(())
}

pub async fn cmd_list_by_year(config: &Config, year: i32) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let results = store.list_anime_by_release_year(year).await?;
    print_results(&format!("year {year}"), &results);
    Ok(())
}
