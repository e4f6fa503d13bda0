//! Watch list command handlers

use crate::config::Config;
use crate::db::Store;
use crate::domain::AnimeId;
use crate::models::{WatchEntry, WatchStatus, WatchUpdate};
use crate::services::WatchListService;

async fn build_service(config: &Config) -> anyhow::Result<WatchListService> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(WatchListService::new(store))
}

fn print_entry(entry: &WatchEntry) {
    println!(
        "[{}] {} (anime {})",
        entry.id, entry.anime_title, entry.anime_id
    );
    println!(
        "    Status: {} | Score: {} | Watched: {} eps",
        entry.status, entry.score, entry.episodes_watched
    );
}

pub async fn cmd_watch(config: &Config, anime_id: i32, status: WatchStatus) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    let entry = service.add(AnimeId::new(anime_id), status).await?;

    println!("✓ On your list");
    print_entry(&entry);
    Ok(())
}

pub async fn cmd_update_entry(
    config: &Config,
    entry_id: i32,
    update: WatchUpdate,
) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    let entry = service.update(entry_id, update).await?;

    println!("✓ Entry updated");
    print_entry(&entry);
    Ok(())
}

pub async fn cmd_unwatch(config: &Config, entry_id: i32) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    service.remove(entry_id).await?;

    println!("✓ Removed entry {entry_id} from your list");
    Ok(())
}

pub async fn cmd_watchlist(config: &Config, status: Option<WatchStatus>) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    let entries = service.list(status).await?;

    if entries.is_empty() {
        match status {
            Some(status) => println!("Nothing marked {status}."),
            None => println!("Your watch list is empty. Add anime with 'watch <id>'."),
        }
        return Ok(());
    }

    println!("Watch list ({} entries)", entries.len());
    println!("{:-<60}", "");
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

pub async fn cmd_watch_stats(config: &Config) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    let counts = service.status_counts().await?;

    println!("Watch list by status");
    println!("{:-<30}", "");
    for (status, count) in &counts {
        println!("{:<15} {count:>5}", status.as_str());
    }
    println!("{:<15} {:>5}", "total", counts.values().sum::<u64>());
    Ok(())
}
