use crate::config::Config;
use crate::db::Store;
use crate::domain::CategoryId;

pub async fn cmd_categories(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let categories = store.list_categories().await?;

    if categories.is_empty() {
        println!("No categories yet. Import some anime first.");
        return Ok(());
    }

    println!("Categories ({} total)", categories.len());
    println!("{:-<40}", "");
    for category in categories {
        println!("[{}] {}", category.id, category.name);
    }

    Ok(())
}

pub async fn cmd_category_info(config: &Config, id: i32) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(entry) = store.get_category_with_anime(CategoryId::new(id)).await? else {
        println!("Category with ID {id} not found.");
        return Ok(());
    };

    println!(
        "{} ({} anime)",
        entry.category.name,
        entry.anime_ids.len()
    );
    println!("{:-<40}", "");
    for anime_id in entry.anime_ids {
        if let Some(anime) = store.get_anime(anime_id).await? {
            println!("[{}] {}", anime.id, anime.title);
        }
    }

    Ok(())
}
