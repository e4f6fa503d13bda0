use crate::config::Config;
use crate::db::Store;
use crate::domain::AnimeId;

pub async fn cmd_anime_info(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let id: i32 = if let Ok(id) = id_str.parse() {
        id
    } else {
        println!("Invalid anime ID: {id_str}");
        return Ok(());
    };

    let Some(anime) = store.get_anime(AnimeId::new(id)).await? else {
        println!("Anime with ID {id} not found.");
        return Ok(());
    };

    println!("Anime Info");
    println!("{:-<60}", "");
    println!("Title:    {}", anime.title);
    println!("ID:       {}", anime.id);
    println!(
        "Episodes: {}",
        anime
            .episodes
            .map_or_else(|| "?".to_string(), |e| e.to_string())
    );
    println!("Status:   {}", anime.status.as_deref().unwrap_or("?"));
    println!(
        "Released: {}",
        anime
            .release_date
            .map_or_else(|| "unknown".to_string(), |d| d.to_string())
    );
    if let Some(url) = &anime.image_url {
        println!("Image:    {url}");
    }
    if !anime.categories.is_empty() {
        let names: Vec<&str> = anime.categories.iter().map(|c| c.name.as_str()).collect();
        println!("Genres:   {}", names.join(", "));
    }
    if let Some(synopsis) = &anime.synopsis {
        println!();
        println!("{synopsis}");
    }

    println!();
    Ok(())
}
